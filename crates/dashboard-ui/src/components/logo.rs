use std::path::Path;

use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Logo lines beyond this are dropped.
pub const MAX_LOGO_LINES: usize = 8;

/// The sidebar logo.
///
/// A terminal cannot draw raster images, so a UTF-8 logo file is drawn as
/// text art and anything else is shown by its file name.
#[derive(Debug, Clone, PartialEq)]
pub enum Logo {
    Text(Vec<String>),
    Image { file_name: String },
}

impl Logo {
    /// Classify the logo file contents read from `path`.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) if !text.trim().is_empty() => Logo::Text(
                text.lines()
                    .take(MAX_LOGO_LINES)
                    .map(|l| l.trim_end().to_string())
                    .collect(),
            ),
            _ => Logo::Image {
                file_name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            },
        }
    }

    pub fn to_lines<'a>(&'a self, theme: &Theme) -> Vec<Line<'a>> {
        match self {
            Logo::Text(lines) => lines
                .iter()
                .map(|l| Line::from(Span::styled(l.as_str(), theme.header)))
                .collect(),
            Logo::Image { file_name } => vec![Line::from(vec![
                Span::styled("▣ ", theme.header),
                Span::styled(file_name.as_str(), theme.dim),
            ])],
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
