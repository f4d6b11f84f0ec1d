use crate::themes::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Shown in place of a metric that has no value for the current filter.
pub const NOT_AVAILABLE: &str = "–";

// ── MetricTile ───────────────────────────────────────────────────────────────

/// A single headline figure with its caption.
pub struct MetricTile<'a> {
    pub label: &'a str,
    /// Already formatted value, `None` when undefined.
    pub value: Option<String>,
    pub theme: &'a Theme,
}

impl<'a> MetricTile<'a> {
    pub fn new(label: &'a str, value: Option<String>, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            theme,
        }
    }

    /// Caption line followed by the value line.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let value = self
            .value
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        vec![
            Line::from(Span::styled(self.label, self.theme.label)),
            Line::from(Span::styled(value, self.theme.tile_value)),
        ]
    }
}

/// Lay `tiles` out side by side in equal columns across `area`.
pub fn render_tiles(frame: &mut Frame, area: Rect, tiles: &[MetricTile], theme: &Theme) {
    if tiles.is_empty() {
        return;
    }
    let constraints = vec![Constraint::Ratio(1, tiles.len() as u32); tiles.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (tile, column) in tiles.iter().zip(columns.iter()) {
        frame.render_widget(
            Paragraph::new(tile.to_lines()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border),
            ),
            *column,
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
