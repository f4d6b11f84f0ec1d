use crate::themes::Theme;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Configuration controlling visual appearance of a bar list.
pub struct BarListConfig {
    /// Columns reserved for the label, including padding.
    pub label_width: usize,
    /// Columns reserved for the value text after the bar.
    pub value_width: usize,
    /// Character used to draw the bar.
    pub filled_char: char,
}

impl Default for BarListConfig {
    fn default() -> Self {
        Self {
            label_width: 24,
            value_width: 14,
            filled_char: '\u{2588}', // █  FULL BLOCK
        }
    }
}

/// One labelled bar.
#[derive(Debug, Clone, PartialEq)]
pub struct BarItem {
    pub label: String,
    /// Bar length is proportional to this value.
    pub value: f64,
    /// Text printed after the bar.
    pub display: String,
}

impl BarItem {
    pub fn new(label: impl Into<String>, value: f64, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            display: display.into(),
        }
    }
}

// ── BarList ──────────────────────────────────────────────────────────────────

/// Horizontal bar chart drawn as text lines.
///
/// Each item renders as `label │████████ value`. Bars are scaled against the
/// largest value in the list; the first bar uses the highlight style and the
/// rest are muted.
pub struct BarList<'a> {
    pub items: Vec<BarItem>,
    pub theme: &'a Theme,
    pub config: BarListConfig,
}

impl<'a> BarList<'a> {
    pub fn new(items: Vec<BarItem>, theme: &'a Theme) -> Self {
        Self {
            items,
            theme,
            config: BarListConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BarListConfig) -> Self {
        self.config = config;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render the list for a panel `width` columns wide.
    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let bar_width = (width as usize)
            .saturating_sub(self.config.label_width + self.config.value_width + 2);
        let max = self
            .items
            .iter()
            .map(|i| i.value)
            .fold(0.0_f64, f64::max);

        self.items
            .iter()
            .enumerate()
            .map(|(rank, item)| {
                let filled = scaled_length(item.value, max, bar_width);
                let label = pad_to_width(
                    &truncate_to_width(&item.label, self.config.label_width.saturating_sub(1)),
                    self.config.label_width,
                );
                let bar: String = std::iter::repeat(self.config.filled_char)
                    .take(filled)
                    .collect();

                Line::from(vec![
                    Span::styled(label, self.theme.label),
                    Span::styled("│", self.theme.axis),
                    Span::styled(bar, self.theme.bar_style(rank)),
                    Span::styled(format!(" {}", item.display), self.theme.text),
                ])
            })
            .collect()
    }
}

/// Number of cells a bar for `value` occupies when `max` fills `width`.
/// Any positive value gets at least one cell.
fn scaled_length(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 || width == 0 {
        return 0;
    }
    let cells = (value / max * width as f64).round() as usize;
    cells.clamp(1, width)
}

/// Cut `s` to at most `max` display columns, ending with `…` when cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Right-pad `s` with spaces to `width` display columns.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.width());
    format!("{s}{}", " ".repeat(pad))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn items() -> Vec<BarItem> {
        vec![
            BarItem::new("bed_bath_table", 100.0, "100"),
            BarItem::new("toys", 50.0, "50"),
            BarItem::new("art", 0.0, "0"),
        ]
    }

    #[test]
    fn test_bar_lengths_are_proportional() {
        let theme = Theme::dark();
        let list = BarList::new(items(), &theme);
        // 80 - (24 + 14 + 2) = 40 bar cells.
        let lines = list.to_lines(80);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].spans[2].content.chars().count(), 40);
        assert_eq!(lines[1].spans[2].content.chars().count(), 20);
        assert_eq!(lines[2].spans[2].content.chars().count(), 0);
    }

    #[test]
    fn test_first_bar_highlighted() {
        let theme = Theme::dark();
        let lines = BarList::new(items(), &theme).to_lines(80);
        assert_eq!(lines[0].spans[2].style, theme.bar_highlight);
        assert_eq!(lines[1].spans[2].style, theme.bar_muted);
    }

    #[test]
    fn test_line_contains_label_and_value() {
        let theme = Theme::dark();
        let lines = BarList::new(items(), &theme).to_lines(80);
        let first = text(&lines[0]);
        assert!(first.starts_with("bed_bath_table"));
        assert!(first.ends_with(" 100"));
    }

    #[test]
    fn test_narrow_panel_draws_no_bars() {
        let theme = Theme::dark();
        let lines = BarList::new(items(), &theme).to_lines(20);
        assert!(lines.iter().all(|l| l.spans[2].content.is_empty()));
    }

    #[test]
    fn test_scaled_length_minimum_one_cell() {
        assert_eq!(scaled_length(0.001, 100.0, 40), 1);
        assert_eq!(scaled_length(0.0, 100.0, 40), 0);
        assert_eq!(scaled_length(5.0, 0.0, 40), 0);
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("construction_tools", 8), "constru…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_truncate_wide_characters() {
        // Each CJK character is two columns wide.
        let cut = truncate_to_width("家具家具家具", 5);
        assert_eq!(cut, "家具…");
        assert!(cut.width() <= 5);
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("abcdef", 4), "abcdef");
    }
}
