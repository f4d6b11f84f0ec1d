use crate::themes::Theme;
use dashboard_core::formatting::format_number;
use dashboard_core::models::DateRange;
use ratatui::text::{Line, Span};

/// Dashboard title, drawn in capitals.
pub const TITLE: &str = "E-COMMERCE PUBLIC DASHBOARD";

/// Dashboard header rendering three lines:
///
/// 1. The title.
/// 2. A separator as wide as the title.
/// 3. The active range and the number of rows it selects, in
///    `[ range | N orders lines ]` format.
pub struct Header<'a> {
    /// Active date filter, `None` for an empty dataset.
    pub range: Option<DateRange>,
    /// Rows selected by the filter.
    pub rows: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(range: Option<DateRange>, rows: usize, theme: &'a Theme) -> Self {
        Self { range, rows, theme }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let range = match self.range {
            Some(r) if r.is_empty() => format!("{r} (empty)"),
            Some(r) => r.to_string(),
            None => "no data".to_string(),
        };

        vec![
            Line::from(Span::styled(TITLE, self.theme.header)),
            Line::from(Span::styled(
                "=".repeat(TITLE.len()),
                self.theme.separator,
            )),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(range, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} order lines", format_number(self.rows as f64, 0)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2018, 1, start).unwrap(),
            NaiveDate::from_ymd_opt(2018, 1, end).unwrap(),
        )
    }

    #[test]
    fn test_header_title_and_separator() {
        let theme = Theme::dark();
        let lines = Header::new(Some(range(1, 31)), 0, &theme).to_lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[0]), TITLE);
        let sep = text(&lines[1]);
        assert_eq!(sep.len(), TITLE.len());
        assert!(sep.chars().all(|c| c == '='));
    }

    #[test]
    fn test_header_info_line() {
        let theme = Theme::dark();
        let lines = Header::new(Some(range(1, 31)), 12_345, &theme).to_lines();
        let info = text(&lines[2]);
        assert!(info.contains("2018-01-01"), "got: {info}");
        assert!(info.contains("2018-01-31"), "got: {info}");
        assert!(info.contains("12,345 order lines"), "got: {info}");
    }

    #[test]
    fn test_header_marks_empty_range() {
        let theme = Theme::dark();
        let lines = Header::new(Some(range(20, 3)), 0, &theme).to_lines();
        assert!(text(&lines[2]).contains("(empty)"));
    }

    #[test]
    fn test_header_without_data() {
        let theme = Theme::classic();
        let lines = Header::new(None, 0, &theme).to_lines();
        assert!(text(&lines[2]).contains("no data"));
    }
}
