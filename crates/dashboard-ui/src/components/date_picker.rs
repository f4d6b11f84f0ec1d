use crate::themes::Theme;
use dashboard_core::models::DateRange;
use dashboard_core::time_utils::format_date;
use dashboard_runtime::filter::Bound;
use ratatui::text::{Line, Span};

/// Key help shown under the picker.
pub const KEY_HELP: [&str; 5] = [
    "Tab   switch bound",
    "←/→   ±1 day",
    "↑/↓   ±30 days",
    "Home/End  reset bound",
    "r     reset range",
];

/// Sidebar date-range picker.
///
/// Shows the start and end dates with the focused bound highlighted, the
/// selectable limits, and the key help.
pub struct DatePicker<'a> {
    pub range: DateRange,
    pub limits: DateRange,
    pub focus: Bound,
    pub theme: &'a Theme,
}

impl<'a> DatePicker<'a> {
    pub fn new(range: DateRange, limits: DateRange, focus: Bound, theme: &'a Theme) -> Self {
        Self {
            range,
            limits,
            focus,
            theme,
        }
    }

    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(Span::styled("Date range", self.theme.header)),
            self.bound_line("Start", self.range.start, Bound::Start),
            self.bound_line("End  ", self.range.end, Bound::End),
        ];

        if self.range.is_empty() {
            lines.push(Line::from(Span::styled(
                "start is after end",
                self.theme.warning,
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("{} days", self.range.num_days()),
                self.theme.dim,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Data: {} → {}",
                format_date(self.limits.start),
                format_date(self.limits.end)
            ),
            self.theme.dim,
        )));
        lines.push(Line::from(""));
        lines.extend(
            KEY_HELP
                .iter()
                .map(|help| Line::from(Span::styled(*help, self.theme.dim))),
        );
        lines
    }

    fn bound_line(&self, caption: &'a str, date: chrono::NaiveDate, bound: Bound) -> Line<'a> {
        let (marker, style) = if self.focus == bound {
            ("▶ ", self.theme.picker_focus)
        } else {
            ("  ", self.theme.value)
        };
        Line::from(vec![
            Span::styled(marker, self.theme.info),
            Span::styled(format!("{caption} "), self.theme.label),
            Span::styled(format!(" {} ", format_date(date)), style),
        ])
    }
}

/// Placeholder lines for a dataset without rows.
pub fn no_data_lines(theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled("Date range", theme.header)),
        Line::from(Span::styled("dataset is empty", theme.warning)),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
