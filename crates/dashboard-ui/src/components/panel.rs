use crate::components::bar_list::BarList;
use crate::themes::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Bordered block with a padded title.
pub fn panel_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(format!(" {title} "), theme.header))
}

/// Render a "no data" placeholder for a chart whose table is empty.
pub fn render_no_data(frame: &mut Frame, area: Rect, title: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No data for the selected date range", theme.warning)),
        Line::from(Span::styled(
            "Widen the range in the sidebar or press 'r' to reset it.",
            theme.dim,
        )),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(panel_block(title, theme)),
        area,
    );
}

/// Render `list` inside a titled panel, or the placeholder when it is empty.
pub fn render_bar_panel(frame: &mut Frame, area: Rect, title: &str, list: &BarList, theme: &Theme) {
    if list.is_empty() {
        render_no_data(frame, area, title, theme);
        return;
    }
    // Two border columns.
    let inner_width = area.width.saturating_sub(2);
    frame.render_widget(
        Paragraph::new(Text::from(list.to_lines(inner_width))).block(panel_block(title, theme)),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
