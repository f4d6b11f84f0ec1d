//! Products section: best and worst categories by revenue and by review
//! score.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use dashboard_core::formatting::format_number;
use dashboard_data::pipeline::{CategoryRevenue, CategoryReview};
use dashboard_data::DashboardViews;

use crate::components::bar_list::{BarItem, BarList};
use crate::components::panel::render_bar_panel;
use crate::themes::Theme;

/// Categories shown per ranked panel.
pub const TOP_N: usize = 5;

pub fn revenue_items(rows: &[&CategoryRevenue]) -> Vec<BarItem> {
    rows.iter()
        .map(|r| BarItem::new(&r.category, r.revenue, format_number(r.revenue, 2)))
        .collect()
}

pub fn review_items(rows: &[&CategoryReview]) -> Vec<BarItem> {
    rows.iter()
        .filter_map(|r| {
            r.avg_review_score
                .map(|score| BarItem::new(&r.category, score, format_number(score, 2)))
        })
        .collect()
}

pub fn render_products_view(frame: &mut Frame, area: Rect, views: &DashboardViews, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = split_columns(rows[0]);
    let bottom = split_columns(rows[1]);

    let panels = [
        (
            top[0],
            "Best Revenue Categories",
            revenue_items(&views.best_revenue_categories(TOP_N)),
        ),
        (
            top[1],
            "Worst Revenue Categories",
            revenue_items(&views.worst_revenue_categories(TOP_N)),
        ),
        (
            bottom[0],
            "Best Reviewed Categories",
            review_items(&views.best_reviewed_categories(TOP_N)),
        ),
        (
            bottom[1],
            "Worst Reviewed Categories",
            review_items(&views.worst_reviewed_categories(TOP_N)),
        ),
    ];

    for (panel_area, title, items) in panels {
        let list = BarList::new(items, theme);
        render_bar_panel(frame, panel_area, title, &list, theme);
    }
}

fn split_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
