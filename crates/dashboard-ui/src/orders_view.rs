//! Orders section: order and revenue tiles over a line chart of daily
//! order counts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols,
    widgets::{Axis, Chart, Dataset, GraphType},
    Frame,
};

use dashboard_core::formatting::{format_currency, format_number};
use dashboard_core::time_utils::format_date;
use dashboard_data::pipeline::DailyOrders;
use dashboard_data::{DashboardViews, SummaryMetrics};

use crate::components::metric_tile::{render_tiles, MetricTile};
use crate::components::panel::{panel_block, render_no_data};
use crate::themes::Theme;

const CHART_TITLE: &str = "Daily Orders";

/// Chart points: x is days since the first plotted day, y the order count.
pub fn daily_points(daily: &[DailyOrders]) -> Vec<(f64, f64)> {
    let Some(first) = daily.first() else {
        return Vec::new();
    };
    daily
        .iter()
        .map(|d| {
            (
                (d.date - first.date).num_days() as f64,
                d.order_count as f64,
            )
        })
        .collect()
}

pub fn render_orders_view(
    frame: &mut Frame,
    area: Rect,
    views: &DashboardViews,
    summary: &SummaryMetrics,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    let tiles = [
        MetricTile::new(
            "Total orders",
            Some(format_number(summary.total_orders as f64, 0)),
            theme,
        ),
        MetricTile::new(
            "Total Revenue",
            Some(format_currency(summary.total_revenue)),
            theme,
        ),
    ];
    render_tiles(frame, rows[0], &tiles, theme);

    render_daily_chart(frame, rows[1], &views.daily_orders, theme);
}

fn render_daily_chart(frame: &mut Frame, area: Rect, daily: &[DailyOrders], theme: &Theme) {
    let (Some(first), Some(last)) = (daily.first(), daily.last()) else {
        render_no_data(frame, area, CHART_TITLE, theme);
        return;
    };

    let points = daily_points(daily);
    let x_max = (last.date - first.date).num_days().max(1) as f64;
    let y_max = points.iter().map(|p| p.1).fold(1.0_f64, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.chart_line)
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(panel_block(CHART_TITLE, theme))
        .x_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(vec![format_date(first.date), format_date(last.date)]),
        )
        .y_axis(
            Axis::default()
                .style(theme.axis)
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), format_number(y_max, 0)]),
        );

    frame.render_widget(chart, area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
