//! RFM section: average recency, frequency and monetary tiles over the top
//! customers for each measure.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use dashboard_core::formatting::{format_currency, format_number};
use dashboard_data::pipeline::RfmRow;
use dashboard_data::{DashboardViews, SummaryMetrics};

use crate::components::bar_list::{BarItem, BarList, BarListConfig};
use crate::components::metric_tile::{render_tiles, MetricTile};
use crate::components::panel::render_bar_panel;
use crate::themes::Theme;

/// Which RFM measure a ranked panel plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfmMeasure {
    Recency,
    Frequency,
    Monetary,
}

impl RfmMeasure {
    pub fn title(self) -> &'static str {
        match self {
            RfmMeasure::Recency => "By Recency (days)",
            RfmMeasure::Frequency => "By Frequency",
            RfmMeasure::Monetary => "By Monetary",
        }
    }
}

pub fn rfm_items(rows: &[&RfmRow], measure: RfmMeasure) -> Vec<BarItem> {
    rows.iter()
        .map(|r| {
            let (value, display) = match measure {
                RfmMeasure::Recency => (r.recency_days as f64, r.recency_days.to_string()),
                RfmMeasure::Frequency => (r.frequency as f64, r.frequency.to_string()),
                RfmMeasure::Monetary => (r.monetary, format_number(r.monetary, 2)),
            };
            BarItem::new(format!("#{}", r.customer_id), value, display)
        })
        .collect()
}

pub fn render_rfm_view(
    frame: &mut Frame,
    area: Rect,
    views: &DashboardViews,
    summary: &SummaryMetrics,
    theme: &Theme,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(7)])
        .split(area);

    let tiles = [
        MetricTile::new(
            "Average Recency (days)",
            summary.avg_recency.map(|v| format_number(v, 1)),
            theme,
        ),
        MetricTile::new(
            "Average Frequency",
            summary.avg_frequency.map(|v| format_number(v, 2)),
            theme,
        ),
        MetricTile::new(
            "Average Monetary",
            summary.avg_monetary.map(format_currency),
            theme,
        ),
    ];
    render_tiles(frame, rows[0], &tiles, theme);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[1]);

    let panels = [
        (columns[0], RfmMeasure::Recency, views.rfm_by_recency()),
        (columns[1], RfmMeasure::Frequency, views.rfm_by_frequency()),
        (columns[2], RfmMeasure::Monetary, views.rfm_by_monetary()),
    ];
    for (panel_area, measure, ranked) in panels {
        let list = BarList::new(rfm_items(&ranked, measure), theme).with_config(BarListConfig {
            label_width: 9,
            value_width: 12,
            ..Default::default()
        });
        render_bar_panel(frame, panel_area, measure.title(), &list, theme);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
