//! Headline metrics shown in the metric tiles.

use dashboard_core::formatting::round_to;

use crate::views::DashboardViews;

/// Totals and RFM averages for the current filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryMetrics {
    pub total_orders: u64,
    pub total_revenue: f64,
    /// Mean recency in days, rounded to one decimal.
    pub avg_recency: Option<f64>,
    /// Mean orders per customer, rounded to two decimals.
    pub avg_frequency: Option<f64>,
    pub avg_monetary: Option<f64>,
}

impl SummaryMetrics {
    /// Derive the tiles from already-computed views.
    ///
    /// Totals come from the daily table, so canceled and unavailable orders
    /// are excluded. The averages are `None` when no customer is in range.
    pub fn from_views(views: &DashboardViews) -> Self {
        let total_orders = views.daily_orders.iter().map(|d| d.order_count).sum();
        let total_revenue = views.daily_orders.iter().map(|d| d.revenue).sum();

        let customers = views.rfm.len();
        let mean = |sum: f64| (customers > 0).then(|| sum / customers as f64);

        let avg_recency = mean(views.rfm.iter().map(|r| r.recency_days as f64).sum())
            .map(|v| round_to(v, 1));
        let avg_frequency =
            mean(views.rfm.iter().map(|r| r.frequency as f64).sum()).map(|v| round_to(v, 2));
        let avg_monetary = mean(views.rfm.iter().map(|r| r.monetary).sum());

        Self {
            total_orders,
            total_revenue,
            avg_recency,
            avg_frequency,
            avg_monetary,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
