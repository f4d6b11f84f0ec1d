//! Delivery section: customers per order status and the delivery-time
//! distribution.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use dashboard_core::formatting::format_number;
use dashboard_data::pipeline::{DeliveryBucket, StatusCustomers};
use dashboard_data::DashboardViews;

use crate::components::bar_list::{BarItem, BarList, BarListConfig};
use crate::components::panel::{render_bar_panel, render_no_data};
use crate::themes::Theme;

const DELIVERY_TITLE: &str = "Delivery Time Distribution";

/// Statuses ordered by customer count, largest first.
pub fn status_items(rows: &[StatusCustomers]) -> Vec<BarItem> {
    let mut items: Vec<BarItem> = rows
        .iter()
        .map(|s| {
            BarItem::new(
                &s.status,
                s.customer_count as f64,
                format_number(s.customer_count as f64, 0),
            )
        })
        .collect();
    items.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items
}

/// Buckets in their fixed order.
pub fn delivery_items(rows: &[DeliveryBucket]) -> Vec<BarItem> {
    rows.iter()
        .map(|b| {
            BarItem::new(
                b.label,
                b.order_count as f64,
                format_number(b.order_count as f64, 0),
            )
        })
        .collect()
}

pub fn render_delivery_view(frame: &mut Frame, area: Rect, views: &DashboardViews, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let config = || BarListConfig {
        label_width: 14,
        ..Default::default()
    };

    let statuses = BarList::new(status_items(&views.customers_by_status), theme).with_config(config());
    render_bar_panel(frame, columns[0], "Customers by Order Status", &statuses, theme);

    // The distribution always carries its four buckets; with no counts at
    // all there is nothing to plot.
    let buckets = &views.delivery_time_distribution;
    if buckets.iter().all(|b| b.order_count == 0) {
        render_no_data(frame, columns[1], DELIVERY_TITLE, theme);
        return;
    }
    let delivery = BarList::new(delivery_items(buckets), theme).with_config(config());
    render_bar_panel(frame, columns[1], DELIVERY_TITLE, &delivery, theme);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
