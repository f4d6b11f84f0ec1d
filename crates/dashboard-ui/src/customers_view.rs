//! Customers section: customers per state, payment-type share and the
//! credit-card installment distribution.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use dashboard_core::formatting::{format_number, percentage};
use dashboard_data::pipeline::{InstallmentOrders, PaymentTypeCustomers, StateCustomers};
use dashboard_data::DashboardViews;

use crate::components::bar_list::{BarItem, BarList, BarListConfig};
use crate::components::panel::render_bar_panel;
use crate::themes::Theme;

pub fn state_items(rows: &[&StateCustomers]) -> Vec<BarItem> {
    rows.iter()
        .map(|s| {
            BarItem::new(
                &s.state,
                s.customer_count as f64,
                format_number(s.customer_count as f64, 0),
            )
        })
        .collect()
}

/// Payment types as a share of all customer counts, largest share first.
pub fn payment_share_items(rows: &[PaymentTypeCustomers], total: u64) -> Vec<BarItem> {
    let mut items: Vec<BarItem> = rows
        .iter()
        .map(|p| {
            let share = percentage(p.customer_count as f64, total as f64, 1);
            BarItem::new(
                &p.payment_type,
                share,
                format!("{share:.1}% ({})", format_number(p.customer_count as f64, 0)),
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

pub fn installment_items(rows: &[InstallmentOrders]) -> Vec<BarItem> {
    rows.iter()
        .map(|i| {
            BarItem::new(
                format!("{}x", i.installments),
                i.order_count as f64,
                format_number(i.order_count as f64, 0),
            )
        })
        .collect()
}

pub fn render_customers_view(frame: &mut Frame, area: Rect, views: &DashboardViews, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(columns[1]);

    let narrow_labels = || BarListConfig {
        label_width: 8,
        ..Default::default()
    };

    let states = BarList::new(state_items(&views.states_by_customer_count()), theme)
        .with_config(narrow_labels());
    render_bar_panel(frame, columns[0], "Customers by State", &states, theme);

    let payments = BarList::new(
        payment_share_items(
            &views.customers_by_payment_type,
            views.payment_type_customer_total(),
        ),
        theme,
    )
    .with_config(BarListConfig {
        label_width: 14,
        value_width: 18,
        ..Default::default()
    });
    render_bar_panel(frame, right[0], "Payment Type Share", &payments, theme);

    let installments = BarList::new(installment_items(&views.installment_distribution), theme)
        .with_config(narrow_labels());
    render_bar_panel(
        frame,
        right[1],
        "Credit Card Installments",
        &installments,
        theme,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
