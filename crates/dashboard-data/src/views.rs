//! All derived tables for one filter state, plus the ranked slices the
//! renderers draw from them.

use std::cmp::Ordering;
use std::time::Instant;

use dashboard_core::models::OrderLine;
use tracing::debug;

use crate::pipeline::{
    self, CategoryRevenue, CategoryReview, DailyOrders, DeliveryBucket, InstallmentOrders,
    PaymentTypeCustomers, RfmRow, StateCustomers, StatusCustomers,
};

/// Number of rows shown in each ranked RFM list.
pub const RFM_TOP_N: usize = 5;

// ── DashboardViews ────────────────────────────────────────────────────────────

/// The nine derived tables for the currently filtered rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardViews {
    pub daily_orders: Vec<DailyOrders>,
    pub revenue_by_category: Vec<CategoryRevenue>,
    pub review_by_category: Vec<CategoryReview>,
    pub customers_by_state: Vec<StateCustomers>,
    pub customers_by_payment_type: Vec<PaymentTypeCustomers>,
    pub installment_distribution: Vec<InstallmentOrders>,
    pub customers_by_status: Vec<StatusCustomers>,
    pub delivery_time_distribution: Vec<DeliveryBucket>,
    pub rfm: Vec<RfmRow>,
    /// Number of filtered rows the tables were derived from.
    pub rows_processed: usize,
}

impl DashboardViews {
    /// Run every transform over `rows`.
    pub fn compute(rows: &[OrderLine]) -> Self {
        let started = Instant::now();

        let views = Self {
            daily_orders: pipeline::daily_orders(rows),
            revenue_by_category: pipeline::revenue_by_category(rows),
            review_by_category: pipeline::review_by_category(rows),
            customers_by_state: pipeline::customers_by_state(rows),
            customers_by_payment_type: pipeline::customers_by_payment_type(rows),
            installment_distribution: pipeline::installment_distribution(rows),
            customers_by_status: pipeline::customers_by_status(rows),
            delivery_time_distribution: pipeline::delivery_time_distribution(rows),
            rfm: pipeline::rfm_table(rows),
            rows_processed: rows.len(),
        };

        debug!(
            "computed views over {} rows ({} days, {} categories, {} customers) in {:.3}s",
            rows.len(),
            views.daily_orders.len(),
            views.revenue_by_category.len(),
            views.rfm.len(),
            started.elapsed().as_secs_f64()
        );
        views
    }

    // ── Products ──────────────────────────────────────────────────────────────

    /// Top `n` categories by revenue.
    pub fn best_revenue_categories(&self, n: usize) -> Vec<&CategoryRevenue> {
        self.revenue_by_category.iter().take(n).collect()
    }

    /// Bottom `n` categories by revenue, smallest first.
    pub fn worst_revenue_categories(&self, n: usize) -> Vec<&CategoryRevenue> {
        let mut rows: Vec<&CategoryRevenue> = self.revenue_by_category.iter().collect();
        rows.sort_by(|a, b| ascending(a.revenue, b.revenue));
        rows.truncate(n);
        rows
    }

    /// Top `n` categories by mean review score.
    pub fn best_reviewed_categories(&self, n: usize) -> Vec<&CategoryReview> {
        self.review_by_category
            .iter()
            .filter(|r| r.avg_review_score.is_some())
            .take(n)
            .collect()
    }

    /// Bottom `n` categories by mean review score, lowest first. Categories
    /// without reviews are not ranked.
    pub fn worst_reviewed_categories(&self, n: usize) -> Vec<&CategoryReview> {
        let mut rows: Vec<(&CategoryReview, f64)> = self
            .review_by_category
            .iter()
            .filter_map(|r| r.avg_review_score.map(|score| (r, score)))
            .collect();
        rows.sort_by(|a, b| ascending(a.1, b.1));
        rows.into_iter().take(n).map(|(r, _)| r).collect()
    }

    // ── Customers ─────────────────────────────────────────────────────────────

    /// States ordered by customer count, largest first.
    pub fn states_by_customer_count(&self) -> Vec<&StateCustomers> {
        let mut rows: Vec<&StateCustomers> = self.customers_by_state.iter().collect();
        rows.sort_by(|a, b| b.customer_count.cmp(&a.customer_count));
        rows
    }

    /// Distinct customers across all payment types; the denominator of the
    /// payment-share bars.
    pub fn payment_type_customer_total(&self) -> u64 {
        self.customers_by_payment_type
            .iter()
            .map(|p| p.customer_count)
            .sum()
    }

    // ── RFM ───────────────────────────────────────────────────────────────────

    /// Most recent customers (lowest recency).
    pub fn rfm_by_recency(&self) -> Vec<&RfmRow> {
        let mut rows: Vec<&RfmRow> = self.rfm.iter().collect();
        rows.sort_by_key(|r| r.recency_days);
        rows.truncate(RFM_TOP_N);
        rows
    }

    /// Most frequent customers.
    pub fn rfm_by_frequency(&self) -> Vec<&RfmRow> {
        let mut rows: Vec<&RfmRow> = self.rfm.iter().collect();
        rows.sort_by(|a, b| b.frequency.cmp(&a.frequency));
        rows.truncate(RFM_TOP_N);
        rows
    }

    /// Highest spending customers.
    pub fn rfm_by_monetary(&self) -> Vec<&RfmRow> {
        let mut rows: Vec<&RfmRow> = self.rfm.iter().collect();
        rows.sort_by(|a, b| ascending(b.monetary, a.monetary));
        rows.truncate(RFM_TOP_N);
        rows
    }
}

fn ascending(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
