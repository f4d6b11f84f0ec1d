//! The aggregation pipeline: nine independent, pure table transforms.
//!
//! Every transform takes the date-filtered order lines and returns a fresh
//! derived table. Empty input gives an empty table (the delivery-time
//! distribution gives its four zero buckets). Group-bys iterate their keys
//! in ascending order, and descending sorts are stable, so ties keep that
//! ascending key order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use chrono::NaiveDate;
use dashboard_core::models::{OrderLine, DELIVERY_TIME_BUCKETS};
use dashboard_core::time_utils::days_between;
use tracing::warn;

// ── Derived table rows ────────────────────────────────────────────────────────

/// Orders and revenue placed on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyOrders {
    pub date: NaiveDate,
    /// Distinct orders placed that day.
    pub order_count: u64,
    /// Summed line price.
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRevenue {
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryReview {
    pub category: String,
    /// `None` when no line in the category carries a review.
    pub avg_review_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StateCustomers {
    pub state: String,
    pub customer_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentTypeCustomers {
    pub payment_type: String,
    pub customer_count: u64,
    /// `None` when no line of this payment type records installments.
    pub avg_installments: Option<f64>,
}

/// Credit-card orders split by number of installments.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentOrders {
    pub installments: u32,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusCustomers {
    pub status: String,
    pub customer_count: u64,
}

/// Line count for one of the fixed delivery-time buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryBucket {
    pub label: &'static str,
    pub order_count: u64,
}

/// Recency / frequency / monetary scores for one customer.
#[derive(Debug, Clone, PartialEq)]
pub struct RfmRow {
    /// Dense display id `1..=N`, assigned in ascending original-id order.
    pub customer_id: u64,
    /// Days between the customer's latest purchase and the latest purchase
    /// in the filtered table.
    pub recency_days: i64,
    /// Distinct orders placed.
    pub frequency: u64,
    /// Summed line price.
    pub monetary: f64,
}

// ── Transforms ────────────────────────────────────────────────────────────────

/// Distinct orders and revenue per purchase day, revenue-eligible lines
/// only. Days without orders are omitted rather than zero-filled.
pub fn daily_orders(rows: &[OrderLine]) -> Vec<DailyOrders> {
    let mut by_day: BTreeMap<NaiveDate, (HashSet<&str>, f64)> = BTreeMap::new();

    for row in rows.iter().filter(|r| r.is_revenue_eligible()) {
        let (orders, revenue) = by_day.entry(row.purchase_date()).or_default();
        orders.insert(row.order_id.as_str());
        *revenue += row.price;
    }

    by_day
        .into_iter()
        .map(|(date, (orders, revenue))| DailyOrders {
            date,
            order_count: orders.len() as u64,
            revenue,
        })
        .collect()
}

/// Summed revenue per product category, highest first.
pub fn revenue_by_category(rows: &[OrderLine]) -> Vec<CategoryRevenue> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_revenue_eligible()) {
        if let Some(category) = row.product_category_name.as_deref() {
            *totals.entry(category).or_default() += row.price;
        }
    }

    let mut table: Vec<CategoryRevenue> = totals
        .into_iter()
        .map(|(category, revenue)| CategoryRevenue {
            category: category.to_string(),
            revenue,
        })
        .collect();
    table.sort_by(|a, b| descending(a.revenue, b.revenue));
    table
}

/// Mean review score per product category, highest first; categories with
/// no reviews at all sort last.
pub fn review_by_category(rows: &[OrderLine]) -> Vec<CategoryReview> {
    let mut scores: BTreeMap<&str, Mean> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.is_revenue_eligible()) {
        if let Some(category) = row.product_category_name.as_deref() {
            scores
                .entry(category)
                .or_default()
                .push(row.review_score.map(f64::from));
        }
    }

    let mut table: Vec<CategoryReview> = scores
        .into_iter()
        .map(|(category, mean)| CategoryReview {
            category: category.to_string(),
            avg_review_score: mean.value(),
        })
        .collect();
    table.sort_by(|a, b| descending_nulls_last(a.avg_review_score, b.avg_review_score));
    table
}

/// Distinct customers per state, all order statuses included.
pub fn customers_by_state(rows: &[OrderLine]) -> Vec<StateCustomers> {
    distinct_per_key(
        rows,
        |r| Some(r.customer_state.as_str()),
        |r| r.customer_id.as_str(),
    )
    .into_iter()
    .map(|(state, customer_count)| StateCustomers {
        state: state.to_string(),
        customer_count,
    })
    .collect()
}

/// Distinct customers and mean installment count per payment type.
pub fn customers_by_payment_type(rows: &[OrderLine]) -> Vec<PaymentTypeCustomers> {
    let mut groups: BTreeMap<&str, (HashSet<&str>, Mean)> = BTreeMap::new();
    for row in rows {
        if let Some(payment_type) = row.payment_type.as_deref() {
            let (customers, installments) = groups.entry(payment_type).or_default();
            customers.insert(row.customer_id.as_str());
            installments.push(row.payment_installments.map(f64::from));
        }
    }

    groups
        .into_iter()
        .map(|(payment_type, (customers, installments))| PaymentTypeCustomers {
            payment_type: payment_type.to_string(),
            customer_count: customers.len() as u64,
            avg_installments: installments.value(),
        })
        .collect()
}

/// Distinct credit-card orders per installment count, most common first.
pub fn installment_distribution(rows: &[OrderLine]) -> Vec<InstallmentOrders> {
    let credit_card: Vec<&OrderLine> = rows.iter().filter(|r| r.is_credit_card()).collect();

    let mut groups: BTreeMap<u32, HashSet<&str>> = BTreeMap::new();
    for row in credit_card {
        if let Some(installments) = row.payment_installments {
            groups
                .entry(installments)
                .or_default()
                .insert(row.order_id.as_str());
        }
    }

    let mut table: Vec<InstallmentOrders> = groups
        .into_iter()
        .map(|(installments, orders)| InstallmentOrders {
            installments,
            order_count: orders.len() as u64,
        })
        .collect();
    table.sort_by(|a, b| b.order_count.cmp(&a.order_count));
    table
}

/// Distinct customers per order status; unknown statuses form their own
/// groups.
pub fn customers_by_status(rows: &[OrderLine]) -> Vec<StatusCustomers> {
    distinct_per_key(
        rows,
        |r| Some(r.order_status.as_str()),
        |r| r.customer_id.as_str(),
    )
    .into_iter()
    .map(|(status, customer_count)| StatusCustomers {
        status: status.to_string(),
        customer_count,
    })
    .collect()
}

/// Line count per delivery bucket on the fixed four-label axis.
pub fn delivery_time_distribution(rows: &[OrderLine]) -> Vec<DeliveryBucket> {
    let mut counts = [0u64; DELIVERY_TIME_BUCKETS.len()];
    let mut unrecognised = 0usize;

    for label in rows.iter().filter_map(|r| r.delivery_time_range.as_deref()) {
        match DELIVERY_TIME_BUCKETS.iter().position(|b| *b == label) {
            Some(idx) => counts[idx] += 1,
            None => unrecognised += 1,
        }
    }

    if unrecognised > 0 {
        warn!("{} lines carry an unrecognised delivery bucket", unrecognised);
    }

    DELIVERY_TIME_BUCKETS
        .iter()
        .zip(counts)
        .map(|(label, order_count)| DeliveryBucket { label, order_count })
        .collect()
}

/// Per-customer recency, frequency and monetary value.
///
/// Recency is measured against the latest purchase date in `rows` rather
/// than the wall clock, so historical data always yields the same table.
pub fn rfm_table(rows: &[OrderLine]) -> Vec<RfmRow> {
    let Some(reference) = rows.iter().map(|r| r.purchase_date()).max() else {
        return Vec::new();
    };

    struct Acc<'a> {
        latest: NaiveDate,
        orders: HashSet<&'a str>,
        monetary: f64,
    }

    let mut customers: BTreeMap<&str, Acc> = BTreeMap::new();
    for row in rows {
        let acc = customers
            .entry(row.customer_id.as_str())
            .or_insert_with(|| Acc {
                latest: row.purchase_date(),
                orders: HashSet::new(),
                monetary: 0.0,
            });
        acc.latest = acc.latest.max(row.purchase_date());
        acc.orders.insert(row.order_id.as_str());
        acc.monetary += row.price;
    }

    customers
        .into_values()
        .zip(1u64..)
        .map(|(acc, customer_id)| RfmRow {
            customer_id,
            recency_days: days_between(acc.latest, reference),
            frequency: acc.orders.len() as u64,
            monetary: acc.monetary,
        })
        .collect()
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Running mean that skips missing values.
#[derive(Debug, Default)]
struct Mean {
    sum: f64,
    count: u64,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Count distinct `ident` values per `key`, keys ascending. Rows whose key
/// is `None` are skipped.
fn distinct_per_key<'a, K, FK, FI>(rows: &'a [OrderLine], key: FK, ident: FI) -> Vec<(K, u64)>
where
    K: Ord,
    FK: Fn(&'a OrderLine) -> Option<K>,
    FI: Fn(&'a OrderLine) -> &'a str,
{
    let mut groups: BTreeMap<K, HashSet<&'a str>> = BTreeMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            groups.entry(k).or_default().insert(ident(row));
        }
    }
    groups
        .into_iter()
        .map(|(k, set)| (k, set.len() as u64))
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => descending(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Builder for test lines; defaults to a delivered credit-card order.
    struct LineBuilder(OrderLine);

    impl LineBuilder {
        fn new(order_id: &str, customer_id: &str, purchased: &str, price: f64) -> Self {
            Self(OrderLine {
                order_id: order_id.to_string(),
                customer_id: customer_id.to_string(),
                order_purchase_timestamp: ts(purchased),
                order_delivered_customer_date: None,
                order_status: "delivered".to_string(),
                price,
                product_category_name: Some("misc".to_string()),
                review_score: Some(5),
                customer_state: "SP".to_string(),
                payment_type: Some("credit_card".to_string()),
                payment_installments: Some(1),
                delivery_time_range: Some("1-7 days".to_string()),
            })
        }

        fn status(mut self, status: &str) -> Self {
            self.0.order_status = status.to_string();
            self
        }

        fn category(mut self, category: Option<&str>) -> Self {
            self.0.product_category_name = category.map(str::to_string);
            self
        }

        fn review(mut self, score: Option<u8>) -> Self {
            self.0.review_score = score;
            self
        }

        fn state(mut self, state: &str) -> Self {
            self.0.customer_state = state.to_string();
            self
        }

        fn payment(mut self, payment_type: Option<&str>, installments: Option<u32>) -> Self {
            self.0.payment_type = payment_type.map(str::to_string);
            self.0.payment_installments = installments;
            self
        }

        fn delivery(mut self, label: Option<&str>) -> Self {
            self.0.delivery_time_range = label.map(str::to_string);
            self
        }

        fn build(self) -> OrderLine {
            self.0
        }
    }

    fn line(order_id: &str, customer_id: &str, purchased: &str, price: f64) -> LineBuilder {
        LineBuilder::new(order_id, customer_id, purchased, price)
    }

    /// The three-row worked example: two delivered orders for customer 1,
    /// one canceled order for customer 2.
    fn worked_example() -> Vec<OrderLine> {
        vec![
            line("A", "1", "2023-01-01 10:00:00", 10.0).build(),
            line("C", "2", "2023-01-03 12:00:00", 5.0)
                .status("canceled")
                .state("RJ")
                .build(),
            line("B", "1", "2023-01-05 09:00:00", 20.0).build(),
        ]
    }

    // ── Worked example ───────────────────────────────────────────────────────

    #[test]
    fn test_worked_example_daily_orders() {
        let daily = daily_orders(&worked_example());
        assert_eq!(
            daily,
            vec![
                DailyOrders {
                    date: date("2023-01-01"),
                    order_count: 1,
                    revenue: 10.0
                },
                DailyOrders {
                    date: date("2023-01-05"),
                    order_count: 1,
                    revenue: 20.0
                },
            ]
        );
    }

    #[test]
    fn test_worked_example_rfm() {
        let rfm = rfm_table(&worked_example());
        assert_eq!(rfm.len(), 2);
        let customer_one = &rfm[0];
        assert_eq!(customer_one.customer_id, 1);
        assert_eq!(customer_one.frequency, 2);
        assert_eq!(customer_one.monetary, 30.0);
        assert_eq!(customer_one.recency_days, 0);
        // Customer "2" bought on 01-03, two days before the reference.
        assert_eq!(rfm[1].recency_days, 2);
    }

    #[test]
    fn test_worked_example_canceled_customer_still_counted() {
        let rows = worked_example();
        let revenue: f64 = revenue_by_category(&rows).iter().map(|r| r.revenue).sum();
        assert_eq!(revenue, 30.0);

        let states = customers_by_state(&rows);
        assert!(states.iter().any(|s| s.state == "RJ" && s.customer_count == 1));

        let statuses = customers_by_status(&rows);
        assert!(statuses
            .iter()
            .any(|s| s.status == "canceled" && s.customer_count == 1));
    }

    // ── daily_orders ─────────────────────────────────────────────────────────

    #[test]
    fn test_daily_orders_counts_distinct_orders() {
        let rows = vec![
            line("A", "1", "2023-02-01 08:00:00", 3.0).build(),
            line("A", "1", "2023-02-01 08:00:00", 4.0).build(),
            line("B", "2", "2023-02-01 20:00:00", 5.0).build(),
        ];
        let daily = daily_orders(&rows);
        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].order_count, 2);
        assert_eq!(daily[0].revenue, 12.0);
    }

    #[test]
    fn test_daily_orders_revenue_matches_eligible_total() {
        let rows = vec![
            line("A", "1", "2023-02-01 08:00:00", 3.25).build(),
            line("B", "2", "2023-02-02 08:00:00", 7.5)
                .status("unavailable")
                .build(),
            line("C", "3", "2023-02-04 08:00:00", 1.25)
                .status("shipped")
                .build(),
            line("D", "4", "2023-02-04 09:00:00", 2.0)
                .status("canceled")
                .build(),
        ];
        let daily = daily_orders(&rows);
        let from_days: f64 = daily.iter().map(|d| d.revenue).sum();
        let eligible: f64 = rows
            .iter()
            .filter(|r| r.is_revenue_eligible())
            .map(|r| r.price)
            .sum();
        assert_eq!(from_days, eligible);
        assert_eq!(daily_orders(&rows), daily, "re-running must be idempotent");
    }

    #[test]
    fn test_daily_orders_does_not_zero_fill_gaps() {
        let rows = vec![
            line("A", "1", "2023-02-01 08:00:00", 1.0).build(),
            line("B", "1", "2023-02-10 08:00:00", 1.0).build(),
        ];
        let days: Vec<NaiveDate> = daily_orders(&rows).iter().map(|d| d.date).collect();
        assert_eq!(days, vec![date("2023-02-01"), date("2023-02-10")]);
    }

    #[test]
    fn test_daily_orders_all_canceled_is_empty() {
        let rows = vec![line("A", "1", "2023-02-01 08:00:00", 1.0)
            .status("canceled")
            .build()];
        assert!(daily_orders(&rows).is_empty());
    }

    // ── revenue / review by category ─────────────────────────────────────────

    #[test]
    fn test_revenue_by_category_excludes_canceled_equal_price() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 50.0)
                .category(Some("toys"))
                .status("canceled")
                .build(),
            line("B", "2", "2023-03-01 09:00:00", 50.0)
                .category(Some("toys"))
                .build(),
        ];
        assert_eq!(
            revenue_by_category(&rows),
            vec![CategoryRevenue {
                category: "toys".to_string(),
                revenue: 50.0
            }]
        );
    }

    #[test]
    fn test_revenue_by_category_sorted_descending_ties_by_name() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 10.0)
                .category(Some("books"))
                .build(),
            line("B", "1", "2023-03-01 08:00:00", 30.0)
                .category(Some("toys"))
                .build(),
            line("C", "1", "2023-03-01 08:00:00", 10.0)
                .category(Some("art"))
                .build(),
        ];
        let names: Vec<String> = revenue_by_category(&rows)
            .into_iter()
            .map(|r| r.category)
            .collect();
        assert_eq!(names, vec!["toys", "art", "books"]);
    }

    #[test]
    fn test_revenue_by_category_skips_missing_category() {
        let rows = vec![line("A", "1", "2023-03-01 08:00:00", 10.0)
            .category(None)
            .build()];
        assert!(revenue_by_category(&rows).is_empty());
    }

    #[test]
    fn test_review_by_category_means_and_order() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 1.0)
                .category(Some("toys"))
                .review(Some(4))
                .build(),
            line("B", "2", "2023-03-01 08:00:00", 1.0)
                .category(Some("toys"))
                .review(Some(5))
                .build(),
            line("C", "3", "2023-03-01 08:00:00", 1.0)
                .category(Some("books"))
                .review(Some(5))
                .build(),
            line("D", "4", "2023-03-01 08:00:00", 1.0)
                .category(Some("art"))
                .review(None)
                .build(),
            line("E", "5", "2023-03-01 08:00:00", 1.0)
                .category(Some("books"))
                .review(Some(1))
                .status("canceled")
                .build(),
        ];
        let table = review_by_category(&rows);
        assert_eq!(
            table,
            vec![
                CategoryReview {
                    category: "books".to_string(),
                    avg_review_score: Some(5.0)
                },
                CategoryReview {
                    category: "toys".to_string(),
                    avg_review_score: Some(4.5)
                },
                CategoryReview {
                    category: "art".to_string(),
                    avg_review_score: None
                },
            ]
        );
    }

    // ── customer counts ──────────────────────────────────────────────────────

    #[test]
    fn test_customers_by_state_distinct_and_ascending() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 1.0).state("SP").build(),
            line("B", "1", "2023-03-02 08:00:00", 1.0).state("SP").build(),
            line("C", "2", "2023-03-02 08:00:00", 1.0).state("SP").build(),
            line("D", "3", "2023-03-02 08:00:00", 1.0).state("MG").build(),
        ];
        assert_eq!(
            customers_by_state(&rows),
            vec![
                StateCustomers {
                    state: "MG".to_string(),
                    customer_count: 1
                },
                StateCustomers {
                    state: "SP".to_string(),
                    customer_count: 2
                },
            ]
        );
    }

    #[test]
    fn test_customers_by_payment_type_mean_installments() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 1.0)
                .payment(Some("credit_card"), Some(2))
                .build(),
            line("B", "2", "2023-03-01 08:00:00", 1.0)
                .payment(Some("credit_card"), Some(6))
                .build(),
            line("C", "3", "2023-03-01 08:00:00", 1.0)
                .payment(Some("boleto"), None)
                .build(),
            line("D", "4", "2023-03-01 08:00:00", 1.0)
                .payment(None, None)
                .build(),
        ];
        assert_eq!(
            customers_by_payment_type(&rows),
            vec![
                PaymentTypeCustomers {
                    payment_type: "boleto".to_string(),
                    customer_count: 1,
                    avg_installments: None
                },
                PaymentTypeCustomers {
                    payment_type: "credit_card".to_string(),
                    customer_count: 2,
                    avg_installments: Some(4.0)
                },
            ]
        );
    }

    #[test]
    fn test_customers_by_payment_type_keeps_unknown_types() {
        let rows = vec![line("A", "1", "2023-03-01 08:00:00", 1.0)
            .payment(Some("pix"), Some(1))
            .build()];
        let table = customers_by_payment_type(&rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].payment_type, "pix");
    }

    #[test]
    fn test_installment_distribution_credit_card_only() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 1.0)
                .payment(Some("credit_card"), Some(1))
                .build(),
            line("A", "1", "2023-03-01 08:00:00", 1.0)
                .payment(Some("credit_card"), Some(1))
                .build(),
            line("B", "2", "2023-03-01 08:00:00", 1.0)
                .payment(Some("credit_card"), Some(3))
                .build(),
            line("C", "3", "2023-03-01 08:00:00", 1.0)
                .payment(Some("credit_card"), Some(3))
                .build(),
            line("D", "4", "2023-03-01 08:00:00", 1.0)
                .payment(Some("debit_card"), Some(1))
                .build(),
        ];
        assert_eq!(
            installment_distribution(&rows),
            vec![
                InstallmentOrders {
                    installments: 3,
                    order_count: 2
                },
                InstallmentOrders {
                    installments: 1,
                    order_count: 1
                },
            ]
        );
    }

    #[test]
    fn test_customers_by_status_unknown_status_grouped() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 1.0).build(),
            line("B", "2", "2023-03-01 08:00:00", 1.0)
                .status("returned_to_sender")
                .build(),
        ];
        let statuses: Vec<String> = customers_by_status(&rows)
            .into_iter()
            .map(|s| s.status)
            .collect();
        assert_eq!(statuses, vec!["delivered", "returned_to_sender"]);
    }

    #[test]
    fn test_distinct_counts_never_exceed_row_count() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 1.0).build(),
            line("A", "1", "2023-03-01 08:00:00", 1.0).build(),
            line("B", "2", "2023-03-02 08:00:00", 1.0).state("RJ").build(),
        ];
        let n = rows.len() as u64;
        assert!(daily_orders(&rows).iter().all(|d| d.order_count <= n));
        assert!(customers_by_state(&rows).iter().all(|s| s.customer_count <= n));
        assert!(customers_by_payment_type(&rows)
            .iter()
            .all(|p| p.customer_count <= n));
        assert!(installment_distribution(&rows)
            .iter()
            .all(|i| i.order_count <= n));
        assert!(customers_by_status(&rows).iter().all(|s| s.customer_count <= n));
        assert!(rfm_table(&rows).iter().all(|r| r.frequency <= n));
    }

    // ── delivery_time_distribution ───────────────────────────────────────────

    #[test]
    fn test_delivery_distribution_always_four_fixed_rows() {
        let rows = vec![
            line("A", "1", "2023-03-01 08:00:00", 1.0)
                .delivery(Some("21+ days"))
                .build(),
            line("B", "2", "2023-03-01 08:00:00", 1.0)
                .delivery(Some("21+ days"))
                .build(),
            line("C", "3", "2023-03-01 08:00:00", 1.0)
                .delivery(Some("1-7 days"))
                .build(),
            line("D", "4", "2023-03-01 08:00:00", 1.0)
                .delivery(None)
                .build(),
            line("E", "5", "2023-03-01 08:00:00", 1.0)
                .delivery(Some("tomorrow"))
                .build(),
        ];
        let table = delivery_time_distribution(&rows);
        let pairs: Vec<(&str, u64)> = table.iter().map(|b| (b.label, b.order_count)).collect();
        assert_eq!(
            pairs,
            vec![
                ("1-7 days", 1),
                ("8-14 days", 0),
                ("15-21 days", 0),
                ("21+ days", 2)
            ]
        );
    }

    // ── rfm_table ────────────────────────────────────────────────────────────

    #[test]
    fn test_rfm_dense_ids_in_ascending_customer_order() {
        let rows = vec![
            line("A", "zeta", "2023-03-01 08:00:00", 1.0).build(),
            line("B", "alpha", "2023-03-02 08:00:00", 2.0).build(),
            line("C", "mid", "2023-03-03 08:00:00", 3.0).build(),
            line("D", "alpha", "2023-03-04 08:00:00", 4.0).build(),
        ];
        let rfm = rfm_table(&rows);
        let ids: Vec<u64> = rfm.iter().map(|r| r.customer_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        // "alpha" → 1, "mid" → 2, "zeta" → 3.
        assert_eq!(rfm[0].monetary, 6.0);
        assert_eq!(rfm[0].recency_days, 0);
        assert_eq!(rfm[1].monetary, 3.0);
        assert_eq!(rfm[1].recency_days, 1);
        assert_eq!(rfm[2].monetary, 1.0);
        assert_eq!(rfm[2].recency_days, 3);
    }

    #[test]
    fn test_rfm_recency_zero_at_max_timestamp() {
        let rows = vec![
            line("A", "early", "2023-03-01 08:00:00", 1.0).build(),
            line("B", "late", "2023-03-09 23:00:00", 1.0).build(),
        ];
        let rfm = rfm_table(&rows);
        assert_eq!(rfm[1].recency_days, 0);
        assert_eq!(rfm[0].recency_days, 8);
    }

    #[test]
    fn test_rfm_includes_canceled_lines() {
        let rows = vec![line("A", "1", "2023-03-01 08:00:00", 9.0)
            .status("canceled")
            .build()];
        let rfm = rfm_table(&rows);
        assert_eq!(rfm.len(), 1);
        assert_eq!(rfm[0].monetary, 9.0);
    }

    // ── Empty input ──────────────────────────────────────────────────────────

    #[test]
    fn test_empty_input_yields_empty_tables() {
        let rows: Vec<OrderLine> = Vec::new();
        assert!(daily_orders(&rows).is_empty());
        assert!(revenue_by_category(&rows).is_empty());
        assert!(review_by_category(&rows).is_empty());
        assert!(customers_by_state(&rows).is_empty());
        assert!(customers_by_payment_type(&rows).is_empty());
        assert!(installment_distribution(&rows).is_empty());
        assert!(customers_by_status(&rows).is_empty());
        assert!(rfm_table(&rows).is_empty());

        let delivery = delivery_time_distribution(&rows);
        assert_eq!(delivery.len(), 4);
        assert!(delivery.iter().all(|b| b.order_count == 0));
    }
}
