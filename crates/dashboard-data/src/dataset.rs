//! The loaded, read-only order-line table.

use chrono::NaiveDate;
use dashboard_core::models::{DateRange, OrderLine};

/// All order lines, sorted ascending by purchase timestamp.
///
/// Sorting happens once at construction, which lets [`Dataset::slice`]
/// answer a date-range filter with two binary searches.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<OrderLine>,
}

impl Dataset {
    /// Build a dataset, stable-sorting `rows` by purchase timestamp.
    pub fn new(mut rows: Vec<OrderLine>) -> Self {
        rows.sort_by_key(|r| r.order_purchase_timestamp);
        Self { rows }
    }

    pub fn rows(&self) -> &[OrderLine] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last purchase date, or `None` for an empty dataset.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some(DateRange::new(first.purchase_date(), last.purchase_date()))
    }

    /// Rows whose purchase date lies in the closed range `range`.
    ///
    /// An empty range (start after end) yields an empty slice.
    pub fn slice(&self, range: &DateRange) -> &[OrderLine] {
        if range.is_empty() {
            return &[];
        }
        let lo = self.first_index_on_or_after(range.start);
        let hi = match range.end.succ_opt() {
            Some(next_day) => self.first_index_on_or_after(next_day),
            None => self.rows.len(),
        };
        &self.rows[lo..hi.max(lo)]
    }

    fn first_index_on_or_after(&self, date: NaiveDate) -> usize {
        self.rows.partition_point(|r| r.purchase_date() < date)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(order_id: &str, day: u32, hour: u32) -> OrderLine {
        OrderLine {
            order_id: order_id.to_string(),
            customer_id: "c".to_string(),
            order_purchase_timestamp: date(2023, 1, day).and_hms_opt(hour, 0, 0).unwrap(),
            order_delivered_customer_date: None,
            order_status: "delivered".to_string(),
            price: 1.0,
            product_category_name: None,
            review_score: None,
            customer_state: "SP".to_string(),
            payment_type: None,
            payment_installments: None,
            delivery_time_range: None,
        }
    }

    fn ids(rows: &[OrderLine]) -> Vec<&str> {
        rows.iter().map(|r| r.order_id.as_str()).collect()
    }

    fn sample() -> Dataset {
        Dataset::new(vec![
            line("d5", 5, 23),
            line("d1", 1, 0),
            line("d3", 3, 12),
            line("d1b", 1, 18),
        ])
    }

    #[test]
    fn test_new_sorts_by_purchase_timestamp() {
        assert_eq!(ids(sample().rows()), vec!["d1", "d1b", "d3", "d5"]);
    }

    #[test]
    fn test_date_bounds() {
        assert_eq!(
            sample().date_bounds(),
            Some(DateRange::new(date(2023, 1, 1), date(2023, 1, 5)))
        );
        assert!(Dataset::default().date_bounds().is_none());
    }

    #[test]
    fn test_slice_full_range() {
        let ds = sample();
        let bounds = ds.date_bounds().unwrap();
        assert_eq!(ds.slice(&bounds).len(), 4);
    }

    #[test]
    fn test_slice_includes_whole_end_day() {
        let ds = sample();
        let range = DateRange::new(date(2023, 1, 3), date(2023, 1, 5));
        assert_eq!(ids(ds.slice(&range)), vec!["d3", "d5"]);
    }

    #[test]
    fn test_slice_single_day() {
        let ds = sample();
        let range = DateRange::new(date(2023, 1, 1), date(2023, 1, 1));
        assert_eq!(ids(ds.slice(&range)), vec!["d1", "d1b"]);
    }

    #[test]
    fn test_slice_gap_day_is_empty() {
        let ds = sample();
        let range = DateRange::new(date(2023, 1, 2), date(2023, 1, 2));
        assert!(ds.slice(&range).is_empty());
    }

    #[test]
    fn test_slice_reversed_range_is_empty() {
        let ds = sample();
        let range = DateRange::new(date(2023, 1, 5), date(2023, 1, 1));
        assert!(ds.slice(&range).is_empty());
    }

    #[test]
    fn test_slice_outside_dataset_is_empty() {
        let ds = sample();
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31));
        assert!(ds.slice(&range).is_empty());
    }
}
