use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::time_utils::{
    deserialize_optional_timestamp, deserialize_optional_whole, deserialize_timestamp,
};

/// Order statuses whose lines carry no counted revenue or review signal.
pub const EXCLUDED_STATUSES: [&str; 2] = ["canceled", "unavailable"];

/// Payment type whose lines feed the installment distribution.
pub const CREDIT_CARD: &str = "credit_card";

/// The fixed delivery-time bucket axis, in display order.
pub const DELIVERY_TIME_BUCKETS: [&str; 4] = ["1-7 days", "8-14 days", "15-21 days", "21+ days"];

/// One order line item read from the transaction dataset.
///
/// Several lines may share an `order_id`; each line belongs to exactly one
/// order and one customer. Columns that a dataframe export can leave empty
/// are modelled as `Option`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderLine {
    /// Order identifier (shared by all lines of the same order).
    pub order_id: String,
    /// Customer identifier.
    pub customer_id: String,
    /// When the order was placed (local wall-clock time).
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub order_purchase_timestamp: NaiveDateTime,
    /// When the order reached the customer, if it has.
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    /// Lifecycle status, e.g. `"delivered"` or `"canceled"`.
    pub order_status: String,
    /// Line item price in currency units.
    pub price: f64,
    /// Product category; empty for uncategorised products.
    #[serde(default)]
    pub product_category_name: Option<String>,
    /// Review score 1–5, absent when the order was not reviewed.
    #[serde(default, deserialize_with = "deserialize_optional_whole")]
    pub review_score: Option<u8>,
    /// Two-letter customer region code.
    pub customer_state: String,
    /// Payment method, e.g. `"credit_card"` or `"boleto"`.
    #[serde(default)]
    pub payment_type: Option<String>,
    /// Number of installments (meaningful for credit cards only).
    #[serde(default, deserialize_with = "deserialize_optional_whole")]
    pub payment_installments: Option<u32>,
    /// Pre-computed delivery bucket label, see [`DELIVERY_TIME_BUCKETS`].
    #[serde(default)]
    pub delivery_time_range: Option<String>,
}

impl OrderLine {
    /// Calendar day on which the order was placed.
    pub fn purchase_date(&self) -> NaiveDate {
        self.order_purchase_timestamp.date()
    }

    /// `false` for canceled and unavailable orders.
    pub fn is_revenue_eligible(&self) -> bool {
        !EXCLUDED_STATUSES.contains(&self.order_status.as_str())
    }

    /// Whether the line was paid by credit card.
    pub fn is_credit_card(&self) -> bool {
        self.payment_type.as_deref() == Some(CREDIT_CARD)
    }
}

// ── DateRange ─────────────────────────────────────────────────────────────────

/// A closed interval of calendar dates applied to purchase timestamps.
///
/// Both bounds are inclusive: a purchase at 23:59 on `end` is in range.
/// A range whose `start` is after its `end` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `true` when no date can satisfy the range.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Whether `date` lies within `[start, end]`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether a timestamp's calendar day lies within the range.
    pub fn contains_timestamp(&self, ts: NaiveDateTime) -> bool {
        self.contains(ts.date())
    }

    /// Number of calendar days covered, `0` for an empty range.
    pub fn num_days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    /// Clamp both bounds into `bounds` without reordering them.
    pub fn clamp_to(&self, bounds: &DateRange) -> DateRange {
        DateRange {
            start: self.start.clamp(bounds.start, bounds.end),
            end: self.end.clamp(bounds.start, bounds.end),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} – {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
