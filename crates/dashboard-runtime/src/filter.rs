//! Keyboard-driven date-range filter state.

use chrono::{Days, NaiveDate};
use dashboard_core::models::DateRange;

/// Step used by the month keys.
pub const MONTH_STEP_DAYS: i64 = 30;

/// Which end of the range the picker currently edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bound {
    #[default]
    Start,
    End,
}

impl Bound {
    pub fn toggled(self) -> Self {
        match self {
            Bound::Start => Bound::End,
            Bound::End => Bound::Start,
        }
    }
}

/// The active range plus the dataset limits it is clamped to.
///
/// The start may be moved past the end; the resulting empty range is a
/// valid filter that selects no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct DateFilter {
    limits: DateRange,
    range: DateRange,
    focus: Bound,
}

impl DateFilter {
    /// Full-range filter over `limits`.
    pub fn new(limits: DateRange) -> Self {
        Self {
            limits,
            range: limits,
            focus: Bound::Start,
        }
    }

    /// Filter starting from `initial`, clamped into `limits`.
    pub fn with_initial(limits: DateRange, initial: DateRange) -> Self {
        Self {
            limits,
            range: initial.clamp_to(&limits),
            focus: Bound::Start,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn limits(&self) -> DateRange {
        self.limits
    }

    pub fn focus(&self) -> Bound {
        self.focus
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggled();
    }

    /// Move the focused bound by `days` (negative moves back), staying
    /// inside the limits.
    pub fn shift_focused(&mut self, days: i64) {
        let current = self.focused_date();
        let moved = shift_date(current, days);
        let clamped = moved.clamp(self.limits.start, self.limits.end);
        self.set_focused(clamped);
    }

    /// Put the focused bound back on its dataset limit.
    pub fn reset_focused(&mut self) {
        match self.focus {
            Bound::Start => self.range.start = self.limits.start,
            Bound::End => self.range.end = self.limits.end,
        }
    }

    /// Select the full dataset range again.
    pub fn reset(&mut self) {
        self.range = self.limits;
    }

    fn focused_date(&self) -> NaiveDate {
        match self.focus {
            Bound::Start => self.range.start,
            Bound::End => self.range.end,
        }
    }

    fn set_focused(&mut self, date: NaiveDate) {
        match self.focus {
            Bound::Start => self.range.start = date,
            Bound::End => self.range.end = date,
        }
    }
}

/// `date` moved by `days`, saturating at chrono's supported range.
fn shift_date(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    let shifted = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    shifted.unwrap_or(if days >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
