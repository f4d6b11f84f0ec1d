//! Filter-aware data manager for the dashboard runtime.
//!
//! Owns the loaded [`Dataset`] and the active [`DateFilter`], and keeps the
//! derived [`DashboardViews`] and [`SummaryMetrics`] in sync with the
//! filter. Views are recomputed only when the effective range changes; a
//! key press that leaves the range as it was (a clamped shift, a repeated
//! reset) reuses the cached tables.

use std::path::Path;
use std::time::Instant;

use dashboard_core::models::DateRange;
use dashboard_core::Result;
use dashboard_data::reader::load_dataset;
use dashboard_data::{DashboardViews, Dataset, SummaryMetrics};

use crate::filter::{Bound, DateFilter};

// ── FilterCommand ─────────────────────────────────────────────────────────────

/// An edit to the date filter, as produced by the date picker keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterCommand {
    ToggleFocus,
    /// Move the focused bound by this many days.
    Shift(i64),
    ResetFocused,
    ResetAll,
}

// ── DataManager ───────────────────────────────────────────────────────────────

/// Dataset plus the filter and the views derived under it.
///
/// # Example
/// ```no_run
/// use dashboard_runtime::data_manager::DataManager;
///
/// let mgr = DataManager::load(std::path::Path::new("orders.csv.gz"), None).unwrap();
/// println!("total orders: {}", mgr.summary().total_orders);
/// ```
pub struct DataManager {
    dataset: Dataset,
    /// `None` when the dataset has no rows.
    filter: Option<DateFilter>,
    views: DashboardViews,
    summary: SummaryMetrics,
    /// Range the cached views were computed for.
    computed_for: Option<DateRange>,
    recompute_count: u64,
}

impl DataManager {
    /// Read the dataset at `path` and compute the initial views.
    pub fn load(path: &Path, initial: Option<DateRange>) -> Result<Self> {
        let dataset = load_dataset(path)?;
        Ok(Self::new(dataset, initial))
    }

    /// Wrap an already-loaded dataset. `initial` is clamped to the dataset's
    /// date bounds; `None` selects the full range.
    pub fn new(dataset: Dataset, initial: Option<DateRange>) -> Self {
        let filter = dataset.date_bounds().map(|limits| match initial {
            Some(range) => DateFilter::with_initial(limits, range),
            None => DateFilter::new(limits),
        });

        if filter.is_none() {
            tracing::warn!("dataset is empty; every view will be blank");
        }

        let mut manager = Self {
            dataset,
            filter,
            views: DashboardViews::default(),
            summary: SummaryMetrics::default(),
            computed_for: None,
            recompute_count: 0,
        };
        manager.recompute();
        manager
    }

    // ── Public API ────────────────────────────────────────────────────────

    pub fn views(&self) -> &DashboardViews {
        &self.views
    }

    pub fn summary(&self) -> &SummaryMetrics {
        &self.summary
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Active filter range, `None` for an empty dataset.
    pub fn range(&self) -> Option<DateRange> {
        self.filter.as_ref().map(DateFilter::range)
    }

    /// Dataset date bounds, `None` for an empty dataset.
    pub fn limits(&self) -> Option<DateRange> {
        self.filter.as_ref().map(DateFilter::limits)
    }

    pub fn focus(&self) -> Bound {
        self.filter.as_ref().map(DateFilter::focus).unwrap_or_default()
    }

    /// Rows selected by the active filter.
    pub fn filtered_row_count(&self) -> usize {
        self.views.rows_processed
    }

    /// How many times the views have been derived, including the initial
    /// computation.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Apply a picker edit; returns `true` when the views were recomputed.
    pub fn apply(&mut self, command: FilterCommand) -> bool {
        let Some(filter) = self.filter.as_mut() else {
            return false;
        };

        match command {
            FilterCommand::ToggleFocus => filter.toggle_focus(),
            FilterCommand::Shift(days) => filter.shift_focused(days),
            FilterCommand::ResetFocused => filter.reset_focused(),
            FilterCommand::ResetAll => filter.reset(),
        }

        self.refresh_if_changed()
    }

    /// Replace the active range outright (clamped to the dataset bounds);
    /// returns `true` when the views were recomputed.
    pub fn set_range(&mut self, range: DateRange) -> bool {
        let Some(filter) = self.filter.as_mut() else {
            return false;
        };
        let focus = filter.focus();
        *filter = DateFilter::with_initial(filter.limits(), range);
        if filter.focus() != focus {
            filter.toggle_focus();
        }
        self.refresh_if_changed()
    }

    // ── Private helpers ───────────────────────────────────────────────────

    fn refresh_if_changed(&mut self) -> bool {
        if self.range() == self.computed_for {
            return false;
        }
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        let started = Instant::now();
        let range = self.range();
        let rows = match &range {
            Some(r) => self.dataset.slice(r),
            None => &[],
        };

        self.views = DashboardViews::compute(rows);
        self.summary = SummaryMetrics::from_views(&self.views);
        self.computed_for = range;
        self.recompute_count += 1;

        let label = range.map_or_else(|| "-".to_string(), |r| r.to_string());
        tracing::debug!(
            range = %label,
            rows = rows.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "views recomputed"
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
