//! Data layer for the e-commerce dashboard.
//!
//! Responsible for reading the (optionally gzip-compressed) order-line CSV,
//! slicing it by date range, running the aggregation pipeline and deriving
//! the summary metrics shown in the UI.

pub mod dataset;
pub mod pipeline;
pub mod reader;
pub mod summary;
pub mod views;

pub use dashboard_core as core;
pub use dataset::Dataset;
pub use summary::SummaryMetrics;
pub use views::DashboardViews;
