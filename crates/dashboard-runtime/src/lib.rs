//! Runtime layer for the e-commerce dashboard.
//!
//! Holds the loaded dataset together with the active date filter and keeps
//! the derived views current as the filter changes.

pub mod data_manager;
pub mod filter;

pub use dashboard_core as core;
pub use dashboard_data as data;
