//! Shared building blocks for the e-commerce dashboard.
//!
//! Holds the order-line data model, the closed date-range filter type,
//! error definitions, display formatting, timestamp parsing and the CLI
//! settings layer used by every other crate in the workspace.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;

pub use error::{DashboardError, Result};
