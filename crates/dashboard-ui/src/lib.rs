//! Terminal UI layer for the e-commerce dashboard.
//!
//! Provides themes, the header, metric tiles, bar lists, the date picker,
//! one view per dashboard section, and the main application event loop
//! built on top of [`ratatui`].

pub mod app;
pub mod components;
pub mod customers_view;
pub mod delivery_view;
pub mod orders_view;
pub mod products_view;
pub mod rfm_view;
pub mod themes;

pub use dashboard_core as core;
