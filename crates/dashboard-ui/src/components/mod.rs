//! Reusable widgets: header, metric tiles, bar lists, the date picker and
//! the sidebar logo.

pub mod bar_list;
pub mod date_picker;
pub mod header;
pub mod logo;
pub mod metric_tile;
pub mod panel;
