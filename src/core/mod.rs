//! Filtering and export.
//!
//! This module contains:
//! - [`filter`] - Message filtering by users and date range
//! - [`output`] - Message and report writers (CSV, JSON)

pub mod filter;
pub mod output;

pub use filter::{FilterConfig, apply_filters};
pub use output::{to_csv, to_json, to_report_json, write_csv, write_json, write_report};
