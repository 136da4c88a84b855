//! Output format writers.
//!
//! This module provides writers for exporting canonical messages and
//! analytics reports:
//! - [`write_csv`] / [`to_csv`] - comma CSV, one message per row
//! - [`write_json`] / [`to_json`] - JSON array of messages
//! - [`write_report`] / [`to_report_json`] - analytics [`Report`](crate::analytics::Report)
//!
//! Message exports use the same column and field names the structured
//! parsers read, so an export can be loaded back without loss.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatpulse::Result<()> {
//! use chatpulse::core::output::{to_csv, write_json};
//! use chatpulse::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let messages = vec![Message::new(ts, "Ana", "Olá!")];
//!
//! write_json(&messages, "messages.json")?;
//! let csv_string = to_csv(&messages)?;
//! # Ok(())
//! # }
//! ```

mod csv_writer;
mod json_writer;

pub use csv_writer::{to_csv, write_csv};
pub use json_writer::{to_json, to_report_json, write_json, write_report};
