//! Transcript format parsers.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait and
//! produces canonical [`Message`](crate::Message)s in source order.
//!
//! # Available Parsers
//!
//! - [`TxtParser`] - WhatsApp line-oriented exports, lenient
//! - [`JsonParser`] - JSON arrays of canonical messages, strict
//! - [`CsvParser`] - CSV tables of canonical messages, strict
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::IngestConfig;
//! use chatpulse::parser::{InputFormat, create_parser};
//!
//! let parser = create_parser(InputFormat::Csv, &IngestConfig::default());
//! assert_eq!(parser.name(), "CSV");
//! ```

mod csv;
mod json;
mod txt;

pub use self::csv::CsvParser;
pub use self::json::JsonParser;
pub use self::txt::TxtParser;
