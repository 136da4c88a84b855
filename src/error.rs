//! Unified error types for chatpulse.
//!
//! This module provides a single [`ChatpulseError`] enum that covers all error
//! cases in the library, in the style of `csv` and `serde_json`.
//!
//! # Error Handling Philosophy
//!
//! - Structured inputs (JSON, CSV) are strict: any schema violation aborts the
//!   whole ingestion with [`ChatpulseError::MalformedInput`] and a positional
//!   [`Location`].
//! - Unknown formats are rejected with [`ChatpulseError::UnsupportedFormat`]
//!   before any parsing begins.
//! - The line-oriented WhatsApp parser never fails on content: lines it cannot
//!   classify are skipped and only show up in `tracing` output.

use std::fmt;
use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatpulse operations.
///
/// # Example
///
/// ```rust
/// use chatpulse::error::Result;
/// use chatpulse::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatpulseError>;

/// Position of a structural problem inside a structured input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Zero-based index of an element in a JSON array.
    Index(usize),
    /// One-based physical line number.
    Line(u64),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Index(idx) => write!(f, "index {idx}"),
            Location::Line(line) => write!(f, "line {line}"),
        }
    }
}

/// The error type for all chatpulse operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpulseError {
    /// An I/O error occurred (CLI input, export writers).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A structured input violates its schema.
    ///
    /// This occurs when:
    /// - JSON input is not an array, or an element is not an object
    /// - A required field is missing or has the wrong type
    /// - A timestamp is not ISO-8601
    /// - A CSV header lacks one of the required columns
    #[error("Malformed {format} input{}: {message}", location.as_ref().map(|l| format!(" at {l}")).unwrap_or_default())]
    MalformedInput {
        /// The format being parsed (e.g., "JSON", "CSV")
        format: &'static str,
        /// Where the problem was found, if known
        location: Option<Location>,
        /// Description of what's wrong
        message: String,
    },

    /// The declared format or file extension is not one of txt, json, csv.
    #[error("Unsupported format '{input}'. Expected one of: txt, json, csv")]
    UnsupportedFormat {
        /// The rejected format tag or file name
        input: String,
    },

    /// Parsing was cancelled through a [`CancellationToken`](crate::progress::CancellationToken).
    #[error("Parsing cancelled after {current} of {total} lines")]
    Cancelled {
        /// Lines processed when the cancellation was observed
        current: usize,
        /// Total lines in the input
        total: usize,
    },

    /// Invalid date format in filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// JSON serialization error (exports, configuration files).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpulseError {
    /// Creates a malformed-input error without a position.
    pub fn malformed(format: &'static str, message: impl Into<String>) -> Self {
        ChatpulseError::MalformedInput {
            format,
            location: None,
            message: message.into(),
        }
    }

    /// Creates a malformed-input error pointing at a JSON array element.
    pub fn malformed_at_index(format: &'static str, index: usize, message: impl Into<String>) -> Self {
        ChatpulseError::MalformedInput {
            format,
            location: Some(Location::Index(index)),
            message: message.into(),
        }
    }

    /// Creates a malformed-input error pointing at a line.
    pub fn malformed_at_line(format: &'static str, line: u64, message: impl Into<String>) -> Self {
        ChatpulseError::MalformedInput {
            format,
            location: Some(Location::Line(line)),
            message: message.into(),
        }
    }

    /// Creates an unsupported-format error.
    pub fn unsupported_format(input: impl Into<String>) -> Self {
        ChatpulseError::UnsupportedFormat {
            input: input.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatpulseError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns the location of a malformed-input error.
    pub fn location(&self) -> Option<Location> {
        match self {
            ChatpulseError::MalformedInput { location, .. } => *location,
            _ => None,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpulseError::Io(_))
    }

    /// Returns `true` if this is a malformed-input error.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, ChatpulseError::MalformedInput { .. })
    }

    /// Returns `true` if this is an unsupported-format error.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, ChatpulseError::UnsupportedFormat { .. })
    }

    /// Returns `true` if parsing was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ChatpulseError::Cancelled { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatpulseError::InvalidDate { .. })
    }
}
