//! Export format selection.
//!
//! Canonical messages can be exported as CSV or as a JSON array. Both shapes
//! are accepted again by the structured parsers.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn example() -> chatpulse::Result<()> {
//! use chatpulse::format::{OutputFormat, write_to_format};
//! use chatpulse::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let messages = vec![Message::new(ts, "Ana", "Olá!")];
//!
//! let format = OutputFormat::from_path("messages.csv")?;
//! write_to_format(&messages, "messages.csv", format)?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::ChatpulseError;
use crate::parser::InputFormat;

/// Export format for canonical messages.
///
/// ```rust
/// use chatpulse::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("json").unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Comma CSV with a `timestamp,sender,content,replyTo,isSystemMessage` header
    #[default]
    Csv,

    /// Pretty-printed JSON array of messages
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    /// The input format that reads this export back.
    pub fn input_format(&self) -> InputFormat {
        match self {
            OutputFormat::Csv => InputFormat::Csv,
            OutputFormat::Json => InputFormat::Json,
        }
    }

    /// Detects format from a file path based on extension.
    ///
    /// ```rust
    /// use chatpulse::format::OutputFormat;
    ///
    /// assert_eq!(OutputFormat::from_path("out/Messages.JSON").unwrap(), OutputFormat::Json);
    /// assert!(OutputFormat::from_path("messages.txt").is_err());
    /// ```
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ChatpulseError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ChatpulseError::unsupported_format(path.display().to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = ChatpulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ChatpulseError::unsupported_format(s)),
        }
    }
}

/// Writes messages to a file in the specified format.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_to_format(
    messages: &[Message],
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<(), ChatpulseError> {
    match format {
        OutputFormat::Csv => crate::core::output::write_csv(messages, path),
        OutputFormat::Json => crate::core::output::write_json(messages, path),
    }
}

/// Converts messages to a string in the specified format.
pub fn to_format_string(messages: &[Message], format: OutputFormat) -> Result<String, ChatpulseError> {
    match format {
        OutputFormat::Csv => crate::core::output::to_csv(messages),
        OutputFormat::Json => crate::core::output::to_json(messages),
    }
}
