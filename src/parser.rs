//! Unified parser trait for transcript formats.
//!
//! Every input format implements [`Parser`]. Parsers work on text that is
//! already in memory; reading files is left to the caller.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::IngestConfig;
//! use chatpulse::parser::{InputFormat, create_parser};
//!
//! let parser = create_parser(InputFormat::Txt, &IngestConfig::default());
//! let messages = parser.parse_str("15/03/24, 14:30 - Ana: Olá a todos")?;
//!
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].sender, "Ana");
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```
//!
//! # Format Selection
//!
//! Use [`InputFormat`] to select parsers by tag or by file name:
//!
//! ```rust
//! use chatpulse::parser::InputFormat;
//! use std::str::FromStr;
//!
//! assert_eq!(InputFormat::from_str("CSV").unwrap(), InputFormat::Csv);
//! assert_eq!(InputFormat::from_file_name("Conversa.TXT").unwrap(), InputFormat::Txt);
//! assert!(InputFormat::from_file_name("chat.xml").is_err());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::config::IngestConfig;
use crate::error::{ChatpulseError, Result};
use crate::progress::ProgressReporter;

/// Supported transcript encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// WhatsApp line-oriented `.txt` export
    Txt,

    /// JSON array of canonical messages
    Json,

    /// CSV table of canonical messages
    Csv,
}

impl InputFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            InputFormat::Txt => "txt",
            InputFormat::Json => "json",
            InputFormat::Csv => "csv",
        }
    }

    /// Returns all available formats.
    pub fn all() -> &'static [InputFormat] {
        &[InputFormat::Txt, InputFormat::Json, InputFormat::Csv]
    }

    /// Infers the format from a file name's extension, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::UnsupportedFormat`] for any other extension.
    pub fn from_file_name(file_name: &str) -> Result<Self> {
        let lower = file_name.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|format| lower.ends_with(&format!(".{}", format.extension())))
            .ok_or_else(|| ChatpulseError::unsupported_format(file_name))
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Txt => write!(f, "TXT"),
            InputFormat::Json => write!(f, "JSON"),
            InputFormat::Csv => write!(f, "CSV"),
        }
    }
}

impl std::str::FromStr for InputFormat {
    type Err = ChatpulseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "txt" => Ok(InputFormat::Txt),
            "json" => Ok(InputFormat::Json),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(ChatpulseError::unsupported_format(s)),
        }
    }
}

// Conversion from CLI format argument (only with cli feature)
#[cfg(feature = "cli")]
impl From<crate::cli::FormatArg> for InputFormat {
    fn from(arg: crate::cli::FormatArg) -> Self {
        match arg {
            crate::cli::FormatArg::Txt => InputFormat::Txt,
            crate::cli::FormatArg::Json => InputFormat::Json,
            crate::cli::FormatArg::Csv => InputFormat::Csv,
        }
    }
}

/// Unified trait for parsing transcripts.
///
/// Parsers must implement:
/// - [`name`](Parser::name) - Parser identifier
/// - [`format`](Parser::format) - Format this parser handles
/// - [`parse_with_progress`](Parser::parse_with_progress) - Parse with progress events
///
/// Output messages keep source order.
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Returns the format this parser handles.
    fn format(&self) -> InputFormat;

    /// Parses `content`, reporting progress through `progress`.
    ///
    /// # Errors
    ///
    /// - [`ChatpulseError::MalformedInput`] for structured-format violations
    /// - [`ChatpulseError::Cancelled`] if the reporter's token was set
    fn parse_with_progress(&self, content: &str, progress: &ProgressReporter) -> Result<Vec<Message>>;

    /// Parses `content` without progress reporting.
    fn parse_str(&self, content: &str) -> Result<Vec<Message>> {
        self.parse_with_progress(content, &ProgressReporter::silent())
    }
}

/// Creates a parser for the specified format.
///
/// ```rust
/// use chatpulse::config::IngestConfig;
/// use chatpulse::parser::{InputFormat, create_parser};
///
/// let parser = create_parser(InputFormat::Json, &IngestConfig::default());
/// assert_eq!(parser.name(), "JSON");
/// ```
pub fn create_parser(format: InputFormat, config: &IngestConfig) -> Box<dyn Parser> {
    match format {
        InputFormat::Txt => Box::new(crate::parsers::TxtParser::new(Arc::new(
            config.identities.clone(),
        ))),
        InputFormat::Json => Box::new(crate::parsers::JsonParser::new(config.time_zone)),
        InputFormat::Csv => Box::new(crate::parsers::CsvParser::new(config.time_zone)),
    }
}
