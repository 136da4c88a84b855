//! Ingestion dispatcher.
//!
//! Takes a `{format, fileName, content}` triple, picks the matching parser
//! and returns the messages together with the group name.
//!
//! # Example
//!
//! ```rust
//! use chatpulse::config::IngestConfig;
//! use chatpulse::ingest::{Ingestor, RawImport};
//!
//! let content = "01/01/24, 09:00 - Ana criou o grupo \"Amigos\"\n01/01/24, 09:01 - Ana: Olá";
//! let raw = RawImport::from_file_name("Conversa.txt", content)?;
//!
//! let result = Ingestor::new(IngestConfig::default()).ingest(&raw)?;
//! assert_eq!(result.group_name.as_deref(), Some("Amigos"));
//! assert_eq!(result.messages.len(), 2);
//! # Ok::<(), chatpulse::ChatpulseError>(())
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Message;
use crate::config::{IngestConfig, TimeZoneSetting};
use crate::error::Result;
use crate::identity::IdentityTable;
use crate::parser::{InputFormat, Parser};
use crate::parsers::{CsvParser, JsonParser, TxtParser};
use crate::parsing::extract_group_name;
use crate::progress::ProgressReporter;

/// Raw transcript handed over by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawImport {
    /// Declared or inferred format.
    pub format: InputFormat,

    /// Original file name, informational only.
    pub file_name: String,

    /// Full text content.
    pub content: String,
}

impl RawImport {
    /// Creates an import with an explicit format.
    pub fn new(format: InputFormat, file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            format,
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Creates an import from a declared format tag (`"txt"`, `"json"` or `"csv"`).
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::UnsupportedFormat`](crate::ChatpulseError::UnsupportedFormat)
    /// for any other tag.
    pub fn with_format_tag(
        tag: &str,
        file_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(tag.parse()?, file_name, content))
    }

    /// Creates an import whose format is inferred from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::UnsupportedFormat`](crate::ChatpulseError::UnsupportedFormat)
    /// for unknown extensions.
    pub fn from_file_name(file_name: impl Into<String>, content: impl Into<String>) -> Result<Self> {
        let file_name = file_name.into();
        let format = InputFormat::from_file_name(&file_name)?;
        Ok(Self::new(format, file_name, content))
    }
}

/// Messages plus the group name found in a TXT export.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    /// Canonical messages in source order.
    pub messages: Vec<Message>,

    /// Group name from the "created group" notice; always `None` for JSON and CSV.
    pub group_name: Option<String>,
}

impl ParseResult {
    /// Returns `true` when nothing was recognized.
    ///
    /// For TXT input this is a distinct outcome rather than an error.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Selects a parser per import and runs it.
///
/// Identity tables are shared between parses without copying.
#[derive(Debug, Clone, Default)]
pub struct Ingestor {
    identities: Arc<IdentityTable>,
    time_zone: TimeZoneSetting,
}

impl Ingestor {
    /// Creates a dispatcher from configuration.
    pub fn new(config: IngestConfig) -> Self {
        Self {
            identities: Arc::new(config.identities),
            time_zone: config.time_zone,
        }
    }

    /// Returns the parser used for `format`.
    pub fn parser_for(&self, format: InputFormat) -> Box<dyn Parser> {
        match format {
            InputFormat::Txt => Box::new(TxtParser::new(Arc::clone(&self.identities))),
            InputFormat::Json => Box::new(JsonParser::new(self.time_zone)),
            InputFormat::Csv => Box::new(CsvParser::new(self.time_zone)),
        }
    }

    /// Parses an import without progress reporting.
    pub fn ingest(&self, raw: &RawImport) -> Result<ParseResult> {
        self.ingest_with_progress(raw, &ProgressReporter::silent())
    }

    /// Parses an import, reporting progress through `progress`.
    ///
    /// # Errors
    ///
    /// Any parser error is returned unchanged; no partial result is produced.
    pub fn ingest_with_progress(&self, raw: &RawImport, progress: &ProgressReporter) -> Result<ParseResult> {
        info!(file = %raw.file_name, format = %raw.format, bytes = raw.content.len(), "ingesting transcript");

        let group_name = match raw.format {
            InputFormat::Txt => extract_group_name(&raw.content),
            InputFormat::Json | InputFormat::Csv => None,
        };

        let messages = self
            .parser_for(raw.format)
            .parse_with_progress(&raw.content, progress)?;

        Ok(ParseResult {
            messages,
            group_name,
        })
    }
}

/// One-shot helper: builds an [`Ingestor`] from `config` and parses `raw`.
pub fn parse_import(raw: &RawImport, config: IngestConfig, progress: &ProgressReporter) -> Result<ParseResult> {
    Ingestor::new(config).ingest_with_progress(raw, progress)
}
