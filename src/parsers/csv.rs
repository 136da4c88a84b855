//! CSV export parser.
//!
//! The first row is a header; columns are matched by name, so their order
//! does not matter.
//!
//! | Column | Required | Notes |
//! |--------|----------|-------|
//! | `timestamp` | yes | ISO-8601 |
//! | `sender` | yes | trimmed |
//! | `content` | yes | kept as-is |
//! | `replyTo` | no | trimmed, blank means none |
//! | `isSystemMessage` | no | `true`, `1` or `yes`, case-insensitive |
//!
//! Rows with an empty timestamp or sender are skipped. A timestamp that is
//! present but not ISO-8601 aborts the parse and reports its line.

use ::csv::{Position, ReaderBuilder, StringRecord};
use tracing::{debug, trace};

use crate::Message;
use crate::config::TimeZoneSetting;
use crate::error::{ChatpulseError, Result};
use crate::parser::{InputFormat, Parser};
use crate::parsing::parse_iso8601;
use crate::progress::ProgressReporter;

const FORMAT: &str = "CSV";

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    timestamp: usize,
    sender: usize,
    content: usize,
    reply_to: Option<usize>,
    is_system: Option<usize>,
}

impl Columns {
    fn from_header(header: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            header
                .iter()
                .position(|h| h.trim().trim_start_matches('\u{FEFF}') == name)
        };
        let required = |name: &str| {
            find(name).ok_or_else(|| {
                ChatpulseError::malformed(
                    FORMAT,
                    format!("missing required column `{name}` (required: timestamp,sender,content)"),
                )
            })
        };

        Ok(Self {
            timestamp: required("timestamp")?,
            sender: required("sender")?,
            content: required("content")?,
            reply_to: find("replyTo"),
            is_system: find("isSystemMessage"),
        })
    }
}

/// Returns `true` for `true`, `1` and `yes` in any case.
fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn csv_error(err: &::csv::Error) -> ChatpulseError {
    match err.position() {
        Some(pos) => ChatpulseError::malformed_at_line(FORMAT, pos.line(), err.to_string()),
        None => ChatpulseError::malformed(FORMAT, err.to_string()),
    }
}

/// Parser for CSV message tables.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::TimeZoneSetting;
/// use chatpulse::parser::Parser;
/// use chatpulse::parsers::CsvParser;
///
/// let parser = CsvParser::new(TimeZoneSetting::Utc);
/// let messages = parser.parse_str("timestamp,sender,content\n2024-01-01T10:00:00Z,Bob,\"Hi, there\"")?;
/// assert_eq!(messages[0].content, "Hi, there");
/// # Ok::<(), chatpulse::ChatpulseError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvParser {
    time_zone: TimeZoneSetting,
}

impl CsvParser {
    /// Creates a parser converting offset timestamps into `time_zone`.
    pub fn new(time_zone: TimeZoneSetting) -> Self {
        Self { time_zone }
    }

    fn parse_record(&self, columns: Columns, record: &StringRecord) -> Result<Option<Message>> {
        let field = |idx: usize| record.get(idx).unwrap_or("");

        let raw_ts = field(columns.timestamp);
        let sender = field(columns.sender).trim();
        if raw_ts.trim().is_empty() || sender.is_empty() {
            return Ok(None);
        }

        let line = record.position().map_or(0, Position::line);
        let timestamp = parse_iso8601(raw_ts, self.time_zone).ok_or_else(|| {
            ChatpulseError::malformed_at_line(
                FORMAT,
                line,
                format!("timestamp '{raw_ts}' is not ISO-8601"),
            )
        })?;

        let is_system = columns.is_system.is_some_and(|idx| is_truthy(field(idx)));
        let mut message =
            Message::new(timestamp, sender, field(columns.content)).with_system_flag(is_system);

        if let Some(name) = columns
            .reply_to
            .map(|idx| field(idx).trim())
            .filter(|name| !name.is_empty())
        {
            message = message.with_reply_to(name);
        }

        Ok(Some(message))
    }
}

impl Parser for CsvParser {
    fn name(&self) -> &'static str {
        "CSV"
    }

    fn format(&self) -> InputFormat {
        InputFormat::Csv
    }

    fn parse_with_progress(&self, content: &str, progress: &ProgressReporter) -> Result<Vec<Message>> {
        progress.report_complete()?;

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let columns = Columns::from_header(reader.headers().map_err(|e| csv_error(&e))?)?;

        let mut messages = Vec::new();
        let mut skipped = 0usize;

        for result in reader.records() {
            let record = result.map_err(|e| csv_error(&e))?;
            match self.parse_record(columns, &record)? {
                Some(message) => messages.push(message),
                None => {
                    skipped += 1;
                    trace!(line = record.position().map(Position::line), "skipping row");
                }
            }
        }

        debug!(messages = messages.len(), skipped, "parsed CSV export");
        Ok(messages)
    }
}
