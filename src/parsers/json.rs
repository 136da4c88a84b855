//! JSON export parser.
//!
//! Input is an array of canonical messages:
//!
//! ```json
//! [
//!   {"timestamp": "2024-03-15T14:30:00", "sender": "Ana", "content": "Olá"},
//!   {"timestamp": "2024-03-15T14:31:00Z", "sender": "Rui", "content": "Oi",
//!    "replyTo": "Ana", "isSystemMessage": false}
//! ]
//! ```
//!
//! The format is strict: the first violation aborts the parse and names the
//! offending array index.

use serde_json::{Map, Value};
use tracing::debug;

use crate::Message;
use crate::config::TimeZoneSetting;
use crate::error::{ChatpulseError, Result};
use crate::parser::{InputFormat, Parser};
use crate::parsing::parse_iso8601;
use crate::progress::ProgressReporter;

const FORMAT: &str = "JSON";

/// Parser for JSON message arrays.
///
/// # Example
///
/// ```rust
/// use chatpulse::config::TimeZoneSetting;
/// use chatpulse::parser::Parser;
/// use chatpulse::parsers::JsonParser;
///
/// let parser = JsonParser::new(TimeZoneSetting::Utc);
/// let messages = parser.parse_str(
///     r#"[{"timestamp":"2024-01-01T10:00:00Z","sender":" Bob ","content":"Hi"}]"#,
/// )?;
/// assert_eq!(messages[0].sender, "Bob");
/// # Ok::<(), chatpulse::ChatpulseError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser {
    time_zone: TimeZoneSetting,
}

impl JsonParser {
    /// Creates a parser converting offset timestamps into `time_zone`.
    pub fn new(time_zone: TimeZoneSetting) -> Self {
        Self { time_zone }
    }

    fn required_str<'a>(record: &'a Map<String, Value>, field: &str, idx: usize) -> Result<&'a str> {
        record.get(field).and_then(Value::as_str).ok_or_else(|| {
            ChatpulseError::malformed_at_index(FORMAT, idx, format!("`{field}` must be a string"))
        })
    }

    fn parse_element(&self, idx: usize, item: &Value) -> Result<Message> {
        let record = item
            .as_object()
            .ok_or_else(|| ChatpulseError::malformed_at_index(FORMAT, idx, "element is not an object"))?;

        let raw_ts = Self::required_str(record, "timestamp", idx)?;
        let sender = Self::required_str(record, "sender", idx)?;
        let content = Self::required_str(record, "content", idx)?;

        let timestamp = parse_iso8601(raw_ts, self.time_zone).ok_or_else(|| {
            ChatpulseError::malformed_at_index(
                FORMAT,
                idx,
                format!("timestamp '{raw_ts}' is not ISO-8601"),
            )
        })?;

        let reply_to = record
            .get("replyTo")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let is_system = record
            .get("isSystemMessage")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let mut message = Message::new(timestamp, sender.trim(), content).with_system_flag(is_system);
        if let Some(name) = reply_to {
            message = message.with_reply_to(name);
        }
        Ok(message)
    }
}

impl Parser for JsonParser {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn format(&self) -> InputFormat {
        InputFormat::Json
    }

    fn parse_with_progress(&self, content: &str, progress: &ProgressReporter) -> Result<Vec<Message>> {
        progress.report_complete()?;

        let root: Value = serde_json::from_str(content).map_err(|e| {
            ChatpulseError::malformed_at_line(FORMAT, e.line() as u64, e.to_string())
        })?;

        let items = root
            .as_array()
            .ok_or_else(|| ChatpulseError::malformed(FORMAT, "expected an array of messages"))?;

        let messages = items
            .iter()
            .enumerate()
            .map(|(idx, item)| self.parse_element(idx, item))
            .collect::<Result<Vec<_>>>()?;

        debug!(messages = messages.len(), "parsed JSON export");
        Ok(messages)
    }
}
