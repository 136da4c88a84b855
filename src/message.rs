//! Canonical message type shared by every input format.
//!
//! All format parsers convert their input into [`Message`], and every
//! analytics function consumes a slice of them. Messages keep the relative
//! order in which they appeared in the source; nothing in the pipeline
//! reorders them.
//!
//! # Examples
//!
//! ```
//! use chatpulse::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(14, 30, 0).unwrap();
//! let msg = Message::new(ts, "Ana", "Olá @\u{2068}Rui\u{2069}").with_reply_to("Rui");
//!
//! assert_eq!(msg.sender(), "Ana");
//! assert_eq!(msg.reply_to(), Some("Rui"));
//! assert!(!msg.is_system_message());
//! ```
//!
//! ## Serialization
//!
//! Fields serialize in camelCase, and the timestamp is written as an
//! ISO-8601 local date-time without offset. The JSON parser reads that
//! shape back unchanged.
//!
//! ```
//! use chatpulse::Message;
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
//! let json = serde_json::to_string(&Message::new(ts, "Bob", "Hi"))?;
//! assert_eq!(
//!     json,
//!     r#"{"timestamp":"2024-01-01T10:00:00","sender":"Bob","content":"Hi","isSystemMessage":false}"#
//! );
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sender name reserved for group-management events.
pub const SYSTEM_SENDER: &str = "Sistema";

/// A normalized chat message.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `timestamp` | `NaiveDateTime` | Local wall-clock time, second resolution |
/// | `sender` | `String` | Normalized display name, [`SYSTEM_SENDER`] for system events |
/// | `content` | `String` | Raw text body, may be empty |
/// | `reply_to` | `Option<String>` | Normalized name taken from a mention marker |
/// | `is_system_message` | `bool` | Group-management or encryption notice |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// When the message was sent, as local wall-clock time.
    pub timestamp: NaiveDateTime,

    /// Normalized display name of the author.
    pub sender: String,

    /// Text content of the message.
    pub content: String,

    /// Display name of the person explicitly mentioned, if any.
    ///
    /// This is a mention heuristic, not transport-level reply metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub reply_to: Option<String>,

    /// `true` for group-management and system notices.
    #[serde(default)]
    pub is_system_message: bool,
}

impl Message {
    /// Creates an authored message without a mention.
    pub fn new(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
            content: content.into(),
            reply_to: None,
            is_system_message: false,
        }
    }

    /// Creates a system event attributed to [`SYSTEM_SENDER`].
    pub fn system(timestamp: NaiveDateTime, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: SYSTEM_SENDER.to_string(),
            content: content.into(),
            reply_to: None,
            is_system_message: true,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Builder method to set the mentioned user.
    #[must_use]
    pub fn with_reply_to(mut self, name: impl Into<String>) -> Self {
        self.reply_to = Some(name.into());
        self
    }

    /// Builder method to set the system flag.
    #[must_use]
    pub fn with_system_flag(mut self, is_system: bool) -> Self {
        self.is_system_message = is_system;
        self
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the timestamp.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the sender name.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Returns the message content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the mentioned user, if any.
    pub fn reply_to(&self) -> Option<&str> {
        self.reply_to.as_deref()
    }

    /// Returns `true` for system events.
    pub fn is_system_message(&self) -> bool {
        self.is_system_message
    }

    /// Returns `true` for messages written by a participant.
    pub fn is_authored(&self) -> bool {
        !self.is_system_message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_message_new() {
        let msg = Message::new(ts(14, 30), "Ana", "Olá a todos");
        assert_eq!(msg.sender(), "Ana");
        assert_eq!(msg.content(), "Olá a todos");
        assert_eq!(msg.timestamp(), ts(14, 30));
        assert!(msg.reply_to().is_none());
        assert!(msg.is_authored());
    }

    #[test]
    fn test_message_system() {
        let msg = Message::system(ts(9, 0), "Rui saiu");
        assert_eq!(msg.sender(), SYSTEM_SENDER);
        assert!(msg.is_system_message());
        assert!(!msg.is_authored());
    }

    #[test]
    fn test_message_builder() {
        let msg = Message::new(ts(9, 0), "Ana", "@Rui ok")
            .with_reply_to("Rui")
            .with_system_flag(true);
        assert_eq!(msg.reply_to(), Some("Rui"));
        assert!(msg.is_system_message());
    }

    #[test]
    fn test_message_serialization_skips_missing_reply() {
        let json = serde_json::to_string(&Message::new(ts(9, 0), "Ana", "Oi")).unwrap();
        assert!(!json.contains("replyTo"));
        assert!(json.contains(r#""isSystemMessage":false"#));
    }

    #[test]
    fn test_message_deserialization_defaults() {
        let json = r#"{"timestamp":"2024-03-15T09:00:00","sender":"Bob","content":"Hi"}"#;
        let msg: Message = serde_json::from_str(json).unwrap();
        assert_eq!(msg.sender(), "Bob");
        assert_eq!(msg.timestamp(), ts(9, 0));
        assert!(!msg.is_system_message());
    }
}
