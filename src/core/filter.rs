//! Filter messages by date range and sender.
//!
//! This module provides [`FilterConfig`] for selecting the users and days a
//! report should cover, and [`apply_filters`] for applying it to a
//! transcript.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Users | [`with_user`](FilterConfig::with_user) | Messages from any selected user |
//!
//! # Examples
//!
//! ```
//! use chatpulse::core::filter::{FilterConfig, apply_filters};
//! use chatpulse::Message;
//! use chrono::NaiveDate;
//!
//! # fn main() -> chatpulse::Result<()> {
//! let ts = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let messages = vec![
//!     Message::new(ts(1), "Ana", "Olá"),
//!     Message::new(ts(2), "Rui", "Oi"),
//!     Message::new(ts(20), "Ana", "Tudo bem?"),
//! ];
//!
//! let config = FilterConfig::new()
//!     .with_user("Ana")
//!     .with_date_to("2024-06-10")?;
//! let filtered = apply_filters(messages, &config);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content, "Olá");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - User names match exactly, after identity normalization has been applied
//! - System events never match a user selection
//! - Multiple filters are combined with AND logic

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::ChatpulseError;

/// Selected users and date bounds.
///
/// An empty user list selects everybody.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Include only messages on or after this wall-clock time.
    pub after: Option<NaiveDateTime>,

    /// Include only messages on or before this wall-clock time.
    pub before: Option<NaiveDateTime>,

    /// Include only messages from these senders.
    pub users: Vec<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive, from midnight).
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] unless the input is `YYYY-MM-DD`.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self, ChatpulseError> {
        self.after = Some(parse_date(date_str)?.and_time(NaiveTime::MIN));
        Ok(self)
    }

    /// Sets the end date filter (inclusive, through 23:59:59).
    ///
    /// # Errors
    ///
    /// Returns [`ChatpulseError::InvalidDate`] unless the input is `YYYY-MM-DD`.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self, ChatpulseError> {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        self.before = Some(parse_date(date_str)?.and_time(end_of_day));
        Ok(self)
    }

    /// Adds a user to the selection.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.users.push(user.into());
        self
    }

    /// Replaces the user selection.
    #[must_use]
    pub fn with_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users = users.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.has_user_filter()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if a user selection is active.
    pub fn has_user_filter(&self) -> bool {
        !self.users.is_empty()
    }

    /// Whether `sender` is part of the selection.
    pub fn selects_user(&self, sender: &str) -> bool {
        !self.has_user_filter() || self.users.iter().any(|u| u == sender)
    }

    /// Whether `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if self.has_user_filter() && (msg.is_system_message || !self.selects_user(&msg.sender)) {
            return false;
        }
        if self.after.is_some_and(|after| msg.timestamp < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.timestamp > before) {
            return false;
        }
        true
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate, ChatpulseError> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
        .map_err(|_| ChatpulseError::invalid_date(date_str))
}

/// Keeps the messages that match all active filters, in source order.
///
/// Returns the input unchanged when no filter is active.
pub fn apply_filters(messages: Vec<Message>, config: &FilterConfig) -> Vec<Message> {
    if !config.is_active() {
        return messages;
    }

    messages.into_iter().filter(|m| config.matches(m)).collect()
}
