//! Transcript summary.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::tally::Tally;
use crate::Message;

/// First and last authored timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// The calendar day with the most authored messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDay {
    pub date: NaiveDate,
    pub count: usize,
}

/// Headline numbers for a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryData {
    /// All messages, system events included.
    pub total_messages: usize,

    /// Distinct authors.
    pub total_participants: usize,

    /// `None` when there are no authored messages.
    pub date_range: Option<DateRange>,

    /// `None` when there are no authored messages.
    pub most_active_day: Option<ActiveDay>,
}

/// Computes the summary of `messages`.
///
/// Only `total_messages` counts system events. On ties the most active day
/// is the one seen first.
///
/// ```rust
/// use chatpulse::analytics::summary;
/// use chatpulse::Message;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let messages = vec![
///     Message::system(day.and_hms_opt(9, 0, 0).unwrap(), "Ana criou o grupo \"X\""),
///     Message::new(day.and_hms_opt(9, 1, 0).unwrap(), "Ana", "Olá"),
///     Message::new(day.and_hms_opt(9, 2, 0).unwrap(), "Rui", "Oi"),
/// ];
///
/// let s = summary(&messages);
/// assert_eq!(s.total_messages, 3);
/// assert_eq!(s.total_participants, 2);
/// assert_eq!(s.most_active_day.unwrap().count, 2);
/// ```
pub fn summary(messages: &[Message]) -> SummaryData {
    let mut senders = Tally::new();
    let mut days = Tally::new();
    let mut range: Option<DateRange> = None;

    for msg in messages.iter().filter(|m| m.is_authored()) {
        senders.add(&msg.sender);
        days.add(&msg.timestamp.date());

        let ts = msg.timestamp;
        range = Some(match range {
            None => DateRange { start: ts, end: ts },
            Some(r) => DateRange {
                start: r.start.min(ts),
                end: r.end.max(ts),
            },
        });
    }

    SummaryData {
        total_messages: messages.len(),
        total_participants: senders.len(),
        date_range: range,
        most_active_day: days.max().map(|(date, count)| ActiveDay { date: *date, count }),
    }
}
