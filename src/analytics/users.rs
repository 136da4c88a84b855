//! Per-user activity and response statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::Message;

/// Statistics for one author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub name: String,

    /// Authored messages.
    pub message_count: usize,

    /// Authored messages whose mention points at this user.
    pub replies_received: usize,

    /// Mean of this user's response gaps, in seconds; 0 without responses.
    pub avg_response_time: f64,

    /// Messages followed, at any later point, by a message from someone else.
    pub initiations: usize,

    /// Messages that directly follow a message from someone else.
    pub responses: usize,
}

impl UserStats {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            message_count: 0,
            replies_received: 0,
            avg_response_time: 0.0,
            initiations: 0,
            responses: 0,
        }
    }
}

/// Computes per-user statistics over authored messages.
///
/// Walks the messages in source order:
///
/// - a message whose sender differs from the previous message's sender is a
///   response; the gap in seconds goes into that sender's average
/// - every message outside the final run of consecutive messages by one
///   sender counts as an initiation
/// - a mention of a known author counts as a reply received by that author,
///   self-mentions included
///
/// The result is sorted by `message_count` descending, first-seen order on ties.
///
/// ```rust
/// use chatpulse::analytics::user_stats;
/// use chatpulse::Message;
/// use chrono::NaiveDate;
///
/// let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// let messages = vec![
///     Message::new(t0, "Ana", "Alguém?"),
///     Message::new(t0 + chrono::Duration::seconds(90), "Rui", "Eu"),
/// ];
///
/// let stats = user_stats(&messages);
/// let rui = stats.iter().find(|s| s.name == "Rui").unwrap();
/// assert_eq!(rui.responses, 1);
/// assert_eq!(rui.avg_response_time, 90.0);
/// ```
pub fn user_stats(messages: &[Message]) -> Vec<UserStats> {
    let authored: Vec<&Message> = messages.iter().filter(|m| m.is_authored()).collect();

    let mut stats: Vec<UserStats> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for msg in &authored {
        let pos = *index.entry(msg.sender.as_str()).or_insert_with(|| {
            stats.push(UserStats::new(&msg.sender));
            stats.len() - 1
        });
        stats[pos].message_count += 1;
    }

    for msg in &authored {
        if let Some(&pos) = msg.reply_to().and_then(|name| index.get(name)) {
            stats[pos].replies_received += 1;
        }
    }

    let mut gaps: Vec<(f64, usize)> = vec![(0.0, 0); stats.len()];
    for pair in authored.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if curr.sender != prev.sender {
            let pos = index[curr.sender.as_str()];
            let secs = (curr.timestamp - prev.timestamp).num_milliseconds() as f64 / 1000.0;
            gaps[pos].0 += secs;
            gaps[pos].1 += 1;
            stats[pos].responses += 1;
        }
    }

    // A message has a later message from someone else exactly when it comes
    // before the trailing run of the last sender.
    let tail_start = authored.last().map_or(0, |last| {
        authored
            .iter()
            .rposition(|m| m.sender != last.sender)
            .map_or(0, |pos| pos + 1)
    });
    for msg in &authored[..tail_start] {
        stats[index[msg.sender.as_str()]].initiations += 1;
    }

    for (entry, (total, count)) in stats.iter_mut().zip(gaps) {
        if count > 0 {
            entry.avg_response_time = total / count as f64;
        }
    }

    stats.sort_by(|a, b| b.message_count.cmp(&a.message_count));
    stats
}
