//! Mention flows between users.

use serde::{Deserialize, Serialize};

use super::tally::Tally;
use crate::Message;

/// Messages from `source` that mention `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadFlow {
    pub source: String,
    pub target: String,
    pub value: usize,
}

/// Counts mention links between distinct users.
///
/// Only authored messages with a `reply_to` count; self-mentions are skipped.
/// Sorted by `value` descending, first-seen order on ties.
///
/// ```rust
/// use chatpulse::analytics::thread_flows;
/// use chatpulse::Message;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let messages = vec![
///     Message::new(ts, "Rui", "@Ana sim").with_reply_to("Ana"),
///     Message::new(ts, "Rui", "@Ana claro").with_reply_to("Ana"),
/// ];
///
/// let flows = thread_flows(&messages);
/// assert_eq!(flows.len(), 1);
/// assert_eq!((flows[0].source.as_str(), flows[0].target.as_str(), flows[0].value), ("Rui", "Ana", 2));
/// ```
pub fn thread_flows(messages: &[Message]) -> Vec<ThreadFlow> {
    let mut links = Tally::new();
    for msg in messages.iter().filter(|m| m.is_authored()) {
        match msg.reply_to() {
            Some(target) if target != msg.sender => {
                links.add(&(msg.sender.clone(), target.to_string()));
            }
            _ => {}
        }
    }

    links
        .into_sorted()
        .into_iter()
        .map(|((source, target), value)| ThreadFlow {
            source,
            target,
            value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn mention(from: &str, to: &str) -> Message {
        Message::new(ts(), from, "x").with_reply_to(to)
    }

    #[test]
    fn test_no_mentions() {
        assert!(thread_flows(&[Message::new(ts(), "Ana", "x")]).is_empty());
    }

    #[test]
    fn test_self_mentions_and_system_skipped() {
        let messages = vec![
            mention("Ana", "Ana"),
            Message::system(ts(), "x").with_reply_to("Rui"),
        ];
        assert!(thread_flows(&messages).is_empty());
    }

    #[test]
    fn test_direction_matters_and_ties_keep_order() {
        let messages = vec![
            mention("Ana", "Rui"),
            mention("Rui", "Ana"),
            mention("Eva", "Ana"),
            mention("Eva", "Ana"),
        ];
        let flows: Vec<(String, String, usize)> = thread_flows(&messages)
            .into_iter()
            .map(|f| (f.source, f.target, f.value))
            .collect();
        assert_eq!(
            flows,
            vec![
                ("Eva".into(), "Ana".into(), 2),
                ("Ana".into(), "Rui".into(), 1),
                ("Rui".into(), "Ana".into(), 1),
            ]
        );
    }
}
