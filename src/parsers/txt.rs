//! WhatsApp TXT export parser.
//!
//! Each physical line is classified on its own:
//!
//! ```text
//! 15/03/24, 14:30 - Ana: Olá a todos            authored message
//! 15/03/24, 14:31 - Ana adicionou Rui           system event
//! 15/03/24, 14:32 - Rui: @\u{2068}Ana\u{2069} obrigado  authored, replyTo = "Ana"
//! e continua aqui                               dropped (no timestamp)
//! ```
//!
//! Lines without a timestamp, without the `" - "` separator right after it,
//! or without a sender that are not system notices are skipped. Multi-line
//! messages therefore keep only their first line.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::Message;
use crate::error::Result;
use crate::identity::IdentityTable;
use crate::parser::{InputFormat, Parser};
use crate::parsing::timestamp::parse_timestamp_prefix;
use crate::parsing::whatsapp::{SENDER_SEPARATOR, TIMESTAMP_SEPARATOR};
use crate::parsing::{extract_mention, is_system_notice, is_system_phrase};
use crate::progress::ProgressReporter;

/// Lines between two progress reports.
const PROGRESS_INTERVAL: usize = 100;

/// Parser for WhatsApp TXT exports.
///
/// # Example
///
/// ```rust
/// use chatpulse::identity::IdentityTable;
/// use chatpulse::parser::Parser;
/// use chatpulse::parsers::TxtParser;
/// use std::sync::Arc;
///
/// let identities = IdentityTable::new([("+351 912 000 000", "Rita")], Vec::<(&str, &str)>::new());
/// let parser = TxtParser::new(Arc::new(identities));
///
/// let messages = parser.parse_str("15/03/24, 14:30 - +351 912 000 000: Olá")?;
/// assert_eq!(messages[0].sender, "Rita");
/// # Ok::<(), chatpulse::ChatpulseError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TxtParser {
    identities: Arc<IdentityTable>,
}

/// Why a line produced no message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Skip {
    Blank,
    NoTimestamp,
    NoSeparator,
    NotSystem,
}

impl TxtParser {
    /// Creates a parser that normalizes senders through `identities`.
    pub fn new(identities: Arc<IdentityTable>) -> Self {
        Self { identities }
    }

    /// Returns the identity tables in use.
    pub fn identities(&self) -> &IdentityTable {
        &self.identities
    }

    fn parse_line(&self, raw: &str) -> std::result::Result<Message, Skip> {
        let line = raw.trim().trim_start_matches('\u{FEFF}');
        if line.is_empty() {
            return Err(Skip::Blank);
        }

        let (timestamp, end) = parse_timestamp_prefix(line).ok_or(Skip::NoTimestamp)?;
        let rest = line[end..]
            .strip_prefix(TIMESTAMP_SEPARATOR)
            .ok_or(Skip::NoSeparator)?;

        let Some((raw_sender, content)) = rest.split_once(SENDER_SEPARATOR) else {
            return if is_system_notice(rest) {
                Ok(Message::system(timestamp, rest))
            } else {
                Err(Skip::NotSystem)
            };
        };

        let sender = self.identities.normalize(raw_sender);
        let is_system = is_system_phrase(content) || sender.is_empty();

        let mut message = Message::new(timestamp, sender, content).with_system_flag(is_system);
        if let Some(mentioned) = extract_mention(content)
            .map(|name| self.identities.normalize(name))
            .filter(|name| !name.is_empty())
        {
            message = message.with_reply_to(mentioned);
        }
        Ok(message)
    }
}

impl Parser for TxtParser {
    fn name(&self) -> &'static str {
        "WhatsApp TXT"
    }

    fn format(&self) -> InputFormat {
        InputFormat::Txt
    }

    fn parse_with_progress(&self, content: &str, progress: &ProgressReporter) -> Result<Vec<Message>> {
        let lines: Vec<&str> = content.split('\n').collect();
        let total = lines.len();
        let mut messages = Vec::new();
        let mut skipped = 0usize;

        for (i, raw) in lines.iter().enumerate() {
            if i % PROGRESS_INTERVAL == 0 {
                progress.report(i, total)?;
            }

            match self.parse_line(raw) {
                Ok(message) => messages.push(message),
                Err(Skip::Blank) => {}
                Err(reason) => {
                    skipped += 1;
                    trace!(line = i + 1, ?reason, "skipping line");
                }
            }
        }

        progress.report(total, total)?;
        debug!(
            lines = total,
            messages = messages.len(),
            skipped,
            "parsed WhatsApp TXT export"
        );

        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::SYSTEM_SENDER;
    use crate::progress::{CancellationToken, ParseProgress, ProgressCallback};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Mutex;

    fn parser() -> TxtParser {
        TxtParser::new(Arc::new(IdentityTable::new(
            [("+351 936 000 111", "Nuno")],
            [("Xani", "Alexandre")],
        )))
    }

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_parser_name() {
        let parser = TxtParser::default();
        assert_eq!(parser.name(), "WhatsApp TXT");
        assert_eq!(parser.format(), InputFormat::Txt);
    }

    #[test]
    fn test_parse_simple_message() {
        let messages = parser().parse_str("15/03/24, 14:30 - Ana: Olá a todos").unwrap();
        assert_eq!(
            messages,
            vec![Message::new(ts(15, 14, 30), "Ana", "Olá a todos")]
        );
    }

    #[test]
    fn test_system_event_without_sender() {
        let messages = parser()
            .parse_str("15/03/24, 14:30 - Ana criou o grupo \"Amigos\"")
            .unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, SYSTEM_SENDER);
        assert_eq!(messages[0].content, "Ana criou o grupo \"Amigos\"");
        assert!(messages[0].is_system_message);
    }

    #[test]
    fn test_unrecognized_senderless_line_dropped() {
        let messages = parser().parse_str("15/03/24, 14:30 - something odd").unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_system_phrase_in_content_flags_message() {
        let messages = parser()
            .parse_str("15/03/24, 14:30 - Ana: Rui saiu ontem")
            .unwrap();
        assert_eq!(messages[0].sender, "Ana");
        assert!(messages[0].is_system_message);
    }

    #[test]
    fn test_empty_sender_is_system() {
        let messages = parser().parse_str("15/03/24, 14:30 - \u{200E}: ok").unwrap();
        assert_eq!(messages[0].sender, "");
        assert!(messages[0].is_system_message);
    }

    #[test]
    fn test_sender_normalized() {
        let content = "15/03/24, 14:30 - \u{202A}+351 936 000 111\u{202C}: oi\n\
                       15/03/24, 14:31 - Xani: olá";
        let messages = parser().parse_str(content).unwrap();
        assert_eq!(messages[0].sender, "Nuno");
        assert_eq!(messages[1].sender, "Alexandre");
    }

    #[test]
    fn test_mention_becomes_reply_to() {
        let content = "15/03/24, 14:30 - Ana: @\u{2068}Xani\u{2069} e @\u{2068}Rui\u{2069} vejam";
        let messages = parser().parse_str(content).unwrap();
        assert_eq!(messages[0].reply_to.as_deref(), Some("Alexandre"));
    }

    #[test]
    fn test_plain_at_is_not_mention() {
        let messages = parser()
            .parse_str("15/03/24, 14:30 - Ana: manda para rui@mail.com")
            .unwrap();
        assert!(messages[0].reply_to.is_none());
    }

    #[test]
    fn test_continuation_and_blank_lines_dropped() {
        let content = "15/03/24, 14:30 - Ana: linha um\nlinha dois\n\n15/03/24, 14:31 - Rui: ok\n";
        let messages = parser().parse_str(content).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "linha um");
        assert_eq!(messages[1].sender, "Rui");
    }

    #[test]
    fn test_separator_must_follow_timestamp() {
        let content = "15/03/24, 14:30 Ana - x: y\n[15/03/24, 14:30] Ana: sem hífen";
        let messages = parser().parse_str(content).unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_content_keeps_later_colons() {
        let messages = parser()
            .parse_str("15/03/24, 14:30 - Ana: hora: 10: 30")
            .unwrap();
        assert_eq!(messages[0].content, "hora: 10: 30");
    }

    #[test]
    fn test_crlf_and_bom() {
        let content = "\u{FEFF}15/03/24, 14:30 - Ana: um\r\n15/03/24, 14:31 - Rui: dois\r\n";
        let messages = parser().parse_str(content).unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "um");
        assert_eq!(messages[1].content, "dois");
    }

    #[test]
    fn test_order_preserved() {
        let content = "16/03/24, 10:00 - B: later first\n15/03/24, 10:00 - A: earlier second";
        let messages = parser().parse_str(content).unwrap();
        assert_eq!(messages[0].sender, "B");
        assert_eq!(messages[1].sender, "A");
    }

    #[test]
    fn test_progress_reports_every_hundred_lines_and_completion() {
        let content: String = (0..250)
            .map(|i| format!("15/03/24, 10:{:02} - Ana: msg {i}\n", i % 60))
            .collect();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressCallback = Arc::new(move |p: ParseProgress| sink.lock().unwrap().push(p));

        let messages = parser()
            .parse_with_progress(&content, &ProgressReporter::new(callback))
            .unwrap();
        assert_eq!(messages.len(), 250);

        let seen = seen.lock().unwrap();
        let currents: Vec<usize> = seen.iter().map(|p| p.current).collect();
        assert_eq!(currents, vec![0, 100, 200, 251]);
        assert_eq!(seen.last().unwrap().percentage, 100);
    }

    #[test]
    fn test_cancellation_stops_parse() {
        let content = "15/03/24, 10:00 - Ana: x\n".repeat(300);
        let token = CancellationToken::new();
        token.cancel();
        let reporter = ProgressReporter::silent().with_cancellation(token);

        let err = parser().parse_with_progress(&content, &reporter).unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_empty_input() {
        let messages = parser().parse_str("").unwrap();
        assert!(messages.is_empty());
    }

    #[test]
    fn test_english_chat_stays_authored() {
        let content = "\
15/03/24, 14:30 - Ana: I left my keys at home
15/03/24, 14:31 - Rui: I added the photos
15/03/24, 14:32 - Eva: ask the admin
15/03/24, 14:33 - Rui left";
        let messages = parser().parse_str(content).unwrap();
        assert_eq!(messages.len(), 4);
        assert!(messages[..3].iter().all(Message::is_authored));
        assert!(messages[3].is_system_message());
    }

    #[test]
    fn test_blank_mention_sets_no_reply() {
        let messages = parser()
            .parse_str("15/03/24, 14:30 - Ana: @\u{2068} \u{200E}\u{2069} alguém?")
            .unwrap();
        assert_eq!(messages[0].reply_to(), None);
    }
}
