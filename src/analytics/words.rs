//! Word frequencies for the word cloud.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::stopwords::Stopwords;
use super::tally::Tally;
use crate::Message;
use crate::config::WordCloudConfig;

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("url pattern is valid"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

static NON_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\s]").expect("letter pattern is valid"));

/// A counted word and its display size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordFrequency {
    pub text: String,
    pub count: usize,
    /// Linear in `count` between the configured minimum and maximum size.
    pub size: f64,
}

/// Splits message content into countable words.
///
/// Content is lowercased, URLs and `<tags>` are removed, anything that is
/// not a letter becomes a space. Single-character words, stopwords and
/// pure digits are dropped.
///
/// ```rust
/// use chatpulse::analytics::stopwords::Stopwords;
/// use chatpulse::analytics::words::tokenize;
///
/// let words = tokenize("Vejam https://x.pt/a <b>AMANHÃ</b> às 10h, ok?", &Stopwords::portuguese());
/// assert_eq!(words, vec!["vejam", "amanhã"]);
/// ```
pub fn tokenize(content: &str, stopwords: &Stopwords) -> Vec<String> {
    let lower = content.to_lowercase();
    let without_urls = URL.replace_all(&lower, "");
    let without_tags = TAG.replace_all(&without_urls, "");
    let letters = NON_LETTER.replace_all(&without_tags, " ");

    letters
        .split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .filter(|w| !stopwords.contains(w))
        .filter(|w| !w.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Counts words across authored messages.
///
/// Words below `config.min_count` are dropped; the rest are sorted by count
/// descending (first-seen order on ties) and cut to `config.max_words`.
/// Sizes are scaled over the counts of the kept words; when they all share
/// one count every word gets the minimum size.
///
/// ```rust
/// use chatpulse::analytics::word_frequencies;
/// use chatpulse::config::WordCloudConfig;
/// use chatpulse::Message;
/// use chrono::NaiveDate;
///
/// let ts = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let messages: Vec<Message> = (0..5).map(|_| Message::new(ts, "Ana", "futebol hoje")).collect();
///
/// let words = word_frequencies(&messages, &WordCloudConfig::default());
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[0].text, "futebol");
/// assert_eq!(words[0].count, 5);
/// ```
pub fn word_frequencies(messages: &[Message], config: &WordCloudConfig) -> Vec<WordFrequency> {
    let mut counts = Tally::new();
    for msg in messages.iter().filter(|m| m.is_authored()) {
        for word in tokenize(&msg.content, &config.stopwords) {
            counts.add(&word);
        }
    }

    let kept: Vec<(String, usize)> = counts
        .into_sorted()
        .into_iter()
        .filter(|(_, count)| *count >= config.min_count)
        .take(config.max_words)
        .collect();

    let (Some(max), Some(min)) = (kept.first().map(|w| w.1), kept.last().map(|w| w.1)) else {
        return Vec::new();
    };
    let range = if max == min { 1.0 } else { (max - min) as f64 };
    let span = config.max_size - config.min_size;

    kept.into_iter()
        .map(|(text, count)| WordFrequency {
            size: config.min_size + ((count - min) as f64 / range) * span,
            text,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn messages(texts: &[&str]) -> Vec<Message> {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        texts.iter().map(|t| Message::new(ts, "Ana", *t)).collect()
    }

    fn repeat(word: &str, n: usize) -> String {
        vec![word; n].join(" ")
    }

    #[test]
    fn test_tokenize_strips_urls_tags_and_punctuation() {
        let words = tokenize(
            "Olha HTTPS://example.com/x?y=1 e <i>isto</i>: praia!!! 2024 a1b",
            &Stopwords::none(),
        );
        assert_eq!(words, vec!["olha", "isto", "praia"]);
    }

    #[test]
    fn test_tokenize_keeps_accented_letters() {
        let words = tokenize("Coração, pão e café", &Stopwords::portuguese());
        assert_eq!(words, vec!["coração", "pão", "café"]);
    }

    #[test]
    fn test_tokenize_single_char_counted_by_chars() {
        let words = tokenize("é ã ok", &Stopwords::none());
        assert_eq!(words, vec!["ok"]);
    }

    #[test]
    fn test_min_count_threshold() {
        let text = format!("{} {}", repeat("praia", 5), repeat("sol", 4));
        let words = word_frequencies(&messages(&[&text]), &WordCloudConfig::default());
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "praia");
    }

    #[test]
    fn test_sizes_scaled_between_bounds() {
        let text = format!("{} {} {}", repeat("praia", 5), repeat("sol", 15), repeat("mar", 10));
        let words = word_frequencies(&messages(&[&text]), &WordCloudConfig::default());
        let by_text: Vec<(&str, f64)> = words.iter().map(|w| (w.text.as_str(), w.size)).collect();
        assert_eq!(by_text[0], ("sol", 60.0));
        assert_eq!(by_text[1], ("mar", 36.0));
        assert_eq!(by_text[2], ("praia", 12.0));
    }

    #[test]
    fn test_single_count_gets_min_size() {
        let text = format!("{} {}", repeat("praia", 6), repeat("sol", 6));
        let words = word_frequencies(&messages(&[&text]), &WordCloudConfig::default());
        assert!(words.iter().all(|w| (w.size - 12.0).abs() < f64::EPSILON));
        assert_eq!(words[0].text, "praia");
    }

    #[test]
    fn test_max_words_and_order() {
        let text: String = (0..120)
            .map(|i| {
                let word: String = std::iter::repeat_n('a', 2 + i % 60)
                    .chain(std::iter::repeat_n('b', 2 + i / 60))
                    .collect();
                repeat(&word, 5)
            })
            .collect::<Vec<_>>()
            .join(" ");
        let words = word_frequencies(&messages(&[&text]), &WordCloudConfig::default());
        assert_eq!(words.len(), 100);
        assert!(words.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_substrings_not_merged() {
        let text = format!("{} {}", repeat("casa", 5), repeat("casamento", 5));
        let words = word_frequencies(&messages(&[&text]), &WordCloudConfig::default());
        assert_eq!(words.len(), 2);
        assert!(words.iter().all(|w| w.count == 5));
    }

    #[test]
    fn test_system_messages_ignored() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let msgs: Vec<Message> = (0..5).map(|_| Message::system(ts, "grupo grupo")).collect();
        assert!(word_frequencies(&msgs, &WordCloudConfig::default()).is_empty());
    }

    #[test]
    fn test_custom_config() {
        let config = WordCloudConfig::new()
            .with_min_count(1)
            .with_stopwords(Stopwords::from_words(["praia"]));
        let words = word_frequencies(&messages(&["praia sol"]), &config);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "sol");
    }
}
