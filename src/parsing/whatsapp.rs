//! WhatsApp transcript conventions.
//!
//! Phrase tables for system events, the mention marker and the
//! "created group" notice. Only Portuguese and English exports are recognized.

use std::sync::LazyLock;

use regex::{Regex, RegexSet};

/// Separator between the timestamp and the rest of a line.
pub const TIMESTAMP_SEPARATOR: &str = " - ";

/// Separator between the sender and the message body.
pub const SENDER_SEPARATOR: &str = ": ";

static SYSTEM_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)criou o grupo",
        r"(?i)adicionou",
        r"(?i)saiu",
        r"(?i)removeu",
        r"(?i)alterou",
        r"(?i)administrador",
        r"(?i)encriptadas",
        r"(?i)mensagens.*chamadas",
        r"(?i)\bend-to-end encrypted\b",
    ])
    .expect("system patterns are valid")
});

// English notices are matched as whole lines, and only on lines without a sender.
// "I left my keys" is ordinary chat.
static ENGLISH_NOTICES: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r#"(?i)^.+ created group ".+"$"#,
        r"(?i)^.+ added .+$",
        r"(?i)^.+ removed .+$",
        r"(?i)^[^ ]+( [^ ]+)? left$",
        r"(?i)^.+ changed (the subject|this group's|the group|their phone number)\b.*$",
        r"(?i)^you're now an admin$",
        r"(?i)^.+ joined using this group's invite link$",
    ])
    .expect("notice patterns are valid")
});

// WhatsApp wraps mentioned names in FIRST STRONG ISOLATE / POP DIRECTIONAL ISOLATE.
// A bare "@word" is not a mention.
static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("@\u{2068}([^\u{2069}]+)\u{2069}").expect("mention pattern is valid"));

static GROUP_CREATED_PT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)criou o grupo\s+"([^"]+)""#).expect("group pattern is valid"));

static GROUP_CREATED_EN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)created group\s+"([^"]+)""#).expect("group pattern is valid"));

/// Returns `true` if `text` contains a group-management or encryption phrase.
///
/// Applied to message bodies as well, so only phrases that do not occur in
/// ordinary English chat are listed here.
///
/// ```rust
/// use chatpulse::parsing::is_system_phrase;
///
/// assert!(is_system_phrase("Ana adicionou Rui"));
/// assert!(is_system_phrase("Messages and calls are end-to-end encrypted."));
/// assert!(!is_system_phrase("Bom dia a todos"));
/// assert!(!is_system_phrase("I left my keys at home"));
/// ```
pub fn is_system_phrase(text: &str) -> bool {
    SYSTEM_PATTERNS.is_match(text)
}

/// Returns `true` if a line with no sender is a system notice.
///
/// Accepts every [`is_system_phrase`] match plus whole-line English notices
/// such as "Ana added Rui" or "Rui left".
///
/// ```rust
/// use chatpulse::parsing::is_system_notice;
///
/// assert!(is_system_notice("Ana added Rui"));
/// assert!(is_system_notice("Rui left"));
/// assert!(!is_system_notice("isto não é um evento"));
/// ```
pub fn is_system_notice(line: &str) -> bool {
    is_system_phrase(line) || ENGLISH_NOTICES.is_match(line.trim())
}

/// Returns the raw name inside the first mention marker, if any.
///
/// ```rust
/// use chatpulse::parsing::extract_mention;
///
/// assert_eq!(extract_mention("@\u{2068}Rui Costa\u{2069} concordo"), Some("Rui Costa"));
/// assert_eq!(extract_mention("escreve para ana@mail.com"), None);
/// ```
pub fn extract_mention(content: &str) -> Option<&str> {
    MENTION
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Finds the group name in a "created group" notice.
///
/// Lines are scanned in order; on each line the Portuguese phrase is tried
/// before the English one. The first quoted name found wins.
///
/// ```rust
/// use chatpulse::parsing::extract_group_name;
///
/// let text = "01/01/24, 10:00 - Ana criou o grupo \"Amigos\"\n01/01/24, 10:01 - Ana: Olá";
/// assert_eq!(extract_group_name(text), Some("Amigos".to_string()));
/// assert_eq!(extract_group_name("no notice here"), None);
/// ```
pub fn extract_group_name(text: &str) -> Option<String> {
    text.lines().find_map(|line| {
        GROUP_CREATED_PT
            .captures(line)
            .or_else(|| GROUP_CREATED_EN.captures(line))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    })
}
