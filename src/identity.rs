//! Sender identity normalization.
//!
//! WhatsApp exports write a contact either by its saved name or, for unsaved
//! contacts, by phone number; the same person can also appear under several
//! names over the lifetime of a group. [`IdentityTable`] maps all of those
//! spellings to one display name.
//!
//! Lookups are pure: the tables are built once, are read-only afterwards,
//! and are shared by reference (usually behind an `Arc`) with the parsers.
//!
//! # Example
//!
//! ```
//! use chatpulse::identity::IdentityTable;
//!
//! let table = IdentityTable::new(
//!     [("+351 912 345 678", "Nuno")],
//!     [("Xani", "Alexandre")],
//! );
//!
//! assert_eq!(table.normalize("\u{202A}+351 912 345 678\u{202C}"), "Nuno");
//! assert_eq!(table.normalize(" Xani "), "Alexandre");
//! assert_eq!(table.normalize("Ana"), "Ana");
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Returns `true` for the bidi controls and byte-order mark WhatsApp sprinkles
/// around names and phone numbers.
fn is_invisible_mark(c: char) -> bool {
    matches!(
        c,
        '\u{200E}' | '\u{200F}' | '\u{202A}'..='\u{202E}' | '\u{2066}'..='\u{2069}' | '\u{FEFF}'
    )
}

/// Removes invisible marks anywhere in `input`, then trims surrounding whitespace.
pub fn strip_invisible_marks(input: &str) -> String {
    let stripped: String = input.chars().filter(|&c| !is_invisible_mark(c)).collect();
    stripped.trim().to_string()
}

/// Serialized shape of the lookup tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawIdentityTable {
    #[serde(default)]
    phones: HashMap<String, String>,
    #[serde(default)]
    aliases: HashMap<String, String>,
}

/// Read-only phone→name and alias→name lookup.
///
/// Deserializes from `{"phones": {...}, "aliases": {...}}`; both keys are
/// optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawIdentityTable", into = "RawIdentityTable")]
pub struct IdentityTable {
    phones: HashMap<String, String>,
    aliases: HashMap<String, String>,
    /// Final display name for every key of either table.
    resolved: HashMap<String, String>,
}

impl From<RawIdentityTable> for IdentityTable {
    fn from(raw: RawIdentityTable) -> Self {
        IdentityTable::new(raw.phones, raw.aliases)
    }
}

impl From<IdentityTable> for RawIdentityTable {
    fn from(table: IdentityTable) -> Self {
        RawIdentityTable {
            phones: table.phones,
            aliases: table.aliases,
        }
    }
}

impl IdentityTable {
    /// Builds a table from phone and alias pairs.
    ///
    /// Keys and values are cleaned the same way sender names are. Entries are
    /// then resolved to a fixed point, so a phone mapped to an alias ends at
    /// the alias target and a cycle collapses onto its smallest member.
    pub fn new<P, A, K, V, K2, V2>(phones: P, aliases: A) -> Self
    where
        P: IntoIterator<Item = (K, V)>,
        A: IntoIterator<Item = (K2, V2)>,
        K: AsRef<str>,
        V: AsRef<str>,
        K2: AsRef<str>,
        V2: AsRef<str>,
    {
        let phones: HashMap<String, String> = phones
            .into_iter()
            .map(|(k, v)| (strip_invisible_marks(k.as_ref()), strip_invisible_marks(v.as_ref())))
            .collect();
        let aliases: HashMap<String, String> = aliases
            .into_iter()
            .map(|(k, v)| (strip_invisible_marks(k.as_ref()), strip_invisible_marks(v.as_ref())))
            .collect();

        let mut table = Self {
            phones,
            aliases,
            resolved: HashMap::new(),
        };

        let keys: Vec<String> = table
            .phones
            .keys()
            .chain(table.aliases.keys())
            .cloned()
            .collect();
        for key in keys {
            let target = table.resolve(&key);
            table.resolved.insert(key, target);
        }

        table
    }

    /// An empty table: names are only cleaned.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a table from its JSON representation.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns `true` when both tables are empty.
    pub fn is_empty(&self) -> bool {
        self.phones.is_empty() && self.aliases.is_empty()
    }

    /// Number of phone entries.
    pub fn phone_count(&self) -> usize {
        self.phones.len()
    }

    /// Number of alias entries.
    pub fn alias_count(&self) -> usize {
        self.aliases.len()
    }

    /// One lookup step: phones take precedence over aliases.
    fn step(&self, name: &str) -> Option<&str> {
        self.phones
            .get(name)
            .or_else(|| self.aliases.get(name))
            .map(String::as_str)
    }

    fn resolve(&self, start: &str) -> String {
        let mut path: Vec<&str> = vec![start];
        let mut current = start;

        while let Some(next) = self.step(current) {
            if let Some(pos) = path.iter().position(|seen| *seen == next) {
                return path[pos..]
                    .iter()
                    .min()
                    .map_or_else(|| next.to_string(), |s| (*s).to_string());
            }
            path.push(next);
            current = next;
        }

        current.to_string()
    }

    /// Maps a raw sender string to its display name.
    ///
    /// Invisible marks and surrounding whitespace are removed first; the
    /// cleaned string is then looked up as a phone number, then as an alias.
    /// Unknown names are returned cleaned. `normalize(normalize(x))` always
    /// equals `normalize(x)`.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = strip_invisible_marks(raw);
        match self.resolved.get(&cleaned) {
            Some(name) => name.clone(),
            None => cleaned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IdentityTable {
        IdentityTable::new(
            [("+351 936 000 111", "Nuno Motta"), ("+55 69 8115-0000", "Antonio Carlos")],
            [
                ("Xani", "Alexandre"),
                ("Mariza Fontes Ribadouro", "Mariza"),
                ("Mariza Ribadouro", "Mariza"),
            ],
        )
    }

    #[test]
    fn test_strip_invisible_marks() {
        assert_eq!(strip_invisible_marks("\u{200E}Ana\u{200F}"), "Ana");
        assert_eq!(strip_invisible_marks("\u{2068}Rui\u{2069}"), "Rui");
        assert_eq!(strip_invisible_marks("\u{FEFF}  Bob  "), "Bob");
        assert_eq!(strip_invisible_marks("Jo\u{202A}ão"), "João");
    }

    #[test]
    fn test_normalize_phone() {
        let table = sample();
        assert_eq!(table.normalize("+351 936 000 111"), "Nuno Motta");
        assert_eq!(table.normalize("\u{202A}+55 69 8115-0000\u{202C}"), "Antonio Carlos");
    }

    #[test]
    fn test_normalize_alias_merges_names() {
        let table = sample();
        assert_eq!(table.normalize("Mariza Fontes Ribadouro"), "Mariza");
        assert_eq!(table.normalize("Mariza Ribadouro"), "Mariza");
        assert_eq!(table.normalize(" Xani"), "Alexandre");
    }

    #[test]
    fn test_normalize_unknown_is_cleaned_only() {
        let table = sample();
        assert_eq!(table.normalize("  Ana \u{200E}"), "Ana");
        assert_eq!(table.normalize(""), "");
    }

    #[test]
    fn test_phone_takes_precedence_over_alias() {
        let table = IdentityTable::new([("Zé", "José Phone")], [("Zé", "José Alias")]);
        assert_eq!(table.normalize("Zé"), "José Phone");
    }

    #[test]
    fn test_chained_entries_resolve_to_fixed_point() {
        let table = IdentityTable::new([("+1 555", "Xani")], [("Xani", "Alexandre")]);
        let once = table.normalize("+1 555");
        assert_eq!(once, "Alexandre");
        assert_eq!(table.normalize(&once), once);
    }

    #[test]
    fn test_cycle_is_idempotent() {
        let table = IdentityTable::new(Vec::<(&str, &str)>::new(), [("B", "A"), ("A", "B")]);
        let a = table.normalize("A");
        let b = table.normalize("B");
        assert_eq!(a, "A");
        assert_eq!(b, "A");
        assert_eq!(table.normalize(&a), a);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{"phones": {"+351 1": "Rita"}, "aliases": {"Ritinha": "Rita"}}"#;
        let table = IdentityTable::from_json_str(json).unwrap();
        assert_eq!(table.phone_count(), 1);
        assert_eq!(table.alias_count(), 1);
        assert_eq!(table.normalize("Ritinha"), "Rita");

        let aliases_only = IdentityTable::from_json_str(r#"{"aliases": {"X": "Y"}}"#).unwrap();
        assert_eq!(aliases_only.normalize("X"), "Y");
    }

    #[test]
    fn test_empty_table() {
        let table = IdentityTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.normalize("\u{2066}Ana\u{2069}"), "Ana");
    }
}
