//! Stopword tables for word frequencies.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Portuguese function words plus the placeholders WhatsApp writes for media.
const PORTUGUESE: &[&str] = &[
    "a", "à", "ao", "aos", "aquela", "aquelas", "aquele", "aqueles", "aquilo", "as", "às", "até",
    "com", "como", "da", "das", "de", "dela", "delas", "dele", "deles", "depois", "do", "dos", "e",
    "é", "ela", "elas", "ele", "eles", "em", "entre", "era", "eram", "essa", "essas", "esse",
    "esses", "esta", "está", "estão", "estas", "estava", "este", "estes", "eu", "foi", "foram",
    "há", "isso", "isto", "já", "lhe", "lhes", "mais", "mas", "me", "mesmo", "meu", "meus",
    "minha", "minhas", "muito", "na", "não", "nas", "nem", "no", "nos", "nós", "nossa", "nossas",
    "nosso", "nossos", "num", "numa", "o", "os", "ou", "para", "pela", "pelas", "pelo", "pelos",
    "por", "pra", "pro", "qual", "quando", "que", "quem", "se", "sem", "ser", "seu", "seus", "só",
    "sua", "suas", "também", "te", "tem", "têm", "ter", "teu", "tu", "tua", "um", "uma", "umas",
    "uns", "vai", "vocês", "você", "vos", "ainda", "aqui", "ali", "lá", "então", "sim", "tá",
    "tou", "estou", "ok", "oculto", "oculta", "mídia", "multimédia", "ficheiro", "omitido",
    "omitida", "apagada", "mensagem", "eliminada", "editada",
];

/// A set of lowercase words excluded from word counts.
///
/// Serializes as a plain list of words.
///
/// ```rust
/// use chatpulse::analytics::stopwords::Stopwords;
///
/// let words = Stopwords::portuguese();
/// assert!(words.contains("não"));
/// assert!(!words.contains("futebol"));
///
/// let custom = Stopwords::from_words(["Lol", "kkk"]);
/// assert!(custom.contains("lol"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    /// An empty table.
    pub fn none() -> Self {
        Self::default()
    }

    /// The built-in Portuguese table.
    pub fn portuguese() -> Self {
        Self::from_words(PORTUGUESE.iter().copied())
    }

    /// Builds a table from arbitrary words, lowercasing them.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        )
    }

    /// Parses a JSON array of words.
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let words: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::from_words(words))
    }

    /// Adds words to the table.
    #[must_use]
    pub fn extended<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.0.extend(Self::from_words(words).0);
        self
    }

    /// Returns `true` if `word` (already lowercase) is a stopword.
    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portuguese_table() {
        let words = Stopwords::portuguese();
        for w in ["que", "não", "você", "para", "mídia"] {
            assert!(words.contains(w), "{w}");
        }
        assert!(!words.contains("churrasco"));
    }

    #[test]
    fn test_from_json() {
        let words = Stopwords::from_json_str(r#"["The", " and ", ""]"#).unwrap();
        assert_eq!(words.len(), 2);
        assert!(words.contains("the"));
        assert!(words.contains("and"));
    }

    #[test]
    fn test_extended() {
        let words = Stopwords::none().extended(["kkk"]);
        assert!(words.contains("kkk"));
        assert!(!Stopwords::none().contains("kkk"));
        assert!(Stopwords::none().is_empty());
    }

    #[test]
    fn test_serde_is_plain_list() {
        let words = Stopwords::from_words(["oi"]);
        assert_eq!(serde_json::to_string(&words).unwrap(), r#"["oi"]"#);
    }
}
