//! Insertion-ordered counter.
//!
//! Every tie-break in the analytics is "first encountered wins", so counts
//! are kept in the order keys were first seen and sorting is stable.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub(crate) struct Tally<K> {
    entries: Vec<(K, usize)>,
    index: HashMap<K, usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> Tally<K> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&mut self, key: &K) {
        match self.index.get(key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key.clone(), 1));
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in first-seen order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    /// Entry with the highest count; the earliest one on ties.
    pub(crate) fn max(&self) -> Option<(&K, usize)> {
        self.iter()
            .fold(None, |best: Option<(&K, usize)>, (k, c)| match best {
                Some((_, top)) if top >= c => best,
                _ => Some((k, c)),
            })
    }

    /// Entries by count descending, first-seen order on ties.
    pub(crate) fn into_sorted(self) -> Vec<(K, usize)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}
