//! Entry store and upsert semantics.
//!
//! # Responsibility
//! - Keep the authoritative, date-sorted entry sequence.
//! - Replace or insert whole entries without touching the input sequence.
//! - Hydrate from and dump to the JSON array snapshot shape.
//!
//! # Invariants
//! - `upsert` is a full replacement keyed by date (no field merge).
//! - `upsert(upsert(s, e), e) == upsert(s, e)`.
//! - ISO `YYYY-MM-DD` byte order equals chronological order.

use crate::model::entry::Entry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Returns a new sequence with `next` replacing any entry on the same date.
///
/// The input slice is left untouched; the result is sorted ascending by date.
pub fn upsert(entries: &[Entry], next: Entry) -> Vec<Entry> {
    let mut merged = Vec::with_capacity(entries.len() + 1);
    merged.extend(
        entries
            .iter()
            .filter(|entry| entry.date() != next.date())
            .cloned(),
    );
    merged.push(next);
    merged.sort_by(|left, right| left.date().cmp(right.date()));
    merged
}

/// Error for snapshot decode/encode failures.
#[derive(Debug)]
pub enum SnapshotError {
    /// Payload is not a JSON array of entry objects.
    Json(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid entry snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Ordered collection of daily entries, at most one per date.
///
/// Serialized transparently as the JSON array of its entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Entry>", into = "Vec<Entry>")]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an arbitrary persisted sequence.
    ///
    /// Same result as folding every entry through [`upsert`] in input
    /// order: the last occurrence of a duplicated date wins and the result
    /// is sorted. Runs in a single pass plus one sort.
    pub fn hydrate(entries: Vec<Entry>) -> Self {
        let mut slots: HashMap<String, usize> = HashMap::with_capacity(entries.len());
        let mut ordered: Vec<Entry> = Vec::with_capacity(entries.len());
        for entry in entries {
            match slots.get(entry.date()) {
                Some(&slot) => ordered[slot] = entry,
                None => {
                    slots.insert(entry.date().to_string(), ordered.len());
                    ordered.push(entry);
                }
            }
        }
        ordered.sort_by(|left, right| left.date().cmp(right.date()));
        Self { entries: ordered }
    }

    /// Decodes a JSON array snapshot.
    pub fn from_json(payload: &str) -> Result<Self, SnapshotError> {
        let entries: Vec<Entry> = serde_json::from_str(payload)?;
        Ok(Self::hydrate(entries))
    }

    /// Encodes the store as a JSON array snapshot.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Returns a new store with `next` upserted; `self` is unchanged.
    pub fn upsert(&self, next: Entry) -> Self {
        Self {
            entries: upsert(&self.entries, next),
        }
    }

    /// Looks up the entry recorded for `date`.
    pub fn get(&self, date: &str) -> Option<&Entry> {
        self.entries
            .binary_search_by(|entry| entry.date().cmp(date))
            .ok()
            .map(|index| &self.entries[index])
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<Entry>> for EntryStore {
    fn from(value: Vec<Entry>) -> Self {
        Self::hydrate(value)
    }
}

impl From<EntryStore> for Vec<Entry> {
    fn from(value: EntryStore) -> Self {
        value.entries
    }
}

#[cfg(test)]
mod tests {
    use super::{upsert, EntryStore};
    use crate::model::entry::Entry;

    fn day(date: &str, emoji: &str) -> Entry {
        Entry::new(date, [emoji], None, None, 1)
    }

    #[test]
    fn hydrate_keeps_last_duplicate_and_sorts() {
        let store = EntryStore::hydrate(vec![
            day("2024-03-02", "a"),
            day("2024-03-01", "b"),
            day("2024-03-02", "c"),
        ]);

        let dates: Vec<&str> = store.entries().iter().map(Entry::date).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-02"]);
        assert_eq!(store.get("2024-03-02").unwrap().emojis(), ["c"]);
    }

    #[test]
    fn hydrate_matches_folding_upsert() {
        let input: Vec<Entry> = (0..40)
            .map(|index| day(&format!("2024-03-{:02}", 28 - index % 7), &index.to_string()))
            .collect();

        let folded = input
            .iter()
            .fold(Vec::new(), |acc, entry| upsert(&acc, entry.clone()));
        let store = EntryStore::hydrate(input);

        assert_eq!(store.len(), 7);
        assert_eq!(store.entries(), folded.as_slice());
        assert_eq!(store.get("2024-03-28").unwrap().emojis(), ["35"]);
    }

    #[test]
    fn get_misses_unknown_date() {
        let store = EntryStore::hydrate(vec![day("2024-03-01", "a")]);
        assert!(store.get("2024-03-05").is_none());
    }
}
