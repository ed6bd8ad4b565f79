//! Emoji frequency and pair co-occurrence across the timeline.
//!
//! # Invariants
//! - Counts are per entry: an emoji repeated within one day counts once.
//! - Pair keys are order-independent (see [`pair_key`]).

use crate::model::entry::Entry;
use std::collections::HashMap;

/// Separator between the two emojis of a pair key.
pub const PAIR_SEPARATOR: char = '|';

/// Usage statistics over a store snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiStats {
    /// Emoji -> number of entries containing it.
    pub freq: HashMap<String, u32>,
    /// Pair key -> number of entries containing both emojis.
    pub pair: HashMap<String, u32>,
}

impl EmojiStats {
    /// Frequency of one emoji, zero when unseen.
    pub fn frequency(&self, emoji: &str) -> u32 {
        self.freq.get(emoji).copied().unwrap_or(0)
    }

    /// Co-occurrence count of two emojis in either order.
    pub fn pair_count(&self, left: &str, right: &str) -> u32 {
        self.pair
            .get(pair_key(left, right).as_str())
            .copied()
            .unwrap_or(0)
    }

    /// The `limit` most used emojis, ties broken by emoji.
    pub fn top_emojis(&self, limit: usize) -> Vec<(String, u32)> {
        ranked(&self.freq, limit)
    }

    /// The `limit` most frequent pairs, ties broken by pair key.
    pub fn top_pairs(&self, limit: usize) -> Vec<(String, u32)> {
        ranked(&self.pair, limit)
    }
}

/// Builds the unordered pair key: both emojis sorted, joined by `|`.
pub fn pair_key(left: &str, right: &str) -> String {
    let (first, second) = if left <= right {
        (left, right)
    } else {
        (right, left)
    };
    format!("{first}{PAIR_SEPARATOR}{second}")
}

/// Counts emoji frequency and every within-day pair across `entries`.
pub fn emoji_stats(entries: &[Entry]) -> EmojiStats {
    let mut stats = EmojiStats::default();

    for entry in entries {
        let mut day: Vec<&str> = Vec::with_capacity(entry.emojis().len());
        for emoji in entry.emojis() {
            if !day.contains(&emoji.as_str()) {
                day.push(emoji.as_str());
            }
        }

        for emoji in &day {
            *stats.freq.entry((*emoji).to_string()).or_insert(0) += 1;
        }
        for (index, left) in day.iter().enumerate() {
            for right in &day[index + 1..] {
                *stats.pair.entry(pair_key(left, right)).or_insert(0) += 1;
            }
        }
    }

    stats
}

fn ranked(counts: &HashMap<String, u32>, limit: usize) -> Vec<(String, u32)> {
    let mut items: Vec<(String, u32)> = counts
        .iter()
        .map(|(key, count)| (key.clone(), *count))
        .collect();
    items.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));
    items.truncate(limit);
    items
}
