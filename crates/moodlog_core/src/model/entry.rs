//! Daily entry domain model.
//!
//! # Responsibility
//! - Define the canonical record for one calendar day.
//! - Normalize every constructed or mutated value into a valid shape.
//!
//! # Invariants
//! - `emojis` holds at most 3 distinct values in first-seen order.
//! - `hue` is in `[0, 360)` and is `None` whenever `emojis` is empty.
//! - `song` is `None` when both title and artist are blank after trim.
//! - Normalization never fails; malformed input is coerced silently.

use serde::{Deserialize, Serialize};

/// Maximum number of emojis kept for one day.
pub const MAX_EMOJIS: usize = 3;
/// Full turn of the hue wheel in degrees.
pub const HUE_DEGREES: i64 = 360;

/// Optional song attached to a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

impl Song {
    /// Builds a song from raw user input.
    ///
    /// Both fields are trimmed and blank fields are dropped. Returns `None`
    /// when nothing remains.
    pub fn normalized(title: Option<&str>, artist: Option<&str>) -> Option<Self> {
        let title = non_blank(title);
        let artist = non_blank(artist);
        if title.is_none() && artist.is_none() {
            return None;
        }
        Some(Self { title, artist })
    }
}

/// One day in the journal timeline.
///
/// Fields are private so that every value in circulation went through
/// [`Entry::new`] or one of the mutators below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EntryWire", rename_all = "camelCase")]
pub struct Entry {
    date: String,
    emojis: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hue: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    song: Option<Song>,
    updated_at: i64,
}

impl Entry {
    /// Creates a normalized entry.
    ///
    /// `date` is stored as given; it is expected to be `YYYY-MM-DD` and is
    /// validated at the service boundary, not here.
    pub fn new<I, S>(
        date: impl Into<String>,
        emojis: I,
        hue: Option<i64>,
        song: Option<Song>,
        updated_at: i64,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let emojis = normalize_emojis(emojis);
        let hue = if emojis.is_empty() {
            None
        } else {
            hue.map(normalize_hue)
        };
        let song =
            song.and_then(|song| Song::normalized(song.title.as_deref(), song.artist.as_deref()));
        Self {
            date: date.into(),
            emojis,
            hue,
            song,
            updated_at,
        }
    }

    /// Creates an empty stand-in for a day with no recorded entry.
    pub fn placeholder(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            emojis: Vec::new(),
            hue: None,
            song: None,
            updated_at: 0,
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn emojis(&self) -> &[String] {
        &self.emojis
    }

    pub fn hue(&self) -> Option<u16> {
        self.hue
    }

    pub fn song(&self) -> Option<&Song> {
        self.song.as_ref()
    }

    /// Last-write marker in epoch milliseconds.
    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Returns whether the day carries neither emojis nor a song.
    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty() && self.song.is_none()
    }

    /// Replaces the emoji list. Clears `hue` if the result is empty.
    pub fn with_emojis<I, S>(self, emojis: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hue = self.hue.map(i64::from);
        Self::new(self.date, emojis, hue, self.song, self.updated_at)
    }

    /// Removes `emoji` if present, otherwise appends it while there is room.
    ///
    /// A full day (3 emojis) ignores additions.
    pub fn toggle_emoji(self, emoji: &str) -> Self {
        let emoji = emoji.trim();
        if emoji.is_empty() {
            return self;
        }
        let mut next = self.emojis.clone();
        if let Some(index) = next.iter().position(|value| value == emoji) {
            next.remove(index);
        } else if next.len() < MAX_EMOJIS {
            next.push(emoji.to_string());
        } else {
            return self;
        }
        self.with_emojis(next)
    }

    /// Sets or clears the hue. Ignored while the day has no emojis.
    pub fn with_hue(self, hue: Option<i64>) -> Self {
        Self::new(self.date, self.emojis, hue, self.song, self.updated_at)
    }

    /// Sets or clears the song from raw input.
    pub fn with_song(mut self, title: Option<&str>, artist: Option<&str>) -> Self {
        self.song = Song::normalized(title, artist);
        self
    }

    /// Stamps the last-write marker.
    pub fn touched(mut self, updated_at: i64) -> Self {
        self.updated_at = updated_at;
        self
    }
}

/// Permissive deserialization shape; every field is re-normalized.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntryWire {
    date: String,
    #[serde(default)]
    emojis: Vec<String>,
    #[serde(default)]
    hue: Option<i64>,
    #[serde(default)]
    song: Option<Song>,
    #[serde(default)]
    updated_at: i64,
}

impl From<EntryWire> for Entry {
    fn from(value: EntryWire) -> Self {
        Entry::new(
            value.date,
            value.emojis,
            value.hue,
            value.song,
            value.updated_at,
        )
    }
}

/// Deduplicates in first-seen order, drops blanks, keeps the first 3.
pub fn normalize_emojis<I, S>(emojis: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut unique: Vec<String> = Vec::with_capacity(MAX_EMOJIS);
    for emoji in emojis {
        let value = emoji.as_ref().trim();
        if value.is_empty() || unique.iter().any(|seen| seen == value) {
            continue;
        }
        unique.push(value.to_string());
        if unique.len() == MAX_EMOJIS {
            break;
        }
    }
    unique
}

/// Wraps any integer angle into `[0, 360)`.
pub fn normalize_hue(hue: i64) -> u16 {
    // rem_euclid keeps negatives on the wheel: -30 -> 330.
    hue.rem_euclid(HUE_DEGREES) as u16
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
