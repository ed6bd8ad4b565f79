//! Journal use-case service.
//!
//! # Responsibility
//! - Own the current `EntryStore` snapshot for one caller.
//! - Apply user edits under the editable-window rule and persist them.
//! - Serve week/month/stats views computed from the snapshot.
//!
//! # Invariants
//! - Only today's and yesterday's entries are mutated.
//! - The repository is written before the in-memory snapshot is swapped, so
//!   a failed write leaves the snapshot matching storage.
//! - Edits carry forward existing fields; the store itself never merges.

use crate::calendar::window::{
    self, can_edit_on, fill_window, last7, month_dates_on, month_key_on, parse_date,
    week_dates_on,
};
use crate::insight::emoji_stats::{emoji_stats, EmojiStats};
use crate::insight::hue_cluster::{monthly_families, monthly_top3, HueFamily};
use crate::model::entry::Entry;
use crate::repo::entry_repo::{EntryRepository, RepoError};
use crate::store::entry_store::{EntryStore, SnapshotError};
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid iso date regex"));

/// Service error for journal use-cases.
#[derive(Debug)]
pub enum JournalError {
    /// Date is not a real `YYYY-MM-DD` calendar date.
    InvalidDate(String),
    /// Date is outside the today/yesterday edit window.
    NotEditable(String),
    /// Imported snapshot could not be decoded.
    Snapshot(SnapshotError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for JournalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => write!(f, "invalid date `{value}`; expected YYYY-MM-DD"),
            Self::NotEditable(date) => write!(f, "entry for {date} is read-only"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for JournalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Snapshot(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::InvalidDate(_) | Self::NotEditable(_) => None,
        }
    }
}

impl From<RepoError> for JournalError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SnapshotError> for JournalError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// One user edit applied on top of the day's current entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryEdit {
    /// Replace the emoji list.
    SetEmojis(Vec<String>),
    /// Add or remove a single emoji.
    ToggleEmoji(String),
    /// Set or clear the hue.
    SetHue(Option<i64>),
    /// Set or clear the song.
    SetSong {
        title: Option<String>,
        artist: Option<String>,
    },
    /// Reset the day to an empty entry.
    Clear,
    /// Several field updates applied to one entry and saved once.
    ///
    /// `None` keeps the stored value. A song field given alone keeps the
    /// other song field; pass an empty string to clear one of them.
    Set {
        emojis: Option<Vec<String>>,
        hue: Option<i64>,
        title: Option<String>,
        artist: Option<String>,
    },
}

impl EntryEdit {
    fn apply(self, current: Entry) -> Entry {
        match self {
            Self::SetEmojis(emojis) => current.with_emojis(emojis),
            Self::ToggleEmoji(emoji) => current.toggle_emoji(emoji.as_str()),
            Self::SetHue(hue) => current.with_hue(hue),
            Self::SetSong { title, artist } => {
                current.with_song(title.as_deref(), artist.as_deref())
            }
            Self::Clear => Entry::placeholder(current.date()),
            Self::Set {
                emojis,
                hue,
                title,
                artist,
            } => {
                let mut next = current;
                // Emojis first: a hue is only kept on a day that has some.
                if let Some(emojis) = emojis {
                    next = next.with_emojis(emojis);
                }
                if hue.is_some() {
                    next = next.with_hue(hue);
                }
                if title.is_some() || artist.is_some() {
                    let stored = next.song().cloned();
                    let title = title.or_else(|| stored.as_ref().and_then(|s| s.title.clone()));
                    let artist = artist.or_else(|| stored.and_then(|s| s.artist));
                    next = next.with_song(title.as_deref(), artist.as_deref());
                }
                next
            }
        }
    }

    /// Returns whether applying the edit would change nothing.
    pub fn is_noop(&self) -> bool {
        matches!(
            self,
            Self::Set {
                emojis: None,
                hue: None,
                title: None,
                artist: None,
            }
        )
    }
}

/// Journal facade over a repository and its loaded snapshot.
pub struct JournalService<R: EntryRepository> {
    repo: R,
    store: EntryStore,
}

impl<R: EntryRepository> JournalService<R> {
    /// Loads the stored timeline and wraps it in a service.
    pub fn open(repo: R) -> Result<Self, JournalError> {
        let store = EntryStore::hydrate(repo.load_entries()?);
        info!(
            "event=journal_open module=service status=ok count={}",
            store.len()
        );
        Ok(Self { repo, store })
    }

    /// Current snapshot.
    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    /// Applies `edit` to the entry for `date` using the local clock.
    pub fn record(&mut self, date: &str, edit: EntryEdit) -> Result<Entry, JournalError> {
        self.record_on(window::today(), date, edit, Utc::now().timestamp_millis())
    }

    /// Applies `edit` to the entry for `date` as of `today`.
    ///
    /// # Errors
    /// - `InvalidDate` when `date` is not a real `YYYY-MM-DD` date.
    /// - `NotEditable` when `date` is neither `today` nor the day before.
    /// - `Repo` when persistence fails; the snapshot is then unchanged.
    pub fn record_on(
        &mut self,
        today: NaiveDate,
        date: &str,
        edit: EntryEdit,
        now_ms: i64,
    ) -> Result<Entry, JournalError> {
        let date = validate_date(date)?;
        if !can_edit_on(today, date.as_str()) {
            warn!(
                "event=entry_record module=service status=rejected reason=not_editable date={}",
                date
            );
            return Err(JournalError::NotEditable(date));
        }

        let current = self
            .store
            .get(date.as_str())
            .cloned()
            .unwrap_or_else(|| Entry::placeholder(date.as_str()));
        let next = edit.apply(current).touched(now_ms);

        self.repo.save_entry(&next)?;
        self.store = self.store.upsert(next.clone());
        info!(
            "event=entry_record module=service status=ok date={} emoji_count={} \
             has_hue={} has_song={}",
            next.date(),
            next.emojis().len(),
            next.hue().is_some(),
            next.song().is_some()
        );
        Ok(next)
    }

    /// Replaces the whole timeline with a JSON array snapshot.
    ///
    /// Returns the number of entries kept after normalization.
    pub fn import_snapshot(&mut self, payload: &str) -> Result<usize, JournalError> {
        let store = EntryStore::from_json(payload)?;
        self.repo.replace_all(store.entries())?;
        self.store = store;
        info!(
            "event=snapshot_import module=service status=ok count={}",
            self.store.len()
        );
        Ok(self.store.len())
    }

    /// Encodes the current timeline as a JSON array snapshot.
    pub fn export_snapshot(&self) -> Result<String, JournalError> {
        Ok(self.store.to_json()?)
    }

    /// Week view `offset` weeks back.
    ///
    /// The current week (`offset == 0`) shows the last 7 recorded entries;
    /// older weeks are Monday-anchored with placeholders for empty days.
    pub fn week_on(&self, today: NaiveDate, offset: u32) -> Vec<Entry> {
        if offset == 0 {
            return last7(self.store.entries());
        }
        fill_window(self.store.entries(), &week_dates_on(today, offset))
    }

    pub fn week(&self, offset: u32) -> Vec<Entry> {
        self.week_on(window::today(), offset)
    }

    /// Every day of the month `offset` months back, gap-filled.
    pub fn month_on(&self, today: NaiveDate, offset: u32) -> Vec<Entry> {
        fill_window(self.store.entries(), &month_dates_on(today, offset))
    }

    /// Representative hues for the month `offset` months back.
    pub fn month_palette_on(&self, today: NaiveDate, offset: u32) -> Vec<f64> {
        monthly_top3(self.store.entries(), &month_key_on(today, offset))
    }

    pub fn month_palette(&self, offset: u32) -> Vec<f64> {
        self.month_palette_on(window::today(), offset)
    }

    /// Color families with member counts for the month `offset` months back.
    pub fn month_families_on(&self, today: NaiveDate, offset: u32) -> Vec<HueFamily> {
        monthly_families(self.store.entries(), &month_key_on(today, offset))
    }

    /// Emoji usage across the whole timeline.
    pub fn stats(&self) -> EmojiStats {
        emoji_stats(self.store.entries())
    }
}

/// Checks shape and calendar validity of a caller-supplied date.
pub fn validate_date(date: &str) -> Result<String, JournalError> {
    let trimmed = date.trim();
    if !ISO_DATE_RE.is_match(trimmed) || parse_date(trimmed).is_none() {
        return Err(JournalError::InvalidDate(date.to_string()));
    }
    Ok(trimmed.to_string())
}
