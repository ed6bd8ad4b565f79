//! Core domain logic for the Moodlog journal.
//! This crate owns the entry timeline, its invariants and every derived view.

pub mod calendar;
pub mod db;
pub mod insight;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use calendar::window::{
    add_days, can_edit, can_edit_on, fill_window, last7, month_dates, month_dates_on, month_key,
    month_key_on, today_iso, week_dates, week_dates_on, year_window, year_window_on,
};
pub use insight::emoji_stats::{emoji_stats, pair_key, EmojiStats};
pub use insight::hue_cluster::{
    circular_mean, monthly_families, monthly_stops, monthly_top3, HueFamily, FALLBACK_PALETTE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{Entry, Song, MAX_EMOJIS};
pub use repo::entry_repo::{
    EntryRepository, JsonFileEntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::journal_service::{EntryEdit, JournalError, JournalService};
pub use store::entry_store::{upsert, EntryStore, SnapshotError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
