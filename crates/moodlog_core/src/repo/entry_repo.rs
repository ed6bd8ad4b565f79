//! Entry repository contracts and persistence implementations.
//!
//! # Responsibility
//! - Load and persist the full entry sequence for the journal service.
//! - Keep SQL and file layout details inside the persistence boundary.
//!
//! # Invariants
//! - `load_entries` returns entries sorted ascending by date, one per date.
//! - Every loaded row passes through the `Entry` smart constructor.
//! - `replace_all` swaps the whole sequence atomically.

use crate::db::DbError;
use crate::model::entry::{Entry, Song};
use crate::store::entry_store::{upsert, EntryStore};
use log::{debug, error};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Io(io::Error),
    Json(serde_json::Error),
    /// Connection lacks a table this repository depends on.
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "entry file i/o failed: {err}"),
            Self::Json(err) => write!(f, "entry snapshot is not valid json: {err}"),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Persistence contract for the entry timeline.
pub trait EntryRepository {
    /// Loads every stored entry, sorted ascending by date.
    fn load_entries(&self) -> RepoResult<Vec<Entry>>;
    /// Inserts or fully replaces the entry for `entry.date()`.
    fn save_entry(&mut self, entry: &Entry) -> RepoResult<()>;
    /// Replaces the whole stored sequence.
    fn replace_all(&mut self, entries: &[Entry]) -> RepoResult<()>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the `entries` table is absent.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        if !table_exists(conn, "entries")? {
            return Err(RepoError::MissingRequiredTable("entries"));
        }
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn load_entries(&self) -> RepoResult<Vec<Entry>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                date,
                emojis,
                hue,
                song_title,
                song_artist,
                updated_at
             FROM entries
             ORDER BY date ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        debug!(
            "event=entries_load module=repo status=ok backend=sqlite count={}",
            entries.len()
        );
        Ok(entries)
    }

    fn save_entry(&mut self, entry: &Entry) -> RepoResult<()> {
        upsert_row(self.conn, entry)?;
        debug!(
            "event=entry_save module=repo status=ok backend=sqlite date={}",
            entry.date()
        );
        Ok(())
    }

    fn replace_all(&mut self, entries: &[Entry]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        tx.execute("DELETE FROM entries;", [])?;
        for entry in entries {
            upsert_row(&tx, entry)?;
        }
        tx.commit()?;

        debug!(
            "event=entries_replace module=repo status=ok backend=sqlite count={}",
            entries.len()
        );
        Ok(())
    }
}

/// Repository persisting the timeline as one JSON array file.
///
/// A missing file reads as an empty timeline. Writes land in a sibling
/// temp file that is renamed over the target.
pub struct JsonFileEntryRepository {
    path: PathBuf,
}

impl JsonFileEntryRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entries(&self, entries: &[Entry]) -> RepoResult<()> {
        let payload = serde_json::to_string_pretty(entries)?;
        let temp_path = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&temp_path, payload)?;
        if let Err(err) = fs::rename(&temp_path, &self.path) {
            error!(
                "event=entries_write module=repo status=error backend=json \
                 error_code=rename_failed error={}",
                err
            );
            return Err(err.into());
        }
        Ok(())
    }
}

impl EntryRepository for JsonFileEntryRepository {
    fn load_entries(&self) -> RepoResult<Vec<Entry>> {
        let payload = match fs::read_to_string(&self.path) {
            Ok(payload) => payload,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        if payload.trim().is_empty() {
            return Ok(Vec::new());
        }

        let entries: Vec<Entry> = serde_json::from_str(&payload)?;
        let entries = EntryStore::hydrate(entries).into_entries();
        debug!(
            "event=entries_load module=repo status=ok backend=json count={}",
            entries.len()
        );
        Ok(entries)
    }

    fn save_entry(&mut self, entry: &Entry) -> RepoResult<()> {
        let current = self.load_entries()?;
        self.write_entries(&upsert(&current, entry.clone()))
    }

    fn replace_all(&mut self, entries: &[Entry]) -> RepoResult<()> {
        let entries = EntryStore::hydrate(entries.to_vec()).into_entries();
        self.write_entries(&entries)
    }
}

fn upsert_row(conn: &Connection, entry: &Entry) -> RepoResult<()> {
    let emojis = serde_json::to_string(entry.emojis())?;
    let song = entry.song();
    conn.execute(
        "INSERT INTO entries (
            date,
            emojis,
            hue,
            song_title,
            song_artist,
            updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        ON CONFLICT(date) DO UPDATE SET
            emojis = excluded.emojis,
            hue = excluded.hue,
            song_title = excluded.song_title,
            song_artist = excluded.song_artist,
            updated_at = excluded.updated_at;",
        params![
            entry.date(),
            emojis,
            entry.hue(),
            song.and_then(|song| song.title.as_deref()),
            song.and_then(|song| song.artist.as_deref()),
            entry.updated_at(),
        ],
    )?;
    Ok(())
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let date: String = row.get("date")?;
    let emojis_text: String = row.get("emojis")?;
    let emojis: Vec<String> = serde_json::from_str(&emojis_text).map_err(|_| {
        RepoError::InvalidData(format!("entries.emojis for `{date}` is not a json array"))
    })?;
    let hue: Option<i64> = row.get("hue")?;
    let title: Option<String> = row.get("song_title")?;
    let artist: Option<String> = row.get("song_artist")?;
    let song = Song::normalized(title.as_deref(), artist.as_deref());

    Ok(Entry::new(date, emojis, hue, song, row.get("updated_at")?))
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
