use moodlog_core::db::open_db_in_memory;
use moodlog_core::{
    Entry, EntryRepository, JsonFileEntryRepository, RepoError, Song, SqliteEntryRepository,
};
use rusqlite::Connection;

fn sample(date: &str) -> Entry {
    Entry::new(
        date,
        ["😀", "🔥"],
        Some(210),
        Song::normalized(Some("Clair de Lune"), Some("Debussy")),
        1_700_000_000_000,
    )
}

#[test]
fn sqlite_save_and_load_roundtrip_sorted() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();

    repo.save_entry(&sample("2024-01-03")).unwrap();
    repo.save_entry(&Entry::placeholder("2024-01-01")).unwrap();

    let loaded = repo.load_entries().unwrap();
    assert_eq!(loaded, vec![Entry::placeholder("2024-01-01"), sample("2024-01-03")]);
}

#[test]
fn sqlite_save_replaces_existing_date() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();

    repo.save_entry(&sample("2024-01-03")).unwrap();
    let replacement = Entry::new("2024-01-03", ["🌧"], None, None, 2);
    repo.save_entry(&replacement).unwrap();

    assert_eq!(repo.load_entries().unwrap(), vec![replacement]);
}

#[test]
fn sqlite_replace_all_swaps_whole_sequence() {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    repo.save_entry(&sample("2023-12-31")).unwrap();

    let next = vec![sample("2024-02-01"), sample("2024-02-02")];
    repo.replace_all(&next).unwrap();

    assert_eq!(repo.load_entries().unwrap(), next);
}

#[test]
fn sqlite_rejects_unmigrated_connection() {
    let mut conn = Connection::open_in_memory().unwrap();
    let err = SqliteEntryRepository::try_new(&mut conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("entries")));
}

#[test]
fn sqlite_load_reports_corrupt_emoji_column() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO entries (date, emojis, updated_at) VALUES ('2024-01-01', 'oops', 1);",
        [],
    )
    .unwrap();

    let repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let err = repo.load_entries().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(ref message) if message.contains("2024-01-01")));
}

#[test]
fn sqlite_load_normalizes_legacy_rows() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO entries (date, emojis, hue, song_title, song_artist, updated_at)
         VALUES ('2024-01-01', '[]', 120, '  ', '', 1);",
        [],
    )
    .unwrap();

    let repo = SqliteEntryRepository::try_new(&mut conn).unwrap();
    let loaded = repo.load_entries().unwrap();
    assert_eq!(loaded[0].hue(), None);
    assert!(loaded[0].song().is_none());
}

#[test]
fn json_file_missing_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonFileEntryRepository::new(dir.path().join("entries.json"));
    assert!(repo.load_entries().unwrap().is_empty());
}

#[test]
fn json_file_save_and_replace_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("entries.json");
    let mut repo = JsonFileEntryRepository::new(&path);

    repo.save_entry(&sample("2024-01-02")).unwrap();
    repo.save_entry(&sample("2024-01-01")).unwrap();
    let loaded = repo.load_entries().unwrap();
    assert_eq!(loaded, vec![sample("2024-01-01"), sample("2024-01-02")]);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.is_array());
    assert_eq!(raw[0]["updatedAt"], 1_700_000_000_000_i64);

    repo.replace_all(&[sample("2024-03-01")]).unwrap();
    assert_eq!(repo.load_entries().unwrap(), vec![sample("2024-03-01")]);
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn json_file_invalid_payload_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entries.json");
    std::fs::write(&path, "{not json").unwrap();

    let repo = JsonFileEntryRepository::new(&path);
    assert!(matches!(repo.load_entries().unwrap_err(), RepoError::Json(_)));
}
