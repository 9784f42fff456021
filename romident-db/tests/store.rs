use romident_dat::{GameRecord, GrammarProfile};
use romident_db::*;

const SHA_A: &str = "74591cc9501af93873f9a5d3eb12da12c0723bbc";
const SHA_B: &str = "0a2a3e0b0e4e0b71f8c4ba24cd3b3a5a2fdd6d92";

fn sample_records() -> Vec<GameRecord> {
    vec![
        GameRecord::new("Tetris (World)", "Tetris (World).gb", "Nintendo - Game Boy", SHA_A),
        GameRecord::new("Dr. Mario (World)", "Dr. Mario (World).gb", "Nintendo - Game Boy", SHA_B),
    ]
}

#[test]
fn bulk_insert_is_idempotent() {
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();
    let records = sample_records();

    assert_eq!(store.bulk_insert(&records).unwrap(), 2);
    assert_eq!(store.bulk_insert(&records).unwrap(), 0);
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn identical_key_inserts_once_within_a_batch() {
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();
    let first = GameRecord::new("First", "same.gb", "GB", SHA_A);
    let second = GameRecord::new("Second", "same.gb", "GBC", SHA_A);

    assert_eq!(store.bulk_insert([&first, &second]).unwrap(), 1);
    let found = store.lookup_by_hash(SHA_A).unwrap().unwrap();
    assert_eq!(found.name, "First");
}

#[test]
fn name_only_profile_keys_on_name_and_platform() {
    let mut store = CatalogStore::open_memory(GrammarProfile::NameOnly).unwrap();
    let records = vec![
        GameRecord::new("Tetris", "a.gb", "GB", SHA_A),
        GameRecord::new("Tetris", "b.gb", "GB", SHA_A),
        GameRecord::new("Tetris", "a.gb", "GBC", SHA_A),
    ];

    assert_eq!(store.bulk_insert(&records).unwrap(), 2);
    let found = store.lookup_by_hash(SHA_A).unwrap().unwrap();
    assert_eq!(found.platform, "GB");
    assert_eq!(found.filename, "");
}

#[test]
fn records_without_hash_are_kept_once() {
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();
    let rec = GameRecord::new("Unknown", "unknown.bin", "Arcade", "");

    assert_eq!(store.bulk_insert([&rec]).unwrap(), 1);
    assert_eq!(store.bulk_insert([&rec]).unwrap(), 0);
    assert_eq!(store.lookup_by_hash("").unwrap(), None);
    assert_eq!(store.lookup_by_filename("unknown.bin").unwrap(), Some(rec));
}

#[test]
fn create_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite");

    let mut store = CatalogStore::create(&path, GrammarProfile::Filename).unwrap();
    store.bulk_insert(&sample_records()).unwrap();
    store.close().unwrap();

    let store = CatalogStore::create(&path, GrammarProfile::NameOnly).unwrap();
    assert_eq!(store.count().unwrap(), 0);
    assert_eq!(store.profile(), GrammarProfile::NameOnly);
}

#[test]
fn open_detects_profile() {
    let dir = tempfile::tempdir().unwrap();
    for profile in [GrammarProfile::Filename, GrammarProfile::NameOnly] {
        let path = dir.path().join(format!("{profile}.sqlite"));
        let mut store = CatalogStore::create(&path, profile).unwrap();
        store.bulk_insert(&sample_records()).unwrap();
        store.close().unwrap();

        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.profile(), profile);
        assert_eq!(reopened.count().unwrap(), 2);
    }
}

#[test]
fn open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = CatalogStore::open(&dir.path().join("absent.sqlite"));
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn open_database_without_games_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("other.sqlite");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("CREATE TABLE unrelated (id INTEGER);").unwrap();
    drop(conn);

    assert!(matches!(CatalogStore::open(&path), Err(StoreError::Uninitialized)));
}

#[test]
fn closed_store_rejects_operations() {
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();
    store.close().unwrap();
    store.close().unwrap();

    assert!(!store.is_open());
    assert!(matches!(store.lookup_by_hash(SHA_A), Err(StoreError::Uninitialized)));
    assert!(matches!(store.lookup_by_filename("x.gb"), Err(StoreError::Uninitialized)));
    assert!(matches!(store.bulk_insert(&sample_records()), Err(StoreError::Uninitialized)));
}

#[test]
fn failed_batch_commits_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.sqlite");
    let mut store = CatalogStore::create(&path, GrammarProfile::Filename).unwrap();
    store.close().unwrap();

    // A trigger that aborts on one specific row makes the second insert fail.
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TRIGGER reject_bad BEFORE INSERT ON games
         WHEN NEW.name = 'bad' BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();
    drop(conn);

    let mut store = CatalogStore::open(&path).unwrap();
    let records = vec![
        GameRecord::new("good", "good.bin", "P", SHA_A),
        GameRecord::new("bad", "bad.bin", "P", SHA_B),
    ];
    assert!(matches!(store.bulk_insert(&records), Err(StoreError::Persistence(_))));
    assert_eq!(store.count().unwrap(), 0);
}
