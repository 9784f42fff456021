use std::path::{Path, PathBuf};

use romident_dat::GrammarProfile;
use romident_db::CatalogStore;
use romident_import::*;

const TETRIS_SHA: &str = "74591cc9501af93873f9a5d3eb12da12c0723bbc";
const MARIO_SHA: &str = "418203621b887caa090215d97e3f509b79affd3e";
const PACMAN_SHA: &str = "8cd3bd0d3d5d5a4d1c0ab0e1b8a6b8e9a9a1f0c2";
const ZELDA_SHA: &str = "d6bd2b4c9b5f27a4f1a7b6a4cc2e4b8e0f19a6d1";

const GB_DAT: &str = r#"clrmamepro (
	name "Nintendo - Game Boy"
	description "Nintendo - Game Boy"
	version 20240101
)

game (
	name "Tetris (World)"
	description "Tetris (World)"
	rom ( name "Tetris (World).gb" size 32768 crc 46DF91AD sha1 74591CC9501AF93873F9A5D3EB12DA12C0723BBC )
)

game (
	name "Super Mario Land (World)"
	rom ( name SML.gb size 65536 sha1 418203621B887CAA090215D97E3F509B79AFFD3E )
)
"#;

const ARCADE_DAT: &str = r#"game ( name "Pac-Man" rom ( name pacman.zip sha1 8cd3bd0d3d5d5a4d1c0ab0e1b8a6b8e9a9a1f0c2 ) )"#;

const ZELDA_JSON: &str = r#"{
    "Name": "The Legend of Zelda",
    "SignatureDataObjects": [{ "Name": "Zelda (USA)", "Platform": "Nintendo Entertainment System" }],
    "Attributes": [
        { "attributeName": "ROMs", "Value": { "Name": "zelda.nes", "Size": 131088, "Sha1": "D6BD2B4C9B5F27A4F1A7B6A4CC2E4B8E0F19A6D1" } }
    ]
}"#;

fn write(path: &Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

fn make_corpus(root: &Path) {
    write(&root.join("metadat/no-intro/Nintendo - Game Boy (20240101-000000).dat"), GB_DAT);
    write(&root.join("metadat/no-intro/Broken.dat"), r#"game ( name "Broken" rom ( name x.bin sha1"#);
    write(&root.join("metadat/fbneo-split/FBNeo - Arcade Games.dat"), ARCADE_DAT);
    write(&root.join("hasheous/The Legend of Zelda.json"), ZELDA_JSON);
    write(&root.join("hasheous/Empty.json"), "");
}

fn options() -> BuildOptions {
    BuildOptions {
        json_dirs: vec![PathBuf::from("hasheous")],
        ..BuildOptions::default()
    }
}

#[test]
fn builds_from_dat_and_json_sources() {
    let corpus = tempfile::tempdir().unwrap();
    make_corpus(corpus.path());
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();

    let stats = build_catalog(&mut store, corpus.path(), &options(), &SilentProgress).unwrap();

    assert_eq!(stats.files_parsed, 3);
    assert_eq!(stats.files_failed, 2);
    assert_eq!(stats.records_parsed, 4);
    assert_eq!(stats.unique_records, 4);
    assert_eq!(stats.rows_inserted, 4);
    assert_eq!(stats.per_platform.get("Nintendo - Game Boy"), Some(&2));
    assert_eq!(stats.per_platform.get("FBNeo - Arcade Games"), Some(&1));
    assert_eq!(stats.per_platform.get("Nintendo Entertainment System"), Some(&1));

    let tetris = store.lookup_by_hash(TETRIS_SHA).unwrap().unwrap();
    assert_eq!(tetris.name, "Tetris (World)");
    // Quoted ROM names in the line grammar do not carry a filename.
    assert_eq!(tetris.filename, "");
    assert_eq!(tetris.platform, "Nintendo - Game Boy");

    let mario = store.lookup_by_filename("sml.gb").unwrap().unwrap();
    assert_eq!(mario.hash, MARIO_SHA);

    let pacman = store.lookup_by_hash(PACMAN_SHA).unwrap().unwrap();
    assert_eq!(pacman.platform, "FBNeo - Arcade Games");

    let zelda = store.lookup_by_hash(ZELDA_SHA).unwrap().unwrap();
    assert_eq!(zelda.name, "The Legend of Zelda");
    assert_eq!(zelda.filename, "The Legend of Zelda");
    assert_eq!(zelda.platform, "Nintendo Entertainment System");
}

#[test]
fn rebuilding_is_idempotent() {
    let corpus = tempfile::tempdir().unwrap();
    make_corpus(corpus.path());
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();

    let first = build_catalog(&mut store, corpus.path(), &options(), &SilentProgress).unwrap();
    let second = build_catalog(&mut store, corpus.path(), &options(), &SilentProgress).unwrap();

    assert_eq!(first.rows_inserted, 4);
    assert_eq!(second.rows_inserted, 0);
    assert_eq!(second.unique_records, first.unique_records);
    assert_eq!(store.count().unwrap(), 4);
}

#[test]
fn name_only_profile_build() {
    let corpus = tempfile::tempdir().unwrap();
    make_corpus(corpus.path());
    let mut store = CatalogStore::open_memory(GrammarProfile::NameOnly).unwrap();

    let stats = build_catalog(&mut store, corpus.path(), &options(), &SilentProgress).unwrap();
    assert_eq!(stats.rows_inserted, 4);

    let tetris = store.lookup_by_hash(TETRIS_SHA).unwrap().unwrap();
    assert_eq!(tetris.name, "Tetris (World)");
    assert_eq!(tetris.platform, "Nintendo - Game Boy");
}

#[test]
fn duplicate_sources_collapse() {
    let corpus = tempfile::tempdir().unwrap();
    let root = corpus.path();
    write(&root.join("dats/Arcade.dat"), ARCADE_DAT);
    write(&root.join("dats/copy/Arcade.dat"), ARCADE_DAT);
    write(&root.join("json/a/Zelda.json"), ZELDA_JSON);
    write(&root.join("json/b/Zelda.json"), ZELDA_JSON);

    let options = BuildOptions {
        dat_dirs: vec![PathBuf::from("dats")],
        json_dirs: vec![PathBuf::from("json")],
    };
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();
    let stats = build_catalog(&mut store, root, &options, &SilentProgress).unwrap();

    assert_eq!(stats.files_parsed, 4);
    // Two identical DAT records survive until the profile-key dedup.
    assert_eq!(stats.records_parsed, 3);
    assert_eq!(stats.unique_records, 2);
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn missing_corpus_directory_fails() {
    let corpus = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(corpus.path().join("metadat/no-intro")).unwrap();
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();

    let result = build_catalog(&mut store, corpus.path(), &BuildOptions::default(), &SilentProgress);
    match result {
        Err(ImportError::MissingDirectory(dir)) => {
            assert_eq!(dir, PathBuf::from("metadat/fbneo-split"));
        }
        other => panic!("expected MissingDirectory, got {other:?}"),
    }
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn missing_corpus_root_fails() {
    let corpus = tempfile::tempdir().unwrap();
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();
    let result = build_catalog(
        &mut store,
        &corpus.path().join("absent"),
        &BuildOptions::default(),
        &SilentProgress,
    );
    assert!(matches!(result, Err(ImportError::MissingCorpus(_))));
}

#[test]
fn closed_store_fails_build() {
    let corpus = tempfile::tempdir().unwrap();
    make_corpus(corpus.path());
    let mut store = CatalogStore::open_memory(GrammarProfile::Filename).unwrap();
    store.close().unwrap();

    let result = build_catalog(&mut store, corpus.path(), &options(), &SilentProgress);
    assert!(matches!(result, Err(ImportError::Store(_))));
}
