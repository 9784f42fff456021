//! Order-preserving deduplication. The first occurrence of a key wins.

use std::collections::HashSet;

use crate::hasheous::{GameData, RomDescriptor};
use crate::record::{GameRecord, GrammarProfile};

/// Collapse ROMs that share all four digests (`crc`, `md5`, `sha1`, `sha256`).
pub fn dedup_roms(roms: Vec<RomDescriptor>) -> Vec<RomDescriptor> {
    let keep = {
        let mut seen = HashSet::new();
        roms.iter()
            .map(|r| seen.insert((r.crc.as_str(), r.md5.as_str(), r.sha1.as_str(), r.sha256.as_str())))
            .collect::<Vec<_>>()
    };
    retain_flagged(roms, keep)
}

/// Collapse games gathered from many source files on `(name, filename, platform)`.
pub fn merge_across_batches(games: Vec<GameData>) -> Vec<GameData> {
    let keep = {
        let mut seen = HashSet::new();
        games
            .iter()
            .map(|g| seen.insert((g.name.as_str(), g.filename.as_str(), g.platform.as_str())))
            .collect::<Vec<_>>()
    };
    retain_flagged(games, keep)
}

/// Collapse records on the uniqueness key of `profile`.
pub fn dedup_records(records: Vec<GameRecord>, profile: GrammarProfile) -> Vec<GameRecord> {
    let keep = {
        let mut seen = HashSet::new();
        records
            .iter()
            .map(|r| seen.insert(r.key(profile)))
            .collect::<Vec<_>>()
    };
    retain_flagged(records, keep)
}

fn retain_flagged<T>(items: Vec<T>, keep: Vec<bool>) -> Vec<T> {
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, k)| k.then_some(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom(name: &str, crc: &str, sha1: &str) -> RomDescriptor {
        RomDescriptor {
            name: name.to_string(),
            crc: crc.to_string(),
            sha1: sha1.to_string(),
            ..Default::default()
        }
    }

    fn game(name: &str, filename: &str, platform: &str) -> GameData {
        GameData {
            name: name.to_string(),
            filename: filename.to_string(),
            platform: platform.to_string(),
            roms: vec![],
        }
    }

    #[test]
    fn test_dedup_roms_first_wins() {
        let roms = vec![
            rom("first", "aa", "11"),
            rom("other", "bb", "22"),
            rom("second", "aa", "11"),
            rom("crc-only", "aa", ""),
        ];
        let names: Vec<_> = dedup_roms(roms).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["first", "other", "crc-only"]);
    }

    #[test]
    fn test_merge_across_batches() {
        let games = vec![
            game("Tetris", "Tetris", "Game Boy"),
            game("Tetris", "Tetris", "NES"),
            game("Tetris", "Tetris", "Game Boy"),
            game("Tetris", "Tetris DX", "Game Boy"),
        ];
        let merged = merge_across_batches(games);
        let keys: Vec<_> = merged
            .iter()
            .map(|g| format!("{}|{}", g.filename, g.platform))
            .collect();
        assert_eq!(keys, vec!["Tetris|Game Boy", "Tetris|NES", "Tetris DX|Game Boy"]);
    }

    #[test]
    fn test_dedup_records_by_profile() {
        let records = vec![
            GameRecord::new("A", "", "NES", "aa"),
            GameRecord::new("B", "", "NES", "aa"),
            GameRecord::new("A", "", "SNES", "aa"),
        ];
        assert_eq!(dedup_records(records.clone(), GrammarProfile::Filename).len(), 1);
        assert_eq!(dedup_records(records, GrammarProfile::NameOnly).len(), 3);
    }

    #[test]
    fn test_dedup_is_stable() {
        let records: Vec<_> = (0..20)
            .map(|i| GameRecord::new(format!("G{}", i % 7), "", "NES", &format!("{:02x}", i % 7)))
            .collect();
        let once = dedup_records(records.clone(), GrammarProfile::NameOnly);
        let twice = dedup_records(records, GrammarProfile::NameOnly);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 7);
        assert_eq!(once[0].name, "G0");
        assert_eq!(once[6].name, "G6");
    }
}
