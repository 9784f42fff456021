//! The canonical output record and the grammar profile that decides its key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One identifiable ROM: a title on a platform with its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRecord {
    pub name: String,
    /// ROM filename as declared by the signature source. Empty when the
    /// grammar omits it or the declared token was malformed.
    pub filename: String,
    pub platform: String,
    /// Lowercase hex SHA-1. Empty when the source carried no content hash.
    pub hash: String,
}

impl GameRecord {
    /// Build a record, normalizing the hash to lowercase hex.
    pub fn new(
        name: impl Into<String>,
        filename: impl Into<String>,
        platform: impl Into<String>,
        hash: &str,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            platform: platform.into(),
            hash: hash.trim().to_ascii_lowercase(),
        }
    }

    pub fn has_hash(&self) -> bool {
        !self.hash.is_empty()
    }

    /// The uniqueness key of this record under `profile`.
    pub fn key(&self, profile: GrammarProfile) -> RecordKey<'_> {
        match profile {
            GrammarProfile::Filename => RecordKey::Filename {
                filename: &self.filename,
                hash: &self.hash,
            },
            GrammarProfile::NameOnly => RecordKey::NameOnly {
                name: &self.name,
                platform: &self.platform,
                hash: &self.hash,
            },
        }
    }
}

/// Borrowed uniqueness key, shaped by the active [`GrammarProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey<'a> {
    Filename { filename: &'a str, hash: &'a str },
    NameOnly { name: &'a str, platform: &'a str, hash: &'a str },
}

/// Which DAT sub-variant (and matching table shape) a run uses.
///
/// `Filename` requires explicit `rom name` text and keys rows on
/// `(filename, hash)`. `NameOnly` ignores ROM filenames and keys rows on
/// `(name, platform, hash)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrammarProfile {
    #[default]
    Filename,
    NameOnly,
}

impl GrammarProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            GrammarProfile::Filename => "filename",
            GrammarProfile::NameOnly => "name-only",
        }
    }
}

impl fmt::Display for GrammarProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GrammarProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "filename" => Ok(GrammarProfile::Filename),
            "name-only" | "name_only" | "nameonly" => Ok(GrammarProfile::NameOnly),
            other => Err(format!(
                "unknown grammar profile '{other}' (expected 'filename' or 'name-only')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_lowercased() {
        let rec = GameRecord::new("Game", "game.bin", "NES", "  DEADBEEF ");
        assert_eq!(rec.hash, "deadbeef");
        assert!(rec.has_hash());
    }

    #[test]
    fn test_key_depends_on_profile() {
        let a = GameRecord::new("A", "same.bin", "NES", "aa");
        let b = GameRecord::new("B", "same.bin", "SNES", "aa");
        assert_eq!(a.key(GrammarProfile::Filename), b.key(GrammarProfile::Filename));
        assert_ne!(a.key(GrammarProfile::NameOnly), b.key(GrammarProfile::NameOnly));
    }

    #[test]
    fn test_profile_from_str() {
        assert_eq!("filename".parse::<GrammarProfile>(), Ok(GrammarProfile::Filename));
        assert_eq!("Name-Only".parse::<GrammarProfile>(), Ok(GrammarProfile::NameOnly));
        assert!("both".parse::<GrammarProfile>().is_err());
    }
}
