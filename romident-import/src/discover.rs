//! Signature file discovery.

use std::path::{Path, PathBuf};

use romident_dat::SignatureFormat;
use walkdir::WalkDir;

/// All files under `dir` (recursively) written in `format`, sorted by path.
///
/// Unreadable directory entries are logged and skipped.
pub fn discover_files(dir: &Path, format: SignatureFormat) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| SignatureFormat::from_path(path) == Some(format))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovers_recursively_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("b.dat"), "").unwrap();
        std::fs::write(dir.path().join("a.DAT"), "").unwrap();
        std::fs::write(nested.join("c.dat"), "").unwrap();
        std::fs::write(dir.path().join("d.json"), "").unwrap();
        std::fs::write(dir.path().join("readme.txt"), "").unwrap();

        let dats = discover_files(dir.path(), SignatureFormat::Dat);
        let names: Vec<_> = dats
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.DAT"),
                PathBuf::from("b.dat"),
                PathBuf::from("sub").join("c.dat")
            ]
        );

        let jsons = discover_files(dir.path(), SignatureFormat::Json);
        assert_eq!(jsons.len(), 1);
    }
}
