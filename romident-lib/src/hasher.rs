//! Content fingerprints for candidate ROM files.
//!
//! The fingerprint is the lowercase hex SHA-1 of the exact bytes of the file,
//! or of the first entry of a `.zip` archive, matching the hashes stored in
//! the catalog. No header stripping or normalization is applied.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha1::Digest;

use crate::error::HashError;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

const ARCHIVE_EXTENSIONS: &[&str] = &["zip"];

/// Hash results for a file or archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHashes {
    /// CRC32 (lowercase hex, 8 chars)
    pub crc32: String,
    /// SHA1 (lowercase hex, 40 chars). This is the catalog lookup key.
    pub sha1: String,
    /// Number of bytes hashed
    pub data_size: u64,
    /// Name of the archive entry that was hashed, if the input was an archive
    pub entry: Option<String>,
}

/// Whether `path` is treated as an archive container (by extension).
pub fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ARCHIVE_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a)))
}

/// Compute the catalog fingerprint (lowercase hex SHA-1) of a file.
///
/// Archives are fingerprinted by their first entry in declared order.
pub fn fingerprint(path: &Path) -> Result<String, HashError> {
    compute_hashes(path).map(|h| h.sha1)
}

/// Compute CRC32 and SHA1 of a file, or of the first entry of an archive.
pub fn compute_hashes(path: &Path) -> Result<FileHashes, HashError> {
    if is_archive(path) {
        hash_first_entry(path)
    } else {
        hash_plain_file(path)
    }
}

/// Stream a reader through CRC32 and SHA1 in 64KB chunks.
pub fn hash_reader<R: Read + ?Sized>(reader: &mut R) -> std::io::Result<FileHashes> {
    let mut crc = crc32fast::Hasher::new();
    let mut sha = sha1::Sha1::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut data_size: u64 = 0;

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        crc.update(&buf[..n]);
        sha.update(&buf[..n]);
        data_size += n as u64;
    }

    Ok(FileHashes {
        crc32: format!("{:08x}", crc.finalize()),
        sha1: format!("{:x}", sha.finalize()),
        data_size,
        entry: None,
    })
}

fn open(path: &Path) -> Result<File, HashError> {
    File::open(path).map_err(|source| HashError::FileOpen {
        path: path.to_path_buf(),
        source,
    })
}

fn hash_plain_file(path: &Path) -> Result<FileHashes, HashError> {
    let mut file = open(path)?;
    hash_reader(&mut file).map_err(|source| HashError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn hash_first_entry(path: &Path) -> Result<FileHashes, HashError> {
    let file = open(path)?;
    let owned_path = || -> PathBuf { path.to_path_buf() };

    // A zero-length file has nothing to open as an archive.
    let len = file
        .metadata()
        .map_err(|source| HashError::Io {
            path: owned_path(),
            source,
        })?
        .len();
    if len == 0 {
        return Err(HashError::EmptyArchive { path: owned_path() });
    }

    let mut archive = zip::ZipArchive::new(file).map_err(|source| HashError::ArchiveOpen {
        path: owned_path(),
        source,
    })?;
    if archive.is_empty() {
        return Err(HashError::EmptyArchive { path: owned_path() });
    }

    let mut entry = archive.by_index(0).map_err(|e| HashError::EntryOpen {
        path: owned_path(),
        entry: "#0".to_string(),
        reason: e.to_string(),
    })?;
    let entry_name = entry.name().to_string();
    log::debug!("Hashing first entry '{}' of {}", entry_name, path.display());

    let mut hashes = hash_reader(&mut entry).map_err(|e| HashError::EntryOpen {
        path: owned_path(),
        entry: entry_name.clone(),
        reason: e.to_string(),
    })?;
    hashes.entry = Some(entry_name);
    Ok(hashes)
}

#[cfg(test)]
#[path = "tests/hasher_tests.rs"]
mod tests;
