use std::path::Path;

/// Derive a platform name from a signature file's name.
///
/// `"Nintendo - Game Boy (20240101-000000).dat"` → `"Nintendo - Game Boy"`.
/// Without a `(`, the extension is dropped: `"Sega - Saturn.dat"` → `"Sega - Saturn"`.
pub fn platform_from_filename(filename: &str) -> String {
    if let Some(open) = filename.find('(') {
        return filename[..open].trim().to_string();
    }
    strip_extension(filename).trim().to_string()
}

/// The final path component with its extension removed.
pub fn file_stem(path: &Path) -> String {
    path.file_name()
        .map(|n| strip_extension(&n.to_string_lossy()).to_string())
        .unwrap_or_default()
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_before_paren() {
        assert_eq!(
            platform_from_filename("Nintendo - Game Boy (20240101-000000).dat"),
            "Nintendo - Game Boy"
        );
    }

    #[test]
    fn test_platform_without_paren() {
        assert_eq!(platform_from_filename("Sega - Saturn.dat"), "Sega - Saturn");
        assert_eq!(platform_from_filename("  Atari - 2600  "), "Atari - 2600");
    }

    #[test]
    fn test_platform_paren_at_start() {
        assert_eq!(platform_from_filename("(Unknown).dat"), "");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("/data/hasheous/Tetris.json")), "Tetris");
        assert_eq!(file_stem(Path::new("a.b.json")), "a.b");
        assert_eq!(file_stem(Path::new(".hidden")), ".hidden");
    }
}
