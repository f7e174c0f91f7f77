//! Atomic file replacement.

use std::io::{self, Write};
use std::path::Path;

/// Replaces `path` with `contents` through a temp file in the same directory.
///
/// Readers see either the old file or the new one, never a partial write.
///
/// # Errors
/// Returns error if `path` has no parent or the temp file cannot be written or
/// renamed into place.
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::other(format!("{} has no parent directory", path.display())))?;
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.toml");
        fs::write(&path, "old = 1\n").unwrap();

        write_atomic(&path, "new = 2\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new = 2\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent").join("state.toml");

        assert!(write_atomic(&path, "x = 1\n").is_err());
        assert!(!path.exists());
    }
}
