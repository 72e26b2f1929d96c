//! Filesystem-backed key-value slots.

use std::fs;
use std::io;
use std::path::PathBuf;

use textbook_core::storage::KeyValueSlot;
use textbook_core::{Result, TextbookError};

use super::atomic::{read_optional, write_atomic};

/// A [`KeyValueSlot`] that keeps each key in its own file under one directory.
///
/// Key `ai_textbook_user` is stored as `<dir>/ai_textbook_user.json`. Writes
/// go through a temporary file and a rename, so a crash mid-write leaves
/// the previous value intact.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// The directory is created lazily on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueSlot for FileSlot {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        Ok(read_optional(&path)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        write_atomic(&path, value.as_bytes())?;
        tracing::debug!("Wrote slot '{}' to {}", key, path.display());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keys become file names, so only a conservative character set is accepted.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(TextbookError::storage(format!("Invalid slot key: '{key}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileSlot::new(temp_dir.path().join("slots"));
        assert_eq!(slot.get("ai_textbook_user").unwrap(), None);
    }

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileSlot::new(temp_dir.path().join("slots"));

        slot.set("ai_textbook_user", r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(
            slot.get("ai_textbook_user").unwrap().as_deref(),
            Some(r#"{"name":"Ada"}"#)
        );
        assert!(temp_dir.path().join("slots/ai_textbook_user.json").exists());

        slot.remove("ai_textbook_user").unwrap();
        assert_eq!(slot.get("ai_textbook_user").unwrap(), None);
    }

    #[test]
    fn test_remove_missing_key_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileSlot::new(temp_dir.path());
        assert!(slot.remove("never_written").is_ok());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileSlot::new(temp_dir.path());
        for key in ["", "../escape", "a/b", ".hidden"] {
            let err = slot.set(key, "x").unwrap_err();
            assert!(matches!(err, TextbookError::Storage(_)), "key {key:?}");
        }
    }
}
