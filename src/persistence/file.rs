//! Directory-backed storage: one file per key.

use super::backend::StorageBackend;
use crate::error::{Result, StoreError};
use fs2::FileExt;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Extension of slot files.
const SLOT_EXTENSION: &str = "json";

/// File storage configuration.
#[derive(Clone, Debug)]
pub struct FileStorageConfig {
    /// Directory holding the slot files.
    pub path: PathBuf,

    /// Whether to create the directory if it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./stockbook"),
            create_if_missing: true,
        }
    }
}

/// Durable storage in a directory, held exclusively while open.
///
/// Writes go to a temporary sibling which is then renamed over the slot
/// file, so a reader never sees a torn value.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,

    /// Lock file for exclusive access.
    _lock_file: File,
}

impl FileStorage {
    pub fn open(config: FileStorageConfig) -> Result<Self> {
        if !config.path.exists() {
            if !config.create_if_missing {
                return Err(StoreError::NotInitialized(
                    config.path.display().to_string(),
                ));
            }
            fs::create_dir_all(&config.path)?;
        }

        let lock_file = Self::acquire_lock(&config.path)?;

        Ok(Self {
            path: config.path,
            _lock_file: lock_file,
        })
    }

    /// Open (creating if needed) storage at `path`.
    pub fn at(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(FileStorageConfig {
            path: path.as_ref().to_path_buf(),
            create_if_missing: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.path.join(format!("{}.{}", key, SLOT_EXTENSION)))
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_file = File::create(path.join(".lock"))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| StoreError::Locked)?;

        Ok(lock_file)
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                Err(StoreError::Deserialization(format!("{}: {}", path.display(), e)))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let tmp_path = path.with_extension("tmp");

        let mut file = File::create(&tmp_path)?;
        file.write_all(value.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// Keys become file names, so only `[A-Za-z0-9_-]` is allowed.
fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_overwrite() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::at(dir.path().join("slots")).unwrap();

        assert_eq!(storage.get("journals").unwrap(), None);
        storage.set("journals", "[]").unwrap();
        assert_eq!(storage.get("journals").unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("slots").join("journals.json").exists());
        assert!(!dir.path().join("slots").join("journals.tmp").exists());

        storage.set("journals", "[1]").unwrap();
        assert_eq!(storage.get("journals").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_reopen_sees_previous_value() {
        let dir = TempDir::new().unwrap();
        {
            let storage = FileStorage::at(dir.path()).unwrap();
            storage.set("journals", "[42]").unwrap();
        }
        let storage = FileStorage::at(dir.path()).unwrap();
        assert_eq!(storage.get("journals").unwrap().as_deref(), Some("[42]"));
    }

    #[test]
    fn test_missing_directory_without_create() {
        let dir = TempDir::new().unwrap();
        let result = FileStorage::open(FileStorageConfig {
            path: dir.path().join("absent"),
            create_if_missing: false,
        });
        assert!(matches!(result, Err(StoreError::NotInitialized(_))));
    }

    #[test]
    fn test_second_open_is_locked() {
        let dir = TempDir::new().unwrap();
        let _first = FileStorage::at(dir.path()).unwrap();
        let second = FileStorage::at(dir.path());
        assert!(matches!(second, Err(StoreError::Locked)));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::at(dir.path()).unwrap();
        assert!(matches!(
            storage.set("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(matches!(storage.get(""), Err(StoreError::InvalidKey(_))));
    }
}
