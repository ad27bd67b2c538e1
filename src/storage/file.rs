//! File-backed medium
//!
//! Each key is stored as `<root>/<key>.json`. Writes go to a sibling
//! temporary file which is fsynced and then renamed over the target, so a
//! reader observes either the previous blob or the new one, never a torn
//! write.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};
use super::medium::Medium;

/// Medium that keeps one file per key inside a root directory.
#[derive(Debug, Clone)]
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    /// Opens a medium rooted at `root`, creating the directory if missing.
    ///
    /// # Errors
    ///
    /// Returns `QRM_STORAGE_UNAVAILABLE` if the directory cannot be created.
    pub fn open(root: &Path) -> StorageResult<Self> {
        fs::create_dir_all(root).map_err(|e| {
            StorageError::unavailable(
                "",
                format!("failed to create data directory: {}", root.display()),
                e,
            )
        })?;

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Wraps `root` without touching the filesystem.
    pub fn at(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Returns the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json.tmp", key))
    }
}

impl Medium for FileMedium {
    fn read(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::unavailable(
                key,
                format!("failed to read {}", path.display()),
                e,
            )),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> StorageResult<()> {
        let target = self.path_for(key);
        let temp = self.temp_path_for(key);

        let write_temp = || -> std::io::Result<()> {
            let mut file = File::create(&temp)?;
            file.write_all(bytes)?;
            // fsync before rename, otherwise the rename may land before the data
            file.sync_all()
        };

        if let Err(e) = write_temp() {
            let _ = fs::remove_file(&temp);
            return Err(StorageError::unavailable(
                key,
                format!("failed to write {}", temp.display()),
                e,
            ));
        }

        fs::rename(&temp, &target).map_err(|e| {
            let _ = fs::remove_file(&temp);
            StorageError::unavailable(
                key,
                format!("failed to replace {}", target.display()),
                e,
            )
        })
    }
}
