//! File-backed storage: one `<key>.json` file per key.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use super::{KeyValueStorage, StorageError, validate_key};

/// Name of the lock file held open for the lifetime of a [`FileStorage`].
const LOCK_FILE: &str = ".lock";

/// Stores each key as a JSON file under a data directory.
///
/// Each store keeps its whole collection in memory and rewrites the file on
/// every change, so a directory has exactly one owner: opening takes an
/// exclusive lock that is released on drop, and a second opener fails with
/// [`StorageError::Locked`].
///
/// Writes go to a uniquely named temporary file in the same directory that
/// is then renamed over the target, so a reader never observes a
/// half-written document.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    _lock: File,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory and lock it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or another
    /// process (or another `FileStorage`) already holds it.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        let io_err = |source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        };

        fs::create_dir_all(&dir).map_err(io_err)?;
        let lock = File::create(dir.join(LOCK_FILE)).map_err(io_err)?;
        lock.try_lock_exclusive()
            .map_err(|_| StorageError::Locked { dir: dir.clone() })?;

        Ok(Self { dir, _lock: lock })
    }

    /// The directory holding the stored files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let io_err = |source| StorageError::Io {
            key: key.to_owned(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(io_err)?;
        tmp.write_all(value.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(self.path_for(key))
            .map_err(|e| io_err(e.error))?;
        Ok(())
    }
}
