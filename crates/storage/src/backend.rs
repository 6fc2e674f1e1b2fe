use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::StoreError;

/// Named text entries, read and replaced whole.
pub trait SnapshotBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Stores each entry as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Opens `dir`, creating it and any missing parents.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entry_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SnapshotBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        // Readers see either the old or the new snapshot, never a torn one.
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, contents).map_err(|source| StoreError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), bytes = contents.len(), "snapshot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    let usable = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'));
    if usable {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// In-process entries. Writes can be switched to fail, which is how a full
/// quota is simulated.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
    reject_writes: Option<String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, contents: impl Into<String>) -> Self {
        self.entries.insert(key.into(), contents.into());
        self
    }

    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn reject_writes(&mut self, reason: impl Into<String>) {
        self.reject_writes = Some(reason.into());
    }

    pub fn accept_writes(&mut self) {
        self.reject_writes = None;
    }
}

impl SnapshotBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<(), StoreError> {
        if let Some(reason) = &self.reject_writes {
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
                reason: reason.clone(),
            });
        }
        self.entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}
