//! Key-value persistence surface.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("failed to read key '{key}' from {path}: {source}")]
    Read {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write key '{key}' to {path}: {source}")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("value under key '{key}' in {path} is not valid UTF-8: {source}")]
    Corrupt {
        key: String,
        path: PathBuf,
        #[source]
        source: FromUtf8Error,
    },
}

impl KvError {
    /// The value exists but cannot be decoded; callers may overwrite it.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, KvError::Corrupt { .. })
    }
}

/// String values addressed by string keys.
pub trait KvStore {
    /// `Ok(None)` when nothing has been stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError>;
}

/// In-process store, used by tests and one-shot sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KvStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key under `dir`.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file}.json"))
    }
}

impl KvStore for FileKv {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(KvError::Read {
                    key: key.to_string(),
                    path,
                    source,
                });
            }
        };
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|source| KvError::Corrupt {
                key: key.to_string(),
                path,
                source,
            })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KvError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let write_err = |source| KvError::Write {
            key: key.to_string(),
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(write_err)?;
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)?;
        Ok(())
    }
}
