//! Directory-backed store that survives process restarts.

use super::envelope::{Envelope, EnvelopeHeader, ENVELOPE_VERSION};
use super::{validate_key, Store, StorageError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk format of stored envelopes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// Pretty-printed JSON, human readable
    #[default]
    Json,
    /// bincode, compact
    Binary,
}

impl Encoding {
    /// File extension used for this encoding.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "bin",
        }
    }

    fn encode<T: Serialize>(self, value: &T) -> Result<Vec<u8>, StorageError> {
        match self {
            Self::Json => {
                let mut buf = serde_json::to_vec_pretty(value)
                    .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
                buf.push(b'\n');
                Ok(buf)
            }
            Self::Binary => bincode::serialize(value)
                .map_err(|e| StorageError::SerializationFailed(e.to_string())),
        }
    }

    fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, StorageError> {
        match self {
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| StorageError::DeserializationFailed(e.to_string())),
            Self::Binary => bincode::deserialize(bytes)
                .map_err(|e| StorageError::DeserializationFailed(e.to_string())),
        }
    }

    /// Read only the envelope version, leaving the payload undecoded.
    fn peek_version(self, bytes: &[u8]) -> Result<u32, StorageError> {
        match self {
            Self::Json => self.decode::<EnvelopeHeader>(bytes).map(|h| h.version),
            Self::Binary => self.decode::<u32>(bytes),
        }
    }
}

/// Store that writes one envelope file per key into a directory.
///
/// Values live at `<dir>/<key>.<ext>`. Writes go to a temporary file that is
/// then renamed over the target, so a crash mid-write leaves the previous
/// value intact.
///
/// # Example
///
/// ```rust
/// use trolley::storage::{Encoding, FileStore, Store};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = FileStore::with_encoding(dir.path(), Encoding::Binary);
///
/// store.set("cart", &vec!["a".to_string()]).unwrap();
///
/// let reopened = FileStore::with_encoding(dir.path(), Encoding::Binary);
/// let items: Vec<String> = reopened.get("cart", Vec::new()).unwrap();
/// assert_eq!(items, vec!["a".to_string()]);
/// ```
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
    encoding: Encoding,
}

impl FileStore {
    /// JSON store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_encoding(dir, Encoding::default())
    }

    /// Store rooted at `dir` writing `encoding`.
    pub fn with_encoding(dir: impl Into<PathBuf>, encoding: Encoding) -> Self {
        Self {
            dir: dir.into(),
            encoding,
        }
    }

    /// Directory values are stored in.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// On-disk format this store reads and writes.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// File a value for `key` is stored in.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self
            .dir
            .join(format!("{key}.{}", self.encoding.extension())))
    }

    /// Delete the value stored under `key`. Returns whether one existed.
    pub fn remove(&mut self, key: &str) -> Result<bool, StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let tmp_path = path.with_extension(format!("{}.tmp", self.encoding.extension()));
        fs::write(&tmp_path, contents).map_err(|e| StorageError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))
    }
}

impl Store for FileStore {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StorageError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no stored value, using default");
                return Ok(default);
            }
            Err(e) => return Err(StorageError::io(path, e)),
        };

        let found = self.encoding.peek_version(&bytes)?;
        if found != ENVELOPE_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found,
                supported: ENVELOPE_VERSION,
            });
        }

        let envelope: Envelope<T> = self.encoding.decode(&bytes)?;
        debug!(path = %path.display(), saved_at = %envelope.saved_at, "loaded stored value");
        Ok(envelope.value)
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let bytes = self.encoding.encode(&Envelope::new(key, value))?;
        debug!(path = %path.display(), bytes = bytes.len(), "writing stored value");
        self.write_atomic(&path, &bytes)
    }
}
