//! Cart configuration, loadable from TOML.
//!
//! ```toml
//! storage_key = "cart"
//!
//! [store]
//! kind = "file"
//! dir = "/var/lib/shop/carts"
//! encoding = "binary"
//! ```
//!
//! Missing fields default to an in-memory store under the `"cart"` key.

use crate::core::LineItem;
use crate::session::CartSession;
use crate::storage::{
    validate_key, Encoding, FileStore, MemoryStore, Store, StorageError, DEFAULT_CART_KEY,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading or applying configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Which store backs a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// Values kept in process only
    #[default]
    Memory,
    /// One envelope file per key under `dir`
    File {
        dir: PathBuf,
        #[serde(default)]
        encoding: Encoding,
    },
}

/// Top-level cart configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Key the cart is stored under.
    pub storage_key: String,

    pub store: StoreConfig,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_CART_KEY.to_string(),
            store: StoreConfig::default(),
        }
    }
}

impl CartConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    ///
    /// If the file is missing, returns `CartConfig::default()`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                debug!(path = %path.display(), "loading cart config");
                Self::from_toml_str(&contents)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no cart config, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_key(&self.storage_key).map_err(|_| {
            ConfigError::Invalid(format!(
                "storage_key '{}' is not a valid key",
                self.storage_key
            ))
        })?;

        if let StoreConfig::File { dir, .. } = &self.store {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("store.dir must not be empty".to_string()));
            }
        }
        Ok(())
    }

    /// Build the store this config describes.
    pub fn open_store(&self) -> ConfiguredStore {
        match &self.store {
            StoreConfig::Memory => ConfiguredStore::Memory(MemoryStore::new()),
            StoreConfig::File { dir, encoding } => {
                ConfiguredStore::File(FileStore::with_encoding(dir, *encoding))
            }
        }
    }
}

/// Store selected at runtime from a `CartConfig`.
#[derive(Clone, Debug)]
pub enum ConfiguredStore {
    Memory(MemoryStore),
    File(FileStore),
}

impl Store for ConfiguredStore {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StorageError> {
        match self {
            Self::Memory(store) => store.get(key, default),
            Self::File(store) => store.get(key, default),
        }
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        match self {
            Self::Memory(store) => store.set(key, value),
            Self::File(store) => store.set(key, value),
        }
    }
}

impl<I: LineItem> CartSession<I, ConfiguredStore> {
    /// Validate `config` and open a session over the store it selects.
    pub fn from_config(config: &CartConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::open_with_key(config.open_store(), &config.storage_key))
    }
}
