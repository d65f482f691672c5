//! Versioned wrapper written around every value a file store persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version identifier for the envelope format
pub const ENVELOPE_VERSION: u32 = 1;

/// A stored value plus the metadata needed to read it back safely.
///
/// `version` is the first field so a reader can check it before decoding
/// the rest of the payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Envelope format version
    pub version: u32,

    /// Key the value was stored under
    pub key: String,

    /// When the value was written
    pub saved_at: DateTime<Utc>,

    /// The stored value
    pub value: T,
}

impl<T> Envelope<T> {
    /// Wrap `value` for `key` with the current version and time.
    pub fn new(key: impl Into<String>, value: T) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            key: key.into(),
            saved_at: Utc::now(),
            value,
        }
    }
}

/// Leading fields of an envelope, decodable without knowing `T`.
#[derive(Debug, Deserialize)]
pub(crate) struct EnvelopeHeader {
    pub version: u32,
}
