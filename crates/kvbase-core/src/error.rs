//! Error types for kvbase operations
//!
//! Every backend reports failures through `KvError`. Contract violations
//! (`AlreadyExists`, `NotFound`) carry the logical address so callers can
//! report them without extra bookkeeping; engine failures are passed through
//! untouched inside `Engine`.

use std::error::Error as StdError;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// kvbase error types with addressing context
#[derive(Debug, Error)]
pub enum KvError {
    /// `create` targeted a key that already holds a record
    #[error("key {key:?} already exists in bucket {bucket:?}")]
    AlreadyExists {
        /// Bucket that was written to
        bucket: String,
        /// Key that is already taken
        key: String,
    },

    /// `read`, `update` or `delete` targeted a key with no record
    #[error("key {key:?} does not exist in bucket {bucket:?}")]
    NotFound {
        /// Bucket that was searched
        bucket: String,
        /// Key that was missing
        key: String,
    },

    /// Value could not be encoded to, or decoded from, JSON
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Bucket or key name rejected before reaching the engine
    #[error("invalid {component}: {reason}")]
    InvalidAddress {
        /// `"bucket"` or `"key"`
        component: &'static str,
        /// Why the name was rejected
        reason: String,
    },

    /// Encoded value is larger than the configured limit
    #[error("encoded value too large: {size} bytes exceeds limit of {max} bytes")]
    OversizedValue {
        /// Size of the encoded value
        size: usize,
        /// Configured maximum
        max: usize,
    },

    /// A physical key read back from a flat keyspace could not be decoded
    #[error("corrupt record key in bucket {bucket:?}: {reason}")]
    CorruptKey {
        /// Bucket being scanned
        bucket: String,
        /// Description of the corruption
        reason: String,
    },

    /// Another handle kept the store locked for longer than the open timeout
    #[error("timed out after {timeout:?} waiting for lock on {}", path.display())]
    OpenTimeout {
        /// Store that was locked
        path: PathBuf,
        /// How long we waited
        timeout: Duration,
    },

    /// Configuration rejected by `Config::validate`
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error surfaced directly by the storage engine
    #[error("{engine} error: {source}")]
    Engine {
        /// Name of the engine that failed
        engine: &'static str,
        /// The underlying engine error
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl KvError {
    /// Wrap an engine error.
    pub fn engine<E>(engine: &'static str, source: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        KvError::Engine { engine, source: source.into() }
    }

    pub fn not_found(bucket: &str, key: &str) -> Self {
        KvError::NotFound { bucket: bucket.to_owned(), key: key.to_owned() }
    }

    pub fn already_exists(bucket: &str, key: &str) -> Self {
        KvError::AlreadyExists { bucket: bucket.to_owned(), key: key.to_owned() }
    }

    /// True for `NotFound`.
    pub fn is_not_found(&self) -> bool {
        matches!(self, KvError::NotFound { .. })
    }

    /// True for `AlreadyExists`.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, KvError::AlreadyExists { .. })
    }
}

/// Result type alias for kvbase operations
pub type KvResult<T> = Result<T, KvError>;
