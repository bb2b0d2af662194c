//! Logical addresses and their physical encodings.
//!
//! Every operation addresses a record by `(bucket, key)`. Engines with a
//! native namespace primitive map the bucket onto it directly. Engines with
//! a single flat keyspace store records under a [`FlatKey`]:
//!
//! ```text
//! [bucket_len: u32 BE][bucket bytes][key bytes]
//! ```
//!
//! The length prefix makes the bucket segment self-delimiting, so no key
//! text can make two different addresses share a physical key, and a prefix
//! scan over one bucket never reaches into another bucket whose name merely
//! starts with the same bytes.

use crate::config::Config;
use crate::error::{KvError, KvResult};

const BUCKET_LEN_SIZE: usize = 4;

/// Check a bucket name against the configured limits.
pub fn validate_bucket(bucket: &str, config: &Config) -> KvResult<()> {
    validate_component("bucket", bucket, config.max_bucket_size)
}

/// Check a full `(bucket, key)` address against the configured limits.
pub fn validate_address(bucket: &str, key: &str, config: &Config) -> KvResult<()> {
    validate_bucket(bucket, config)?;
    validate_component("key", key, config.max_key_size)
}

fn validate_component(component: &'static str, name: &str, max: usize) -> KvResult<()> {
    if name.is_empty() {
        return Err(KvError::InvalidAddress {
            component,
            reason: "must not be empty".into(),
        });
    }
    if name.len() > max {
        return Err(KvError::InvalidAddress {
            component,
            reason: format!("{} bytes exceeds limit of {} bytes", name.len(), max),
        });
    }
    Ok(())
}

/// Composite physical key for flat keyspaces.
///
/// Callers must validate the bucket first; bucket names are far below the
/// `u32` length limit once validated.
pub struct FlatKey;

impl FlatKey {
    /// Prefix shared by every record of `bucket`: `[len][bucket]`.
    pub fn bucket_prefix(bucket: &str) -> Vec<u8> {
        let mut prefix = Vec::with_capacity(BUCKET_LEN_SIZE + bucket.len());
        prefix.extend_from_slice(&(bucket.len() as u32).to_be_bytes());
        prefix.extend_from_slice(bucket.as_bytes());
        prefix
    }

    /// Build the physical key for `(bucket, key)`.
    pub fn encode(bucket: &str, key: &str) -> Vec<u8> {
        let mut raw = Self::bucket_prefix(bucket);
        raw.extend_from_slice(key.as_bytes());
        raw
    }

    /// Recover the logical key from a physical key found under `bucket`.
    pub fn decode_key<'a>(bucket: &str, raw: &'a [u8]) -> KvResult<&'a str> {
        let prefix = Self::bucket_prefix(bucket);
        let suffix = raw.strip_prefix(prefix.as_slice()).ok_or_else(|| KvError::CorruptKey {
            bucket: bucket.to_owned(),
            reason: "physical key does not carry the bucket prefix".into(),
        })?;
        std::str::from_utf8(suffix).map_err(|e| KvError::CorruptKey {
            bucket: bucket.to_owned(),
            reason: format!("key is not valid UTF-8: {}", e),
        })
    }
}
