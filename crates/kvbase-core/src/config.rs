//! Configuration shared by every kvbase backend
//!
//! Provides hardware tier presets and the limits enforced on bucket names,
//! keys and encoded values before anything reaches the engine.

use std::time::Duration;

use crate::error::{KvError, KvResult};

/// Backend configuration with tier presets
#[derive(Debug, Clone)]
pub struct Config {
    /// How long opening a locked store may wait before failing
    pub open_timeout: Duration,
    /// Engine page cache size (bytes)
    pub cache_capacity_bytes: u64,
    /// Background flush cadence for buffered writes; `None` flushes only on request
    pub flush_every: Option<Duration>,
    /// Maximum bucket name size in bytes
    pub max_bucket_size: usize,
    /// Maximum key size in bytes
    pub max_key_size: usize,
    /// Maximum encoded value size in bytes
    pub max_value_size: usize,
}

impl Config {
    /// Server-class: large cache, generous value limit
    pub fn server() -> Self {
        Self {
            open_timeout: Duration::from_secs(1),
            cache_capacity_bytes: 1024 * 1024 * 1024,
            flush_every: Some(Duration::from_millis(500)),
            max_bucket_size: 255,
            max_key_size: 1024,
            max_value_size: 32 * 1024 * 1024,
        }
    }

    /// Phone-class: modest cache, slower flush cadence to spare the flash
    pub fn phone() -> Self {
        Self {
            open_timeout: Duration::from_secs(1),
            cache_capacity_bytes: 128 * 1024 * 1024,
            flush_every: Some(Duration::from_millis(1000)),
            max_bucket_size: 255,
            max_key_size: 512,
            max_value_size: 8 * 1024 * 1024,
        }
    }

    /// Budget-class: small cache, tight value limit
    pub fn budget() -> Self {
        Self {
            open_timeout: Duration::from_secs(1),
            cache_capacity_bytes: 16 * 1024 * 1024,
            flush_every: Some(Duration::from_millis(2000)),
            max_bucket_size: 128,
            max_key_size: 256,
            max_value_size: 1024 * 1024,
        }
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> KvResult<()> {
        if self.open_timeout > Duration::from_secs(300) {
            return Err(KvError::InvalidConfig("open_timeout must be <= 300s".into()));
        }
        if self.cache_capacity_bytes < 1024 * 1024 {
            return Err(KvError::InvalidConfig("cache_capacity_bytes must be >= 1MB".into()));
        }
        if usize::try_from(self.cache_capacity_bytes).is_err() {
            return Err(KvError::InvalidConfig(
                "cache_capacity_bytes does not fit in memory on this platform".into(),
            ));
        }
        if let Some(cadence) = self.flush_every {
            if cadence.as_millis() == 0 {
                return Err(KvError::InvalidConfig("flush_every must be > 0 when set".into()));
            }
        }
        if self.max_bucket_size == 0 || self.max_bucket_size > 4096 {
            return Err(KvError::InvalidConfig("max_bucket_size must be in [1, 4096]".into()));
        }
        if self.max_key_size == 0 || self.max_key_size > 64 * 1024 {
            return Err(KvError::InvalidConfig("max_key_size must be in [1, 64KB]".into()));
        }
        if self.max_value_size == 0 || self.max_value_size > 1024 * 1024 * 1024 {
            return Err(KvError::InvalidConfig("max_value_size must be in [1, 1GB]".into()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self { Self::server() }
}
