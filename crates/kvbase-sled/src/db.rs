//! Connection handling for the sled backend.

use std::path::{Path, PathBuf};

use tracing::info;

use kvbase_core::{Config, FlatKey, KvError, KvResult};

/// Directory used when `open` is given an empty path.
pub const DEFAULT_PATH: &str = "data";

pub(crate) const ENGINE: &str = "sled";

/// Box a sled error into `KvError::Engine`.
pub(crate) fn engine(err: sled::Error) -> KvError {
    KvError::engine(ENGINE, err)
}

/// kvbase backend over sled's default keyspace.
///
/// Holds one `sled::Db` for its whole lifetime. sled handles its own
/// concurrency, so the backend can be shared across threads as-is.
pub struct SledBackend {
    pub(crate) db: sled::Db,
    path: PathBuf,
    config: Config,
}

impl SledBackend {
    /// Open or create the store rooted at directory `path` (`data` if empty).
    pub fn open<P: AsRef<Path>>(path: P, config: &Config) -> KvResult<Self> {
        config.validate()?;

        let path = match path.as_ref() {
            p if p.as_os_str().is_empty() => PathBuf::from(DEFAULT_PATH),
            p => p.to_path_buf(),
        };

        let db = sled::Config::new()
            .path(&path)
            .cache_capacity(config.cache_capacity_bytes)
            .flush_every_ms(config.flush_every.map(|d| d.as_millis() as u64))
            .open()
            .map_err(engine)?;
        info!(path = %path.display(), backend = ENGINE, "opened store");

        Ok(Self { db, path, config: config.clone() })
    }

    /// Root directory of the store.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration the backend was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Force buffered writes to disk.
    ///
    /// sled acknowledges writes before they are durable; between background
    /// flushes (`Config::flush_every`) this is the only way to be sure.
    pub fn flush(&self) -> KvResult<()> {
        self.db.flush().map_err(engine)?;
        Ok(())
    }

    /// Iterate every physical entry of `bucket`.
    pub(crate) fn scan(&self, bucket: &str) -> sled::Iter {
        self.db.scan_prefix(FlatKey::bucket_prefix(bucket))
    }
}

impl std::fmt::Debug for SledBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledBackend")
            .field("path", &self.path)
            .field("entries", &self.db.len())
            .finish()
    }
}
