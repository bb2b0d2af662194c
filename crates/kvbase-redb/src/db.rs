//! Connection handling for the redb backend.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use redb::{Database, ReadOnlyTable, Table, TableDefinition, TableError};
use tracing::{info, warn};

use kvbase_core::{Config, KvError, KvResult};

/// File used when `open` is given an empty path.
pub const DEFAULT_PATH: &str = "data.db";

/// Interval between lock attempts while another handle holds the file.
const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(crate) const ENGINE: &str = "redb";

pub(crate) type BucketTable<'txn> = Table<'txn, &'static str, &'static [u8]>;
pub(crate) type BucketView = ReadOnlyTable<&'static str, &'static [u8]>;

/// Table definition for `bucket`.
pub(crate) fn bucket_table(bucket: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(bucket)
}

/// Box any redb error into `KvError::Engine`.
pub(crate) fn engine(err: impl Into<redb::Error>) -> KvError {
    KvError::engine(ENGINE, err.into())
}

/// kvbase backend over a single redb file.
///
/// Holds one `redb::Database` for its whole lifetime. Safe to share across
/// threads; redb serializes writers and lets readers proceed concurrently.
pub struct RedbBackend {
    pub(crate) db: Database,
    path: PathBuf,
    config: Config,
}

impl RedbBackend {
    /// Open or create the store at `path` (`data.db` if empty).
    ///
    /// Waits up to `config.open_timeout` for another handle to release the
    /// file lock, then fails with `OpenTimeout`.
    pub fn open<P: AsRef<Path>>(path: P, config: &Config) -> KvResult<Self> {
        config.validate()?;

        let path = match path.as_ref() {
            p if p.as_os_str().is_empty() => PathBuf::from(DEFAULT_PATH),
            p => p.to_path_buf(),
        };

        let db = open_with_timeout(&path, config)?;
        info!(path = %path.display(), backend = ENGINE, "opened store");

        Ok(Self { db, path, config: config.clone() })
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configuration the backend was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Commits are durable when they return; nothing is buffered.
    pub fn flush(&self) -> KvResult<()> {
        Ok(())
    }

    /// Run `f` against the bucket's table in a read transaction.
    ///
    /// `f` receives `None` when the bucket has never been created. Nothing
    /// is created on this path.
    pub(crate) fn view<R>(
        &self,
        bucket: &str,
        f: impl FnOnce(Option<&BucketView>) -> KvResult<R>,
    ) -> KvResult<R> {
        let txn = self.db.begin_read().map_err(engine)?;
        match txn.open_table(bucket_table(bucket)) {
            Ok(table) => f(Some(&table)),
            Err(TableError::TableDoesNotExist(_)) => f(None),
            Err(e) => Err(engine(e)),
        }
    }

    /// Run `f` against the bucket's table in a write transaction.
    ///
    /// The transaction commits only if `f` succeeds. On error it is dropped
    /// uncommitted, which also discards the table if this call created it.
    pub(crate) fn write<R>(
        &self,
        bucket: &str,
        f: impl FnOnce(&mut BucketTable<'_>) -> KvResult<R>,
    ) -> KvResult<R> {
        let txn = self.db.begin_write().map_err(engine)?;
        let out = {
            let mut table = txn.open_table(bucket_table(bucket)).map_err(engine)?;
            f(&mut table)?
        };
        txn.commit().map_err(engine)?;
        Ok(out)
    }

    /// Delete the bucket's table. Returns whether it existed.
    pub(crate) fn delete_table(&self, bucket: &str) -> KvResult<bool> {
        let txn = self.db.begin_write().map_err(engine)?;
        let existed = txn.delete_table(bucket_table(bucket)).map_err(engine)?;
        txn.commit().map_err(engine)?;
        Ok(existed)
    }
}

fn open_with_timeout(path: &Path, config: &Config) -> KvResult<Database> {
    let mut builder = Database::builder();
    // validate() guarantees the capacity fits in usize
    builder.set_cache_size(usize::try_from(config.cache_capacity_bytes).unwrap_or(usize::MAX));

    let deadline = Instant::now() + config.open_timeout;
    let mut warned = false;
    loop {
        match builder.create(path) {
            Ok(db) => return Ok(db),
            Err(redb::DatabaseError::DatabaseAlreadyOpen) => {
                if Instant::now() >= deadline {
                    return Err(KvError::OpenTimeout {
                        path: path.to_path_buf(),
                        timeout: config.open_timeout,
                    });
                }
                if !warned {
                    warn!(path = %path.display(), "store is locked by another handle, waiting");
                    warned = true;
                }
                thread::sleep(LOCK_POLL_INTERVAL);
            }
            Err(e) => return Err(engine(e)),
        }
    }
}

impl std::fmt::Debug for RedbBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbBackend")
            .field("path", &self.path)
            .finish()
    }
}
