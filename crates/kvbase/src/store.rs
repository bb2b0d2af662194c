//! Backend selection at open time.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use kvbase_core::{Backend, Config, HashMap, KvError, KvResult};
use kvbase_redb::RedbBackend;
use kvbase_sled::SledBackend;

/// Which engine a [`Store`] wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// Single-file B+tree store; buckets are native tables
    Redb,
    /// Log-structured store; buckets are key prefixes in a flat keyspace
    Sled,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Redb => "redb",
            BackendKind::Sled => "sled",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = KvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "redb" | "bolt" | "btree" => Ok(BackendKind::Redb),
            "sled" | "lsm" => Ok(BackendKind::Sled),
            other => Err(KvError::InvalidConfig(format!("unknown backend {:?}", other))),
        }
    }
}

/// A store backed by whichever engine was chosen at open time.
///
/// Forwards every [`Backend`] call to the wrapped adapter, so code written
/// against `Store` runs unchanged on either engine.
#[derive(Debug)]
pub enum Store {
    Redb(RedbBackend),
    Sled(SledBackend),
}

impl Store {
    /// Open a store of the given kind. An empty `path` selects the engine's
    /// default location (`data.db` for redb, `data` for sled).
    pub fn open<P: AsRef<Path>>(kind: BackendKind, path: P, config: &Config) -> KvResult<Self> {
        debug!(backend = %kind, path = %path.as_ref().display(), "opening store");
        match kind {
            BackendKind::Redb => RedbBackend::open(path, config).map(Store::Redb),
            BackendKind::Sled => SledBackend::open(path, config).map(Store::Sled),
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Store::Redb(_) => BackendKind::Redb,
            Store::Sled(_) => BackendKind::Sled,
        }
    }

    /// Location of the underlying store.
    pub fn path(&self) -> &Path {
        match self {
            Store::Redb(db) => db.path(),
            Store::Sled(db) => db.path(),
        }
    }

    /// Make every acknowledged write durable.
    pub fn flush(&self) -> KvResult<()> {
        match self {
            Store::Redb(db) => db.flush(),
            Store::Sled(db) => db.flush(),
        }
    }
}

impl From<RedbBackend> for Store {
    fn from(db: RedbBackend) -> Self {
        Store::Redb(db)
    }
}

impl From<SledBackend> for Store {
    fn from(db: SledBackend) -> Self {
        Store::Sled(db)
    }
}

impl Backend for Store {
    fn count(&self, bucket: &str) -> KvResult<usize> {
        match self {
            Store::Redb(db) => db.count(bucket),
            Store::Sled(db) => db.count(bucket),
        }
    }

    fn create<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized,
    {
        match self {
            Store::Redb(db) => db.create(bucket, key, value),
            Store::Sled(db) => db.create(bucket, key, value),
        }
    }

    fn read<T: DeserializeOwned>(&self, bucket: &str, key: &str) -> KvResult<T> {
        match self {
            Store::Redb(db) => db.read(bucket, key),
            Store::Sled(db) => db.read(bucket, key),
        }
    }

    fn update<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized,
    {
        match self {
            Store::Redb(db) => db.update(bucket, key, value),
            Store::Sled(db) => db.update(bucket, key, value),
        }
    }

    fn delete(&self, bucket: &str, key: &str) -> KvResult<()> {
        match self {
            Store::Redb(db) => db.delete(bucket, key),
            Store::Sled(db) => db.delete(bucket, key),
        }
    }

    fn drop_bucket(&self, bucket: &str) -> KvResult<()> {
        match self {
            Store::Redb(db) => db.drop_bucket(bucket),
            Store::Sled(db) => db.drop_bucket(bucket),
        }
    }

    fn get<T: DeserializeOwned>(&self, bucket: &str) -> KvResult<HashMap<String, T>> {
        match self {
            Store::Redb(db) => db.get(bucket),
            Store::Sled(db) => db.get(bucket),
        }
    }
}
