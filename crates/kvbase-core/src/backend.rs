//! The CRUD contract every storage backend implements.

use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::KvResult;

/// Bucketed CRUD over an embedded key-value engine.
///
/// Records are addressed by `(bucket, key)` and stored as encoded values.
/// Every mutating call is atomic on its own; nothing spans several keys.
///
/// Reads never create a bucket. A bucket comes into existence with the first
/// successful [`create`](Backend::create) and goes away with
/// [`drop_bucket`](Backend::drop_bucket).
pub trait Backend {
    /// Number of records in `bucket`. A bucket that was never written counts 0.
    fn count(&self, bucket: &str) -> KvResult<usize>;

    /// Store a new record. Fails with `AlreadyExists` if `(bucket, key)` is taken.
    fn create<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized;

    /// Load a record. Fails with `NotFound` if `(bucket, key)` has no record.
    fn read<T: DeserializeOwned>(&self, bucket: &str, key: &str) -> KvResult<T>;

    /// Overwrite an existing record. Fails with `NotFound` if there is nothing to overwrite.
    ///
    /// The value is encoded before the engine is touched, so an encoding
    /// failure leaves the stored value intact.
    fn update<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized;

    /// Remove a record. Fails with `NotFound` if `(bucket, key)` has no record.
    fn delete(&self, bucket: &str, key: &str) -> KvResult<()>;

    /// Remove `bucket` and every record in it. Dropping a missing bucket is a no-op.
    fn drop_bucket(&self, bucket: &str) -> KvResult<()>;

    /// Every record in `bucket`, keyed by record key, all decoded as `T`.
    fn get<T: DeserializeOwned>(&self, bucket: &str) -> KvResult<HashMap<String, T>>;
}
