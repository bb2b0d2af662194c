//! `Backend` implementation for sled.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use kvbase_core::keys::{validate_address, validate_bucket};
use kvbase_core::{codec, Backend, FlatKey, HashMap, KvError, KvResult};

use crate::db::{engine, SledBackend};

impl Backend for SledBackend {
    fn count(&self, bucket: &str) -> KvResult<usize> {
        validate_bucket(bucket, self.config())?;
        let mut count = 0;
        for key in self.scan(bucket).keys() {
            key.map_err(engine)?;
            count += 1;
        }
        Ok(count)
    }

    fn create<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized,
    {
        validate_address(bucket, key, self.config())?;
        let data = codec::encode(value, self.config().max_value_size)?;
        let bytes = data.len();

        let swapped = self
            .db
            .compare_and_swap(FlatKey::encode(bucket, key), None as Option<&[u8]>, Some(data))
            .map_err(engine)?;
        if swapped.is_err() {
            return Err(KvError::already_exists(bucket, key));
        }
        debug!(bucket, key, bytes, "record created");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, bucket: &str, key: &str) -> KvResult<T> {
        validate_address(bucket, key, self.config())?;
        trace!(bucket, key, "read");
        let data = self
            .db
            .get(FlatKey::encode(bucket, key))
            .map_err(engine)?
            .ok_or_else(|| KvError::not_found(bucket, key))?;
        codec::decode(&data)
    }

    fn update<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized,
    {
        validate_address(bucket, key, self.config())?;
        let data = sled::IVec::from(codec::encode(value, self.config().max_value_size)?);
        let bytes = data.len();

        // Only replaces a present value; an absent key stays absent
        let previous = self
            .db
            .fetch_and_update(FlatKey::encode(bucket, key), |old| old.map(|_| data.clone()))
            .map_err(engine)?;
        if previous.is_none() {
            return Err(KvError::not_found(bucket, key));
        }
        debug!(bucket, key, bytes, "record updated");
        Ok(())
    }

    fn delete(&self, bucket: &str, key: &str) -> KvResult<()> {
        validate_address(bucket, key, self.config())?;
        let removed = self.db.remove(FlatKey::encode(bucket, key)).map_err(engine)?;
        if removed.is_none() {
            return Err(KvError::not_found(bucket, key));
        }
        debug!(bucket, key, "record deleted");
        Ok(())
    }

    fn drop_bucket(&self, bucket: &str) -> KvResult<()> {
        validate_bucket(bucket, self.config())?;
        let mut batch = sled::Batch::default();
        let mut records = 0usize;
        for key in self.scan(bucket).keys() {
            batch.remove(key.map_err(engine)?);
            records += 1;
        }
        self.db.apply_batch(batch).map_err(engine)?;
        debug!(bucket, records, "bucket dropped");
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, bucket: &str) -> KvResult<HashMap<String, T>> {
        validate_bucket(bucket, self.config())?;
        trace!(bucket, "scan");
        let mut results = HashMap::new();
        for entry in self.scan(bucket) {
            let (raw, data) = entry.map_err(engine)?;
            let key = FlatKey::decode_key(bucket, &raw)?;
            results.insert(key.to_owned(), codec::decode(&data)?);
        }
        Ok(results)
    }
}
