//! `Backend` implementation for redb.

use redb::{ReadableTable, ReadableTableMetadata};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, trace};

use kvbase_core::keys::{validate_address, validate_bucket};
use kvbase_core::{codec, Backend, HashMap, KvError, KvResult};

use crate::db::{engine, RedbBackend};

impl Backend for RedbBackend {
    fn count(&self, bucket: &str) -> KvResult<usize> {
        validate_bucket(bucket, self.config())?;
        self.view(bucket, |table| match table {
            Some(table) => Ok(table.len().map_err(engine)? as usize),
            None => Ok(0),
        })
    }

    fn create<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized,
    {
        validate_address(bucket, key, self.config())?;
        let data = codec::encode(value, self.config().max_value_size)?;

        self.write(bucket, |table| {
            if table.get(key).map_err(engine)?.is_some() {
                return Err(KvError::already_exists(bucket, key));
            }
            table.insert(key, data.as_slice()).map_err(engine)?;
            Ok(())
        })?;
        debug!(bucket, key, bytes = data.len(), "record created");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, bucket: &str, key: &str) -> KvResult<T> {
        validate_address(bucket, key, self.config())?;
        trace!(bucket, key, "read");
        self.view(bucket, |table| {
            let table = table.ok_or_else(|| KvError::not_found(bucket, key))?;
            let guard = table
                .get(key)
                .map_err(engine)?
                .ok_or_else(|| KvError::not_found(bucket, key))?;
            codec::decode(guard.value())
        })
    }

    fn update<T>(&self, bucket: &str, key: &str, value: &T) -> KvResult<()>
    where
        T: Serialize + ?Sized,
    {
        validate_address(bucket, key, self.config())?;
        let data = codec::encode(value, self.config().max_value_size)?;

        // A missing bucket is created inside the transaction but never committed
        self.write(bucket, |table| {
            if table.get(key).map_err(engine)?.is_none() {
                return Err(KvError::not_found(bucket, key));
            }
            table.insert(key, data.as_slice()).map_err(engine)?;
            Ok(())
        })?;
        debug!(bucket, key, bytes = data.len(), "record updated");
        Ok(())
    }

    fn delete(&self, bucket: &str, key: &str) -> KvResult<()> {
        validate_address(bucket, key, self.config())?;
        self.write(bucket, |table| {
            let removed = table.remove(key).map_err(engine)?.is_some();
            if !removed {
                return Err(KvError::not_found(bucket, key));
            }
            Ok(())
        })?;
        debug!(bucket, key, "record deleted");
        Ok(())
    }

    fn drop_bucket(&self, bucket: &str) -> KvResult<()> {
        validate_bucket(bucket, self.config())?;
        if self.delete_table(bucket)? {
            debug!(bucket, "bucket dropped");
        } else {
            debug!(bucket, "bucket did not exist, nothing to drop");
        }
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, bucket: &str) -> KvResult<HashMap<String, T>> {
        validate_bucket(bucket, self.config())?;
        trace!(bucket, "scan");
        self.view(bucket, |table| {
            let mut results = HashMap::new();
            let Some(table) = table else {
                return Ok(results);
            };
            for entry in table.iter().map_err(engine)? {
                let (key, value) = entry.map_err(engine)?;
                results.insert(key.value().to_owned(), codec::decode(value.value())?);
            }
            Ok(results)
        })
    }
}
