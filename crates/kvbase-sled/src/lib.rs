//! kvbase adapter for sled
//!
//! Implements the kvbase [`Backend`](kvbase_core::Backend) contract over
//! sled's default keyspace, which is a single flat namespace.
//!
//! # Architecture
//!
//! sled's default tree has no notion of buckets. The bridge works as follows:
//! - Every record lives under a [`FlatKey`](kvbase_core::FlatKey):
//!   `[bucket_len][bucket][key]`
//! - `count`, `get` and `drop_bucket` prefix-scan `[bucket_len][bucket]`;
//!   cost is linear in the size of the bucket
//! - `create`, `update` and `delete` each map onto one atomic sled primitive
//!   (compare-and-swap, fetch-and-update, remove)
//! - A bucket with no records is indistinguishable from one never created

pub mod backend;
pub mod db;

pub use db::SledBackend;
