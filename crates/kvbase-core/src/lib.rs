//! kvbase Core — one CRUD contract over embedded key-value engines
//!
//! Applications address records by `(bucket, key)` and store any
//! `serde`-serializable value. Backends map that addressing onto whatever
//! their engine offers natively, so call sites stay the same when the engine
//! changes.
//!
//! # Contents
//!
//! - [`Backend`]: the contract (`count`, `create`, `read`, `update`,
//!   `delete`, `drop_bucket`, `get`)
//! - [`KvError`]: error kinds shared by all backends
//! - [`Config`]: tier presets and input limits
//! - [`codec`]: JSON value encoding
//! - [`keys`]: address validation and the composite key for flat keyspaces
//!
//! This crate knows nothing about any particular engine. Engine adapters
//! live in separate crates (e.g. kvbase-redb, kvbase-sled).

pub mod backend;
pub mod codec;
pub mod config;
pub mod error;
pub mod keys;

// Re-export key types for convenience
pub use backend::Backend;
pub use config::Config;
pub use error::{KvError, KvResult};
pub use hashbrown::HashMap;
pub use keys::FlatKey;
