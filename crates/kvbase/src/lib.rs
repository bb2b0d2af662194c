//! kvbase — bucketed CRUD over embedded key-value stores
//!
//! Pick an engine when opening, then use the same [`Backend`] calls
//! everywhere else:
//!
//! ```no_run
//! use kvbase::{Backend, BackendKind, Config, Store};
//!
//! # fn main() -> kvbase::KvResult<()> {
//! let store = Store::open(BackendKind::Sled, "data", &Config::default())?;
//! store.create("users", "u1", &vec!["Ann"])?;
//! let names: Vec<String> = store.read("users", "u1")?;
//! assert_eq!(names, ["Ann"]);
//! # Ok(())
//! # }
//! ```
//!
//! Callers that only ever use one engine can depend on its adapter crate
//! (kvbase-redb or kvbase-sled) directly.

pub mod store;

pub use kvbase_core::{codec, keys, Backend, Config, FlatKey, HashMap, KvError, KvResult};
pub use kvbase_redb::RedbBackend;
pub use kvbase_sled::SledBackend;
pub use store::{BackendKind, Store};
