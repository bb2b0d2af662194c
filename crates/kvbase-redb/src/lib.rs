//! kvbase adapter for redb
//!
//! Implements the kvbase [`Backend`](kvbase_core::Backend) contract over
//! redb, a single-file B+tree store with single-writer / multi-reader
//! transactions.
//!
//! # Architecture
//!
//! - Each bucket is a native redb table of `&str -> &[u8]`
//! - Every public operation runs in exactly one redb transaction, so the
//!   existence check and the write of `create` / `update` / `delete` cannot
//!   interleave with another writer
//! - Read transactions treat a missing table as an empty bucket; only a
//!   committed `create` ever materializes a table
//! - Opening polls the file lock for a bounded time instead of failing on
//!   the first attempt or blocking forever

pub mod backend;
pub mod db;

pub use db::RedbBackend;
