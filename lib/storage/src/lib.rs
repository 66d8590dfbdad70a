//! # vibematch Storage
//!
//! Profile and match-log stores for the matching engine:
//!
//! - [`MemoryStorage`] - in-process maps, for tests and single-node demos
//! - [`LmdbStorage`] - durable LMDB databases via `heed`
//! - [`StorageManager`] - picks a backend and hands out the store handles

pub mod lmdb_storage;
pub mod manager;
pub mod memory;

pub use lmdb_storage::LmdbStorage;
pub use manager::StorageManager;
pub use memory::MemoryStorage;
