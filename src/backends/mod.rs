//! Concrete store backend implementations.
//!
//! - [`sqlite`] - Durable single-file backend over SQLite
//! - [`memory`] - Non-durable `BTreeMap` backend

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
