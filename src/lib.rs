//! `lexkv`
//!
//! An embedded, persistent key-value store with lexically ordered iteration
//! over binary-safe keys.
//!
//! # Overview
//!
//! The store layer defines a minimal contract, [`OrderedStore`], that
//! backends implement: point lookup, point and batch mutation, and lazy
//! range iteration over keys and key-value pairs in ascending byte-lexical
//! order. Prefix queries ([`OrderedStore::prefix_keys`] and
//! [`OrderedStore::prefix_items`]) are derived from range iteration once, in
//! the trait itself, so every backend gets them for free.
//!
//! # Core Pieces
//!
//! - [`OrderedStore`] - The store contract with derived prefix/contains
//!   operations
//! - [`SqliteStore`] - Durable single-file backend over SQLite
//! - [`MemoryStore`] - Non-durable `BTreeMap` backend
//!
//! # Error Handling
//!
//! All operations return [`StoreResult<T>`], an alias for
//! `Result<T, StoreError>`. A missing key is never an error: `get` returns
//! `Ok(None)` and range scans simply omit it.
//!
//! # Example
//!
//! ```no_run
//! use lexkv::{OrderedStore, SqliteStore};
//!
//! # fn main() -> lexkv::StoreResult<()> {
//! let mut kv = SqliteStore::open("my_store.db")?;
//!
//! kv.put(b"alpha", b"1")?;
//! kv.put(b"alphabet", b"2")?;
//! kv.put(b"beta", b"3")?;
//!
//! // "alpha", then "alphabet"
//! for key in kv.prefix_keys(b"alpha", false)? {
//!     println!("{:?}", key?);
//! }
//!
//! kv.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! Keys and values are opaque byte sequences; any text encoding is the
//! caller's responsibility.
//!
//! # Modules
//!
//! - [`store`] - The ordered store contract and derived operations
//! - [`backends`] - Concrete backend implementations

pub mod backends;
pub mod store;

pub use backends::{MemoryStore, SqliteStore};
pub use store::{batches, OrderedStore, PrefixItems, PrefixKeys, StoreError, StoreResult};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
