//! SQLite store backend.
//!
//! [`SqliteStore`] is the durable implementation of
//! [`OrderedStore`]: one file, one table, keys indexed in byte-lexical
//! order by SQLite's primary-key B-tree. The engine provides atomicity and
//! crash tolerance; this module handles schema bootstrap, the durability
//! pragma policy, chunked batch writes, and range-predicate construction.

mod scan;

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, warn};

use crate::store::{batches, OrderedStore, StoreError, StoreResult};

pub use scan::{SqliteItems, SqliteKeys};

/// Pairs per transaction in `put_many`/`delete_many`. Bounds transaction
/// and journal size for very large bulk loads while amortizing per-row
/// overhead; each chunk commits independently.
const WRITE_CHUNK_SIZE: usize = 30_000;

/// SQLite page size in bytes, fixed at open.
const PAGE_SIZE: u32 = 4096;

pub(crate) fn backend_err(err: rusqlite::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

fn open_err(err: rusqlite::Error) -> StoreError {
    StoreError::Open(err.to_string())
}

/// A durable store in a single SQLite file.
///
/// The schema is one table:
///
/// ```sql
/// CREATE TABLE kv (
///     key BLOB NOT NULL PRIMARY KEY,
///     value BLOB NOT NULL)
/// ```
///
/// The `key` primary key gives ordered traversal and O(log n) lookup;
/// BLOB columns keep both sides binary safe, so callers dealing in text
/// must encode to bytes themselves (UTF-8 is a fine choice).
///
/// # Durability Policy
///
/// Opening a store applies a fixed pragma policy: the engine's own page
/// cache is disabled (its pages get evicted independently of the OS file
/// cache holding the same data), temporary structures go through memory,
/// the journal runs in write-ahead-log mode when the file system supports
/// it (truncate mode otherwise), and synchronous flushing is off. The last
/// point trades crash durability for write throughput: a power loss can
/// lose recently committed writes. That is a deliberate policy of this
/// backend, not a tunable.
///
/// # Concurrency
///
/// One store owns one connection; mutations take `&mut self`, so a handle
/// has a single writer by construction. Multiple stores over the same file
/// coordinate only through SQLite's file locking.
///
/// # Example
///
/// ```no_run
/// use lexkv::{OrderedStore, SqliteStore};
///
/// # fn main() -> lexkv::StoreResult<()> {
/// let mut kv = SqliteStore::open("my_store.db")?;
/// kv.put(b"my_key", b"my_value")?;
/// kv.close()?;
/// # Ok(())
/// # }
/// ```
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `path`, creating the file and schema if absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if the file cannot be opened or
    /// created, or if pragma/schema setup fails.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let need_schema = !path.exists();

        let conn = Connection::open(path).map_err(open_err)?;

        // SQLite's page cache duplicates the OS file cache over the same
        // data and its pages get swapped out independently; rely on the OS
        // cache instead.
        conn.pragma_update(None, "cache_size", 0).map_err(open_err)?;
        conn.pragma_update(None, "page_size", PAGE_SIZE).map_err(open_err)?;

        // Write-ahead logging where available, otherwise truncate. The
        // pragma reports the mode actually in effect.
        let mode: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(open_err)?;
        if !mode.eq_ignore_ascii_case("wal") {
            warn!("write-ahead log unavailable (journal_mode={mode}), using truncate");
            conn.pragma_update(None, "journal_mode", "TRUNCATE").map_err(open_err)?;
        }

        // Speed-for-reliability trade-offs; see the type-level docs.
        conn.pragma_update(None, "temp_store", "MEMORY").map_err(open_err)?;
        conn.pragma_update(None, "synchronous", "OFF").map_err(open_err)?;

        if need_schema {
            Self::create_schema(&conn)?;
        }

        Ok(Self { conn })
    }

    fn create_schema(conn: &Connection) -> StoreResult<()> {
        debug!("creating store schema");
        conn.execute(
            "CREATE TABLE kv (
                key BLOB NOT NULL PRIMARY KEY,
                value BLOB NOT NULL)",
            [],
        )
        .map_err(open_err)?;
        Ok(())
    }
}

impl OrderedStore for SqliteStore {
    type Keys<'a>
        = SqliteKeys<'a>
    where
        Self: 'a;

    type Items<'a>
        = SqliteItems<'a>
    where
        Self: 'a;

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()
            .map_err(backend_err)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(backend_err)?;
        Ok(())
    }

    /// Batched upsert: chunks of [`WRITE_CHUNK_SIZE`] pairs, one
    /// transaction per chunk. The whole call is not atomic; each chunk is.
    fn put_many<I>(&mut self, items: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (Vec<u8>, Vec<u8>)>,
    {
        for batch in batches(items, WRITE_CHUNK_SIZE) {
            let tx = self.conn.transaction().map_err(backend_err)?;
            {
                let mut stmt = tx
                    .prepare_cached("INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)")
                    .map_err(backend_err)?;
                for (key, value) in batch {
                    stmt.execute(params![key, value]).map_err(backend_err)?;
                }
            }
            tx.commit().map_err(backend_err)?;
        }
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(backend_err)?;
        Ok(())
    }

    /// Batched delete with the same chunk-per-transaction structure as
    /// [`put_many`](Self::put_many).
    fn delete_many<I>(&mut self, keys: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        for batch in batches(keys, WRITE_CHUNK_SIZE) {
            let tx = self.conn.transaction().map_err(backend_err)?;
            {
                let mut stmt = tx
                    .prepare_cached("DELETE FROM kv WHERE key = ?1")
                    .map_err(backend_err)?;
                for key in batch {
                    stmt.execute(params![key]).map_err(backend_err)?;
                }
            }
            tx.commit().map_err(backend_err)?;
        }
        Ok(())
    }

    fn keys(&self, key_from: Option<&[u8]>, key_to: Option<&[u8]>) -> StoreResult<Self::Keys<'_>> {
        Ok(SqliteKeys::new(&self.conn, key_from, key_to))
    }

    fn items(
        &self,
        key_from: Option<&[u8]>,
        key_to: Option<&[u8]>,
    ) -> StoreResult<Self::Items<'_>> {
        Ok(SqliteItems::new(&self.conn, key_from, key_to))
    }

    fn close(self) -> StoreResult<()> {
        self.conn.close().map_err(|(_conn, err)| StoreError::Close(err.to_string()))
    }
}
