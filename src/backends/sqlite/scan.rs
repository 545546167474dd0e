//! Lazy range scans over the SQLite backend.
//!
//! `rusqlite` rows borrow their statement, which borrows the connection, so
//! a single long-lived cursor cannot be handed to the caller. Instead the
//! scan iterators stream in batches: each batch is an ordered `LIMIT` query
//! and the next batch continues strictly after the last key seen (keyset
//! continuation). Memory stays bounded at one batch regardless of result
//! size, and each batch reflects store state at the time it is read.

use std::collections::VecDeque;

use rusqlite::{Connection, ToSql};

use crate::store::StoreResult;

use super::backend_err;

/// Rows fetched per batch during range scans.
const SCAN_BATCH_SIZE: usize = 1_000;

/// Bound and continuation state shared by the scan iterators.
///
/// The initial query uses one of the four predicate forms (unbounded,
/// lower-only, upper-only, closed interval); continuation batches replace
/// the lower bound with a strict one at the last key fetched.
struct ScanState {
    lower: Option<Vec<u8>>,
    lower_strict: bool,
    upper: Option<Vec<u8>>,
    exhausted: bool,
    failed: bool,
}

impl ScanState {
    fn new(key_from: Option<&[u8]>, key_to: Option<&[u8]>) -> Self {
        Self {
            lower: key_from.map(<[u8]>::to_vec),
            lower_strict: false,
            upper: key_to.map(<[u8]>::to_vec),
            exhausted: false,
            failed: false,
        }
    }

    /// Build the scan query for the current batch.
    fn sql(&self, select: &str) -> String {
        let mut sql = String::from(select);
        match (&self.lower, &self.upper) {
            (Some(_), Some(_)) if self.lower_strict => {
                sql.push_str(" WHERE key > :key_from AND key <= :key_to");
            }
            (Some(_), Some(_)) => {
                sql.push_str(" WHERE key BETWEEN :key_from AND :key_to");
            }
            (Some(_), None) if self.lower_strict => sql.push_str(" WHERE key > :key_from"),
            (Some(_), None) => sql.push_str(" WHERE key >= :key_from"),
            (None, Some(_)) => sql.push_str(" WHERE key <= :key_to"),
            (None, None) => {}
        }
        sql.push_str(" ORDER BY key LIMIT ");
        sql.push_str(&SCAN_BATCH_SIZE.to_string());
        sql
    }

    fn params(&self) -> Vec<(&str, &dyn ToSql)> {
        let mut params: Vec<(&str, &dyn ToSql)> = Vec::with_capacity(2);
        if let Some(lower) = &self.lower {
            params.push((":key_from", lower));
        }
        if let Some(upper) = &self.upper {
            params.push((":key_to", upper));
        }
        params
    }

    /// Record the outcome of a batch fetch and position the next one.
    fn advance(&mut self, fetched: usize, last_key: Option<Vec<u8>>) {
        if fetched < SCAN_BATCH_SIZE {
            self.exhausted = true;
            return;
        }
        self.lower = last_key;
        self.lower_strict = true;
    }
}

/// Lazy ascending key iterator for the SQLite backend.
///
/// Forward-only and single-pass; not restartable after exhaustion. Fused
/// after the first error.
pub struct SqliteKeys<'conn> {
    conn: &'conn Connection,
    state: ScanState,
    buf: VecDeque<Vec<u8>>,
}

impl<'conn> SqliteKeys<'conn> {
    pub(crate) fn new(
        conn: &'conn Connection,
        key_from: Option<&[u8]>,
        key_to: Option<&[u8]>,
    ) -> Self {
        Self {
            conn,
            state: ScanState::new(key_from, key_to),
            buf: VecDeque::new(),
        }
    }

    fn fill(&mut self) -> StoreResult<()> {
        let fetched = {
            let sql = self.state.sql("SELECT key FROM kv");
            let mut stmt = self.conn.prepare_cached(&sql).map_err(backend_err)?;
            let params = self.state.params();
            let mut rows = stmt.query(&params[..]).map_err(backend_err)?;

            let mut fetched = 0;
            while let Some(row) = rows.next().map_err(backend_err)? {
                let key: Vec<u8> = row.get(0).map_err(backend_err)?;
                self.buf.push_back(key);
                fetched += 1;
            }
            fetched
        };
        let last_key = self.buf.back().cloned();
        self.state.advance(fetched, last_key);
        Ok(())
    }
}

impl Iterator for SqliteKeys<'_> {
    type Item = StoreResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(key) = self.buf.pop_front() {
            return Some(Ok(key));
        }
        if self.state.exhausted || self.state.failed {
            return None;
        }
        if let Err(err) = self.fill() {
            self.state.failed = true;
            return Some(Err(err));
        }
        self.buf.pop_front().map(Ok)
    }
}

/// Lazy ascending (key, value) iterator for the SQLite backend.
///
/// Same streaming and fusing behavior as [`SqliteKeys`].
pub struct SqliteItems<'conn> {
    conn: &'conn Connection,
    state: ScanState,
    buf: VecDeque<(Vec<u8>, Vec<u8>)>,
}

impl<'conn> SqliteItems<'conn> {
    pub(crate) fn new(
        conn: &'conn Connection,
        key_from: Option<&[u8]>,
        key_to: Option<&[u8]>,
    ) -> Self {
        Self {
            conn,
            state: ScanState::new(key_from, key_to),
            buf: VecDeque::new(),
        }
    }

    fn fill(&mut self) -> StoreResult<()> {
        let fetched = {
            let sql = self.state.sql("SELECT key, value FROM kv");
            let mut stmt = self.conn.prepare_cached(&sql).map_err(backend_err)?;
            let params = self.state.params();
            let mut rows = stmt.query(&params[..]).map_err(backend_err)?;

            let mut fetched = 0;
            while let Some(row) = rows.next().map_err(backend_err)? {
                let key: Vec<u8> = row.get(0).map_err(backend_err)?;
                let value: Vec<u8> = row.get(1).map_err(backend_err)?;
                self.buf.push_back((key, value));
                fetched += 1;
            }
            fetched
        };
        let last_key = self.buf.back().map(|(key, _)| key.clone());
        self.state.advance(fetched, last_key);
        Ok(())
    }
}

impl Iterator for SqliteItems<'_> {
    type Item = StoreResult<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.buf.pop_front() {
            return Some(Ok(item));
        }
        if self.state.exhausted || self.state.failed {
            return None;
        }
        if let Err(err) = self.fill() {
            self.state.failed = true;
            return Some(Err(err));
        }
        self.buf.pop_front().map(Ok)
    }
}
