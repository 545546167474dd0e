//! The core ordered store trait.

use super::{PrefixItems, PrefixKeys, StoreResult};

/// A key-value store with lexically ordered range iteration.
///
/// Keys and values are opaque byte sequences; keys are totally ordered by
/// byte-lexical comparison (the `Ord` of `[u8]`), and that ordering governs
/// every range query. Required operations are `get`, `put`, `delete`,
/// `keys`, and `items`; everything else has a default body derived from
/// those, so a backend only overrides the defaults when its engine can do
/// better (batched transactions, for example).
///
/// Mutating operations take `&mut self`: one handle has one writer, and the
/// borrow checker enforces it. Range iterators borrow `&self`, are lazy,
/// forward-only, and single-pass; they cannot be restarted after exhaustion.
///
/// # Example
///
/// ```ignore
/// use lexkv::{OrderedStore, SqliteStore};
///
/// let mut kv = SqliteStore::open("my_store.db")?;
/// kv.put(b"user:1", b"Alice")?;
///
/// for entry in kv.prefix_items(b"user:", true)? {
///     let (id, name) = entry?;
/// }
/// kv.close()?;
/// ```
pub trait OrderedStore {
    /// Lazy ascending iterator over keys in a range.
    type Keys<'a>: Iterator<Item = StoreResult<Vec<u8>>>
    where
        Self: 'a;

    /// Lazy ascending iterator over (key, value) pairs in a range.
    type Items<'a>: Iterator<Item = StoreResult<(Vec<u8>, Vec<u8>)>>
    where
        Self: 'a;

    /// Get the value associated with a key.
    ///
    /// Returns `Ok(None)` when the key is absent; absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`](super::StoreError::Backend) if the
    /// lookup fails at the engine level.
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Put a key-value pair into the store.
    ///
    /// If the key is already present its value is replaced entirely. Both
    /// key and value are binary safe. The write is durable (per the
    /// backend's durability policy) before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`](super::StoreError::Backend) if the
    /// write fails.
    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Put many key-value pairs.
    ///
    /// The default implementation issues one `put` per pair. Backends may
    /// override this to batch writes for performance; batching does not
    /// guarantee all items land in the same transaction, only that
    /// transactions may be used to amortize per-pair overhead. On duplicate
    /// keys within `items`, the last pair in sequence order wins.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; pairs written before the
    /// failure stay written.
    fn put_many<I>(&mut self, items: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = (Vec<u8>, Vec<u8>)>,
    {
        for (key, value) in items {
            self.put(&key, &value)?;
        }
        Ok(())
    }

    /// Remove a key from the store.
    ///
    /// Removing an absent key is a no-op, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`](super::StoreError::Backend) if the
    /// delete fails at the engine level.
    fn delete(&mut self, key: &[u8]) -> StoreResult<()>;

    /// Remove many keys from the store.
    ///
    /// The default implementation issues one `delete` per key; backends may
    /// override with a batched version under the same latitude as
    /// [`put_many`](Self::put_many).
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; keys removed before the failure
    /// stay removed.
    fn delete_many<I>(&mut self, keys: I) -> StoreResult<()>
    where
        I: IntoIterator<Item = Vec<u8>>,
    {
        for key in keys {
            self.delete(&key)?;
        }
        Ok(())
    }

    /// Get a lazy ascending iterator over keys in the closed range
    /// `key_from..=key_to`.
    ///
    /// Either bound may be `None` for unbounded on that side. Results
    /// reflect store state at the time the underlying read executes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`](super::StoreError::Backend) if the
    /// scan cannot be started; per-row failures surface through the
    /// iterator's items.
    fn keys(&self, key_from: Option<&[u8]>, key_to: Option<&[u8]>) -> StoreResult<Self::Keys<'_>>;

    /// Get a lazy ascending iterator over (key, value) pairs in the closed
    /// range `key_from..=key_to`.
    ///
    /// Same bound semantics as [`keys`](Self::keys).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`](super::StoreError::Backend) if the
    /// scan cannot be started.
    fn items(&self, key_from: Option<&[u8]>, key_to: Option<&[u8]>)
        -> StoreResult<Self::Items<'_>>;

    /// True if the store contains `key`.
    ///
    /// Derived from [`get`](Self::get); a backend may override with a
    /// cheaper probe, but the derived version is always correct.
    ///
    /// # Errors
    ///
    /// Propagates the underlying `get` failure.
    fn contains(&self, key: &[u8]) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Get all keys that begin with `prefix`, ascending.
    ///
    /// Derived from [`keys`](Self::keys): byte-lexical order keeps every key
    /// sharing a prefix contiguous and immediately following the prefix
    /// itself, so this scans from `prefix` and stops at the first key that
    /// no longer starts with it. If `strip_prefix` is true, the matched
    /// prefix bytes are omitted from each yielded key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying scan cannot be started.
    fn prefix_keys(
        &self,
        prefix: &[u8],
        strip_prefix: bool,
    ) -> StoreResult<PrefixKeys<Self::Keys<'_>>> {
        Ok(PrefixKeys::new(self.keys(Some(prefix), None)?, prefix, strip_prefix))
    }

    /// Get all (key, value) pairs whose keys begin with `prefix`, ascending.
    ///
    /// Same derivation as [`prefix_keys`](Self::prefix_keys), over
    /// [`items`](Self::items).
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying scan cannot be started.
    fn prefix_items(
        &self,
        prefix: &[u8],
        strip_prefix: bool,
    ) -> StoreResult<PrefixItems<Self::Items<'_>>> {
        Ok(PrefixItems::new(self.items(Some(prefix), None)?, prefix, strip_prefix))
    }

    /// Release any resources associated with the store.
    ///
    /// Consumes the store, so operations after close are a compile error
    /// rather than undefined behavior. Dropping a store without calling
    /// `close` still releases its resources; `close` exists so release
    /// failures can be observed. The default implementation does nothing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Close`](super::StoreError::Close) if resources
    /// cannot be released cleanly.
    fn close(self) -> StoreResult<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}
