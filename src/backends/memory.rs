//! In-memory store backend.
//!
//! [`MemoryStore`] keeps entries in a `BTreeMap`, which already iterates in
//! byte-lexical key order. It implements only the required operations of
//! [`OrderedStore`] and inherits every derived default, which makes it both
//! a drop-in non-durable backend and the reference against which the
//! derived behavior is exercised in tests. Nothing survives drop.

use std::collections::btree_map::{self, BTreeMap};
use std::ops::Bound;

use crate::store::{OrderedStore, StoreResult};

/// A non-durable store over a `BTreeMap`.
///
/// # Example
///
/// ```
/// use lexkv::{MemoryStore, OrderedStore};
///
/// # fn main() -> lexkv::StoreResult<()> {
/// let mut kv = MemoryStore::new();
/// kv.put(b"a", b"1")?;
/// assert!(kv.contains(b"a")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn range(
        &self,
        key_from: Option<&[u8]>,
        key_to: Option<&[u8]>,
    ) -> btree_map::Range<'_, Vec<u8>, Vec<u8>> {
        if let (Some(from), Some(to)) = (key_from, key_to) {
            // BTreeMap::range panics on inverted bounds; an inverted
            // interval is simply empty.
            if from > to {
                return self.entries.range::<[u8], _>((
                    Bound::Included(from),
                    Bound::Excluded(from),
                ));
            }
        }
        let lower = key_from.map_or(Bound::Unbounded, Bound::Included);
        let upper = key_to.map_or(Bound::Unbounded, Bound::Included);
        self.entries.range::<[u8], _>((lower, upper))
    }
}

impl OrderedStore for MemoryStore {
    type Keys<'a>
        = MemoryKeys<'a>
    where
        Self: 'a;

    type Items<'a>
        = MemoryItems<'a>
    where
        Self: 'a;

    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self, key_from: Option<&[u8]>, key_to: Option<&[u8]>) -> StoreResult<Self::Keys<'_>> {
        Ok(MemoryKeys {
            inner: self.range(key_from, key_to),
        })
    }

    fn items(
        &self,
        key_from: Option<&[u8]>,
        key_to: Option<&[u8]>,
    ) -> StoreResult<Self::Items<'_>> {
        Ok(MemoryItems {
            inner: self.range(key_from, key_to),
        })
    }
}

/// Ascending key iterator for [`MemoryStore`].
pub struct MemoryKeys<'a> {
    inner: btree_map::Range<'a, Vec<u8>, Vec<u8>>,
}

impl Iterator for MemoryKeys<'_> {
    type Item = StoreResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| Ok(key.clone()))
    }
}

/// Ascending (key, value) iterator for [`MemoryStore`].
pub struct MemoryItems<'a> {
    inner: btree_map::Range<'a, Vec<u8>, Vec<u8>>,
}

impl Iterator for MemoryItems<'_> {
    type Item = StoreResult<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| Ok((key.clone(), value.clone())))
    }
}
