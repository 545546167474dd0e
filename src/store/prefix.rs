//! Prefix-scan adapters over range iteration.
//!
//! Byte-lexical order keeps all keys sharing a prefix contiguous, starting
//! at the prefix value itself, so a prefix query is a range scan from the
//! prefix plus an early stop at the first non-matching key. No separate
//! index structure is involved.

use super::StoreResult;

/// Lazy iterator over keys that begin with a prefix.
///
/// Produced by [`OrderedStore::prefix_keys`](super::OrderedStore::prefix_keys).
/// Forward-only and fused: once a non-matching key or an error is seen, the
/// iterator yields nothing further.
pub struct PrefixKeys<I> {
    inner: I,
    prefix: Vec<u8>,
    strip: usize,
    done: bool,
}

impl<I> PrefixKeys<I> {
    pub(crate) fn new(inner: I, prefix: &[u8], strip_prefix: bool) -> Self {
        Self {
            inner,
            prefix: prefix.to_vec(),
            strip: if strip_prefix { prefix.len() } else { 0 },
            done: false,
        }
    }
}

impl<I> Iterator for PrefixKeys<I>
where
    I: Iterator<Item = StoreResult<Vec<u8>>>,
{
    type Item = StoreResult<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next()? {
            Ok(key) => {
                if !key.starts_with(&self.prefix) {
                    self.done = true;
                    return None;
                }
                Some(Ok(key[self.strip..].to_vec()))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Lazy iterator over (key, value) pairs whose keys begin with a prefix.
///
/// Produced by
/// [`OrderedStore::prefix_items`](super::OrderedStore::prefix_items). Same
/// early-stop and fusing behavior as [`PrefixKeys`].
pub struct PrefixItems<I> {
    inner: I,
    prefix: Vec<u8>,
    strip: usize,
    done: bool,
}

impl<I> PrefixItems<I> {
    pub(crate) fn new(inner: I, prefix: &[u8], strip_prefix: bool) -> Self {
        Self {
            inner,
            prefix: prefix.to_vec(),
            strip: if strip_prefix { prefix.len() } else { 0 },
            done: false,
        }
    }
}

impl<I> Iterator for PrefixItems<I>
where
    I: Iterator<Item = StoreResult<(Vec<u8>, Vec<u8>)>>,
{
    type Item = StoreResult<(Vec<u8>, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.inner.next()? {
            Ok((key, value)) => {
                if !key.starts_with(&self.prefix) {
                    self.done = true;
                    return None;
                }
                Some(Ok((key[self.strip..].to_vec(), value)))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
