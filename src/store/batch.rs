//! Fixed-size chunk partitioning for bulk operations.

/// Partition an iterator into chunks of at most `size` elements.
///
/// Backends use this to bound transaction and log size during bulk writes:
/// each chunk becomes one engine transaction, so a very large input never
/// turns into one unbounded transaction. The final chunk may be shorter.
///
/// # Panics
///
/// Panics if `size` is zero.
pub fn batches<I>(iter: I, size: usize) -> Batches<I::IntoIter>
where
    I: IntoIterator,
{
    assert!(size > 0, "batch size must be non-zero");
    Batches {
        inner: iter.into_iter(),
        size,
    }
}

/// Iterator of fixed-size chunks, produced by [`batches`].
pub struct Batches<I> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut batch = Vec::new();
        for item in self.inner.by_ref() {
            batch.push(item);
            if batch.len() == self.size {
                break;
            }
        }
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_split() {
        let chunks: Vec<Vec<u32>> = batches(0..6, 2).collect();
        assert_eq!(chunks, vec![vec![0, 1], vec![2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_short_final_chunk() {
        let chunks: Vec<Vec<u32>> = batches(0..5, 2).collect();
        assert_eq!(chunks, vec![vec![0, 1], vec![2, 3], vec![4]]);
    }

    #[test]
    fn test_empty_input() {
        let chunks: Vec<Vec<u32>> = batches(0..0, 3).collect();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_single_oversized_chunk() {
        let chunks: Vec<Vec<u32>> = batches(0..3, 10).collect();
        assert_eq!(chunks, vec![vec![0, 1, 2]]);
    }

    #[test]
    #[should_panic(expected = "batch size must be non-zero")]
    fn test_zero_size_panics() {
        let _ = batches(0..3, 0);
    }
}
