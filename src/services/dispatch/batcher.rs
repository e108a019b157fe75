use std::num::NonZeroUsize;

/// Lazily partitions an ordered sequence into groups of at most `size` items.
///
/// Groups preserve input order and only the final group may be shorter.
#[derive(Debug, Clone)]
pub struct Batches<I> {
    inner: I,
    size: NonZeroUsize,
}

/// Splits `items` into batches of at most `size` items each.
pub fn batches<I: IntoIterator>(items: I, size: NonZeroUsize) -> Batches<I::IntoIter> {
    Batches { inner: items.into_iter(), size }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<I::Item> = self.inner.by_ref().take(self.size.get()).collect();
        if batch.is_empty() { None } else { Some(batch) }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        let size = self.size.get();
        (lower.div_ceil(size), upper.map(|n| n.div_ceil(size)))
    }
}
