use std::ops::Index;

/// A bucketed set of data. A [Window] is only storage: it should be used in conjunction
/// with a policy that decides which bucket receives each value and when buckets are cleared.
///
/// The number of buckets is fixed at construction. Each policy describes its use of buckets.
///
/// ## Example
/// ```rust
/// use rolling_window::Window;
///
/// let window = Window::<f64>::with_capacity(4, 16);
///
/// assert_eq!(window.len(), 4);
/// assert_eq!(window.count(), 0);
/// assert!(window.buckets().iter().all(|bucket| bucket.capacity() >= 16));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window<T> {
    buckets: Vec<Vec<T>>,
}

impl<T> Window<T> {
    /// Creates a window with the given number of empty buckets. Buckets grow on demand.
    pub fn new(buckets: usize) -> Self {
        Self::with_capacity(buckets, 0)
    }

    /// Creates a window with the given number of buckets, each preallocated to hold
    /// `bucket_capacity` values. Useful when the number of values per bucket can be estimated
    /// so that no allocations happen as a policy populates the window.
    pub fn with_capacity(buckets: usize, bucket_capacity: usize) -> Self {
        Self {
            buckets: (0..buckets).map(|_| Vec::with_capacity(bucket_capacity)).collect(),
        }
    }

    /// The buckets of this window in offset order.
    pub fn buckets(&self) -> &[Vec<T>] {
        &self.buckets
    }

    /// The number of buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// The total number of values across all buckets.
    pub fn count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// All values in bucket order, then in insertion order within each bucket.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.buckets.iter().flatten()
    }

    pub(crate) fn bucket_mut(&mut self, offset: usize) -> &mut Vec<T> {
        &mut self.buckets[offset]
    }

    pub(crate) fn buckets_mut(&mut self) -> impl Iterator<Item = &mut Vec<T>> + '_ {
        self.buckets.iter_mut()
    }

    /// Empties every bucket while keeping its allocation.
    pub(crate) fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
    }
}

impl<T> Index<usize> for Window<T> {
    type Output = [T];

    fn index(&self, offset: usize) -> &Self::Output {
        &self.buckets[offset]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buckets() {
        let window = Window::<u32>::new(3);

        assert_eq!(window.len(), 3);
        assert_eq!(window.count(), 0);
        assert_eq!(window.values().count(), 0);
        assert!(window.buckets().iter().all(Vec::is_empty));
    }

    #[test]
    fn zero_buckets() {
        let window = Window::<u32>::new(0);

        assert!(window.is_empty());
        assert_eq!(window.count(), 0);
    }

    #[test]
    fn preallocated() {
        let window = Window::<u32>::with_capacity(2, 8);

        assert_eq!(window.count(), 0);
        assert!(window.buckets().iter().all(|b| b.capacity() >= 8));
    }

    #[test]
    fn values_in_bucket_order() {
        let mut window = Window::new(3);
        window.bucket_mut(2).push(5);
        window.bucket_mut(0).extend([1, 2]);
        window.bucket_mut(1).push(3);

        assert_eq!(window.values().copied().collect::<Vec<_>>(), vec![1, 2, 3, 5]);
        assert_eq!(window.count(), 4);
        assert_eq!(&window[0], &[1, 2]);
    }

    #[test]
    fn clear_keeps_allocation() {
        let mut window = Window::with_capacity(2, 4);
        window.bucket_mut(0).extend([1, 2, 3]);
        window.clear();

        assert_eq!(window.count(), 0);
        assert_eq!(window.len(), 2);
        assert!(window.buckets()[0].capacity() >= 4);
    }
}
