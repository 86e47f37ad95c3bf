use num_traits::Zero;
use parking_lot::Mutex;

use crate::{Error, Policy, Result, Window};

#[derive(Debug)]
struct State<T> {
    window: Window<T>,
    offset: usize,
}

/// A rolling window policy that tracks the last N values appended, regardless of when they were
/// appended. N is the number of buckets in the given window.
///
/// Every bucket holds exactly one value at all times, starting at zero. As a consequence
/// [count](Policy::count) is always N, even before the first append.
///
/// ## Example
/// ```rust
/// use rolling_window::{reduce, Policy, PointPolicy, Window};
///
/// let policy = PointPolicy::new(Window::new(3));
///
/// assert_eq!(policy.count(), 3);
///
/// for value in 1..=5 {
///     policy.append(value);
/// }
///
/// // Only the last three values remain.
/// assert_eq!(policy.reduce(reduce::sum), 3 + 4 + 5);
/// assert_eq!(policy.count(), 3);
/// ```
#[derive(Debug)]
pub struct PointPolicy<T> {
    number_of_buckets: usize,
    state: Mutex<State<T>>,
}

impl<T> PointPolicy<T>
where
    T: Zero,
{
    /// Wraps the given window, resetting each bucket to a single zero value.
    ///
    /// ## Panic
    /// Panics when the window has no buckets.
    pub fn new(window: Window<T>) -> Self {
        match Self::try_new(window) {
            Ok(policy) => policy,
            Err(error) => panic!("{error}"),
        }
    }

    /// Same as [new](Self::new) but returns an error for a window without buckets.
    pub fn try_new(mut window: Window<T>) -> Result<Self> {
        if window.is_empty() {
            return Err(Error::NoBuckets);
        }

        for bucket in window.buckets_mut() {
            bucket.clear();
            bucket.push(T::zero());
        }

        Ok(Self {
            number_of_buckets: window.len(),
            state: Mutex::new(State { window, offset: 0 }),
        })
    }
}

impl<T> PointPolicy<T> {
    /// The number of buckets, which is also the number of values retained.
    pub fn buckets(&self) -> usize {
        self.number_of_buckets
    }

    /// A copy of the underlying window as it currently is.
    pub fn snapshot(&self) -> Window<T>
    where
        T: Clone,
    {
        self.state.lock().window.clone()
    }

    /// Consumes the policy, returning the underlying window.
    pub fn into_window(self) -> Window<T> {
        self.state.into_inner().window
    }
}

impl<T> Policy for PointPolicy<T> {
    type Value = T;

    /// Overwrites the oldest value with the given one.
    fn append(&self, value: T) {
        let mut state = self.state.lock();
        let offset = state.offset;

        state.window.bucket_mut(offset)[0] = value;
        state.offset = (offset + 1) % self.number_of_buckets;
    }

    fn reduce<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Window<T>) -> R,
    {
        f(&self.state.lock().window)
    }

    fn count(&self) -> usize {
        self.state.lock().window.count()
    }
}
