use std::time::{Duration, SystemTime, UNIX_EPOCH};

use log::{debug, trace, warn};
use parking_lot::Mutex;

use crate::{Clock, Error, Policy, Result, SystemClock, Window};

#[derive(Debug)]
struct State<T> {
    window: Window<T>,
    last_window_offset: usize,
    last_window_time: u64,
}

impl<T> State<T> {
    /// Clears the buckets that aged out between the last mutation and the given quantum.
    /// Buckets are only ever cleared here, on caller activity.
    fn keep_consistent(&mut self, adjusted_time: u64, window_offset: usize) {
        let number_of_buckets = self.window.len();

        // Silent for longer than the whole window spans.
        if adjusted_time.saturating_sub(self.last_window_time) > number_of_buckets as u64 {
            debug!(
                "Clearing all {number_of_buckets} buckets after {} idle quanta",
                adjusted_time - self.last_window_time
            );
            self.window.clear();
        } else if adjusted_time != self.last_window_time {
            self.reset_buckets(window_offset);
        }
    }

    /// Clears the buckets strictly between the last offset and the given one, walking forward
    /// around the ring.
    fn reset_buckets(&mut self, window_offset: usize) {
        let number_of_buckets = self.window.len();
        let distance = if window_offset >= self.last_window_offset {
            window_offset - self.last_window_offset
        } else {
            (number_of_buckets - self.last_window_offset) + window_offset
        };

        trace!(
            "Moving from offset {} to {window_offset}, clearing {} buckets",
            self.last_window_offset,
            distance.saturating_sub(1)
        );

        for step in 1..distance {
            let offset = (self.last_window_offset + step) % number_of_buckets;
            self.window.bucket_mut(offset).clear();
        }
    }
}

/// A rolling window policy that uses a fixed duration of time to bucket values.
///
/// Time is divided into quanta of the bucket duration since the Unix epoch. Every value appended
/// within the same quantum lands in the same bucket, and the window spans N quanta where N is
/// the number of buckets.
///
/// Buckets are expired lazily. Each append, reduce and count first clears the buckets of any
/// quanta that were skipped since the last append. If the policy was idle for longer than the
/// whole window, every bucket is cleared. Nothing is cleared without caller activity.
///
/// ## Example
/// ```rust
/// use std::time::{Duration, UNIX_EPOCH};
/// use rolling_window::{reduce, TimePolicy, Window};
///
/// let start = UNIX_EPOCH + Duration::from_secs(1_000);
/// let policy = TimePolicy::new(Window::new(5), Duration::from_secs(1));
///
/// policy.append_with_timestamp(2.0, start);
/// policy.append_with_timestamp(4.0, start + Duration::from_millis(500));
/// policy.append_with_timestamp(9.0, start + Duration::from_secs(1));
///
/// let window = policy.snapshot();
///
/// assert_eq!(window.count(), 3);
/// assert_eq!(reduce::sum(&window), 15.0);
/// ```
#[derive(Debug)]
pub struct TimePolicy<T, C = SystemClock> {
    bucket_duration: Duration,
    bucket_nanos: u128,
    number_of_buckets: usize,
    clock: C,
    state: Mutex<State<T>>,
}

impl<T> TimePolicy<T> {
    /// Wraps the given window, bucketing values by the given duration of wall-clock time.
    ///
    /// ## Panic
    /// Panics when the window has no buckets or the duration is zero.
    pub fn new(window: Window<T>, bucket_duration: Duration) -> Self {
        match Self::try_new(window, bucket_duration) {
            Ok(policy) => policy,
            Err(error) => panic!("{error}"),
        }
    }

    /// Same as [new](Self::new) but returns an error for an invalid window or duration.
    pub fn try_new(window: Window<T>, bucket_duration: Duration) -> Result<Self> {
        Self::with_clock(window, bucket_duration, SystemClock)
    }
}

impl<T, C> TimePolicy<T, C>
where
    C: Clock,
{
    /// Same as [try_new](TimePolicy::try_new) but reads the current time from the given clock.
    pub fn with_clock(window: Window<T>, bucket_duration: Duration, clock: C) -> Result<Self> {
        if window.is_empty() {
            return Err(Error::NoBuckets);
        }

        if bucket_duration.is_zero() {
            return Err(Error::ZeroBucketDuration(bucket_duration));
        }

        Ok(Self {
            bucket_duration,
            bucket_nanos: bucket_duration.as_nanos(),
            number_of_buckets: window.len(),
            clock,
            state: Mutex::new(State {
                window,
                last_window_offset: 0,
                last_window_time: 0,
            }),
        })
    }

    /// Appends a value to the bucket of the given timestamp instead of the current time.
    pub fn append_with_timestamp(&self, value: T, timestamp: SystemTime) {
        let (adjusted_time, window_offset) = self.select_bucket(timestamp);
        let mut state = self.state.lock();

        state.keep_consistent(adjusted_time, window_offset);

        let fresh = state.last_window_offset != window_offset;
        let bucket = state.window.bucket_mut(window_offset);
        if fresh {
            bucket.clear();
        }
        bucket.push(value);

        state.last_window_time = adjusted_time;
        state.last_window_offset = window_offset;
    }

    /// The number of buckets in the window.
    pub fn buckets(&self) -> usize {
        self.number_of_buckets
    }

    /// The span of time covered by a single bucket.
    pub fn bucket_duration(&self) -> Duration {
        self.bucket_duration
    }

    /// A copy of the underlying window as it currently is, without expiring stale buckets.
    pub fn snapshot(&self) -> Window<T>
    where
        T: Clone,
    {
        self.state.lock().window.clone()
    }

    /// Consumes the policy, returning the underlying window without expiring stale buckets.
    pub fn into_window(self) -> Window<T> {
        self.state.into_inner().window
    }

    /// Maps a timestamp to its quantum since the epoch and the offset of its bucket.
    fn select_bucket(&self, timestamp: SystemTime) -> (u64, usize) {
        let nanos = match timestamp.duration_since(UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_nanos(),
            Err(error) => {
                warn!("Timestamp precedes the epoch by {:?}, using the epoch", error.duration());
                0
            }
        };
        let adjusted_time = u64::try_from(nanos / self.bucket_nanos).unwrap_or(u64::MAX);
        let window_offset = (adjusted_time % self.number_of_buckets as u64) as usize;

        (adjusted_time, window_offset)
    }

    fn expire(&self, state: &mut State<T>) {
        let (adjusted_time, window_offset) = self.select_bucket(self.clock.now());

        state.keep_consistent(adjusted_time, window_offset);
    }
}

impl<T, C> Policy for TimePolicy<T, C>
where
    C: Clock,
{
    type Value = T;

    fn append(&self, value: T) {
        self.append_with_timestamp(value, self.clock.now());
    }

    fn reduce<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Window<T>) -> R,
    {
        let mut state = self.state.lock();

        self.expire(&mut state);

        f(&state.window)
    }

    fn count(&self) -> usize {
        let mut state = self.state.lock();

        self.expire(&mut state);

        state.window.count()
    }
}
