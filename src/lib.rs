//! Rolling windows of numeric samples backed by a fixed-size ring of buckets.
//!
//! A [Window] is plain storage. A policy decides which bucket receives each value and when
//! buckets are cleared:
//! - [PointPolicy] keeps the last N values appended.
//! - [TimePolicy] keeps the values appended during the last N bucket durations.
//!
//! Expiry is lazy: stale buckets are only cleared when the policy is used.
//! The [reduce] module provides sum, average, min and max over a window.

pub use clock::{Clock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use point::PointPolicy;
pub use time::TimePolicy;
pub use window::Window;

mod clock;
mod config;
mod error;
mod point;
pub mod reduce;
mod time;
mod window;

/// A strategy for populating a [Window] with values.
///
/// Every operation holds the policy's lock for its whole duration. The lock is not reentrant,
/// so a reduction function must not call back into the same policy.
pub trait Policy {
    type Value;

    /// Adds a value to the window.
    fn append(&self, value: Self::Value);

    /// Reduces the window to a single value using a reduction function.
    fn reduce<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Window<Self::Value>) -> R;

    /// The number of values in the window.
    fn count(&self) -> usize;
}
