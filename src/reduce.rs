//! Reductions that fold every value of a [Window] into a single value.
//! Values are visited in bucket order, then in insertion order within a bucket.
//!
//! ## Example
//! ```rust
//! use rolling_window::{reduce, Policy, PointPolicy, Window};
//!
//! let policy = PointPolicy::new(Window::new(4));
//!
//! for value in [3.0, 1.0, 4.0, 2.0] {
//!     policy.append(value);
//! }
//!
//! assert_eq!(policy.reduce(reduce::sum), 10.0);
//! assert_eq!(policy.reduce(reduce::avg), 2.5);
//! assert_eq!(policy.reduce(reduce::min), 1.0);
//! assert_eq!(policy.reduce(reduce::max), 4.0);
//! ```

use num_traits::{Num, NumCast};

use crate::Window;

/// A numeric value that can be reduced: ordered, additive, with a zero value
/// and a conversion from a value count.
pub trait Sample: Num + NumCast + PartialOrd + Copy {}

impl<T> Sample for T where T: Num + NumCast + PartialOrd + Copy {}

/// The sum of all values. An empty window sums to zero.
pub fn sum<T: Sample>(window: &Window<T>) -> T {
    window.values().fold(T::zero(), |total, &value| total + value)
}

/// The arithmetic mean of all values.
///
/// ## Panic
/// An empty window divides by a count of zero: floating point types yield NaN while integer
/// types panic. Callers must check the policy's count first when the window may be empty.
/// Also panics when the number of values cannot be represented as `T`.
pub fn avg<T: Sample>(window: &Window<T>) -> T {
    let (total, count) = window
        .values()
        .fold((T::zero(), 0usize), |(total, count), &value| (total + value, count + 1));
    let divisor = <T as NumCast>::from(count)
        .unwrap_or_else(|| panic!("value count {count} is not representable by the sample type"));

    total / divisor
}

/// The smallest value. An empty window yields zero, which is not a meaningful minimum.
pub fn min<T: Sample>(window: &Window<T>) -> T {
    extremum(window, |value, current| value < current)
}

/// The largest value. An empty window yields zero, which is not a meaningful maximum.
pub fn max<T: Sample>(window: &Window<T>) -> T {
    extremum(window, |value, current| value > current)
}

fn extremum<T, F>(window: &Window<T>, replaces: F) -> T
where
    T: Sample,
    F: Fn(T, T) -> bool,
{
    window
        .values()
        .fold(None, |current, &value| match current {
            None => Some(value),
            Some(current) if replaces(value, current) => Some(value),
            current => current,
        })
        .unwrap_or_else(T::zero)
}
