use std::time::Duration;

pub type Result<T> = std::result::Result<T, Error>;

/// Invalid configurations rejected when constructing a policy.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The window has no buckets, so no offset can ever be selected.
    #[error("window must have at least one bucket")]
    NoBuckets,
    /// The time quantum of a time policy is zero.
    #[error("bucket duration must be greater than 0, given {0:?}")]
    ZeroBucketDuration(Duration),
}
