use std::time::SystemTime;

/// A source of wall-clock time for a [TimePolicy](crate::TimePolicy).
pub trait Clock {
    /// The current time.
    fn now(&self) -> SystemTime;
}

/// The system's real-time clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

impl<F> Clock for F
where
    F: Fn() -> SystemTime,
{
    fn now(&self) -> SystemTime {
        self()
    }
}
