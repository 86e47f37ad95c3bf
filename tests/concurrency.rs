use std::sync::Arc;
use std::thread;
use std::time::{Duration, UNIX_EPOCH};

use rolling_window::{reduce, Policy, PointPolicy, TimePolicy, Window};

const THREADS: u64 = 4;
const PER_THREAD: u64 = 250;

#[test]
fn point_policy_serializes_appends() {
    let policy = Arc::new(PointPolicy::new(Window::new((THREADS * PER_THREAD) as usize)));

    let handles: Vec<_> = (0..THREADS)
        .map(|thread| {
            let policy = Arc::clone(&policy);
            thread::spawn(move || {
                for x in 0..PER_THREAD {
                    policy.append(thread * PER_THREAD + x + 1);
                    policy.reduce(reduce::max);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let total = THREADS * PER_THREAD;

    // Every slot was written exactly once.
    assert_eq!(policy.count(), total as usize);
    assert_eq!(policy.reduce(reduce::sum), total * (total + 1) / 2);
    assert_eq!(policy.reduce(reduce::min), 1);
}

#[test]
fn time_policy_serializes_appends() {
    let now = UNIX_EPOCH + Duration::from_secs(10_000);
    let policy = Arc::new(
        TimePolicy::with_clock(Window::new(8), Duration::from_secs(1), move || now).unwrap(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let policy = Arc::clone(&policy);
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    policy.append(1u64);
                    policy.count();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(policy.count(), (THREADS * PER_THREAD) as usize);
    assert_eq!(policy.reduce(reduce::sum), THREADS * PER_THREAD);
}
