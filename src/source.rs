//! Monotonic value sources consumed by the generators.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time;

use crate::Error;

/// A counter that hands out increasing values, such as a database sequence.
///
/// Each call to [`next_value`](CounterSource::next_value) advances the counter irreversibly, so a
/// value consumed by a failed generation is lost. Closures returning `i64` implement this trait,
/// which makes it straightforward to wrap an external sequence:
///
/// ```rust
/// use std::sync::atomic::{AtomicI64, Ordering};
/// use sequential_uuids::CounterSource;
///
/// let last = AtomicI64::new(41);
/// let counter = || last.fetch_add(1, Ordering::Relaxed) + 1;
/// assert_eq!(counter.next_value(), 42);
/// ```
pub trait CounterSource {
    /// Advances the counter and returns the new value.
    fn next_value(&self) -> i64;
}

impl<F: Fn() -> i64> CounterSource for F {
    fn next_value(&self) -> i64 {
        self()
    }
}

/// An in-process counter that behaves like a freshly created database sequence.
///
/// Unlike a database sequence, which fails once it reaches its maximum, this counter wraps around
/// from `i64::MAX` to `i64::MIN`. Generators accept any `i64`, so identifiers stay valid across
/// the wrap; only the prefix jumps to another block.
///
/// # Examples
///
/// ```rust
/// use sequential_uuids::{CounterSource, Sequence};
///
/// let seq = Sequence::new();
/// assert_eq!(seq.next_value(), 1);
/// assert_eq!(seq.next_value(), 2);
/// ```
#[derive(Debug)]
pub struct Sequence {
    next: AtomicI64,
}

impl Sequence {
    /// Creates a sequence whose first value is `1`.
    pub const fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates a sequence whose first value is `start`.
    pub const fn starting_at(start: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
        }
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterSource for Sequence {
    fn next_value(&self) -> i64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

/// A source of the current time in whole seconds since the Unix epoch.
pub trait ClockSource {
    /// Returns the current Unix time in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ClockUnavailable`] if the time cannot be read.
    fn now_in_whole_seconds(&self) -> Result<i64, Error>;
}

/// The system real-time clock.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now_in_whole_seconds(&self) -> Result<i64, Error> {
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .ok()
            .and_then(|elapsed| i64::try_from(elapsed.as_secs()).ok())
            .ok_or(Error::ClockUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockSource, CounterSource, Sequence, SystemClock};

    /// Hands out consecutive values from the start
    #[test]
    fn hands_out_consecutive_values_from_the_start() {
        let seq = Sequence::default();
        assert_eq!((0..5).map(|_| seq.next_value()).collect::<Vec<_>>(), [1, 2, 3, 4, 5]);

        let seq = Sequence::starting_at(-2);
        assert_eq!((0..5).map(|_| seq.next_value()).collect::<Vec<_>>(), [-2, -1, 0, 1, 2]);
    }

    /// Wraps around to minimum after maximum
    #[test]
    fn wraps_around_to_minimum_after_maximum() {
        let seq = Sequence::starting_at(i64::MAX - 1);
        assert_eq!(seq.next_value(), i64::MAX - 1);
        assert_eq!(seq.next_value(), i64::MAX);
        assert_eq!(seq.next_value(), i64::MIN);
        assert_eq!(seq.next_value(), i64::MIN + 1);
    }

    /// Hands out no duplicate values under multithreading
    #[test]
    fn hands_out_no_duplicate_values_under_multithreading() {
        use std::{collections::HashSet, sync::mpsc, thread};

        let seq = Sequence::new();
        let (tx, rx) = mpsc::channel();
        thread::scope(|s| {
            for _ in 0..4 {
                let tx = tx.clone();
                let seq = &seq;
                s.spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(seq.next_value()).unwrap();
                    }
                });
            }
        });
        drop(tx);

        let s: HashSet<i64> = rx.iter().collect();
        assert_eq!(s.len(), 4 * 10_000);
        assert_eq!(s.iter().min(), Some(&1));
        assert_eq!(s.iter().max(), Some(&(4 * 10_000)));
    }

    /// Reads plausible system time
    #[test]
    fn reads_plausible_system_time() {
        let secs = SystemClock.now_in_whole_seconds().unwrap();
        // 2020-01-01T00:00:00Z
        assert!(secs > 1_577_836_800);
    }
}
