//! Time source abstraction
//!
//! Periodic work such as the configuration validity check needs a clock, but
//! the core crate must stay free of any runtime. Platforms inject one through
//! [`TimeSource`].

use core::cell::Cell;

/// Monotonic millisecond clock
///
/// - `EmbassyTime` (root crate, `embassy` feature) on embedded targets
/// - [`MockTime`] for host tests
///
/// # Example
///
/// ```
/// use confdb_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// let started = time.now_ms();
/// time.advance_ms(250);
/// assert_eq!(time.elapsed_ms_since(started), 250);
/// ```
pub trait TimeSource {
    /// Milliseconds since system start
    fn now_ms(&self) -> u64;

    /// Milliseconds elapsed since `reference_ms`, saturating at zero
    fn elapsed_ms_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

/// Manually driven clock for tests
#[derive(Clone, Default)]
pub struct MockTime {
    current_ms: Cell<u64>,
}

impl MockTime {
    /// Clock starting at 0 ms
    pub fn new() -> Self {
        Self {
            current_ms: Cell::new(0),
        }
    }

    /// Clock starting at `ms`
    pub fn with_initial(ms: u64) -> Self {
        Self {
            current_ms: Cell::new(ms),
        }
    }

    /// Jump to an absolute time
    pub fn set_ms(&self, ms: u64) {
        self.current_ms.set(ms);
    }

    /// Move the clock forward
    pub fn advance_ms(&self, ms: u64) {
        self.current_ms.set(self.current_ms.get().saturating_add(ms));
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_ms.get()
    }
}

impl<T: TimeSource> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_time_starts_at_zero() {
        let time = MockTime::new();
        assert_eq!(time.now_ms(), 0);
    }

    #[test]
    fn test_mock_time_set_and_advance() {
        let time = MockTime::with_initial(1_000);
        time.advance_ms(500);
        assert_eq!(time.now_ms(), 1_500);

        time.set_ms(10);
        assert_eq!(time.now_ms(), 10);
    }

    #[test]
    fn test_elapsed_saturates() {
        let time = MockTime::with_initial(100);
        assert_eq!(time.elapsed_ms_since(40), 60);
        // Reference in the future
        assert_eq!(time.elapsed_ms_since(500), 0);
    }

    #[test]
    fn test_reference_impl() {
        let time = MockTime::with_initial(7);
        let by_ref = &time;
        assert_eq!(by_ref.now_ms(), 7);
    }
}
