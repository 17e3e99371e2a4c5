//! Simulated time base and clock

use std::cell::Cell;
use std::rc::Rc;

use crate::clock::MicrosClock;

/// Shared simulated microsecond counter
///
/// Clones share the same counter, so a clock and any number of scripted
/// lines observe one timeline.
#[derive(Debug, Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    /// Create a time base starting at 0 µs
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time
    pub fn now(&self) -> u64 {
        self.0.get()
    }

    /// Move time forward
    pub fn advance(&self, us: u64) {
        self.0.set(self.0.get().saturating_add(us));
    }

    /// Jump to an absolute time (never backwards)
    pub fn advance_to(&self, at_us: u64) {
        if at_us > self.0.get() {
            self.0.set(at_us);
        }
    }
}

/// Mock clock
///
/// Delays advance the shared time base instantly.
#[derive(Debug, Clone)]
pub struct MockClock {
    time: SimTime,
}

impl MockClock {
    /// Create a clock on the given time base
    pub fn new(time: &SimTime) -> Self {
        Self { time: time.clone() }
    }
}

impl MicrosClock for MockClock {
    fn now_us(&self) -> u64 {
        self.time.now()
    }

    fn delay_us(&mut self, us: u32) {
        self.time.advance(us as u64);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time.advance(ms as u64 * 1_000);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_time_base() {
        let time = SimTime::new();
        let mut a = MockClock::new(&time);
        let b = MockClock::new(&time);

        a.delay_us(1_000);
        assert_eq!(b.now_us(), 1_000);

        time.advance_to(500);
        assert_eq!(b.now_us(), 1_000);

        time.advance_to(2_000);
        assert_eq!(a.now_us(), 2_000);
    }
}
