//! GPIO line abstractions
//!
//! Provides traits for a single physical pin: driving a level, reading a
//! level, switching direction/pull at runtime (single-wire sensors share
//! one line in both directions) and a bounded wait for a level.

use crate::clock::MicrosClock;

/// Logic level on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// The opposite level
    pub fn inverted(self) -> Self {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }

    /// Level as the 0/1 value block code expects
    pub fn as_u8(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Line direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Internal bias resistor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    #[default]
    None,
    Up,
    Down,
}

/// A bounded wait expired before the line reached the requested level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitTimeout {
    /// Level that was being waited for
    pub level: Level,
    /// Microseconds spent waiting
    pub waited_us: u32,
}

/// Digital output line
pub trait OutputPin {
    /// Drive the line high (logic 1)
    fn set_high(&mut self);

    /// Drive the line low (logic 0)
    fn set_low(&mut self);

    /// Drive the line to a specific level
    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.set_high(),
            Level::Low => self.set_low(),
        }
    }
}

/// Digital input line
///
/// Reads take `&mut self` because most chip HALs (and `embedded-hal` 1.0)
/// need mutable access to sample a pin.
pub trait InputPin {
    /// Check if the line reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }

    /// Sample the line level
    fn level(&mut self) -> Level {
        Level::from(self.is_high())
    }
}

/// Input line with a bounded wait for a level
///
/// This is the pulse-capture primitive every protocol here is built on.
/// There is deliberately no unbounded variant.
pub trait WaitForLevel: InputPin {
    /// Block until the line reads `level` or `timeout_us` elapses
    ///
    /// Returns the microseconds spent waiting. If the line already reads
    /// `level` this returns immediately with 0.
    fn wait_for_level(&mut self, level: Level, timeout_us: u32) -> Result<u32, WaitTimeout>;
}

/// Line whose direction and bias can be changed at runtime
pub trait FlexPin: OutputPin + WaitForLevel {
    /// Switch between input and output
    fn set_direction(&mut self, direction: Direction);

    /// Select the internal bias resistor
    fn set_pull(&mut self, pull: Pull);
}

/// Poll `pin` until it reads `level`, bounded by `timeout_us`
///
/// Reference implementation of [`WaitForLevel`] for lines that can only
/// be sampled. The clock is read between samples, so resolution is one
/// loop iteration (well under a microsecond on a 64 MHz core).
pub fn poll_for_level<P, C>(
    pin: &mut P,
    clock: &C,
    level: Level,
    timeout_us: u32,
) -> Result<u32, WaitTimeout>
where
    P: InputPin + ?Sized,
    C: MicrosClock + ?Sized,
{
    let start = clock.now_us();
    loop {
        let waited_us = clock.elapsed_since(start);
        if pin.level() == level {
            return Ok(waited_us);
        }
        if waited_us >= timeout_us {
            return Err(WaitTimeout { level, waited_us });
        }
    }
}

impl<T: OutputPin + ?Sized> OutputPin for &mut T {
    fn set_high(&mut self) {
        (**self).set_high()
    }

    fn set_low(&mut self) {
        (**self).set_low()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        (**self).is_high()
    }
}

impl<T: WaitForLevel + ?Sized> WaitForLevel for &mut T {
    fn wait_for_level(&mut self, level: Level, timeout_us: u32) -> Result<u32, WaitTimeout> {
        (**self).wait_for_level(level, timeout_us)
    }
}

impl<T: FlexPin + ?Sized> FlexPin for &mut T {
    fn set_direction(&mut self, direction: Direction) {
        (**self).set_direction(direction)
    }

    fn set_pull(&mut self, pull: Pull) {
        (**self).set_pull(pull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockClock, ScriptedLine, SimTime};

    /// Input that flips high after a fixed number of samples
    struct CountingPin {
        samples_until_high: u32,
    }

    impl InputPin for CountingPin {
        fn is_high(&mut self) -> bool {
            if self.samples_until_high == 0 {
                true
            } else {
                self.samples_until_high -= 1;
                false
            }
        }
    }

    /// Clock that advances one microsecond on every read
    struct TickingClock {
        now: core::cell::Cell<u64>,
    }

    impl MicrosClock for TickingClock {
        fn now_us(&self) -> u64 {
            let now = self.now.get();
            self.now.set(now + 1);
            now
        }

        fn delay_us(&mut self, us: u32) {
            self.now.set(self.now.get() + us as u64);
        }
    }

    #[test]
    fn test_level_conversions() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
        assert_eq!(Level::High.inverted(), Level::Low);
        assert_eq!(Level::Low.as_u8(), 0);
        assert_eq!(Level::High.as_u8(), 1);
    }

    #[test]
    fn test_poll_resolves() {
        let mut pin = CountingPin {
            samples_until_high: 5,
        };
        let clock = TickingClock {
            now: core::cell::Cell::new(0),
        };

        let waited = poll_for_level(&mut pin, &clock, Level::High, 100).unwrap();
        assert!(waited > 0);
        assert!(waited < 100);
    }

    #[test]
    fn test_poll_is_bounded() {
        let mut pin = CountingPin {
            samples_until_high: u32::MAX,
        };
        let clock = TickingClock {
            now: core::cell::Cell::new(0),
        };

        let err = poll_for_level(&mut pin, &clock, Level::High, 50).unwrap_err();
        assert_eq!(err.level, Level::High);
        assert!(err.waited_us >= 50);
    }

    #[test]
    fn test_poll_already_at_level() {
        let mut pin = CountingPin {
            samples_until_high: 0,
        };
        let clock = TickingClock {
            now: core::cell::Cell::new(0),
        };

        assert_eq!(poll_for_level(&mut pin, &clock, Level::High, 10), Ok(0));
    }

    #[test]
    fn test_borrowed_line_forwards() {
        let time = SimTime::new();
        let mut clock = MockClock::new(&time);
        let mut line = ScriptedLine::output(&time);

        {
            let borrowed = &mut line;
            borrowed.set_high();
            clock.delay_us(5);
            borrowed.set_level(Level::Low);
        }

        assert_eq!(line.driven(), &[(0, Level::High), (5, Level::Low)]);
    }
}
