//! Adapters from `embedded-hal` 1.0 to the Bit-Z traits
//!
//! Chip HALs expose infallible GPIO (`Error = Infallible`), which is the
//! only kind accepted here; the protocol drivers have no way to recover
//! from a pin that cannot be sampled.
//!
//! ```ignore
//! let data = Flex::new(p.PIN_0); // any open-drain capable pin
//! let line = OpenDrainLine::new(data, EmbassyClock);
//! let mut dht = Dht11::new(line, EmbassyClock, SensorTiming::default());
//! ```

use core::convert::Infallible;

use embedded_hal::digital::{self, ErrorType};
use embedded_hal::i2c;

use crate::clock::MicrosClock;
use crate::gpio::{
    poll_for_level, Direction, FlexPin, InputPin, Level, OutputPin, Pull, WaitForLevel,
    WaitTimeout,
};
use crate::i2c::I2cBus;

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Borrowed `embedded-hal` input viewed as a Bit-Z [`InputPin`]
struct Sampler<'a, P>(&'a mut P);

impl<P> InputPin for Sampler<'_, P>
where
    P: digital::InputPin + ErrorType<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        infallible(self.0.is_high())
    }
}

/// Push-pull output line (trigger, mode select)
pub struct OutputLine<P> {
    pin: P,
}

impl<P> OutputLine<P>
where
    P: digital::OutputPin + ErrorType<Error = Infallible>,
{
    /// Wrap an output pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for OutputLine<P>
where
    P: digital::OutputPin + ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        infallible(self.pin.set_high())
    }

    fn set_low(&mut self) {
        infallible(self.pin.set_low())
    }
}

/// Input line with clock-bounded waits (echo)
pub struct InputLine<P, C> {
    pin: P,
    clock: C,
}

impl<P, C> InputLine<P, C>
where
    P: digital::InputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    /// Wrap an input pin; `clock` bounds the level waits
    pub fn new(pin: P, clock: C) -> Self {
        Self { pin, clock }
    }

    /// Release the wrapped pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

impl<P, C> InputPin for InputLine<P, C>
where
    P: digital::InputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    fn is_high(&mut self) -> bool {
        infallible(self.pin.is_high())
    }
}

impl<P, C> WaitForLevel for InputLine<P, C>
where
    P: digital::InputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    fn wait_for_level(&mut self, level: Level, timeout_us: u32) -> Result<u32, WaitTimeout> {
        poll_for_level(&mut Sampler(&mut self.pin), &self.clock, level, timeout_us)
    }
}

/// Open-drain line usable in both directions (single-wire data)
///
/// `set_high` only releases the line, so it is unsuitable for outputs
/// without a pull-up such as a range finder trigger. "Input" means the line is released high and the external (or
/// board-level) pull-up holds it; the device is then free to pull it low.
/// [`FlexPin::set_pull`] is recorded but cannot change the hardware bias
/// through `embedded-hal`, so the pull-up must be fitted on the board.
pub struct OpenDrainLine<P, C> {
    pin: P,
    clock: C,
    direction: Direction,
    pull: Pull,
}

impl<P, C> OpenDrainLine<P, C>
where
    P: digital::InputPin + digital::OutputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    /// Wrap an open-drain pin; the line starts released
    pub fn new(mut pin: P, clock: C) -> Self {
        infallible(pin.set_high());
        Self {
            pin,
            clock,
            direction: Direction::Input,
            pull: Pull::None,
        }
    }

    /// Current direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Last requested bias
    pub fn pull(&self) -> Pull {
        self.pull
    }

    /// Release the wrapped pin and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }
}

impl<P, C> OutputPin for OpenDrainLine<P, C>
where
    P: digital::InputPin + digital::OutputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    fn set_high(&mut self) {
        infallible(self.pin.set_high())
    }

    fn set_low(&mut self) {
        // Driving low only makes sense as an output; as an input the
        // device owns the line
        if self.direction == Direction::Output {
            infallible(self.pin.set_low())
        }
    }
}

impl<P, C> InputPin for OpenDrainLine<P, C>
where
    P: digital::InputPin + digital::OutputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    fn is_high(&mut self) -> bool {
        infallible(self.pin.is_high())
    }
}

impl<P, C> WaitForLevel for OpenDrainLine<P, C>
where
    P: digital::InputPin + digital::OutputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    fn wait_for_level(&mut self, level: Level, timeout_us: u32) -> Result<u32, WaitTimeout> {
        poll_for_level(&mut Sampler(&mut self.pin), &self.clock, level, timeout_us)
    }
}

impl<P, C> FlexPin for OpenDrainLine<P, C>
where
    P: digital::InputPin + digital::OutputPin + ErrorType<Error = Infallible>,
    C: MicrosClock,
{
    fn set_direction(&mut self, direction: Direction) {
        if direction == Direction::Input {
            infallible(self.pin.set_high());
        }
        self.direction = direction;
    }

    fn set_pull(&mut self, pull: Pull) {
        self.pull = pull;
    }
}

/// `embedded-hal` I2C master viewed as an [`I2cBus`]
pub struct HalI2c<I> {
    i2c: I,
}

impl<I: i2c::I2c> HalI2c<I> {
    /// Wrap a blocking I2C master
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the wrapped bus
    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: i2c::I2c> I2cBus for HalI2c<I> {
    type Error = I::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, write_data, read_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockClock, SimTime};

    /// Open-drain pin model: reads low if either side pulls low
    struct WiredAnd {
        released: bool,
        device_low: bool,
    }

    impl ErrorType for WiredAnd {
        type Error = Infallible;
    }

    impl digital::OutputPin for WiredAnd {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.released = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.released = true;
            Ok(())
        }
    }

    impl digital::InputPin for WiredAnd {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.released && !self.device_low)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!(self.released && !self.device_low))
        }
    }

    #[test]
    fn test_open_drain_release_on_input() {
        let time = SimTime::new();
        let pin = WiredAnd {
            released: false,
            device_low: false,
        };
        let mut line = OpenDrainLine::new(pin, MockClock::new(&time));
        assert!(line.is_high());

        line.set_direction(Direction::Output);
        line.set_low();
        assert!(line.is_low());

        line.set_direction(Direction::Input);
        assert!(line.is_high());
        assert_eq!(line.direction(), Direction::Input);
    }

    #[test]
    fn test_open_drain_ignores_low_while_input() {
        let time = SimTime::new();
        let pin = WiredAnd {
            released: true,
            device_low: false,
        };
        let mut line = OpenDrainLine::new(pin, MockClock::new(&time));

        line.set_low();
        assert!(line.is_high());
    }

    #[test]
    fn test_wait_is_bounded_by_clock() {
        let time = SimTime::new();
        let pin = WiredAnd {
            released: true,
            device_low: true,
        };
        let mut line = InputLine::new(pin, MockClock::new(&time));

        // Simulated time never advances while polling, so only a zero
        // timeout can expire here
        assert_eq!(line.wait_for_level(Level::Low, 0), Ok(0));
        let err = line.wait_for_level(Level::High, 0).unwrap_err();
        assert_eq!(err.level, Level::High);
    }

    #[test]
    fn test_set_pull_is_recorded() {
        let time = SimTime::new();
        let pin = WiredAnd {
            released: true,
            device_low: false,
        };
        let mut line = OpenDrainLine::new(pin, MockClock::new(&time));

        line.set_pull(Pull::Up);
        assert_eq!(line.pull(), Pull::Up);
    }
}
