//! Simulated hardware for testing
//!
//! This module provides mock implementations of the HAL traits that run
//! against a shared simulated time base, so bit-banged protocols can be
//! exercised on the host with exact microsecond timing.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds of this crate (`#[cfg(test)]`)
//! - When the `mock` feature is enabled (driver crates enable it as a
//!   dev-dependency)
//!
//! # Example
//!
//! ```ignore
//! use bitz_hal::mock::{MockClock, ScriptedLine, SimTime};
//! use bitz_hal::{Level, MicrosClock, WaitForLevel};
//!
//! let time = SimTime::new();
//! let mut clock = MockClock::new(&time);
//! let mut echo = ScriptedLine::input(&time, &[(Level::Low, 100), (Level::High, 580)]);
//!
//! assert_eq!(echo.wait_for_level(Level::High, 1_000), Ok(100));
//! assert_eq!(echo.wait_for_level(Level::Low, 1_000), Ok(580));
//! clock.delay_us(20);
//! assert_eq!(clock.now_us(), 700);
//! ```

mod adc;
mod clock;
mod gpio;
mod i2c;
mod pwm;

pub use adc::MockAdc;
pub use clock::{MockClock, SimTime};
pub use gpio::ScriptedLine;
pub use i2c::{I2cTransaction, MockI2c, MockI2cError};
pub use pwm::MockPwm;
