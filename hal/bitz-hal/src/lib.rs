//! Bit-Z Hardware Abstraction Layer
//!
//! This crate defines the leaf abstractions the protocol drivers are
//! written against: a single digital line, a microsecond clock, an I2C
//! master and an analog input. Chip support comes either from the
//! [`adapters`] over `embedded-hal` 1.0 or from a board crate
//! implementing the traits directly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  bitz-drivers (DHT11, HC-SR04, LCD1602) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bitz-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ embedded-hal  │       │  mock (host   │
//! │   adapters    │       │    tests)     │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::WaitForLevel`],
//!   [`gpio::FlexPin`] - Digital lines
//! - [`clock::MicrosClock`] - Monotonic microsecond time and busy-wait delays
//! - [`i2c::I2cBus`] - I2C bus operations
//! - [`adc::AnalogInput`] - Raw analog conversions

#![cfg_attr(not(any(test, feature = "mock")), no_std)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod adc;
pub mod clock;
#[cfg(feature = "embassy-time")]
pub mod embassy;
pub mod gpio;
pub mod i2c;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use clock::MicrosClock;
pub use gpio::{Direction, FlexPin, InputPin, Level, OutputPin, Pull, WaitForLevel, WaitTimeout};
pub use i2c::I2cBus;
