//! Peripheral driver implementations
//!
//! This crate provides the protocol drivers behind the Bit-Z blocks,
//! implementing the traits from `bitz-core` over the `bitz-hal` leaf
//! abstractions:
//!
//! - Single-wire temperature/humidity sensor (DHT11)
//! - Echo ranging (HC-SR04), with selector-based pin routing
//! - Character LCD (HD44780) behind a PCF8574 I2C backpack
//! - Pin passthroughs and actuator tables (car motors, servos)
//!
//! Every protocol runs to completion on the calling thread with busy-wait
//! timing, and every wait is bounded.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod display;
pub mod io;
pub mod motor;
pub mod pins;
pub mod ranging;
pub mod sensor;

pub use display::{DisplayState, Lcd1602};
pub use io::{read_analog_sensor, read_digital_sensor};
pub use pins::PinBank;
pub use ranging::{measure_distance_cm, Hcsr04, RoutedRanger};
pub use sensor::{read_sensor, Dht11};
