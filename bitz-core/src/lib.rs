//! Board-agnostic core types for the Bit-Z peripheral drivers
//!
//! This crate contains everything that does not touch a pin or a bus:
//!
//! - Error taxonomy shared by all drivers
//! - Sensor frame, range reading and display session data model
//! - Driver traits (climate sensor, range finder, character display)
//! - Configuration types (protocol timing, pin routing, display setup)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod traits;

pub use error::Error;
pub use traits::{
    CharacterDisplay, CharacterDisplayExt, ClimateReading, ClimateSensor, CursorPosition,
    DisplayError, DisplaySession, Quantity, RangeFinder, RangeReading, RangerSelector,
    RegisterSelect, SensorError, SensorFrame, NO_ECHO_CM,
};
