//! Driver traits and the data they exchange
//!
//! These traits define the interface between block-level callers and
//! the protocol drivers in `bitz-drivers`.

pub mod display;
pub mod ranging;
pub mod sensor;

pub use display::{
    CharacterDisplay, CharacterDisplayExt, CursorPosition, DisplayError, DisplaySession,
    RegisterSelect,
};
pub use ranging::{RangeFinder, RangeReading, RangerSelector, NO_ECHO_CM};
pub use sensor::{ClimateReading, ClimateSensor, Quantity, SensorError, SensorFrame};
