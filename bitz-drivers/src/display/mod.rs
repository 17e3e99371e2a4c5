//! Character display drivers
//!
//! A 16x2 HD44780-compatible LCD driven in 4-bit mode through a PCF8574
//! I2C expander ("backpack").

pub mod backpack;
pub mod command;
pub mod lcd1602;
pub mod probe;

pub use backpack::Backpack;
pub use lcd1602::{DisplayState, Lcd1602};
pub use probe::{probe_address, PROBE_RANGES};
