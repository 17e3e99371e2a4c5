//! Climate sensor drivers

pub mod dht11;

pub use dht11::{read_sensor, Dht11};
