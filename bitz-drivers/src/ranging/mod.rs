//! Echo-ranging drivers

pub mod hcsr04;
pub mod routed;

pub use hcsr04::{measure_distance_cm, Hcsr04};
pub use routed::{RoutedRanger, RoutingError};
