//! Actuator drivers
//!
//! Both drivers write through `embedded_hal::pwm::SetDutyCycle`, so any
//! HAL PWM channel plugs in directly.

pub mod car;
pub mod servo;

pub use car::{Car, CarDirection};
pub use servo::{ServoBank, ServoChannel};
