//! Mock PWM channel

use core::convert::Infallible;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

/// PWM channel that remembers the last duty cycle
#[derive(Debug, Clone, Copy)]
pub struct MockPwm {
    max_duty: u16,
    duty: u16,
}

impl MockPwm {
    /// Create a channel with the given full-scale duty value
    pub fn new(max_duty: u16) -> Self {
        Self { max_duty, duty: 0 }
    }

    /// Last duty cycle written
    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        self.max_duty
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty = duty.min(self.max_duty);
        Ok(())
    }
}
