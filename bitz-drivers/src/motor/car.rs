//! Two-motor car base
//!
//! Two DC motors on an H-bridge, driven by four PWM channels (P12-P15 on
//! the board). Direction is chosen by which channel of each motor's pair
//! carries the duty:
//!
//! | Direction | P12 | P13 | P14 | P15 |
//! |-----------|-----|-----|-----|-----|
//! | Forward   | v   | 0   | 0   | v   |
//! | Backward  | 0   | v   | v   | 0   |
//! | Left      | 0   | v   | 0   | v   |
//! | Right     | v   | 0   | v   | 0   |
//! | Stop      | 0   | 0   | 0   | 0   |

use embedded_hal::pwm::SetDutyCycle;

/// Full-scale duty of the 10-bit motor PWM
pub const DUTY_FULL_SCALE: u16 = 1023;

/// Car motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CarDirection {
    Forward,
    Backward,
    Left,
    Right,
    #[default]
    Stop,
}

impl CarDirection {
    /// Duty per channel (P12..P15) for a speed in percent
    ///
    /// Speeds above 100 are treated as 100.
    pub fn pattern(self, speed: u8) -> [u16; 4] {
        let v = scale_speed(speed);
        match self {
            CarDirection::Forward => [v, 0, 0, v],
            CarDirection::Backward => [0, v, v, 0],
            CarDirection::Left => [0, v, 0, v],
            CarDirection::Right => [v, 0, v, 0],
            CarDirection::Stop => [0; 4],
        }
    }
}

/// Map 0-100 % onto 0-1023
fn scale_speed(speed: u8) -> u16 {
    (speed.min(100) as u32 * DUTY_FULL_SCALE as u32 / 100) as u16
}

/// Car driver over four PWM channels
pub struct Car<P> {
    channels: [P; 4],
    direction: CarDirection,
    speed: u8,
}

impl<P: SetDutyCycle> Car<P> {
    /// Create a car; motors are not touched until the first command
    pub fn new(channels: [P; 4]) -> Self {
        Self {
            channels,
            direction: CarDirection::Stop,
            speed: 0,
        }
    }

    /// Drive in a direction at a speed in percent
    pub fn drive(&mut self, direction: CarDirection, speed: u8) -> Result<(), P::Error> {
        for (channel, duty) in self.channels.iter_mut().zip(direction.pattern(speed)) {
            channel.set_duty_cycle_fraction(duty, DUTY_FULL_SCALE)?;
        }
        self.direction = direction;
        self.speed = speed.min(100);
        Ok(())
    }

    /// Stop both motors
    pub fn stop(&mut self) -> Result<(), P::Error> {
        self.drive(CarDirection::Stop, 0)
    }

    /// Last commanded direction
    pub fn direction(&self) -> CarDirection {
        self.direction
    }

    /// Last commanded speed (%)
    pub fn speed(&self) -> u8 {
        self.speed
    }

    pub fn release(self) -> [P; 4] {
        self.channels
    }
}
