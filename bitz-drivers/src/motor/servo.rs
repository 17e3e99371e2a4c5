//! Hobby servo outputs
//!
//! Servos take a 50 Hz pulse train; the pulse width sets the angle, from
//! 500 µs at 0° to 2500 µs at 180°. Channel S1 is wired to P6, S2 to P7.

use embedded_hal::pwm::SetDutyCycle;

/// Servo frame period (µs)
pub const PERIOD_US: u32 = 20_000;
/// Pulse width at 0° (µs)
pub const MIN_PULSE_US: u32 = 500;
/// Pulse width span over 180° (µs)
pub const PULSE_SPAN_US: u32 = 2_000;

/// Servo socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoChannel {
    S1,
    S2,
}

impl ServoChannel {
    /// Board pin number
    pub fn pin(self) -> u8 {
        match self {
            ServoChannel::S1 => 6,
            ServoChannel::S2 => 7,
        }
    }
}

/// Pulse width for an angle in degrees, clamped to 0-180
pub fn pulse_width_us(angle: u8) -> u32 {
    angle.min(180) as u32 * PULSE_SPAN_US / 180 + MIN_PULSE_US
}

/// Both servo outputs
///
/// Channels must run at the 20 ms servo frame.
pub struct ServoBank<P> {
    s1: P,
    s2: P,
}

impl<P: SetDutyCycle> ServoBank<P> {
    pub fn new(s1: P, s2: P) -> Self {
        Self { s1, s2 }
    }

    /// Move a servo to `angle` degrees
    pub fn set_angle(&mut self, channel: ServoChannel, angle: u8) -> Result<(), P::Error> {
        let pwm = match channel {
            ServoChannel::S1 => &mut self.s1,
            ServoChannel::S2 => &mut self.s2,
        };
        // Both values fit u16 since the pulse never exceeds 2500 µs
        pwm.set_duty_cycle_fraction(pulse_width_us(angle) as u16, PERIOD_US as u16)
    }

    pub fn release(self) -> (P, P) {
        (self.s1, self.s2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitz_hal::mock::MockPwm;

    #[test]
    fn test_pulse_width() {
        assert_eq!(pulse_width_us(0), 500);
        assert_eq!(pulse_width_us(90), 1500);
        assert_eq!(pulse_width_us(180), 2500);
        assert_eq!(pulse_width_us(255), 2500);
    }

    #[test]
    fn test_set_angle() {
        let mut servos = ServoBank::new(MockPwm::new(20_000), MockPwm::new(20_000));

        servos.set_angle(ServoChannel::S2, 90).unwrap();
        let (s1, s2) = servos.release();
        assert_eq!(s1.duty(), 0);
        assert_eq!(s2.duty(), 1500);
    }

    #[test]
    fn test_channel_pins() {
        assert_eq!(ServoChannel::S1.pin(), 6);
        assert_eq!(ServoChannel::S2.pin(), 7);
    }
}
