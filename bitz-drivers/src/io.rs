//! Generic sensor passthroughs
//!
//! Plain digital and analog reads for sensors that need no protocol:
//! buttons, line followers, light and soil probes.

use bitz_hal::{AnalogInput, Direction, FlexPin, Pull};

/// Read a digital sensor: 1 for high, 0 for low
///
/// The line is switched to input with the pull-up enabled first, so an
/// open-collector sensor reads 1 when idle.
pub fn read_digital_sensor<P: FlexPin + ?Sized>(pin: &mut P) -> u8 {
    pin.set_direction(Direction::Input);
    pin.set_pull(Pull::Up);
    pin.level().as_u8()
}

/// Read an analog sensor as a raw ADC count (0..=`A::FULL_SCALE`)
pub fn read_analog_sensor<A: AnalogInput + ?Sized>(adc: &mut A) -> Result<u16, A::Error> {
    adc.read_raw()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitz_hal::mock::{MockAdc, ScriptedLine, SimTime};
    use bitz_hal::Level;

    #[test]
    fn test_digital_idle_reads_high() {
        let time = SimTime::new();
        let mut line = ScriptedLine::input(&time, &[]);

        assert_eq!(read_digital_sensor(&mut line), 1);
        assert_eq!(line.pull(), Pull::Up);
    }

    #[test]
    fn test_digital_driven_low() {
        let time = SimTime::new();
        let mut line = ScriptedLine::input(&time, &[(Level::Low, 100)]);
        assert_eq!(read_digital_sensor(&mut line), 0);
    }

    #[test]
    fn test_analog_raw() {
        assert_eq!(read_analog_sensor(&mut MockAdc(512)), Ok(512));
        assert_eq!(read_analog_sensor(&mut MockAdc(4000)), Ok(1023));
    }
}
