//! Mock analog input

use core::convert::Infallible;

use crate::adc::AnalogInput;

/// Analog channel returning a fixed raw value
#[derive(Debug, Clone, Copy)]
pub struct MockAdc(pub u16);

impl AnalogInput for MockAdc {
    type Error = Infallible;

    const FULL_SCALE: u16 = 1023;

    fn read_raw(&mut self) -> Result<u16, Self::Error> {
        Ok(self.0.min(Self::FULL_SCALE))
    }
}
