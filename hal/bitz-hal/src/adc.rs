//! Analog input abstraction

/// Single analog channel
pub trait AnalogInput {
    /// Error type for conversions
    type Error;

    /// Full-scale raw value (1023 for a 10-bit converter)
    const FULL_SCALE: u16;

    /// Perform one conversion and return the raw value
    fn read_raw(&mut self) -> Result<u16, Self::Error>;
}
