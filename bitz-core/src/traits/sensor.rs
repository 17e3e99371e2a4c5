//! Climate sensor trait and single-wire frame model

use core::fmt;

/// Errors that can occur reading a single-wire climate sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sensor did not answer the start signal
    NoResponse,
    /// Frame received but the checksum byte does not match
    Checksum {
        /// Checksum byte sent by the sensor
        received: u8,
        /// Checksum computed over the four data bytes
        computed: u8,
    },
    /// An edge inside the 40-bit frame never arrived
    Timeout,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::NoResponse => f.write_str("sensor did not respond"),
            SensorError::Checksum { received, computed } => write!(
                f,
                "checksum mismatch: received {:#04x}, computed {:#04x}",
                received, computed
            ),
            SensorError::Timeout => f.write_str("timed out mid-frame"),
        }
    }
}

/// Raw 40-bit frame: humidity int/dec, temperature int/dec, checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorFrame(pub [u8; 5]);

impl SensorFrame {
    /// Frame length in bits
    pub const BITS: usize = 40;

    /// Low byte of the sum of the four data bytes
    pub fn computed_checksum(&self) -> u8 {
        self.0[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
    }

    /// Checksum byte as transmitted
    pub fn received_checksum(&self) -> u8 {
        self.0[4]
    }

    /// Whether the checksum byte matches the data
    pub fn is_valid(&self) -> bool {
        self.computed_checksum() == self.received_checksum()
    }

    /// Integer part of relative humidity (%)
    pub fn humidity(&self) -> u8 {
        self.0[0]
    }

    /// Integer part of temperature (°C)
    pub fn temperature(&self) -> u8 {
        self.0[2]
    }

    /// Validate and extract the reading
    ///
    /// A frame with a bad checksum never yields a partial reading.
    pub fn reading(&self) -> Result<ClimateReading, SensorError> {
        if !self.is_valid() {
            return Err(SensorError::Checksum {
                received: self.received_checksum(),
                computed: self.computed_checksum(),
            });
        }
        Ok(ClimateReading {
            temperature: self.temperature(),
            humidity: self.humidity(),
        })
    }
}

/// Which value of a reading a caller wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Quantity {
    /// Temperature in °C
    Temperature,
    /// Relative humidity in %
    Humidity,
}

/// One validated measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClimateReading {
    /// Temperature in whole °C
    pub temperature: u8,
    /// Relative humidity in whole %
    pub humidity: u8,
}

impl ClimateReading {
    /// Pick one value out of the reading
    pub fn get(&self, quantity: Quantity) -> u8 {
        match quantity {
            Quantity::Temperature => self.temperature,
            Quantity::Humidity => self.humidity,
        }
    }
}

/// Trait for temperature/humidity sensors
pub trait ClimateSensor {
    /// Run one complete measurement
    ///
    /// Blocks the caller for the whole transaction (about 23 ms on a DHT11).
    fn read(&mut self) -> Result<ClimateReading, SensorError>;

    /// Measure and return a single quantity
    fn read_quantity(&mut self, quantity: Quantity) -> Result<u8, SensorError> {
        self.read().map(|r| r.get(quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_valid_frame() {
        let frame = SensorFrame([45, 0, 23, 0, 68]);
        assert!(frame.is_valid());
        assert_eq!(
            frame.reading(),
            Ok(ClimateReading {
                temperature: 23,
                humidity: 45
            })
        );
    }

    #[test]
    fn test_checksum_wraps() {
        let frame = SensorFrame([200, 100, 0, 0, 44]);
        assert_eq!(frame.computed_checksum(), 44);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_bad_checksum() {
        let frame = SensorFrame([45, 0, 23, 0, 69]);
        assert_eq!(
            frame.reading(),
            Err(SensorError::Checksum {
                received: 69,
                computed: 68
            })
        );
    }

    #[test]
    fn test_reading_get() {
        let reading = ClimateReading {
            temperature: 21,
            humidity: 60,
        };
        assert_eq!(reading.get(Quantity::Temperature), 21);
        assert_eq!(reading.get(Quantity::Humidity), 60);
    }

    proptest! {
        #[test]
        fn prop_checksum_decides_validity(data in any::<[u8; 4]>(), checksum in any::<u8>()) {
            let frame = SensorFrame([data[0], data[1], data[2], data[3], checksum]);
            let sum = data.iter().map(|b| *b as u32).sum::<u32>() & 0xFF;
            prop_assert_eq!(frame.is_valid(), checksum as u32 == sum);
            prop_assert_eq!(frame.reading().is_ok(), checksum as u32 == sum);
        }
    }
}
