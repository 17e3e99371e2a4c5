//! Protocol timing configuration
//!
//! Defaults are the DHT11 and HC-SR04 datasheet figures with margin.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Single-wire sensor timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SensorTiming {
    /// Host start signal: line held low (ms)
    pub start_low_ms: u32,
    /// Line released high before switching to input (µs)
    pub release_us: u32,
    /// Time allowed for the sensor to pull the line low (µs)
    pub response_timeout_us: u32,
    /// Ceiling on each 80 µs handshake phase (µs)
    pub handshake_timeout_us: u32,
    /// Ceiling on each edge wait inside the frame (µs)
    pub bit_timeout_us: u32,
    /// High pulses longer than this decode as `1` (µs)
    ///
    /// A `0` is ~26-28 µs high and a `1` ~70 µs.
    pub one_threshold_us: u32,
}

impl Default for SensorTiming {
    fn default() -> Self {
        Self {
            start_low_ms: 18,
            release_us: 40,
            response_timeout_us: 200,
            handshake_timeout_us: 200,
            bit_timeout_us: 150,
            one_threshold_us: 40,
        }
    }
}

impl SensorTiming {
    /// Worst-case duration of one read, start signal included (µs)
    pub fn worst_case_us(&self) -> u64 {
        self.start_low_ms as u64 * 1_000
            + self.release_us as u64
            + self.response_timeout_us as u64
            + 2 * self.handshake_timeout_us as u64
            + 2 * 40 * self.bit_timeout_us as u64
    }
}

/// Echo-ranging configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RangerConfig {
    /// Trigger line held low before the pulse (µs)
    pub settle_us: u32,
    /// Trigger pulse width (µs)
    pub trigger_us: u32,
    /// Ceiling on waiting for the echo to start, and on its width (µs)
    pub echo_timeout_us: u32,
    /// Rated maximum range; longer readings are capped (cm)
    pub max_range_cm: f64,
    /// Speed of sound (cm/µs); halved for the round trip
    pub sound_cm_per_us: f64,
}

impl Default for RangerConfig {
    fn default() -> Self {
        Self {
            settle_us: 2,
            trigger_us: 10,
            echo_timeout_us: 23_000,
            max_range_cm: 400.0,
            sound_cm_per_us: 0.034,
        }
    }
}

impl RangerConfig {
    /// Convert an echo pulse width to a one-way distance (uncapped)
    pub fn pulse_to_cm(&self, pulse_us: u32) -> f64 {
        pulse_us as f64 * self.sound_cm_per_us / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sensor_defaults_fit_bit_widths() {
        let timing = SensorTiming::default();
        assert!(timing.one_threshold_us > 28);
        assert!(timing.one_threshold_us < 70);
        assert!(timing.bit_timeout_us > 70);
    }

    #[test]
    fn test_worst_case_is_bounded() {
        let timing = SensorTiming::default();
        // Start signal plus every wait hitting its ceiling stays well under 50 ms
        assert!(timing.worst_case_us() < 50_000);
        assert!(timing.worst_case_us() > 18_000);
    }

    #[test]
    fn test_pulse_to_cm() {
        let config = RangerConfig::default();
        assert!((config.pulse_to_cm(1_000) - 17.0).abs() < 1e-9);
        assert_eq!(config.pulse_to_cm(0), 0.0);
    }
}
