//! Range finder trait and reading model

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Distance reported when no echo came back
///
/// Infinity never compares below a threshold, so "no echo" reads as
/// "no obstacle" to any `distance < threshold` check, and it can never be
/// mistaken for the 0 cm a naive pulse-width conversion would produce.
pub const NO_ECHO_CM: f64 = f64::INFINITY;

/// Result of one ranging cycle
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeReading {
    /// An echo was timed
    Measured {
        /// Distance in cm, at most the sensor's rated range
        cm: f64,
        /// The raw distance exceeded the rated range and was capped
        clamped: bool,
    },
    /// No echo pulse within the timeout
    NoEcho,
}

impl RangeReading {
    /// Distance in cm, or [`NO_ECHO_CM`]
    pub fn as_cm(&self) -> f64 {
        match self {
            RangeReading::Measured { cm, .. } => *cm,
            RangeReading::NoEcho => NO_ECHO_CM,
        }
    }

    /// Whether an echo was received
    pub fn has_echo(&self) -> bool {
        matches!(self, RangeReading::Measured { .. })
    }

    /// Whether something was detected nearer than `threshold_cm`
    pub fn is_closer_than(&self, threshold_cm: f64) -> bool {
        match self {
            RangeReading::Measured { cm, .. } => *cm < threshold_cm,
            RangeReading::NoEcho => false,
        }
    }
}

/// Fixed trigger/echo pairings selectable on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RangerSelector {
    /// Front socket (shares its connector with a mode-select line)
    #[default]
    Front,
    /// Left socket
    Left,
    /// Right socket
    Right,
}

impl RangerSelector {
    /// All selectors, in table order
    pub const ALL: [RangerSelector; 3] = [
        RangerSelector::Front,
        RangerSelector::Left,
        RangerSelector::Right,
    ];
}

/// Trait for echo-ranging sensors
pub trait RangeFinder {
    /// Run one trigger/echo cycle
    fn measure(&mut self) -> RangeReading;

    /// Distance in cm, [`NO_ECHO_CM`] when nothing answered
    fn distance_cm(&mut self) -> f64 {
        self.measure().as_cm()
    }

    /// Whether an obstacle is nearer than `threshold_cm`
    fn is_obstacle(&mut self, threshold_cm: f64) -> bool {
        self.measure().is_closer_than(threshold_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_echo_is_never_an_obstacle() {
        let reading = RangeReading::NoEcho;
        assert!(!reading.is_closer_than(30.0));
        assert!(!reading.is_closer_than(f64::MAX));
        assert!(!(reading.as_cm() < 30.0));
    }

    #[test]
    fn test_measured_threshold() {
        let near = RangeReading::Measured {
            cm: 12.5,
            clamped: false,
        };
        assert!(near.is_closer_than(30.0));
        assert!(!near.is_closer_than(12.5));

        let far = RangeReading::Measured {
            cm: 400.0,
            clamped: true,
        };
        assert!(!far.is_closer_than(30.0));
        assert!(far.has_echo());
    }

    #[test]
    fn test_selector_table_order() {
        assert_eq!(RangerSelector::ALL[0], RangerSelector::default());
        assert_eq!(RangerSelector::ALL.len(), 3);
    }
}
