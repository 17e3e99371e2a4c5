//! Board wiring configuration
//!
//! Pin numbers are board GPIO numbers; the driver layer resolves them
//! through its pin bank.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::timing::{RangerConfig, SensorTiming};
use crate::traits::RangerSelector;

/// Lowest valid 7-bit I2C device address (0x00-0x07 are reserved)
pub const MIN_I2C_ADDRESS: u8 = 0x08;

/// Highest valid 7-bit I2C device address (0x78-0x7F are reserved)
pub const MAX_I2C_ADDRESS: u8 = 0x77;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A route uses the same pin for trigger and echo
    SharedTriggerEcho(RangerSelector),
    /// A route's mode pin collides with its trigger or echo pin
    ModePinCollision(RangerSelector),
    /// Display address outside the 7-bit device range
    InvalidAddress(u8),
    /// A timeout of zero would fail every read
    ZeroTimeout,
}

/// Trigger/echo pairing for one selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RangerRoute {
    /// Trigger output pin
    pub trigger: u8,
    /// Echo input pin
    pub echo: u8,
    /// Output driven high before ranging on this route
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode_pin: Option<u8>,
}

impl RangerRoute {
    pub const fn new(trigger: u8, echo: u8) -> Self {
        Self {
            trigger,
            echo,
            mode_pin: None,
        }
    }

    pub const fn with_mode_pin(mut self, pin: u8) -> Self {
        self.mode_pin = Some(pin);
        self
    }

    fn validate(&self, selector: RangerSelector) -> Result<(), ConfigError> {
        if self.trigger == self.echo {
            return Err(ConfigError::SharedTriggerEcho(selector));
        }
        if let Some(mode) = self.mode_pin {
            if mode == self.trigger || mode == self.echo {
                return Err(ConfigError::ModePinCollision(selector));
            }
        }
        Ok(())
    }
}

/// Selector → route lookup table
///
/// Every selector has exactly one route, so lookups cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteTable {
    pub front: RangerRoute,
    pub left: RangerRoute,
    pub right: RangerRoute,
}

impl Default for RouteTable {
    /// Robot base wiring: the front socket shares its connector with the
    /// line-follower mode select on pin 8
    fn default() -> Self {
        Self {
            front: RangerRoute::new(1, 2).with_mode_pin(8),
            left: RangerRoute::new(13, 14),
            right: RangerRoute::new(15, 16),
        }
    }
}

impl RouteTable {
    /// Route for a selector
    pub fn route(&self, selector: RangerSelector) -> RangerRoute {
        match selector {
            RangerSelector::Front => self.front,
            RangerSelector::Left => self.left,
            RangerSelector::Right => self.right,
        }
    }

    /// Every pin any route touches (may repeat)
    pub fn pins(&self) -> impl Iterator<Item = u8> + '_ {
        RangerSelector::ALL.into_iter().flat_map(move |s| {
            let route = self.route(s);
            [Some(route.trigger), Some(route.echo), route.mode_pin]
                .into_iter()
                .flatten()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for selector in RangerSelector::ALL {
            self.route(selector).validate(selector)?;
        }
        Ok(())
    }
}

/// Character display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Fixed expander address; `None` probes 0x20-0x27 then 0x38-0x3F
    pub address: Option<u8>,
    /// Switch the backlight on during bring-up
    pub backlight: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            address: None,
            backlight: true,
        }
    }
}

/// Complete board configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    /// Single-wire sensor data pin
    pub sensor_pin: u8,
    pub sensor: SensorTiming,
    pub ranger: RangerConfig,
    pub routes: RouteTable,
    pub display: DisplayConfig,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            sensor_pin: 0,
            sensor: SensorTiming::default(),
            ranger: RangerConfig::default(),
            routes: RouteTable::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl BoardConfig {
    /// Check the configuration for wiring and range errors
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.routes.validate()?;

        if let Some(addr) = self.display.address {
            if !(MIN_I2C_ADDRESS..=MAX_I2C_ADDRESS).contains(&addr) {
                return Err(ConfigError::InvalidAddress(addr));
            }
        }

        if self.sensor.response_timeout_us == 0
            || self.sensor.handshake_timeout_us == 0
            || self.sensor.bit_timeout_us == 0
            || self.ranger.echo_timeout_us == 0
        {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(BoardConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_route_lookup() {
        let table = RouteTable::default();
        assert_eq!(table.route(RangerSelector::Front).mode_pin, Some(8));
        assert_eq!(table.route(RangerSelector::Left), RangerRoute::new(13, 14));
        assert_eq!(table.route(RangerSelector::Right).mode_pin, None);
    }

    #[test]
    fn test_route_pins() {
        let pins: std::vec::Vec<u8> = RouteTable::default().pins().collect();
        assert_eq!(pins, [1, 2, 8, 13, 14, 15, 16]);
    }

    #[test]
    fn test_shared_pin_rejected() {
        let mut config = BoardConfig::default();
        config.routes.left = RangerRoute::new(5, 5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::SharedTriggerEcho(RangerSelector::Left))
        );

        config.routes.left = RangerRoute::new(5, 6).with_mode_pin(6);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ModePinCollision(RangerSelector::Left))
        );
    }

    #[test]
    fn test_address_range() {
        let mut config = BoardConfig::default();
        config.display.address = Some(0x27);
        assert!(config.validate().is_ok());

        config.display.address = Some(0x80);
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress(0x80)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = BoardConfig::default();
        config.ranger.echo_timeout_us = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroTimeout));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_parse_toml() {
        let config: BoardConfig = toml::from_str(
            r#"
            sensor_pin = 3

            [sensor]
            one_threshold_us = 45

            [ranger]
            echo_timeout_us = 30000

            [routes.front]
            trigger = 12
            echo = 11

            [display]
            address = 63
            "#,
        )
        .unwrap();

        assert_eq!(config.sensor_pin, 3);
        assert_eq!(config.sensor.one_threshold_us, 45);
        assert_eq!(config.sensor.start_low_ms, 18);
        assert_eq!(config.ranger.echo_timeout_us, 30_000);
        assert_eq!(config.routes.front, RangerRoute::new(12, 11));
        assert_eq!(config.routes.left, RangerRoute::new(13, 14));
        assert_eq!(config.display.address, Some(0x3F));
        assert!(config.display.backlight);
        assert!(config.validate().is_ok());
    }
}
