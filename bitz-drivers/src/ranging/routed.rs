//! Selector-routed ranging
//!
//! The board exposes several range-finder sockets. A [`RouteTable`] maps
//! each [`RangerSelector`] to its trigger/echo pins; the lines themselves
//! live in a [`PinBank`] so routing stays configuration-driven.
//!
//! The front socket shares its connector with a mode-select line, which
//! is driven high before every front measurement.
//!
//! Every routed line must actively drive both levels while it is an
//! output: trigger and mode-select lines have no pull-up on the board.
//! The open-drain adapter in `bitz-hal` only releases the line on
//! `set_high`, so board crates supply push-pull `FlexPin` lines here.

use bitz_core::config::{ConfigError, RangerConfig, RouteTable};
use bitz_core::traits::{RangeReading, RangerSelector};
use bitz_hal::{Direction, FlexPin, MicrosClock};

use super::hcsr04;
use crate::pins::PinBank;

/// Error building a routed ranger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutingError {
    /// Route table failed validation
    Config(ConfigError),
    /// A routed pin has no line in the bank
    MissingPin(u8),
}

impl From<ConfigError> for RoutingError {
    fn from(e: ConfigError) -> Self {
        RoutingError::Config(e)
    }
}

/// Range finder multiplexed over selector routes
pub struct RoutedRanger<L, C, const N: usize> {
    lines: PinBank<L, N>,
    clock: C,
    routes: RouteTable,
    config: RangerConfig,
}

impl<L: FlexPin, C: MicrosClock, const N: usize> RoutedRanger<L, C, N> {
    /// Create a ranger, checking every routed pin is present in the bank
    pub fn new(
        lines: PinBank<L, N>,
        clock: C,
        routes: RouteTable,
        config: RangerConfig,
    ) -> Result<Self, RoutingError> {
        routes.validate()?;
        if let Some(pin) = routes.pins().find(|pin| !lines.contains(*pin)) {
            return Err(RoutingError::MissingPin(pin));
        }

        Ok(Self {
            lines,
            clock,
            routes,
            config,
        })
    }

    /// Get the route table
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Borrow a routed line, e.g. to inspect the mode-select pin
    pub fn line(&self, pin: u8) -> Option<&L> {
        self.lines.get(pin)
    }

    /// Release the pin bank and clock
    pub fn release(self) -> (PinBank<L, N>, C) {
        (self.lines, self.clock)
    }

    /// Run one ranging cycle on the selected socket
    pub fn measure(&mut self, selector: RangerSelector) -> RangeReading {
        let route = self.routes.route(selector);

        if let Some(mode) = route.mode_pin {
            if let Some(line) = self.lines.get_mut(mode) {
                line.set_direction(Direction::Output);
                line.set_high();
            }
        }

        // Pins were checked at construction; a missing line reads as silence
        let Some(echo) = self.lines.get_mut(route.echo) else {
            return RangeReading::NoEcho;
        };
        echo.set_direction(Direction::Input);

        let Some(trigger) = self.lines.get_mut(route.trigger) else {
            return RangeReading::NoEcho;
        };
        trigger.set_direction(Direction::Output);
        hcsr04::fire_trigger(trigger, &mut self.clock, &self.config);

        let Some(echo) = self.lines.get_mut(route.echo) else {
            return RangeReading::NoEcho;
        };
        let reading = hcsr04::reading_from_pulse(hcsr04::capture_echo(echo, &self.config), &self.config);
        trace!("ranger {} -> {}", selector, reading);
        reading
    }

    /// Distance in cm on the selected socket, [`NO_ECHO_CM`](bitz_core::NO_ECHO_CM) without echo
    pub fn distance_cm(&mut self, selector: RangerSelector) -> f64 {
        self.measure(selector).as_cm()
    }

    /// Whether an object is nearer than `threshold_cm` on the selected socket
    ///
    /// A missing echo never counts as an obstacle.
    pub fn is_obstacle(&mut self, selector: RangerSelector, threshold_cm: f64) -> bool {
        self.measure(selector).is_closer_than(threshold_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitz_core::config::RangerRoute;
    use bitz_core::NO_ECHO_CM;
    use bitz_hal::mock::{MockClock, ScriptedLine, SimTime};
    use bitz_hal::Level;

    type Bank = PinBank<ScriptedLine, 8>;

    /// Default table wiring with an echo of `width_us` on one socket
    fn bank(time: &SimTime, answering: RangerSelector, width_us: u32) -> Bank {
        let routes = RouteTable::default();
        let mut bank = Bank::new();
        for selector in RangerSelector::ALL {
            let route = routes.route(selector);
            let echo = if selector == answering {
                ScriptedLine::input(time, &[(Level::Low, 100), (Level::High, width_us)])
            } else {
                ScriptedLine::input(time, &[])
            };
            bank.insert(route.trigger, ScriptedLine::output(time)).unwrap();
            bank.insert(route.echo, echo).unwrap();
            if let Some(mode) = route.mode_pin {
                bank.insert(mode, ScriptedLine::output(time)).unwrap();
            }
        }
        bank
    }

    fn ranger(time: &SimTime, bank: Bank) -> RoutedRanger<ScriptedLine, MockClock, 8> {
        RoutedRanger::new(
            bank,
            MockClock::new(time),
            RouteTable::default(),
            RangerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_routes_to_selected_socket() {
        let time = SimTime::new();
        let mut ranger = ranger(&time, bank(&time, RangerSelector::Left, 1_000));

        let cm = ranger.distance_cm(RangerSelector::Left);
        assert!((cm - 17.0).abs() < 1e-9);

        // Left trigger actively driven through the full pulse, right untouched
        assert_eq!(
            ranger.line(13).unwrap().driven(),
            &[(0, Level::Low), (2, Level::High), (12, Level::Low)]
        );
        assert!(ranger.line(15).unwrap().driven().is_empty());
    }

    #[test]
    fn test_front_drives_mode_pin() {
        let time = SimTime::new();
        let mut ranger = ranger(&time, bank(&time, RangerSelector::Front, 1_000));

        assert!(ranger.line(8).unwrap().driven().is_empty());
        assert!(ranger.is_obstacle(RangerSelector::Front, 20.0));
        assert_eq!(ranger.line(8).unwrap().driven(), &[(0, Level::High)]);
    }

    #[test]
    fn test_silent_socket() {
        let time = SimTime::new();
        let mut ranger = ranger(&time, bank(&time, RangerSelector::Front, 1_000));

        assert_eq!(ranger.distance_cm(RangerSelector::Right), NO_ECHO_CM);
        assert!(!ranger.is_obstacle(RangerSelector::Right, 1_000.0));
    }

    #[test]
    fn test_missing_pin_rejected() {
        let time = SimTime::new();
        let mut lines = bank(&time, RangerSelector::Front, 1_000);
        lines.remove(16);

        let result = RoutedRanger::new(
            lines,
            MockClock::new(&time),
            RouteTable::default(),
            RangerConfig::default(),
        );
        assert!(matches!(result, Err(RoutingError::MissingPin(16))));
    }

    #[test]
    fn test_invalid_table_rejected() {
        let time = SimTime::new();
        let mut routes = RouteTable::default();
        routes.right = RangerRoute::new(15, 15);

        let result = RoutedRanger::new(
            bank(&time, RangerSelector::Front, 1_000),
            MockClock::new(&time),
            routes,
            RangerConfig::default(),
        );
        assert!(matches!(
            result,
            Err(RoutingError::Config(ConfigError::SharedTriggerEcho(RangerSelector::Right)))
        ));
    }
}
