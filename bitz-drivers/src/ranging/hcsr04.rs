//! HC-SR04 ultrasonic range finder
//!
//! A 10 µs trigger pulse makes the module emit a burst; the echo line then
//! goes high for as long as the sound took to come back. Distance is half
//! the round trip at the speed of sound, capped at the rated 400 cm.
//!
//! Both echo waits share the configured ceiling, so a dead or
//! disconnected module costs at most twice the echo timeout per reading.

use bitz_core::config::RangerConfig;
use bitz_core::traits::{RangeFinder, RangeReading};
use bitz_hal::{Level, MicrosClock, OutputPin, WaitForLevel};

/// Drive the trigger sequence: low, settle, high for the pulse width, low
pub fn fire_trigger<T, C>(trigger: &mut T, clock: &mut C, config: &RangerConfig)
where
    T: OutputPin + ?Sized,
    C: MicrosClock + ?Sized,
{
    trigger.set_low();
    clock.delay_us(config.settle_us);
    trigger.set_high();
    clock.delay_us(config.trigger_us);
    trigger.set_low();
}

/// Time the echo pulse (µs), or `None` if it never started or never ended
pub fn capture_echo<E>(echo: &mut E, config: &RangerConfig) -> Option<u32>
where
    E: WaitForLevel + ?Sized,
{
    if echo
        .wait_for_level(Level::High, config.echo_timeout_us)
        .is_err()
    {
        debug!("hcsr04 no echo within {}us", config.echo_timeout_us);
        return None;
    }

    match echo.wait_for_level(Level::Low, config.echo_timeout_us) {
        Ok(width) => Some(width),
        Err(_) => {
            debug!("hcsr04 echo wider than {}us", config.echo_timeout_us);
            None
        }
    }
}

/// Convert a captured echo into a reading
pub fn reading_from_pulse(pulse_us: Option<u32>, config: &RangerConfig) -> RangeReading {
    let Some(pulse_us) = pulse_us else {
        return RangeReading::NoEcho;
    };

    let cm = config.pulse_to_cm(pulse_us);
    if cm > config.max_range_cm {
        RangeReading::Measured {
            cm: config.max_range_cm,
            clamped: true,
        }
    } else {
        RangeReading::Measured { cm, clamped: false }
    }
}

/// Run one full ranging cycle
pub fn measure<T, E, C>(
    trigger: &mut T,
    echo: &mut E,
    clock: &mut C,
    config: &RangerConfig,
) -> RangeReading
where
    T: OutputPin + ?Sized,
    E: WaitForLevel + ?Sized,
    C: MicrosClock + ?Sized,
{
    fire_trigger(trigger, clock, config);
    reading_from_pulse(capture_echo(echo, config), config)
}

/// Distance in cm with an explicit echo timeout
///
/// Returns [`NO_ECHO_CM`](bitz_core::NO_ECHO_CM) when no echo arrives, so
/// the result never satisfies `distance < threshold`.
pub fn measure_distance_cm<T, E, C>(trigger: &mut T, echo: &mut E, clock: &mut C, timeout_us: u32) -> f64
where
    T: OutputPin + ?Sized,
    E: WaitForLevel + ?Sized,
    C: MicrosClock + ?Sized,
{
    let config = RangerConfig {
        echo_timeout_us: timeout_us,
        ..RangerConfig::default()
    };
    measure(trigger, echo, clock, &config).as_cm()
}

/// HC-SR04 on a dedicated trigger/echo pair
pub struct Hcsr04<T, E, C> {
    trigger: T,
    echo: E,
    clock: C,
    config: RangerConfig,
}

impl<T: OutputPin, E: WaitForLevel, C: MicrosClock> Hcsr04<T, E, C> {
    pub fn new(trigger: T, echo: E, clock: C, config: RangerConfig) -> Self {
        Self {
            trigger,
            echo,
            clock,
            config,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &RangerConfig {
        &self.config
    }

    /// Release the lines and clock
    pub fn release(self) -> (T, E, C) {
        (self.trigger, self.echo, self.clock)
    }
}

impl<T: OutputPin, E: WaitForLevel, C: MicrosClock> RangeFinder for Hcsr04<T, E, C> {
    fn measure(&mut self) -> RangeReading {
        measure(&mut self.trigger, &mut self.echo, &mut self.clock, &self.config)
    }
}
