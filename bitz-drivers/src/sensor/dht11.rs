//! DHT11 single-wire temperature/humidity driver
//!
//! This driver provides:
//! - The host start signal and response handshake
//! - 40-bit frame capture with pulse-width bit discrimination
//! - Checksum verification before any value is reported
//!
//! # Protocol
//!
//! ```text
//! host:   ‾‾‾\____18ms____/‾40µs‾ (release, pull-up)
//! sensor:                          \__80µs__/‾‾80µs‾‾\  then 40 bits:
//! bit:    \__50µs__/‾‾ 26-28µs ‾‾\   = 0
//!         \__50µs__/‾‾‾‾‾ 70µs ‾‾‾‾‾\ = 1
//! ```
//!
//! Bytes arrive MSB first: humidity, humidity decimal, temperature,
//! temperature decimal, checksum. The DHT11 always sends zero decimals.
//!
//! # Usage
//!
//! ```ignore
//! let mut sensor = Dht11::new(line, clock, SensorTiming::default());
//! let reading = sensor.read()?;
//! ```
//!
//! A read takes roughly 23 ms and busy-waits the whole time. The sensor
//! needs about a second between reads; pacing is left to the caller.

use bitz_core::config::SensorTiming;
use bitz_core::traits::{ClimateReading, ClimateSensor, SensorError, SensorFrame};
use bitz_hal::{Direction, FlexPin, Level, MicrosClock, Pull, WaitTimeout};

/// DHT11 driver over a bidirectional line
pub struct Dht11<P, C> {
    pin: P,
    clock: C,
    timing: SensorTiming,
}

impl<P: FlexPin, C: MicrosClock> Dht11<P, C> {
    /// Create a new driver
    ///
    /// The line is not touched until the first read.
    pub fn new(pin: P, clock: C, timing: SensorTiming) -> Self {
        Self { pin, clock, timing }
    }

    /// Get the timing configuration
    pub fn timing(&self) -> &SensorTiming {
        &self.timing
    }

    /// Release the line and clock
    pub fn release(self) -> (P, C) {
        (self.pin, self.clock)
    }

    /// Run one transaction and return the raw frame
    ///
    /// The checksum is not checked here; see [`SensorFrame::reading`].
    pub fn read_frame(&mut self) -> Result<SensorFrame, SensorError> {
        self.send_start_signal();
        self.await_response()?;
        let frame = self.receive_frame()?;
        trace!("dht11 frame {}", frame.0);
        Ok(frame)
    }

    fn send_start_signal(&mut self) {
        trace!("dht11 start signal");
        self.pin.set_direction(Direction::Output);
        self.pin.set_low();
        self.clock.delay_ms(self.timing.start_low_ms);
        self.pin.set_high();
        self.clock.delay_us(self.timing.release_us);
        self.pin.set_direction(Direction::Input);
        self.pin.set_pull(Pull::Up);
    }

    /// Sensor pulls low ~80 µs, releases high ~80 µs, then drops into the
    /// first bit
    fn await_response(&mut self) -> Result<(), SensorError> {
        let no_response = |e: WaitTimeout| {
            debug!("dht11 handshake missed {} after {}us", e.level, e.waited_us);
            SensorError::NoResponse
        };

        self.pin
            .wait_for_level(Level::Low, self.timing.response_timeout_us)
            .map_err(no_response)?;
        self.pin
            .wait_for_level(Level::High, self.timing.handshake_timeout_us)
            .map_err(no_response)?;
        self.pin
            .wait_for_level(Level::Low, self.timing.handshake_timeout_us)
            .map_err(no_response)?;
        Ok(())
    }

    fn receive_frame(&mut self) -> Result<SensorFrame, SensorError> {
        let mut bytes = [0u8; 5];

        for index in 0..SensorFrame::BITS {
            let high_us = self.receive_bit_pulse().map_err(|e| {
                warn!("dht11 stalled at bit {} waiting for {}", index, e.level);
                SensorError::Timeout
            })?;

            if high_us > self.timing.one_threshold_us {
                bytes[index / 8] |= 0x80 >> (index % 8);
            }
        }

        Ok(SensorFrame(bytes))
    }

    /// Width of the high half of one bit cell
    fn receive_bit_pulse(&mut self) -> Result<u32, WaitTimeout> {
        self.pin
            .wait_for_level(Level::High, self.timing.bit_timeout_us)?;
        self.pin
            .wait_for_level(Level::Low, self.timing.bit_timeout_us)
    }
}

impl<P: FlexPin, C: MicrosClock> ClimateSensor for Dht11<P, C> {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        let frame = self.read_frame()?;
        frame.reading().map_err(|e| {
            warn!("dht11 checksum mismatch: {}", e);
            e
        })
    }
}

/// One-shot read on a borrowed line
///
/// Returns temperature (°C) and humidity (%RH) from a single transaction.
pub fn read_sensor<P: FlexPin, C: MicrosClock>(
    pin: P,
    clock: C,
    timing: &SensorTiming,
) -> Result<ClimateReading, SensorError> {
    Dht11::new(pin, clock, *timing).read()
}
