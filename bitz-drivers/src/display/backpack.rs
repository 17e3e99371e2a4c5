//! PCF8574 backpack framing
//!
//! The expander has no notion of the LCD protocol: every byte written
//! simply sets its eight outputs. A 4-bit transfer is the nibble on
//! D4-D7 with the enable line strobed high and back low, and every
//! written byte also carries the backlight and register-select bits.

use bitz_core::traits::{DisplayError, DisplaySession, RegisterSelect};
use bitz_hal::{I2cBus, MicrosClock};

use super::command::{pins, WRITE_DELAY_MS};

/// Expander output byte for a nibble (upper four bits of `value`)
pub fn frame(value: u8, session: &DisplaySession) -> u8 {
    let mut byte = value & pins::DATA;
    if session.backlight {
        byte |= pins::BACKLIGHT;
    }
    if session.register_select == RegisterSelect::Data {
        byte |= pins::RS;
    }
    byte
}

/// I2C link to one backpack
pub struct Backpack<I, C> {
    i2c: I,
    clock: C,
}

impl<I: I2cBus, C: MicrosClock> Backpack<I, C> {
    pub fn new(i2c: I, clock: C) -> Self {
        Self { i2c, clock }
    }

    /// Bus access, e.g. for address discovery
    pub fn bus(&mut self) -> &mut I {
        &mut self.i2c
    }

    pub fn clock(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn release(self) -> (I, C) {
        (self.i2c, self.clock)
    }

    /// Write one expander byte and let the controller settle
    pub fn write_raw(&mut self, address: u8, byte: u8) -> Result<(), DisplayError<I::Error>> {
        self.i2c.write_byte(address, byte).map_err(|e| {
            warn!("lcd write to {=u8:#x} failed", address);
            DisplayError::Transport(e)
        })?;
        self.clock.delay_ms(WRITE_DELAY_MS);
        Ok(())
    }

    /// Clock one nibble in: data, data with enable, data
    pub fn write_nibble(&mut self, session: &DisplaySession, value: u8) -> Result<(), DisplayError<I::Error>> {
        let byte = frame(value, session);
        self.write_raw(session.address, byte)?;
        self.write_raw(session.address, byte | pins::ENABLE)?;
        self.write_raw(session.address, byte)
    }

    /// Send a full byte to the given register, high nibble first
    pub fn write_byte(
        &mut self,
        session: &mut DisplaySession,
        register: RegisterSelect,
        value: u8,
    ) -> Result<(), DisplayError<I::Error>> {
        session.register_select = register;
        self.write_nibble(session, value)?;
        self.write_nibble(session, value << 4)
    }

    /// Latch the session's backlight state without touching the controller
    ///
    /// Enable stays low, so the LCD ignores the data lines.
    pub fn latch_backlight(&mut self, session: &DisplaySession) -> Result<(), DisplayError<I::Error>> {
        self.write_raw(session.address, frame(0, session))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitz_hal::mock::{MockClock, MockI2c, MockI2cError, SimTime};

    #[test]
    fn test_frame_bits() {
        let mut session = DisplaySession::new(0x27);
        assert_eq!(frame(0x4A, &session), 0x48);

        session.register_select = RegisterSelect::Data;
        assert_eq!(frame(0x4A, &session), 0x49);

        session.backlight = false;
        assert_eq!(frame(0xF0, &session), 0xF1);
    }

    #[test]
    fn test_write_byte_strobes_both_nibbles() {
        let time = SimTime::new();
        let mut i2c = MockI2c::new();
        i2c.attach(0x27, 0xFF);
        let mut link = Backpack::new(i2c, MockClock::new(&time));
        let mut session = DisplaySession::new(0x27);

        link.write_byte(&mut session, RegisterSelect::Data, b'H').unwrap();

        assert_eq!(session.register_select, RegisterSelect::Data);
        assert_eq!(time.now(), 6_000);
        let (i2c, _) = link.release();
        assert_eq!(i2c.written_bytes(0x27), [0x49, 0x4D, 0x49, 0x89, 0x8D, 0x89]);
    }

    #[test]
    fn test_transport_error() {
        let time = SimTime::new();
        let mut link = Backpack::new(MockI2c::new(), MockClock::new(&time));
        let session = DisplaySession::new(0x27);

        assert_eq!(
            link.latch_backlight(&session),
            Err(DisplayError::Transport(MockI2cError::Nack))
        );
    }
}
