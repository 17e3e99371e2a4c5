//! LCD1602 driver
//!
//! This driver provides:
//! - Backpack address discovery or a fixed address
//! - 4-bit bring-up of the HD44780 controller
//! - Text output, cursor placement, display/backlight control and scrolling
//!
//! # Usage
//!
//! ```ignore
//! let mut lcd = Lcd1602::new(i2c, clock);
//! lcd.init(None)?;                 // probe for the backpack
//! lcd.show_string("Hello", 0, 0)?;
//! lcd.show_number(-42, 0, 1)?;
//! ```
//!
//! Every call before a successful `init` fails with
//! [`DisplayError::NotInitialized`]. Bus errors are returned as
//! [`DisplayError::Transport`]; a failed call may leave a partial
//! transfer on the controller, and `reinit` recovers it.

use bitz_core::config::DisplayConfig;
use bitz_core::traits::{
    CharacterDisplay, CursorPosition, DisplayError, DisplaySession, RegisterSelect,
};
use bitz_hal::{I2cBus, MicrosClock};

use super::backpack::Backpack;
use super::command;
use super::probe::probe_address;

/// Driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayState {
    /// No address resolved yet
    Uninitialized,
    /// Bring-up completed
    Ready(DisplaySession),
}

/// HD44780 16x2 LCD behind a PCF8574 backpack
pub struct Lcd1602<I, C> {
    link: Backpack<I, C>,
    state: DisplayState,
}

impl<I: I2cBus, C: MicrosClock> Lcd1602<I, C> {
    /// Create a driver; nothing is sent until [`init`](Self::init)
    pub fn new(i2c: I, clock: C) -> Self {
        Self {
            link: Backpack::new(i2c, clock),
            state: DisplayState::Uninitialized,
        }
    }

    /// Get the current state
    pub fn state(&self) -> DisplayState {
        self.state
    }

    /// Session of an initialized display
    pub fn session(&self) -> Option<&DisplaySession> {
        match &self.state {
            DisplayState::Ready(session) => Some(session),
            DisplayState::Uninitialized => None,
        }
    }

    /// Release the bus and clock
    pub fn release(self) -> (I, C) {
        self.link.release()
    }

    /// Resolve the address and bring the controller up
    ///
    /// `None` (or `Some(0)`) probes 0x20-0x27 then 0x38-0x3F. Returns the
    /// address in use. Calling it again re-runs bring-up, which also
    /// clears the screen.
    pub fn init(&mut self, address: Option<u8>) -> Result<u8, DisplayError<I::Error>> {
        let address = match address {
            Some(addr) if addr != 0 => addr,
            _ => probe_address(self.link.bus()).ok_or_else(|| {
                warn!("no lcd backpack found");
                DisplayError::NotFound
            })?,
        };

        self.bring_up(DisplaySession::new(address))?;
        Ok(address)
    }

    /// [`init`](Self::init) from configuration, honouring the backlight setting
    pub fn init_with(&mut self, config: &DisplayConfig) -> Result<u8, DisplayError<I::Error>> {
        let address = self.init(config.address)?;
        if !config.backlight {
            self.backlight_off()?;
        }
        Ok(address)
    }

    /// Re-run bring-up at the current address, e.g. after a power glitch
    ///
    /// The backlight setting is kept.
    pub fn reinit(&mut self) -> Result<(), DisplayError<I::Error>> {
        let session = *self.session().ok_or(DisplayError::NotInitialized)?;
        self.bring_up(session)
    }

    /// Send an instruction byte
    pub fn write_command(&mut self, value: u8) -> Result<(), DisplayError<I::Error>> {
        self.transmit(RegisterSelect::Command, value)
    }

    /// Send a character (DDRAM data) byte
    pub fn write_data(&mut self, value: u8) -> Result<(), DisplayError<I::Error>> {
        self.transmit(RegisterSelect::Data, value)
    }

    fn transmit(&mut self, register: RegisterSelect, value: u8) -> Result<(), DisplayError<I::Error>> {
        match &mut self.state {
            DisplayState::Ready(session) => self.link.write_byte(session, register, value),
            DisplayState::Uninitialized => Err(DisplayError::NotInitialized),
        }
    }

    /// Wake-up sequence into 4-bit mode, then configure and clear
    ///
    /// State only becomes `Ready` once every step went through.
    fn bring_up(&mut self, mut session: DisplaySession) -> Result<(), DisplayError<I::Error>> {
        session.register_select = RegisterSelect::Command;
        let link = &mut self.link;

        link.write_byte(&mut session, RegisterSelect::Command, command::WAKE)?;
        link.clock().delay_ms(command::WAKE_DELAY_MS);
        link.write_nibble(&session, command::WAKE_NIBBLE)?;
        link.clock().delay_ms(command::WAKE_DELAY_MS);
        link.write_nibble(&session, command::FOUR_BIT_NIBBLE)?;
        link.clock().delay_ms(command::WAKE_DELAY_MS);

        for instruction in [
            command::FUNCTION_4BIT_2LINE,
            command::DISPLAY_ON,
            command::ENTRY_INCREMENT,
            command::CLEAR,
        ] {
            link.write_byte(&mut session, RegisterSelect::Command, instruction)?;
        }

        info!("lcd ready at {=u8:#x}", session.address);
        self.state = DisplayState::Ready(session);
        Ok(())
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError<I::Error>> {
        match &mut self.state {
            DisplayState::Ready(session) => {
                session.backlight = on;
                self.link.latch_backlight(session)
            }
            DisplayState::Uninitialized => Err(DisplayError::NotInitialized),
        }
    }
}

impl<I: I2cBus, C: MicrosClock> CharacterDisplay for Lcd1602<I, C> {
    type Error = DisplayError<I::Error>;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.write_command(command::CLEAR)
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error> {
        self.write_command(CursorPosition::new(col, row).ddram_command())
    }

    /// Characters outside Latin-1 are shown as `?`
    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        for ch in text.chars() {
            self.write_data(u8::try_from(ch).unwrap_or(b'?'))?;
        }
        Ok(())
    }

    fn display_on(&mut self) -> Result<(), Self::Error> {
        self.write_command(command::DISPLAY_ON)
    }

    fn display_off(&mut self) -> Result<(), Self::Error> {
        self.write_command(command::DISPLAY_OFF)
    }

    fn backlight_on(&mut self) -> Result<(), Self::Error> {
        self.set_backlight(true)
    }

    fn backlight_off(&mut self) -> Result<(), Self::Error> {
        self.set_backlight(false)
    }

    fn scroll_left(&mut self) -> Result<(), Self::Error> {
        self.write_command(command::SHIFT_LEFT)
    }

    fn scroll_right(&mut self) -> Result<(), Self::Error> {
        self.write_command(command::SHIFT_RIGHT)
    }
}
