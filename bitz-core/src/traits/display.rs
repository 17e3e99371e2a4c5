//! Character display trait and session model
//!
//! Models a 16x2 HD44780-class display. Rows and columns are not bounds
//! checked; out-of-range positions land wherever the controller maps
//! the resulting DDRAM address.

use core::fmt::{self, Write};

use heapless::String;

/// Errors that can occur driving the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Address discovery found no expander answering with the signature
    NotFound,
    /// Display call before `init`
    NotInitialized,
    /// Bus write or read failed
    Transport(E),
}

impl<E: fmt::Debug> fmt::Display for DisplayError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::NotFound => f.write_str("no display found on the probed addresses"),
            DisplayError::NotInitialized => f.write_str("display not initialized"),
            DisplayError::Transport(e) => write!(f, "display transport error: {:?}", e),
        }
    }
}

/// Whether the next byte is an instruction or a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterSelect {
    /// Instruction register (RS low)
    #[default]
    Command,
    /// Data register (RS high)
    Data,
}

/// Per-device display state
///
/// Lives inside the driver handle; lost on power cycle, so a reset
/// display needs `init` again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplaySession {
    /// 7-bit expander address
    pub address: u8,
    /// Backlight transistor driven on
    pub backlight: bool,
    /// Register targeted by the last transmitted byte
    pub register_select: RegisterSelect,
}

impl DisplaySession {
    /// Session as left by bring-up: backlight on, command register
    pub fn new(address: u8) -> Self {
        Self {
            address,
            backlight: true,
            register_select: RegisterSelect::Command,
        }
    }
}

/// Column/row position on a 16x2 display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorPosition {
    /// Column, 0-15
    pub col: u8,
    /// Row, 0-1
    pub row: u8,
}

impl CursorPosition {
    /// Set DDRAM address instruction for row 0
    pub const ROW0: u8 = 0x80;
    /// Set DDRAM address instruction for row 1
    pub const ROW1: u8 = 0xC0;

    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// "Set DDRAM address" command byte for this position
    ///
    /// Any row above 0 selects the second line.
    pub fn ddram_command(&self) -> u8 {
        let base = if self.row > 0 { Self::ROW1 } else { Self::ROW0 };
        base.wrapping_add(self.col)
    }
}

/// Trait for character displays
pub trait CharacterDisplay {
    /// Error type for display operations
    type Error;

    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor
    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Self::Error>;

    /// Write text at the cursor
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Show the display contents
    fn display_on(&mut self) -> Result<(), Self::Error>;

    /// Blank the display (contents kept)
    fn display_off(&mut self) -> Result<(), Self::Error>;

    /// Switch the backlight on
    fn backlight_on(&mut self) -> Result<(), Self::Error>;

    /// Switch the backlight off
    fn backlight_off(&mut self) -> Result<(), Self::Error>;

    /// Shift the whole display one position left
    fn scroll_left(&mut self) -> Result<(), Self::Error>;

    /// Shift the whole display one position right
    fn scroll_right(&mut self) -> Result<(), Self::Error>;
}

/// Helper trait for common text placement
pub trait CharacterDisplayExt: CharacterDisplay {
    /// Write text starting at a position
    fn show_string(&mut self, text: &str, col: u8, row: u8) -> Result<(), Self::Error> {
        self.set_cursor(col, row)?;
        self.print(text)
    }

    /// Write a number in decimal starting at a position
    fn show_number(&mut self, n: i32, col: u8, row: u8) -> Result<(), Self::Error> {
        // "-2147483648" is the longest i32
        let mut buf: String<11> = String::new();
        // Cannot overflow: capacity covers every i32
        let _ = write!(buf, "{}", n);
        self.show_string(&buf, col, row)
    }
}

impl<T: CharacterDisplay + ?Sized> CharacterDisplayExt for T {}
