//! HD44780 instruction bytes and PCF8574 pin map

/// Clear display, cursor home
pub const CLEAR: u8 = 0x01;
/// Entry mode: increment, no display shift
pub const ENTRY_INCREMENT: u8 = 0x06;
/// Display off, cursor off
pub const DISPLAY_OFF: u8 = 0x08;
/// Display on, cursor off, blink off
pub const DISPLAY_ON: u8 = 0x0C;
/// Shift the whole display one position left
pub const SHIFT_LEFT: u8 = 0x18;
/// Shift the whole display one position right
pub const SHIFT_RIGHT: u8 = 0x1C;
/// 4-bit bus, two lines, 5x8 font
pub const FUNCTION_4BIT_2LINE: u8 = 0x28;

/// Wake-up: two "8-bit mode" nibbles sent as one command
pub const WAKE: u8 = 0x33;
/// Third 8-bit-mode nibble
pub const WAKE_NIBBLE: u8 = 0x30;
/// Switch to 4-bit mode
pub const FOUR_BIT_NIBBLE: u8 = 0x20;

/// Settling time after each wake-up step (ms)
pub const WAKE_DELAY_MS: u32 = 5;
/// Settling time after every expander write (ms)
pub const WRITE_DELAY_MS: u32 = 1;

/// Expander pin map
///
/// ```text
/// P7 P6 P5 P4 | P3 | P2 | P1 | P0
/// D7 D6 D5 D4 | BL | E  | RW | RS
/// ```
pub mod pins {
    /// Register select (1 = data)
    pub const RS: u8 = 0x01;
    /// Enable strobe
    pub const ENABLE: u8 = 0x04;
    /// Backlight transistor
    pub const BACKLIGHT: u8 = 0x08;
    /// Upper-nibble data lines
    pub const DATA: u8 = 0xF0;
}
