//! Backpack address discovery
//!
//! PCF8574 backpacks sit at 0x20-0x27, PCF8574A ones at 0x38-0x3F. A
//! backpack with an LCD attached has a recognisable read-back: after
//! driving all outputs high, D7 reads low (the idle controller holds it)
//! while the low control bits read back high; after driving all outputs
//! low, everything reads zero.

use core::ops::RangeInclusive;

use bitz_hal::I2cBus;

/// Candidate addresses, scanned in order
pub const PROBE_RANGES: [RangeInclusive<u8>; 2] = [0x20..=0x27, 0x38..=0x3F];

/// Find the first address answering with the backpack signature
///
/// Transport errors at a candidate count as "not this one".
pub fn probe_address<I: I2cBus + ?Sized>(i2c: &mut I) -> Option<u8> {
    for address in PROBE_RANGES.into_iter().flatten() {
        match has_signature(i2c, address) {
            Ok(true) => {
                info!("lcd backpack found at {=u8:#x}", address);
                return Some(address);
            }
            Ok(false) => trace!("{=u8:#x} answered without signature", address),
            Err(_) => trace!("{=u8:#x} no ack", address),
        }
    }
    None
}

/// Check the read-back signature at one address
pub fn has_signature<I: I2cBus + ?Sized>(i2c: &mut I, address: u8) -> Result<bool, I::Error> {
    i2c.write(address, &[0xFF; 4])?;
    let high = i2c.read_byte(address)?;
    i2c.write(address, &[0x00; 2])?;
    let low = i2c.read_byte(address)?;

    // D7 and BL low, RS/RW/E high, D4-D6 ignored
    Ok(high & 0x8F == 0x07 && low == 0)
}
