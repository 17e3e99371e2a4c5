//! Clock backed by `embassy-time`
//!
//! Uses the global time driver the chip's embassy HAL installs. Delays
//! are blocking (`block_for`), never `.await`: the single-wire and echo
//! protocols cannot tolerate an executor switch mid-bit.

use embassy_time::{block_for, Duration, Instant};

use crate::clock::MicrosClock;

/// Zero-sized handle to the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }

    fn delay_us(&mut self, us: u32) {
        block_for(Duration::from_micros(us as u64));
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(ms as u64));
    }
}
