//! Microsecond clock abstraction
//!
//! Every protocol in this workspace is bit-banged on the calling thread,
//! so delays are busy-waits and time is read from a free-running
//! microsecond counter.

/// Monotonic microsecond time source with blocking delays
pub trait MicrosClock {
    /// Current time in microseconds since an arbitrary epoch
    ///
    /// Must never go backwards.
    fn now_us(&self) -> u64;

    /// Busy-wait for `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Busy-wait for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1_000);
        }
    }

    /// Microseconds elapsed since `start_us`, saturating at `u32::MAX`
    fn elapsed_since(&self, start_us: u64) -> u32 {
        let elapsed = self.now_us().saturating_sub(start_us);
        u32::try_from(elapsed).unwrap_or(u32::MAX)
    }
}

impl<T: MicrosClock + ?Sized> MicrosClock for &mut T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }

    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
