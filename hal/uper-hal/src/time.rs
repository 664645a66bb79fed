//! Monotonic time source

/// Free-running microsecond clock
///
/// The counter wraps at `u32::MAX`; all arithmetic on timestamps must use
/// wrapping subtraction.
pub trait MonotonicClock {
    /// Current time in microseconds
    fn now_us(&self) -> u32;

    /// Microseconds elapsed since `start`
    fn elapsed_us(&self, start: u32) -> u32 {
        self.now_us().wrapping_sub(start)
    }
}

impl<T: MonotonicClock + ?Sized> MonotonicClock for &T {
    fn now_us(&self) -> u32 {
        (**self).now_us()
    }
}
