//! Interrupt line control
//!
//! Models the subset of an interrupt controller (e.g. the Cortex-M NVIC)
//! the GPIO core needs: per-line mask/unmask and priority.

/// Per-line interrupt masking and priority
pub trait InterruptLines {
    /// Mask (disable) an interrupt line
    fn disable(&self, line: u8);

    /// Unmask (enable) an interrupt line
    fn enable(&self, line: u8);

    /// Set the priority of an interrupt line
    ///
    /// Priority is in logical levels (0 = most urgent); the implementation
    /// shifts it into the hardware's implemented priority bits.
    fn set_priority(&self, line: u8, priority: u8);

    /// Check if an interrupt line is currently unmasked
    fn is_enabled(&self, line: u8) -> bool;
}

impl<T: InterruptLines + ?Sized> InterruptLines for &T {
    fn disable(&self, line: u8) {
        (**self).disable(line)
    }

    fn enable(&self, line: u8) {
        (**self).enable(line)
    }

    fn set_priority(&self, line: u8, priority: u8) {
        (**self).set_priority(line, priority)
    }

    fn is_enabled(&self, line: u8) -> bool {
        (**self).is_enabled(line)
    }
}
