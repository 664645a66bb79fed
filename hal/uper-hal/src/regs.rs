//! Memory-mapped register access
//!
//! Every hardware mutation in the core goes through [`RegisterAccess`], so a
//! simulated register file can stand in for the real peripheral bus.

/// Address of a 32-bit memory-mapped register
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Register(u32);

impl Register {
    /// Create a register handle from its absolute address
    pub const fn at(addr: u32) -> Self {
        Self(addr)
    }

    /// Absolute address
    pub const fn addr(self) -> u32 {
        self.0
    }
}

/// Read/write access to 32-bit registers
///
/// Methods take `&self`: registers are shared hardware, and callers are
/// responsible for structural exclusion (e.g. masking an interrupt line
/// before touching the registers its handler uses).
pub trait RegisterAccess {
    /// Read the current register value
    fn read(&self, reg: Register) -> u32;

    /// Write a full register value
    fn write(&self, reg: Register, value: u32);

    /// Read-modify-write
    fn modify<F: FnOnce(u32) -> u32>(&self, reg: Register, f: F) {
        let value = self.read(reg);
        self.write(reg, f(value));
    }

    /// Set the bits in `mask`, leaving the others untouched
    fn set_bits(&self, reg: Register, mask: u32) {
        self.modify(reg, |v| v | mask);
    }

    /// Clear the bits in `mask`, leaving the others untouched
    fn clear_bits(&self, reg: Register, mask: u32) {
        self.modify(reg, |v| v & !mask);
    }

    /// Check whether any bit of `mask` is set
    fn any_set(&self, reg: Register, mask: u32) -> bool {
        self.read(reg) & mask != 0
    }
}

impl<T: RegisterAccess + ?Sized> RegisterAccess for &T {
    fn read(&self, reg: Register) -> u32 {
        (**self).read(reg)
    }

    fn write(&self, reg: Register, value: u32) {
        (**self).write(reg, value)
    }
}
