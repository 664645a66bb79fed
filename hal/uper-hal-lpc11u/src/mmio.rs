//! Volatile register access

use uper_hal::{Register, RegisterAccess};

/// Memory-mapped register bus
///
/// Zero-sized; every copy accesses the same hardware.
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    _private: (),
}

impl Mmio {
    /// # Safety
    ///
    /// Only valid on an LPC11U part: every [`Register`] handed to this bus
    /// is dereferenced as a device address.
    pub const unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl RegisterAccess for Mmio {
    #[inline]
    fn read(&self, reg: Register) -> u32 {
        // SAFETY: register addresses are aligned device addresses (see `new`)
        unsafe { core::ptr::read_volatile(reg.addr() as *const u32) }
    }

    #[inline]
    fn write(&self, reg: Register, value: u32) {
        // SAFETY: as above
        unsafe { core::ptr::write_volatile(reg.addr() as *mut u32, value) }
    }
}
