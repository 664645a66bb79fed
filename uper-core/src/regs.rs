//! LPC11U register map
//!
//! Only the registers the GPIO core touches. Addresses follow UM10462.

use uper_hal::Register;

/// I/O configuration block (one register per pin)
pub mod iocon {
    use super::Register;

    pub const BASE: u32 = 0x4004_4000;
    const PIO1_OFFSET: u32 = 0x60;

    /// `FUNC[2:0]` plus `ADMODE` (bit 7, 1 = digital)
    pub const FUNC_MASK: u32 = (1 << 7) | 0x7;
    /// `MODE[4:3]` pull resistor select
    pub const MODE_MASK: u32 = 0x3 << 3;
    pub const MODE_PULL_DOWN: u32 = 0x1 << 3;
    pub const MODE_PULL_UP: u32 = 0x2 << 3;

    /// Configuration register of `PIOport_bit`
    pub const fn pio(port: u8, bit: u8) -> Register {
        let offset = if port == 0 { 0 } else { PIO1_OFFSET };
        Register::at(BASE + offset + bit as u32 * 4)
    }
}

/// GPIO port block
pub mod gpio {
    use super::Register;

    pub const BASE: u32 = 0x5000_0000;

    /// Direction (1 = output)
    pub const fn dir(port: u8) -> Register {
        Register::at(BASE + 0x2000 + port as u32 * 4)
    }

    /// Pin level (reads the pad)
    pub const fn pin(port: u8) -> Register {
        Register::at(BASE + 0x2100 + port as u32 * 4)
    }

    /// Write-one-to-set output latch
    pub const fn set(port: u8) -> Register {
        Register::at(BASE + 0x2200 + port as u32 * 4)
    }

    /// Write-one-to-clear output latch
    pub const fn clr(port: u8) -> Register {
        Register::at(BASE + 0x2280 + port as u32 * 4)
    }
}

/// System control block
pub mod syscon {
    use super::Register;

    pub const BASE: u32 = 0x4004_8000;

    /// Pin interrupt select for `channel`
    ///
    /// Holds the physical pin id: `bit` for PIO0, `24 + bit` for PIO1.
    pub const fn pintsel(channel: u8) -> Register {
        Register::at(BASE + 0x178 + channel as u32 * 4)
    }
}

/// Pin interrupt block (one bit per channel in every register)
pub mod pint {
    use super::Register;

    pub const BASE: u32 = 0x4004_C000;

    /// Mode: 1 = level sensitive, 0 = edge sensitive
    pub const ISEL: Register = Register::at(BASE);
    /// Rising edge / level enable
    pub const IENR: Register = Register::at(BASE + 0x04);
    pub const SIENR: Register = Register::at(BASE + 0x08);
    pub const CIENR: Register = Register::at(BASE + 0x0C);
    /// Falling edge enable / active level select (1 = high)
    pub const IENF: Register = Register::at(BASE + 0x10);
    pub const SIENF: Register = Register::at(BASE + 0x14);
    pub const CIENF: Register = Register::at(BASE + 0x18);
    /// Rising edge detected (write one to clear)
    pub const RISE: Register = Register::at(BASE + 0x1C);
    /// Falling edge detected (write one to clear)
    pub const FALL: Register = Register::at(BASE + 0x20);
    /// Interrupt status
    pub const IST: Register = Register::at(BASE + 0x24);
}
