//! System control: peripheral clock gating

use uper_hal::{Register, RegisterAccess};

use crate::Mmio;

const SYSCON: u32 = 0x4004_8000;

/// AHB clock enables
pub const SYSAHBCLKCTRL: Register = Register::at(SYSCON + 0x080);
/// USART clock divider
pub const UARTCLKDIV: Register = Register::at(SYSCON + 0x098);

pub const CLK_GPIO: u32 = 1 << 6;
pub const CLK_CT32B1: u32 = 1 << 10;
pub const CLK_USART: u32 = 1 << 12;
pub const CLK_IOCON: u32 = 1 << 16;
pub const CLK_PINT: u32 = 1 << 19;

/// Turn on the AHB clocks in `clocks` (`CLK_*` bits)
pub fn enable_clocks(mmio: Mmio, clocks: u32) {
    mmio.set_bits(SYSAHBCLKCTRL, clocks);
}
