//! Pin interrupt lines on the NVIC

use cortex_m::interrupt::InterruptNumber;
use cortex_m::peripheral::NVIC;
use uper_hal::{InterruptLines, Register, RegisterAccess};

use crate::Mmio;

/// Interrupt priority registers (word access only on Cortex-M0)
const IPR_BASE: u32 = 0xE000_E400;

/// Implemented priority bits on the LPC11U
const PRIO_BITS: u8 = 2;

/// Device interrupt number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Irq(u8);

// SAFETY: LPC11U device interrupts are numbered 0..32
unsafe impl InterruptNumber for Irq {
    fn number(self) -> u16 {
        u16::from(self.0)
    }
}

/// Interrupt lines backed by the NVIC
#[derive(Debug, Clone, Copy)]
pub struct NvicLines {
    mmio: Mmio,
}

impl NvicLines {
    pub const fn new(mmio: Mmio) -> Self {
        Self { mmio }
    }
}

impl InterruptLines for NvicLines {
    fn disable(&self, line: u8) {
        NVIC::mask(Irq(line));
    }

    fn enable(&self, line: u8) {
        // SAFETY: the handler for every line the core enables is installed
        // and never relies on a critical section being held by the caller
        unsafe { NVIC::unmask(Irq(line)) }
    }

    fn set_priority(&self, line: u8, priority: u8) {
        let reg = Register::at(IPR_BASE + u32::from(line / 4) * 4);
        let shift = u32::from(line % 4) * 8;
        let max = (1 << PRIO_BITS) - 1;
        let value = u32::from(priority.min(max) << (8 - PRIO_BITS));
        self.mmio
            .modify(reg, |v| (v & !(0xFF << shift)) | (value << shift));
    }

    fn is_enabled(&self, line: u8) -> bool {
        NVIC::is_enabled(Irq(line))
    }
}
