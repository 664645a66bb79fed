//! Microsecond clock on the CT32B1 timer

use uper_hal::{MonotonicClock, Register, RegisterAccess};

use crate::syscon;
use crate::Mmio;

const CT32B1: u32 = 0x4001_8000;
const TCR: Register = Register::at(CT32B1 + 0x04);
const TC: Register = Register::at(CT32B1 + 0x08);
const PR: Register = Register::at(CT32B1 + 0x0C);

const TCR_ENABLE: u32 = 1 << 0;
const TCR_RESET: u32 = 1 << 1;

/// Free-running 32-bit counter ticking at 1 MHz
#[derive(Debug, Clone, Copy)]
pub struct Ct32Clock {
    mmio: Mmio,
}

impl Ct32Clock {
    /// Handle on the timer; reads zero until [`start`](Self::start)
    pub const fn new(mmio: Mmio) -> Self {
        Self { mmio }
    }

    /// Start CT32B1 from zero, prescaled from `system_clock_hz`
    pub fn start(&self, system_clock_hz: u32) {
        syscon::enable_clocks(self.mmio, syscon::CLK_CT32B1);
        self.mmio.write(TCR, TCR_RESET);
        self.mmio
            .write(PR, (system_clock_hz / 1_000_000).saturating_sub(1));
        self.mmio.write(TCR, TCR_ENABLE);
    }
}

impl MonotonicClock for Ct32Clock {
    fn now_us(&self) -> u32 {
        self.mmio.read(TC)
    }
}
