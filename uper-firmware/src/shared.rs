//! State shared between the command loop and interrupt handlers
//!
//! The interrupt controller and its re-arm queue are touched by foreground
//! attach/detach, the pin interrupt handlers and SysTick. Each access holds
//! the critical section for exactly one state transition.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::CriticalSectionMutex;
use uper_core::{GpioConfig, InterruptController, RearmQueue};
use uper_hal_lpc11u::{Ct32Clock, Mmio, NvicLines};

use crate::board;

// SAFETY: this firmware only runs on LPC11U parts
pub const MMIO: Mmio = unsafe { Mmio::new() };

pub const GPIO_CONFIG: GpioConfig = GpioConfig {
    interrupt_priority: board::INTERRUPT_PRIORITY,
    init_primary_on_boot: !board::KEEP_DEBUG_PINS,
};

pub struct Shared {
    pub irq: InterruptController<Mmio, NvicLines>,
    pub rearm: RearmQueue<Ct32Clock>,
}

static SHARED: CriticalSectionMutex<RefCell<Shared>> =
    CriticalSectionMutex::new(RefCell::new(Shared {
        irq: InterruptController::new(MMIO, NvicLines::new(MMIO), &GPIO_CONFIG),
        rearm: RearmQueue::new(Ct32Clock::new(MMIO)),
    }));

/// Run `f` on the shared state inside a critical section
pub fn with_shared<R>(f: impl FnOnce(&mut Shared) -> R) -> R {
    SHARED.lock(|cell| f(&mut cell.borrow_mut()))
}
