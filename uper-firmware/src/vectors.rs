//! Device interrupt vector table and handlers
//!
//! Pin interrupt channel `n` is served by `FLEX_INTn`, which is device
//! interrupt `n` on the LPC11U (see `uper_core::irq_line`). All eight
//! handlers funnel into [`on_pin_interrupt`].

use cortex_m_rt::exception;
use defmt::trace;

use crate::channels::EventSink;
use crate::shared::with_shared;

/// Device interrupts on the LPC11U
const DEVICE_INTERRUPTS: usize = 32;

type Vector = unsafe extern "C" fn();

extern "C" {
    fn DefaultHandler();
}

/// Single dispatch entry for every pin interrupt channel
fn on_pin_interrupt(channel: u8) {
    with_shared(|shared| {
        shared
            .irq
            .on_interrupt(channel, &mut shared.rearm, &mut EventSink)
    });
}

macro_rules! pin_interrupt_handlers {
    ($($name:ident => $channel:literal),* $(,)?) => {
        $(
            #[allow(non_snake_case)]
            #[no_mangle]
            unsafe extern "C" fn $name() {
                on_pin_interrupt($channel);
            }
        )*

        #[link_section = ".vector_table.interrupts"]
        #[no_mangle]
        pub static __INTERRUPTS: [Vector; DEVICE_INTERRUPTS] = {
            let mut table: [Vector; DEVICE_INTERRUPTS] = [DefaultHandler; DEVICE_INTERRUPTS];
            $(
                table[uper_core::irq_line($channel) as usize] = $name;
            )*
            table
        };
    };
}

pin_interrupt_handlers! {
    FLEX_INT0 => 0,
    FLEX_INT1 => 1,
    FLEX_INT2 => 2,
    FLEX_INT3 => 3,
    FLEX_INT4 => 4,
    FLEX_INT5 => 5,
    FLEX_INT6 => 6,
    FLEX_INT7 => 7,
}

/// Re-arm channels whose quiet period has elapsed
#[exception]
fn SysTick() {
    with_shared(|shared| {
        while let Some(channel) = shared.rearm.take_due() {
            if !shared.irq.rearm(channel) {
                trace!("rearm: channel {} no longer suppressed", channel);
            }
        }
    });
}
