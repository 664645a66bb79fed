//! UPER - GPIO bridge firmware
//!
//! Main firmware binary for LPC11U-based boards. A host drives the chip's
//! pins over a framed serial link: pin multiplexing, digital I/O, pulse
//! measurement and debounced pin interrupts.
//!
//! The command loop runs in thread mode and never blocks except inside
//! `pulseIn`. Pin interrupt handlers and SysTick share the interrupt
//! controller with it through [`shared`]; interrupt reports reach the host
//! through [`channels::EVENT_CHANNEL`].

#![no_std]
#![no_main]

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::entry;
use defmt::*;
use uper_core::Gpio;
use uper_hal::uart::UartConfig;
use uper_hal_lpc11u::{syscon, Ct32Clock, Usart};
use uper_protocol::{Command, ReportSink};
use {defmt_rtt as _, panic_probe as _};

use crate::dispatch::Foreground;
use crate::link::{HostLink, MAX_FRAME};
use crate::shared::{GPIO_CONFIG, MMIO};

mod board;
mod channels;
mod dispatch;
mod link;
mod shared;
mod vectors;

#[entry]
fn main() -> ! {
    info!("UPER GPIO bridge starting...");

    let mut core = unwrap!(cortex_m::Peripherals::take());

    syscon::enable_clocks(
        MMIO,
        syscon::CLK_GPIO | syscon::CLK_IOCON | syscon::CLK_PINT,
    );

    let gpio = Gpio::new(MMIO);
    if GPIO_CONFIG.init_primary_on_boot {
        gpio.init_primary();
        info!("Pins set to primary functions");
    }

    let clock = Ct32Clock::new(MMIO);
    clock.start(board::SYSTEM_CLOCK_HZ);

    // Re-arm deadlines are polled from SysTick
    core.SYST.set_clock_source(SystClkSource::Core);
    core.SYST
        .set_reload(board::SYSTEM_CLOCK_HZ / board::REARM_TICK_HZ - 1);
    core.SYST.clear_current();
    core.SYST.enable_interrupt();
    core.SYST.enable_counter();

    // After init_primary, which would otherwise take back the link pins
    let uart_config = UartConfig {
        baudrate: board::LINK_BAUDRATE,
        ..UartConfig::default()
    };
    let usart = Usart::new(MMIO, &uart_config, board::SYSTEM_CLOCK_HZ);
    let mut link = HostLink::new(usart);
    info!("Host link up at {} baud", board::LINK_BAUDRATE);

    let fg = Foreground { gpio, clock };
    let mut frame = [0u8; MAX_FRAME];

    loop {
        if let Some(len) = link.poll_frame(&mut frame) {
            match postcard::from_bytes_cobs::<Command>(&mut frame[..len]) {
                Ok(cmd) => dispatch::dispatch(&fg, &cmd, &mut link),
                Err(_) => warn!("link: undecodable frame ({} bytes)", len),
            }
        }

        while let Ok(report) = channels::EVENT_CHANNEL.try_receive() {
            link.send(report);
        }

        let dropped = channels::take_dropped();
        if dropped > 0 {
            warn!("{} interrupt events dropped (queue full)", dropped);
        }
    }
}
