//! LPC11U backend for the UPER HAL traits
//!
//! Implements the `uper-hal` capabilities on the real chip:
//!
//! - [`Mmio`] - volatile access to memory-mapped registers
//! - [`NvicLines`] - pin interrupt lines on the Cortex-M0 NVIC
//! - [`Ct32Clock`] - free-running microsecond clock on CT32B1
//! - [`Usart`] - polled USART0 on PIO0_18 (RXD) / PIO0_19 (TXD)
//! - [`syscon`] - peripheral clock gating
//!
//! Only [`Mmio`] and [`NvicLines`] touch hardware directly; the clock and
//! the USART drive their registers through [`Mmio`].

#![no_std]

pub mod clock;
pub mod mmio;
pub mod nvic;
pub mod syscon;
pub mod usart;

pub use clock::Ct32Clock;
pub use mmio::Mmio;
pub use nvic::NvicLines;
pub use usart::{Usart, UsartError};
