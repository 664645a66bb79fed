//! UPER Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware capabilities the GPIO core is
//! written against. A chip backend implements them on real registers; the
//! core's simulator implements them for host tests.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  uper-firmware (command loop, ISRs)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  uper-core (pins, GPIO, interrupts)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  uper-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!         │                       │
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ uper-hal-     │       │ uper-core::   │
//! │    lpc11u     │       │    sim        │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`regs::RegisterAccess`] - Memory-mapped register read/write/modify
//! - [`irq::InterruptLines`] - Interrupt line masking and priority
//! - [`time::MonotonicClock`] - Free-running microsecond clock
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod irq;
pub mod regs;
pub mod time;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use irq::InterruptLines;
pub use regs::{Register, RegisterAccess};
pub use time::MonotonicClock;
pub use uart::{UartRx, UartTx};
