//! Board-agnostic GPIO bridge logic
//!
//! This crate contains everything between a decoded host command and the
//! hardware registers, with the hardware reached only through the
//! `uper-hal` capability traits:
//!
//! - Pin table (logical pin → port/bit, IOCON register, mux codes)
//! - Pin configurator and digital I/O ([`gpio::Gpio`])
//! - Pulse timer ([`pulse`])
//! - Pin interrupt controller with debounce ([`interrupt`], [`scheduler`])
//! - Command handlers ([`commands`])
//!
//! Every batch operation validates its whole input before touching a
//! register, so a rejected command leaves the hardware exactly as it was.
//!
//! # Features
//!
//! - `defmt`: log through `defmt`
//! - `sim`: export [`sim`], the simulated register file, interrupt lines,
//!   clock and report sink this crate tests against, so host tests in other
//!   crates can drive the core without hardware

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod fmt;

pub mod commands;
pub mod config;
pub mod gpio;
pub mod interrupt;
pub mod pins;
pub mod pulse;
pub mod regs;
pub mod scheduler;

#[cfg(any(test, feature = "sim"))]
pub mod sim;

pub use config::GpioConfig;
pub use gpio::{Gpio, PinMode, MAX_BATCH};
pub use interrupt::{
    irq_line, ChannelState, InterruptController, InterruptEvent, InterruptMode, CHANNEL_COUNT,
};
pub use pins::{Pin, PIN_COUNT};
pub use pulse::Level;
pub use scheduler::{RearmQueue, RearmScheduler};
