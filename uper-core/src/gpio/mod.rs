//! Pin configurator and digital I/O
//!
//! Every operation takes a batch of logical pin indices (a scalar call is a
//! batch of one) and runs in two phases: the whole batch is validated, then
//! applied. A rejected batch has touched no register.

mod mode;

pub use mode::PinMode;

use heapless::Vec;
use uper_hal::RegisterAccess;
use uper_protocol::{CommandError, CommandResult, MAX_BYTES};

use crate::pins::{Pin, PINS, PIN_COUNT};
use crate::regs::{gpio, iocon};

/// Largest batch a read can report back
pub const MAX_BATCH: usize = MAX_BYTES;

/// Which mux code to restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Function {
    Primary,
    Secondary,
}

/// GPIO pin configurator and port access
pub struct Gpio<R> {
    regs: R,
}

impl<R: RegisterAccess> Gpio<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Restore every pin's primary function (boot-time init)
    pub fn init_primary(&self) {
        for pin in PINS.iter() {
            self.select_function(pin, Function::Primary);
        }
        debug!("gpio: {} pins set to primary function", PINS.len());
    }

    /// Switch pins to their GPIO function
    pub fn set_primary(&self, pins: &[u8]) -> CommandResult {
        self.set_function(pins, Function::Primary)
    }

    /// Switch pins to their peripheral function
    pub fn set_secondary(&self, pins: &[u8]) -> CommandResult {
        self.set_function(pins, Function::Secondary)
    }

    fn set_function(&self, pins: &[u8], function: Function) -> CommandResult {
        validate_pins(pins)?;

        for pin in lookup(pins) {
            self.select_function(pin, function);
        }
        Ok(())
    }

    fn select_function(&self, pin: &Pin, function: Function) {
        let code = match function {
            Function::Primary => pin.primary,
            Function::Secondary => pin.secondary,
        };
        self.regs
            .modify(pin.iocon, |v| (v & !iocon::FUNC_MASK) | u32::from(code));
    }

    /// Set direction and pull resistors
    ///
    /// `modes` holds host mode codes, parallel to `pins`.
    pub fn set_mode(&self, pins: &[u8], modes: &[u8]) -> CommandResult {
        if pins.len() != modes.len() {
            return Err(CommandError::ArgValue);
        }
        validate_pins(pins)?;
        if modes.iter().any(|&code| PinMode::from_code(code).is_none()) {
            return Err(CommandError::ArgValue);
        }

        let modes = modes.iter().filter_map(|&code| PinMode::from_code(code));
        for (pin, mode) in lookup(pins).zip(modes) {
            self.apply_mode(pin, mode);
        }
        Ok(())
    }

    fn apply_mode(&self, pin: &Pin, mode: PinMode) {
        self.regs.clear_bits(pin.iocon, iocon::MODE_MASK);

        if mode.is_output() {
            self.regs.set_bits(gpio::dir(pin.port), pin.mask());
        } else {
            self.regs.set_bits(pin.iocon, mode.resistor_bits());
            self.regs.clear_bits(gpio::dir(pin.port), pin.mask());
        }
    }

    /// Drive output levels; any nonzero value drives high
    ///
    /// Uses the write-only SET/CLR registers, so other bits of the port are
    /// never read back and rewritten.
    pub fn write(&self, pins: &[u8], values: &[u8]) -> CommandResult {
        if pins.len() != values.len() {
            return Err(CommandError::ArgValue);
        }
        validate_pins(pins)?;

        for (pin, &value) in lookup(pins).zip(values) {
            let reg = if value == 0 {
                gpio::clr(pin.port)
            } else {
                gpio::set(pin.port)
            };
            self.regs.write(reg, pin.mask());
        }
        Ok(())
    }

    /// Sample pin levels, one 0/1 value per requested pin, in order
    pub fn read(&self, pins: &[u8]) -> CommandResult<Vec<u8, MAX_BATCH>> {
        validate_pins(pins)?;

        if pins.len() > MAX_BATCH {
            return Err(CommandError::AllocFailed);
        }
        let mut values = Vec::new();
        for pin in lookup(pins) {
            values
                .push(u8::from(pin.is_high(&self.regs)))
                .map_err(|_| CommandError::AllocFailed)?;
        }
        Ok(values)
    }

    /// Level of a single pin
    pub fn is_high(&self, pin: &Pin) -> bool {
        pin.is_high(&self.regs)
    }
}

/// Validation pass: every index must name a pin
fn validate_pins(pins: &[u8]) -> CommandResult {
    if pins.iter().all(|&index| usize::from(index) < PIN_COUNT) {
        Ok(())
    } else {
        warn!("gpio: pin index out of range");
        Err(CommandError::ArgValue)
    }
}

/// Apply pass lookup; callers have already validated `pins`
fn lookup(pins: &[u8]) -> impl Iterator<Item = &'static Pin> + '_ {
    pins.iter().filter_map(|&index| crate::pins::get(index))
}
