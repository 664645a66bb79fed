//! Command handlers
//!
//! Each handler checks the argument shape (count, then kinds), converts the
//! arguments and calls into the GPIO core. Pin, mode and value arguments
//! come either as one integer or as a byte sequence; two-argument commands
//! need both arguments in the same form.
//!
//! Integers outside the target domain are rejected with
//! [`CommandError::ArgValue`], never truncated.

use uper_hal::{InterruptLines, MonotonicClock, RegisterAccess};
use uper_protocol::{Argument, Command, CommandError, CommandResult, Function, Report, ReportSink};

use crate::gpio::Gpio;
use crate::interrupt::{Binding, InterruptController, InterruptMode};
use crate::pulse::{self, Level};
use crate::scheduler::RearmScheduler;

/// Pin-sized items from one argument: a scalar or a borrowed batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Items<'a> {
    One([u8; 1]),
    Many(&'a [u8]),
}

impl Items<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Items::One(item) => item,
            Items::Many(items) => items,
        }
    }
}

fn byte(value: i32) -> CommandResult<u8> {
    u8::try_from(value).map_err(|_| CommandError::ArgValue)
}

fn micros(value: i32) -> CommandResult<u32> {
    u32::try_from(value).map_err(|_| CommandError::ArgValue)
}

fn level_byte(value: i32) -> CommandResult<u8> {
    Ok(u8::from(value != 0))
}

/// Single pins argument
fn pins_arg<'a>(cmd: &Command<'a>) -> CommandResult<Items<'a>> {
    cmd.expect_count(1)?;
    match cmd.args[0] {
        Argument::Int(pin) => Ok(Items::One([byte(pin)?])),
        Argument::Bytes(pins) => Ok(Items::Many(pins)),
    }
}

/// Pins plus a parallel argument, both scalar or both batches
fn paired_args<'a>(
    cmd: &Command<'a>,
    second: fn(i32) -> CommandResult<u8>,
) -> CommandResult<(Items<'a>, Items<'a>)> {
    cmd.expect_count(2)?;
    match (cmd.args[0], cmd.args[1]) {
        (Argument::Int(pin), Argument::Int(value)) => {
            Ok((Items::One([byte(pin)?]), Items::One([second(value)?])))
        }
        (Argument::Bytes(pins), Argument::Bytes(values)) => {
            Ok((Items::Many(pins), Items::Many(values)))
        }
        _ => Err(CommandError::ArgType),
    }
}

/// Integer arguments only, exactly `N` of them
fn int_args<const N: usize>(cmd: &Command<'_>) -> CommandResult<[i32; N]> {
    cmd.expect_count(N)?;
    let mut ints = [0; N];
    for (i, slot) in ints.iter_mut().enumerate() {
        *slot = cmd.int(i)?;
    }
    Ok(ints)
}

/// `setPrimary(pins)`
pub fn set_primary<R: RegisterAccess>(gpio: &Gpio<R>, cmd: &Command<'_>) -> CommandResult {
    let pins = pins_arg(cmd)?;
    gpio.set_primary(pins.as_slice())
}

/// `setSecondary(pins)`
pub fn set_secondary<R: RegisterAccess>(gpio: &Gpio<R>, cmd: &Command<'_>) -> CommandResult {
    let pins = pins_arg(cmd)?;
    gpio.set_secondary(pins.as_slice())
}

/// `pinMode(pins, modes)`
pub fn pin_mode<R: RegisterAccess>(gpio: &Gpio<R>, cmd: &Command<'_>) -> CommandResult {
    let (pins, modes) = paired_args(cmd, byte)?;
    gpio.set_mode(pins.as_slice(), modes.as_slice())
}

/// `digitalWrite(pins, values)`
pub fn digital_write<R: RegisterAccess>(gpio: &Gpio<R>, cmd: &Command<'_>) -> CommandResult {
    let (pins, values) = paired_args(cmd, level_byte)?;
    gpio.write(pins.as_slice(), values.as_slice())
}

/// `digitalRead(pins)`, reporting `(pins, values)` in the request's shape
pub fn digital_read<R, K>(gpio: &Gpio<R>, cmd: &Command<'_>, sink: &mut K) -> CommandResult
where
    R: RegisterAccess,
    K: ReportSink,
{
    let pins = pins_arg(cmd)?;
    let values = gpio.read(pins.as_slice())?;

    let mut report = Report::new(Function::DigitalRead, cmd.tag);
    match pins {
        Items::One([pin]) => {
            report.push_int(i32::from(pin))?;
            report.push_int(values.first().copied().map_or(0, i32::from))?;
        }
        Items::Many(pins) => {
            report.push_bytes(pins)?;
            report.push_bytes(&values)?;
        }
    }
    sink.send(report);
    Ok(())
}

/// `pulseIn(pin, level, timeout_us)`, reporting the duration (0 on timeout)
pub fn pulse_in<R, C, K>(
    gpio: &Gpio<R>,
    clock: &C,
    cmd: &Command<'_>,
    sink: &mut K,
) -> CommandResult
where
    R: RegisterAccess,
    C: MonotonicClock,
    K: ReportSink,
{
    let [pin, level, timeout] = int_args::<3>(cmd)?;
    let pin = byte(pin)?;
    let timeout_us = micros(timeout)?;

    let duration = pulse::measure(gpio, clock, pin, Level::from_int(level), timeout_us)?;

    let mut report = Report::new(Function::PulseIn, cmd.tag);
    report.push_int(i32::try_from(duration).unwrap_or(i32::MAX))?;
    sink.send(report);
    Ok(())
}

/// `attachInterrupt(channel, pin, mode, quiet_us)`
pub fn attach_interrupt<R, L, S>(
    irq: &mut InterruptController<R, L>,
    scheduler: &mut S,
    cmd: &Command<'_>,
) -> CommandResult
where
    R: RegisterAccess,
    L: InterruptLines,
    S: RearmScheduler,
{
    let [channel, pin, mode, quiet] = int_args::<4>(cmd)?;
    let channel = byte(channel)?;
    let binding = Binding {
        pin: byte(pin)?,
        mode: byte(mode)
            .ok()
            .and_then(InterruptMode::from_code)
            .ok_or(CommandError::ArgValue)?,
        quiet_us: micros(quiet)?,
        tag: cmd.tag,
    };
    irq.attach(channel, binding, scheduler)
}

/// `detachInterrupt(channel)`
pub fn detach_interrupt<R, L, S>(
    irq: &mut InterruptController<R, L>,
    scheduler: &mut S,
    cmd: &Command<'_>,
) -> CommandResult
where
    R: RegisterAccess,
    L: InterruptLines,
    S: RearmScheduler,
{
    let [channel] = int_args::<1>(cmd)?;
    irq.detach(byte(channel)?, scheduler)
}
