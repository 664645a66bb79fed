//! Command dispatch
//!
//! Routes a decoded command to its handler. Pin configuration, digital I/O
//! and pulse measurement run in the foreground without locking; attach and
//! detach take the shared interrupt state for the duration of the call.

use defmt::{debug, warn};
use uper_core::commands;
use uper_core::Gpio;
use uper_hal_lpc11u::{Ct32Clock, Mmio};
use uper_protocol::{result_code, Command, CommandError, CommandResult, Function, ReportSink};

use crate::shared::with_shared;

/// Foreground-owned hardware
pub struct Foreground {
    pub gpio: Gpio<Mmio>,
    pub clock: Ct32Clock,
}

/// Run one command; replies go to `sink`
pub fn dispatch<K: ReportSink>(fg: &Foreground, cmd: &Command<'_>, sink: &mut K) {
    let Some(function) = cmd.function() else {
        warn!("dispatch: unknown function id {}", cmd.function);
        return;
    };

    let result = run(fg, function, cmd, sink);
    // Result codes are logged only; the reply format is the transport's concern
    match result {
        Ok(()) => debug!("{}: ok", function.name()),
        Err(e) => warn!(
            "{}: rejected with {} (code {})",
            function.name(),
            e,
            result_code(&result)
        ),
    }
}

fn run<K: ReportSink>(
    fg: &Foreground,
    function: Function,
    cmd: &Command<'_>,
    sink: &mut K,
) -> CommandResult {
    match function {
        Function::SetPrimary => commands::set_primary(&fg.gpio, cmd),
        Function::SetSecondary => commands::set_secondary(&fg.gpio, cmd),
        Function::PinMode => commands::pin_mode(&fg.gpio, cmd),
        Function::DigitalWrite => commands::digital_write(&fg.gpio, cmd),
        Function::DigitalRead => commands::digital_read(&fg.gpio, cmd, sink),
        Function::PulseIn => commands::pulse_in(&fg.gpio, &fg.clock, cmd, sink),
        Function::AttachInterrupt => with_shared(|shared| {
            commands::attach_interrupt(&mut shared.irq, &mut shared.rearm, cmd)
        }),
        Function::DetachInterrupt => with_shared(|shared| {
            commands::detach_interrupt(&mut shared.irq, &mut shared.rearm, cmd)
        }),
        // Report only
        Function::Interrupt => Err(CommandError::ArgValue),
    }
}
