//! Pulse timer
//!
//! Blocking measurement of how long a pin holds a level. All three phases
//! share one start timestamp and one timeout budget:
//!
//! 1. wait out a pulse already in progress
//! 2. wait for the pulse to start
//! 3. time the pulse until it ends
//!
//! The result is 0 if the budget ran out at any point.

use uper_hal::{MonotonicClock, RegisterAccess};
use uper_protocol::{CommandError, CommandResult};

use crate::gpio::Gpio;
use crate::pins::{self, Pin};

/// Reference level of the pulse to time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Host level argument: 0 is low, anything else is high
    pub fn from_int(value: i32) -> Self {
        if value == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    fn is_high(self) -> bool {
        self == Level::High
    }
}

/// Measure the next pulse of `level` on logical pin `pin`
///
/// Returns the pulse duration in microseconds, or 0 when `timeout_us`
/// elapsed first.
pub fn measure<R, C>(
    gpio: &Gpio<R>,
    clock: &C,
    pin: u8,
    level: Level,
    timeout_us: u32,
) -> CommandResult<u32>
where
    R: RegisterAccess,
    C: MonotonicClock,
{
    let pin = pins::get(pin).ok_or(CommandError::ArgValue)?;
    Ok(measure_pin(gpio, clock, pin, level, timeout_us))
}

fn measure_pin<R, C>(gpio: &Gpio<R>, clock: &C, pin: &Pin, level: Level, timeout_us: u32) -> u32
where
    R: RegisterAccess,
    C: MonotonicClock,
{
    let at_level = || gpio.is_high(pin) == level.is_high();
    let start = clock.now_us();
    let mut passed = 0;

    let wait_while = |active: bool, passed: &mut u32| {
        while at_level() == active {
            *passed = clock.elapsed_us(start);
            if *passed >= timeout_us {
                break;
            }
        }
    };

    wait_while(true, &mut passed);
    wait_while(false, &mut passed);

    let pulse_start = clock.now_us();
    wait_while(true, &mut passed);
    let duration = clock.elapsed_us(pulse_start);

    if passed < timeout_us {
        trace!("pulse: {} us", duration);
        duration
    } else {
        debug!("pulse: timed out after {} us", passed);
        0
    }
}
