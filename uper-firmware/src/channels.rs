//! Interrupt-to-foreground event queue
//!
//! Pin interrupt reports are produced in interrupt context and sent to the
//! host by the main loop.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use portable_atomic::{AtomicU32, Ordering};
use uper_protocol::{Report, ReportSink};

/// Channel capacity for interrupt event reports
const EVENT_CHANNEL_SIZE: usize = 8;

/// Interrupt event reports waiting for the host link
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Report, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Events dropped because the queue was full
static DROPPED_EVENTS: AtomicU32 = AtomicU32::new(0);

/// Report sink used from interrupt context
pub struct EventSink;

impl ReportSink for EventSink {
    fn send(&mut self, report: Report) {
        if EVENT_CHANNEL.try_send(report).is_err() {
            DROPPED_EVENTS.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Take and reset the dropped-event count
pub fn take_dropped() -> u32 {
    DROPPED_EVENTS.swap(0, Ordering::Relaxed)
}
