//! Deferred interrupt re-arm
//!
//! After a pin interrupt fires, its channel stays masked for the channel's
//! quiet period. The interrupt controller asks a [`RearmScheduler`] for a
//! one-shot callback; the firmware polls a [`RearmQueue`] and hands due
//! channels back to [`InterruptController::rearm`].
//!
//! [`InterruptController::rearm`]: crate::interrupt::InterruptController::rearm

use uper_hal::MonotonicClock;

use crate::interrupt::CHANNEL_COUNT;

/// One-shot per-channel timer
pub trait RearmScheduler {
    /// Request a re-arm of `channel` after `delay_us`
    ///
    /// Replaces any request already pending for the channel.
    fn schedule(&mut self, channel: u8, delay_us: u32);

    /// Drop any pending request for `channel`
    fn cancel(&mut self, channel: u8);
}

impl<T: RearmScheduler + ?Sized> RearmScheduler for &mut T {
    fn schedule(&mut self, channel: u8, delay_us: u32) {
        (**self).schedule(channel, delay_us)
    }

    fn cancel(&mut self, channel: u8) {
        (**self).cancel(channel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    since_us: u32,
    delay_us: u32,
}

/// Polled re-arm timer with one slot per channel
///
/// A slot holds at most one request, so a channel can never have two
/// re-arms in flight.
pub struct RearmQueue<C> {
    clock: C,
    slots: [Option<Pending>; CHANNEL_COUNT],
}

impl<C: MonotonicClock> RearmQueue<C> {
    pub const fn new(clock: C) -> Self {
        Self {
            clock,
            slots: [None; CHANNEL_COUNT],
        }
    }

    /// Take one channel whose quiet period has elapsed
    ///
    /// Call repeatedly until it returns `None`.
    pub fn take_due(&mut self) -> Option<u8> {
        let clock = &self.clock;
        let (channel, slot) = self.slots.iter_mut().enumerate().find(|(_, slot)| {
            slot.map_or(false, |p| clock.elapsed_us(p.since_us) >= p.delay_us)
        })?;
        *slot = None;
        Some(channel as u8)
    }

    pub fn is_pending(&self, channel: u8) -> bool {
        self.slots
            .get(usize::from(channel))
            .map_or(false, Option::is_some)
    }
}

impl<C: MonotonicClock> RearmScheduler for RearmQueue<C> {
    fn schedule(&mut self, channel: u8, delay_us: u32) {
        let since_us = self.clock.now_us();
        if let Some(slot) = self.slots.get_mut(usize::from(channel)) {
            *slot = Some(Pending { since_us, delay_us });
        }
    }

    fn cancel(&mut self, channel: u8) {
        if let Some(slot) = self.slots.get_mut(usize::from(channel)) {
            *slot = None;
        }
    }
}
