//! Simulated LPC11U hardware for host tests
//!
//! [`SimRegisters`] models the registers the core touches with their
//! hardware side effects: SET/CLR write-one registers, write-one-to-clear
//! edge flags, edge latching on pin transitions and a derived `IST`.
//! Input levels are driven from the test with [`SimRegisters::drive`].
//! Unmapped addresses read as zero and ignore writes.

use core::cell::{Cell, RefCell};

use heapless::Vec;
use uper_hal::{InterruptLines, MonotonicClock, Register, RegisterAccess};
use uper_protocol::{Report, ReportSink};

use crate::interrupt::CHANNEL_COUNT;
use crate::pins;
use crate::regs::{gpio, iocon, pint, syscon};

const PORTS: usize = 2;

/// Complete simulated register state
///
/// Compare two snapshots to check that an operation touched nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimState {
    iocon: [[u32; 32]; PORTS],
    dir: [u32; PORTS],
    latch: [u32; PORTS],
    pads: [u32; PORTS],
    pintsel: [u32; CHANNEL_COUNT],
    isel: u32,
    ienr: u32,
    ienf: u32,
    rise: u32,
    fall: u32,
}

impl SimState {
    /// Level seen on `PIN[port]`: outputs read their latch, inputs the pad
    fn levels(&self, port: usize) -> u32 {
        (self.latch[port] & self.dir[port]) | (self.pads[port] & !self.dir[port])
    }

    fn channel_level(&self, channel: usize) -> bool {
        let id = self.pintsel[channel];
        let (port, bit) = if id < 24 { (0, id) } else { (1, id - 24) };
        bit < 32 && self.levels(port) & (1 << bit) != 0
    }

    fn ist(&self) -> u32 {
        let edge = ((self.rise & self.ienr) | (self.fall & self.ienf)) & !self.isel;
        let mut level = 0;
        for channel in 0..CHANNEL_COUNT {
            let bit = 1 << channel;
            if self.isel & self.ienr & bit != 0 {
                let active_high = self.ienf & bit != 0;
                if self.channel_level(channel) == active_high {
                    level |= bit;
                }
            }
        }
        edge | level
    }

    /// Latch edges for edge-sensitive channels whose pin changed
    fn latch_edges(&mut self, before: [u32; PORTS]) {
        for channel in 0..CHANNEL_COUNT {
            let bit = 1 << channel;
            if self.isel & bit != 0 {
                continue;
            }
            let id = self.pintsel[channel];
            let (port, pin_bit) = if id < 24 { (0, id) } else { (1, id - 24) };
            if pin_bit >= 32 {
                continue;
            }
            let mask = 1 << pin_bit;
            let was = before[port] & mask != 0;
            let now = self.levels(port) & mask != 0;
            match (was, now) {
                (false, true) => self.rise |= bit,
                (true, false) => self.fall |= bit,
                _ => {}
            }
        }
    }
}

/// Simulated register file
#[derive(Debug, Default)]
pub struct SimRegisters {
    state: RefCell<SimState>,
}

impl SimRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the full register state
    pub fn snapshot(&self) -> SimState {
        self.state.borrow().clone()
    }

    /// Drive the external level of a logical pin
    pub fn drive(&self, pin: u8, high: bool) {
        let Some(pin) = pins::get(pin) else {
            return;
        };
        let mut state = self.state.borrow_mut();
        let before = [state.levels(0), state.levels(1)];
        let port = usize::from(pin.port);
        if high {
            state.pads[port] |= pin.mask();
        } else {
            state.pads[port] &= !pin.mask();
        }
        state.latch_edges(before);
    }

    fn with_port_write(&self, f: impl FnOnce(&mut SimState)) {
        let mut state = self.state.borrow_mut();
        let before = [state.levels(0), state.levels(1)];
        f(&mut state);
        state.latch_edges(before);
    }
}

/// Decoded register address
enum Target {
    Iocon(usize, usize),
    Dir(usize),
    Pin(usize),
    Set(usize),
    Clr(usize),
    Pintsel(usize),
    Isel,
    Ienr,
    Sienr,
    Cienr,
    Ienf,
    Sienf,
    Cienf,
    Rise,
    Fall,
    Ist,
    Unmapped,
}

fn decode(reg: Register) -> Target {
    let addr = reg.addr();
    for port in 0..PORTS as u8 {
        let p = usize::from(port);
        if addr == gpio::dir(port).addr() {
            return Target::Dir(p);
        }
        if addr == gpio::pin(port).addr() {
            return Target::Pin(p);
        }
        if addr == gpio::set(port).addr() {
            return Target::Set(p);
        }
        if addr == gpio::clr(port).addr() {
            return Target::Clr(p);
        }
        let first = iocon::pio(port, 0).addr();
        if (first..first + 32 * 4).contains(&addr) && (port == 1 || addr < iocon::pio(1, 0).addr())
        {
            return Target::Iocon(p, ((addr - first) / 4) as usize);
        }
    }
    for channel in 0..CHANNEL_COUNT as u8 {
        if addr == syscon::pintsel(channel).addr() {
            return Target::Pintsel(usize::from(channel));
        }
    }
    match reg {
        pint::ISEL => Target::Isel,
        pint::IENR => Target::Ienr,
        pint::SIENR => Target::Sienr,
        pint::CIENR => Target::Cienr,
        pint::IENF => Target::Ienf,
        pint::SIENF => Target::Sienf,
        pint::CIENF => Target::Cienf,
        pint::RISE => Target::Rise,
        pint::FALL => Target::Fall,
        pint::IST => Target::Ist,
        _ => Target::Unmapped,
    }
}

impl RegisterAccess for SimRegisters {
    fn read(&self, reg: Register) -> u32 {
        let state = self.state.borrow();
        match decode(reg) {
            Target::Iocon(port, bit) => state.iocon[port][bit],
            Target::Dir(port) => state.dir[port],
            Target::Pin(port) => state.levels(port),
            Target::Set(port) => state.latch[port],
            Target::Clr(_) => 0,
            Target::Pintsel(channel) => state.pintsel[channel],
            Target::Isel => state.isel,
            Target::Ienr | Target::Sienr | Target::Cienr => state.ienr,
            Target::Ienf | Target::Sienf | Target::Cienf => state.ienf,
            Target::Rise => state.rise,
            Target::Fall => state.fall,
            Target::Ist => state.ist(),
            Target::Unmapped => 0,
        }
    }

    fn write(&self, reg: Register, value: u32) {
        match decode(reg) {
            Target::Iocon(port, bit) => self.state.borrow_mut().iocon[port][bit] = value,
            Target::Dir(port) => self.with_port_write(|s| s.dir[port] = value),
            Target::Pin(port) => self.with_port_write(|s| s.latch[port] = value),
            Target::Set(port) => self.with_port_write(|s| s.latch[port] |= value),
            Target::Clr(port) => self.with_port_write(|s| s.latch[port] &= !value),
            Target::Pintsel(channel) => self.state.borrow_mut().pintsel[channel] = value,
            Target::Isel => self.state.borrow_mut().isel = value,
            Target::Ienr => self.state.borrow_mut().ienr = value,
            Target::Sienr => self.state.borrow_mut().ienr |= value,
            Target::Cienr => self.state.borrow_mut().ienr &= !value,
            Target::Ienf => self.state.borrow_mut().ienf = value,
            Target::Sienf => self.state.borrow_mut().ienf |= value,
            Target::Cienf => self.state.borrow_mut().ienf &= !value,
            Target::Rise => self.state.borrow_mut().rise &= !value,
            Target::Fall => self.state.borrow_mut().fall &= !value,
            Target::Ist => {
                let mut state = self.state.borrow_mut();
                let edge = value & !state.isel;
                state.rise &= !edge;
                state.fall &= !edge;
            }
            Target::Unmapped => {}
        }
    }
}

/// Simulated NVIC lines
#[derive(Debug, Default)]
pub struct SimLines {
    enabled: Cell<u32>,
    priority: Cell<[u8; 32]>,
}

impl SimLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn priority(&self, line: u8) -> u8 {
        self.priority.get()[usize::from(line) % 32]
    }
}

impl InterruptLines for SimLines {
    fn disable(&self, line: u8) {
        self.enabled.set(self.enabled.get() & !(1 << (line % 32)));
    }

    fn enable(&self, line: u8) {
        self.enabled.set(self.enabled.get() | (1 << (line % 32)));
    }

    fn set_priority(&self, line: u8, priority: u8) {
        let mut table = self.priority.get();
        table[usize::from(line) % 32] = priority;
        self.priority.set(table);
    }

    fn is_enabled(&self, line: u8) -> bool {
        self.enabled.get() & (1 << (line % 32)) != 0
    }
}

/// Lowest channel whose interrupt the NVIC would take right now
pub fn next_pending(regs: &SimRegisters, lines: &SimLines) -> Option<u8> {
    let ist = regs.read(pint::IST);
    (0..CHANNEL_COUNT as u8)
        .find(|&channel| ist & (1 << channel) != 0 && lines.is_enabled(crate::irq_line(channel)))
}

/// Manually advanced microsecond clock
///
/// With a nonzero step, every read advances time, so busy-wait loops
/// terminate.
#[derive(Debug, Default)]
pub struct SimClock {
    now: Cell<u32>,
    step: Cell<u32>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock that advances `step` microseconds per read
    pub fn stepping(step: u32) -> Self {
        let clock = Self::new();
        clock.step.set(step);
        clock
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }

    /// Current time without stepping
    pub fn peek(&self) -> u32 {
        self.now.get()
    }
}

impl MonotonicClock for SimClock {
    fn now_us(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step.get()));
        now
    }
}

/// Report sink that keeps everything it is sent
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub reports: Vec<Report, 16>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Report, 16> {
        core::mem::take(&mut self.reports)
    }
}

impl ReportSink for RecordingSink {
    fn send(&mut self, report: Report) {
        // A full recorder drops; tests never send that many
        let _ = self.reports.push(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::PINS;

    #[test]
    fn test_set_clr_only_touch_written_bits() {
        let sim = SimRegisters::new();
        sim.write(gpio::dir(0), 0b11);
        sim.write(gpio::set(0), 0b01);
        sim.write(gpio::set(0), 0b10);
        sim.write(gpio::clr(0), 0b01);

        assert_eq!(sim.read(gpio::pin(0)), 0b10);
    }

    #[test]
    fn test_input_pin_reads_pad() {
        let sim = SimRegisters::new();
        sim.drive(0, true);

        assert!(PINS[0].is_high(&sim));
        sim.write(gpio::set(0), PINS[0].mask() << 1);
        assert_eq!(sim.read(gpio::pin(0)), PINS[0].mask());
    }

    #[test]
    fn test_edges_latch_and_clear() {
        let sim = SimRegisters::new();
        sim.write(syscon::pintsel(3), u32::from(PINS[10].physical_id()));
        sim.write(pint::SIENR, 1 << 3);

        sim.drive(10, true);
        assert_eq!(sim.read(pint::RISE), 1 << 3);
        assert_eq!(sim.read(pint::IST), 1 << 3);

        sim.write(pint::RISE, 1 << 3);
        assert_eq!(sim.read(pint::IST), 0);

        sim.drive(10, false);
        assert_eq!(sim.read(pint::FALL), 1 << 3);
        // Falling edges are not enabled
        assert_eq!(sim.read(pint::IST), 0);
    }

    #[test]
    fn test_level_status_follows_pin() {
        let sim = SimRegisters::new();
        sim.write(syscon::pintsel(0), u32::from(PINS[1].physical_id()));
        sim.write(pint::ISEL, 1);
        sim.write(pint::SIENR, 1);
        sim.write(pint::SIENF, 1);

        assert_eq!(sim.read(pint::IST), 0);
        sim.drive(1, true);
        assert_eq!(sim.read(pint::IST), 1);
        sim.drive(1, false);
        assert_eq!(sim.read(pint::IST), 0);
    }

    #[test]
    fn test_unmapped_reads_zero() {
        let sim = SimRegisters::new();
        let reg = Register::at(0x1000_0000);
        sim.write(reg, 7);
        assert_eq!(sim.read(reg), 0);
    }

    #[test]
    fn test_stepping_clock() {
        let clock = SimClock::stepping(3);
        assert_eq!(clock.now_us(), 0);
        assert_eq!(clock.now_us(), 3);
        clock.advance(10);
        assert_eq!(clock.peek(), 16);
    }
}
