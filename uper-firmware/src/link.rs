//! Host link
//!
//! Frames are postcard-encoded messages, COBS-escaped and terminated by a
//! zero byte, on USART0. This is the board's transport only; the GPIO core
//! sees decoded [`Command`]s and a [`ReportSink`].
//!
//! [`Command`]: uper_protocol::Command

use defmt::warn;
use heapless::Vec;
use uper_hal::{UartRx, UartTx};
use uper_protocol::{Report, ReportSink};

/// Largest encoded frame in either direction
pub const MAX_FRAME: usize = 160;

const DELIMITER: u8 = 0x00;

/// Error from the host link
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum LinkError {
    /// UART receive or transmit failed
    Uart,
    /// Report did not fit a frame
    Encode,
}

/// Frame-level host link over a UART
pub struct HostLink<U> {
    uart: U,
    rx: Vec<u8, MAX_FRAME>,
    /// Set after an error until the next delimiter
    discarding: bool,
}

impl<U: UartRx + UartTx> HostLink<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            rx: Vec::new(),
            discarding: false,
        }
    }

    /// Collect received bytes; copy a complete frame into `out`
    ///
    /// Returns the frame length once a delimiter ends a good frame. Never
    /// blocks.
    pub fn poll_frame(&mut self, out: &mut [u8]) -> Option<usize> {
        loop {
            let byte = match self.uart.try_read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => return None,
                Err(_) => {
                    warn!("link: receive error, dropping frame");
                    self.drop_frame();
                    continue;
                }
            };

            if byte != DELIMITER {
                if !self.discarding && self.rx.push(byte).is_err() {
                    warn!("link: frame exceeds {} bytes, dropping", MAX_FRAME);
                    self.drop_frame();
                }
                continue;
            }

            let complete = !self.discarding && !self.rx.is_empty();
            let len = self.rx.len();
            if complete {
                if let Some(dst) = out.get_mut(..len) {
                    dst.copy_from_slice(&self.rx);
                }
            }
            self.rx.clear();
            self.discarding = false;
            if complete && len <= out.len() {
                return Some(len);
            }
        }
    }

    fn drop_frame(&mut self) {
        self.rx.clear();
        self.discarding = true;
    }

    /// Encode and transmit one report
    pub fn send_report(&mut self, report: &Report) -> Result<(), LinkError> {
        let mut buf = [0u8; MAX_FRAME];
        let frame = postcard::to_slice_cobs(report, &mut buf).map_err(|_| LinkError::Encode)?;
        self.uart
            .write_blocking(frame)
            .map_err(|_| LinkError::Uart)
    }
}

impl<U: UartRx + UartTx> ReportSink for HostLink<U> {
    fn send(&mut self, report: Report) {
        if let Err(e) = self.send_report(&report) {
            warn!("link: {} report dropped: {}", report.name(), e);
        }
    }
}
