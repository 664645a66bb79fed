//! Polled USART0 driver

use uper_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use uper_hal::{Register, RegisterAccess, UartRx, UartTx};

use crate::syscon;
use crate::Mmio;

const USART0: u32 = 0x4000_8000;
/// RBR (read) / THR (write) / DLL (DLAB = 1)
const DATA: Register = Register::at(USART0);
/// DLM (DLAB = 1)
const DLM: Register = Register::at(USART0 + 0x04);
const FCR: Register = Register::at(USART0 + 0x08);
const LCR: Register = Register::at(USART0 + 0x0C);
const LSR: Register = Register::at(USART0 + 0x14);
const FDR: Register = Register::at(USART0 + 0x28);

const LCR_DLAB: u32 = 1 << 7;
const FCR_ENABLE_RESET: u32 = 0x07;

const LSR_RDR: u32 = 1 << 0;
const LSR_OE: u32 = 1 << 1;
const LSR_PE: u32 = 1 << 2;
const LSR_FE: u32 = 1 << 3;
const LSR_THRE: u32 = 1 << 5;
const LSR_TEMT: u32 = 1 << 6;

/// IOCON registers of PIO0_18 (RXD) and PIO0_19 (TXD)
const LINK_PINS: [Register; 2] = [Register::at(0x4004_4048), Register::at(0x4004_404C)];
/// `FUNC[2:0]` plus `ADMODE`
const IOCON_FUNC_MASK: u32 = (1 << 7) | 0x7;
/// RXD / TXD pin function
const FUNC_USART: u32 = 0x1;

/// Error from USART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UsartError {
    /// Framing error
    Framing,
    /// Overrun error
    Overrun,
    /// Parity error
    Parity,
}

impl UsartError {
    fn from_lsr(lsr: u32) -> Option<Self> {
        if lsr & LSR_OE != 0 {
            Some(UsartError::Overrun)
        } else if lsr & LSR_FE != 0 {
            Some(UsartError::Framing)
        } else if lsr & LSR_PE != 0 {
            Some(UsartError::Parity)
        } else {
            None
        }
    }
}

/// USART0 on PIO0_18 (RXD) / PIO0_19 (TXD)
#[derive(Debug)]
pub struct Usart {
    mmio: Mmio,
}

impl Usart {
    /// Route the pins, clock the block and program the line format
    pub fn new(mmio: Mmio, config: &UartConfig, system_clock_hz: u32) -> Self {
        for pin in LINK_PINS {
            mmio.modify(pin, |v| (v & !IOCON_FUNC_MASK) | FUNC_USART);
        }
        syscon::enable_clocks(mmio, syscon::CLK_USART);
        mmio.write(syscon::UARTCLKDIV, 1);

        let divisor = BaudDivisor::search(system_clock_hz, config.baudrate);
        let format = line_format(config);
        mmio.write(LCR, LCR_DLAB | format);
        mmio.write(DATA, divisor.latch & 0xFF);
        mmio.write(DLM, (divisor.latch >> 8) & 0xFF);
        mmio.write(FDR, (divisor.mul << 4) | divisor.div_add);
        mmio.write(LCR, format);
        mmio.write(FCR, FCR_ENABLE_RESET);

        Self { mmio }
    }
}

/// Divisor latch plus fractional divider
///
/// baud = pclk / (16 * latch * (1 + div_add / mul))
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BaudDivisor {
    latch: u32,
    div_add: u32,
    mul: u32,
}

impl BaudDivisor {
    /// Closest achievable rate over every fractional setting
    fn search(pclk: u32, baudrate: u32) -> Self {
        let pclk = u64::from(pclk);
        let baud = u64::from(baudrate.max(1));
        let mut best = Self {
            latch: 1,
            div_add: 0,
            mul: 1,
        };
        let mut best_error = u64::MAX;

        for mul in 1..=15u64 {
            for div_add in 0..mul {
                let denom = 16 * baud * (mul + div_add);
                let latch = ((pclk * mul + denom / 2) / denom).min(0xFFFF);
                // Fractional divider needs a latch of at least 3
                if latch == 0 || (div_add > 0 && latch < 3) {
                    continue;
                }
                let actual = pclk * mul / (16 * latch * (mul + div_add));
                let error = actual.abs_diff(baud);
                if error < best_error {
                    best_error = error;
                    best = Self {
                        latch: latch as u32,
                        div_add: div_add as u32,
                        mul: mul as u32,
                    };
                }
            }
        }
        best
    }
}

/// LCR word length, stop bit and parity fields
fn line_format(config: &UartConfig) -> u32 {
    let length = match config.data_bits {
        DataBits::Seven => 0b10,
        DataBits::Eight => 0b11,
    };
    let stop = match config.stop_bits {
        StopBits::One => 0,
        StopBits::Two => 1 << 2,
    };
    let parity = match config.parity {
        Parity::None => 0,
        Parity::Odd => 1 << 3,
        Parity::Even => (1 << 3) | (1 << 4),
    };
    length | stop | parity
}

impl UartTx for Usart {
    type Error = UsartError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            while !self.mmio.any_set(LSR, LSR_THRE) {}
            self.mmio.write(DATA, u32::from(byte));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        while !self.mmio.any_set(LSR, LSR_TEMT) {}
        Ok(())
    }
}

impl UartRx for Usart {
    type Error = UsartError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        // Reading LSR clears its error flags
        let lsr = self.mmio.read(LSR);
        if let Some(error) = UsartError::from_lsr(lsr) {
            if lsr & LSR_RDR != 0 {
                // Drop the byte the error belongs to
                let _ = self.mmio.read(DATA);
            }
            return Err(error);
        }
        if lsr & LSR_RDR == 0 {
            return Ok(None);
        }
        Ok(Some((self.mmio.read(DATA) & 0xFF) as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(pclk: u32, d: BaudDivisor) -> u32 {
        pclk * d.mul / (16 * d.latch * (d.mul + d.div_add))
    }

    #[test]
    fn test_divisor_115200_from_irc() {
        let d = BaudDivisor::search(12_000_000, 115_200);
        assert_eq!(
            d,
            BaudDivisor {
                latch: 4,
                div_add: 5,
                mul: 8
            }
        );
        assert_eq!(rate(12_000_000, d), 115_384);
    }

    #[test]
    fn test_divisor_within_one_percent() {
        for baud in [9_600, 19_200, 57_600, 115_200] {
            let d = BaudDivisor::search(12_000_000, baud);
            let error = rate(12_000_000, d).abs_diff(baud);
            assert!(error * 100 < baud, "{} baud off by {}", baud, error);
        }
    }

    #[test]
    fn test_link_pins_are_pio0_18_and_19() {
        // IOCON base + 4 * bit
        assert_eq!(LINK_PINS[0].addr(), 0x4004_4000 + 18 * 4);
        assert_eq!(LINK_PINS[1].addr(), 0x4004_4000 + 19 * 4);
    }

    #[test]
    fn test_line_format_8n1() {
        assert_eq!(line_format(&UartConfig::default()), 0b11);
    }
}
