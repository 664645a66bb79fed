//! Pin table
//!
//! Maps each logical pin index (as the host sees it) to its physical
//! `PIOport_bit`, its IOCON register and its two mux function codes. Mux
//! codes are written into `FUNC[2:0] | ADMODE`: `0x80` is the plain digital
//! GPIO function, `0x01`/`0x02` select an analog input.

use uper_hal::{Register, RegisterAccess};

use crate::regs::{gpio, iocon};

/// Number of logical pins
pub const PIN_COUNT: usize = 37;

/// Port 0 has pins `PIO0_0..=PIO0_23`; physical ids from 24 up are port 1
const PORT1_FIRST_ID: u8 = 24;

/// One logical pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pin {
    pub port: u8,
    pub bit: u8,
    /// IOCON configuration register
    pub iocon: Register,
    /// Mux code restoring the GPIO function
    pub primary: u8,
    /// Mux code selecting the peripheral function
    pub secondary: u8,
}

impl Pin {
    const fn new(port: u8, bit: u8, primary: u8, secondary: u8) -> Self {
        Self {
            port,
            bit,
            iocon: iocon::pio(port, bit),
            primary,
            secondary,
        }
    }

    /// Bit mask of this pin within its port registers
    pub const fn mask(&self) -> u32 {
        1 << self.bit
    }

    /// Physical pin id as used by `PINTSEL`
    pub const fn physical_id(&self) -> u8 {
        if self.port == 0 {
            self.bit
        } else {
            PORT1_FIRST_ID + self.bit
        }
    }

    /// Sample the pad level
    pub fn is_high<R: RegisterAccess>(&self, regs: &R) -> bool {
        regs.any_set(gpio::pin(self.port), self.mask())
    }
}

const G: u8 = 0x80;
const F1: u8 = 0x81;
const F2: u8 = 0x82;
const AD1: u8 = 0x01;
const AD2: u8 = 0x02;

/// Logical pin table, indexed by pin number
pub static PINS: [Pin; PIN_COUNT] = [
    Pin::new(0, 20, G, G),
    Pin::new(0, 2, G, G),
    Pin::new(1, 26, G, F1),  // CT32B0_MAT2
    Pin::new(1, 27, G, G),
    Pin::new(1, 20, G, F2),  // SCK1
    Pin::new(0, 21, G, F2),  // MOSI1
    Pin::new(1, 23, G, G),
    Pin::new(1, 24, G, F1),  // CT32B0_MAT0
    Pin::new(0, 7, G, G),
    Pin::new(1, 28, G, G),
    Pin::new(1, 31, G, G),
    Pin::new(1, 21, G, F2),  // MISO1
    Pin::new(0, 8, G, F1),   // MISO0
    Pin::new(0, 9, G, F1),   // MOSI0
    Pin::new(0, 10, F1, F2), // SWCLK; SCK0
    Pin::new(1, 29, G, G),
    Pin::new(1, 19, G, G),
    Pin::new(1, 25, G, F1),  // CT32B0_MAT1
    Pin::new(1, 16, G, G),
    Pin::new(0, 19, G, F1),  // TXD
    Pin::new(0, 18, G, F1),  // RXD
    Pin::new(0, 17, G, G),
    Pin::new(1, 15, G, F2),  // PWM16_2
    Pin::new(0, 23, G, AD1), // AD7
    Pin::new(0, 22, G, AD1), // AD6
    Pin::new(0, 16, G, AD1), // AD5
    Pin::new(0, 15, F1, AD2), // SWDIO; AD4
    Pin::new(1, 22, G, G),
    Pin::new(1, 14, G, F2),  // PWM16_1
    Pin::new(1, 13, G, F2),  // PWM16_0
    Pin::new(0, 14, F1, AD2), // TRST; AD3
    Pin::new(0, 13, F1, AD2), // TDO; AD2
    Pin::new(0, 12, F1, AD2), // TMS; AD1
    Pin::new(0, 11, F1, AD2), // TDI; AD0
    Pin::new(0, 4, G, F1),   // SCL
    Pin::new(0, 5, G, F1),   // SDA
    Pin::new(0, 1, G, G),
];

/// Look up a logical pin
pub fn get(index: u8) -> Option<&'static Pin> {
    PINS.get(usize::from(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(PINS.len(), PIN_COUNT);
        assert!(get(PIN_COUNT as u8).is_none());
        assert!(get(0xFF).is_none());
    }

    #[test]
    fn test_physical_ids_are_unique() {
        for (i, a) in PINS.iter().enumerate() {
            for b in &PINS[i + 1..] {
                assert_ne!(a.physical_id(), b.physical_id());
            }
        }
    }

    #[test]
    fn test_physical_id_encoding() {
        // Pin 0 is PIO0_20, pin 2 is PIO1_26
        assert_eq!(PINS[0].physical_id(), 20);
        assert_eq!(PINS[2].physical_id(), 50);
    }

    #[test]
    fn test_iocon_register_matches_port() {
        assert_eq!(PINS[1].iocon.addr(), 0x4004_4008);
        assert_eq!(PINS[4].iocon.addr(), 0x4004_4060 + 20 * 4);
    }

    #[test]
    fn test_debug_pins_need_function_one_for_gpio() {
        for index in [14, 26, 30, 31, 32, 33] {
            assert_eq!(PINS[index].primary, 0x81);
        }
        assert_eq!(PINS.iter().filter(|p| p.primary == 0x81).count(), 6);
    }

    #[test]
    fn test_mux_codes_fit_function_field() {
        for pin in PINS.iter() {
            assert_eq!(u32::from(pin.primary) & !iocon::FUNC_MASK, 0);
            assert_eq!(u32::from(pin.secondary) & !iocon::FUNC_MASK, 0);
        }
    }
}
