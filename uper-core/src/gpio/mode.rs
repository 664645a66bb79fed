//! Pin direction and pull resistor modes

use crate::regs::iocon;

/// Host mode code for a pin
///
/// Code 3 is reserved and rejected, as is anything above 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input, no pull resistor
    Input,
    /// Push-pull output
    Output,
    /// Input with pull-down
    InputPullDown,
    /// Input with pull-up
    InputPullUp,
}

impl PinMode {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(PinMode::Input),
            1 => Some(PinMode::Output),
            2 => Some(PinMode::InputPullDown),
            4 => Some(PinMode::InputPullUp),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            PinMode::Input => 0,
            PinMode::Output => 1,
            PinMode::InputPullDown => 2,
            PinMode::InputPullUp => 4,
        }
    }

    /// IOCON `MODE` field value for this mode
    pub fn resistor_bits(self) -> u32 {
        match self {
            PinMode::Input | PinMode::Output => 0,
            PinMode::InputPullDown => iocon::MODE_PULL_DOWN,
            PinMode::InputPullUp => iocon::MODE_PULL_UP,
        }
    }

    pub fn is_output(self) -> bool {
        self == PinMode::Output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_codes() {
        for code in [0, 1, 2, 4] {
            let mode = PinMode::from_code(code).unwrap();
            assert_eq!(mode.code(), code);
        }
    }

    #[test]
    fn test_invalid_codes() {
        assert_eq!(PinMode::from_code(3), None);
        assert_eq!(PinMode::from_code(5), None);
        assert_eq!(PinMode::from_code(0xFF), None);
    }

    #[test]
    fn test_resistor_bits_stay_in_mode_field() {
        for code in [0, 1, 2, 4] {
            let bits = PinMode::from_code(code).unwrap().resistor_bits();
            assert_eq!(bits & !iocon::MODE_MASK, 0);
        }
        assert_eq!(PinMode::InputPullUp.resistor_bits(), 0x10);
    }
}
