//! Function identifiers
//!
//! Each host-callable function has a stable numeric id and a name. Reports
//! reuse the id of the function that produced them, except interrupt events
//! which have their own id.

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

/// Host-visible functions implemented by the GPIO core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Function {
    /// Restore pins to their primary (GPIO) function
    SetPrimary = 1,
    /// Switch pins to their secondary (peripheral) function
    SetSecondary = 2,
    /// Set direction and pull resistors
    PinMode = 3,
    /// Drive output levels
    DigitalWrite = 4,
    /// Sample input levels
    DigitalRead = 5,
    /// Bind an interrupt channel to a pin
    AttachInterrupt = 6,
    /// Mask an interrupt channel
    DetachInterrupt = 7,
    /// Interrupt event (report only)
    Interrupt = 8,
    /// Measure a pulse duration
    PulseIn = 9,
}

impl Function {
    /// Look up a function by its wire id
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Function::SetPrimary),
            2 => Some(Function::SetSecondary),
            3 => Some(Function::PinMode),
            4 => Some(Function::DigitalWrite),
            5 => Some(Function::DigitalRead),
            6 => Some(Function::AttachInterrupt),
            7 => Some(Function::DetachInterrupt),
            8 => Some(Function::Interrupt),
            9 => Some(Function::PulseIn),
            _ => None,
        }
    }

    /// Wire id
    pub fn id(self) -> u8 {
        self as u8
    }

    /// Function name as the host library knows it
    pub fn name(self) -> &'static str {
        match self {
            Function::SetPrimary => "setPrimary",
            Function::SetSecondary => "setSecondary",
            Function::PinMode => "pinMode",
            Function::DigitalWrite => "digitalWrite",
            Function::DigitalRead => "digitalRead",
            Function::AttachInterrupt => "attachInterrupt",
            Function::DetachInterrupt => "detachInterrupt",
            Function::Interrupt => "interrupt",
            Function::PulseIn => "pulseIn",
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for Function {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.id())
    }
}
