//! GPIO subsystem configuration

/// Runtime settings for the GPIO core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GpioConfig {
    /// NVIC priority for every pin interrupt line (3 = lowest on a 2-bit NVIC)
    pub interrupt_priority: u8,
    /// Restore every pin to its primary function at boot
    ///
    /// Disable to keep SWD/JTAG pins on their debug function.
    pub init_primary_on_boot: bool,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            interrupt_priority: 3,
            init_primary_on_boot: true,
        }
    }
}
