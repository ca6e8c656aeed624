//! Platform error types

use embedded_hal::i2c::ErrorKind;

/// Error from a GPIO expander or a pin routed through one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExpanderError {
    /// The I2C transaction failed.
    Bus(ErrorKind),
    /// The pin number is past the chip's pin count.
    PinOutOfRange(u8),
    /// The chip driver cannot drive outputs.
    WriteUnsupported,
    /// The expander is already borrowed (re-entrant access from a callback).
    Busy,
}

impl ExpanderError {
    /// Map a bus error into [`ExpanderError::Bus`].
    pub fn bus<E: embedded_hal::i2c::Error>(e: &E) -> Self {
        Self::Bus(e.kind())
    }
}

impl core::fmt::Display for ExpanderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(kind) => write!(f, "expander bus error: {kind}"),
            Self::PinOutOfRange(pin) => write!(f, "expander pin {pin} out of range"),
            Self::WriteUnsupported => f.write_str("expander does not support writes"),
            Self::Busy => f.write_str("expander is busy"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ExpanderError {}

impl embedded_hal::digital::Error for ExpanderError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
