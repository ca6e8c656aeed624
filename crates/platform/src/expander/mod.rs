//! GPIO expanders over I2C
//!
//! Expanders are read in bulk: [`GpioExpander::refresh`] pulls every pin
//! state in one bus transaction and [`GpioExpander::read`] answers from that
//! cache. Call `refresh` once per poll loop before updating the inputs that
//! sit on the expander.
//!
//! Individual pins are handed to the debouncer as [`ExpanderPin`], which
//! implements `embedded_hal::digital::InputPin` over a shared
//! `RefCell<impl GpioExpander>`.

mod mcp23017;
mod pcf857x;
mod pin;

pub use mcp23017::Mcp23017;
pub use pcf857x::{Pcf8574, Pcf8575, Pcf857x};
pub use pin::ExpanderPin;

use crate::error::ExpanderError;
use crate::gpio::PinMode;

/// A bank of GPIO pins behind a bus.
pub trait GpioExpander {
    /// Initialise the chip. Call once before any other method.
    fn begin(&mut self) -> Result<(), ExpanderError>;

    /// Read every pin into the cache.
    fn refresh(&mut self) -> Result<(), ExpanderError>;

    /// Configure `pin` in `mode`.
    fn attach_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), ExpanderError>;

    /// Cached level of `pin` from the last [`refresh`](GpioExpander::refresh).
    fn read(&self, pin: u8) -> Result<bool, ExpanderError>;

    /// Drive `pin` to `high`.
    fn write(&mut self, pin: u8, high: bool) -> Result<(), ExpanderError> {
        let _ = (pin, high);
        Err(ExpanderError::WriteUnsupported)
    }

    /// Whether [`write`](GpioExpander::write) is supported.
    fn can_write(&self) -> bool {
        false
    }

    /// Number of pins on the chip.
    fn pin_count(&self) -> u8;
}

/// Bit mask for `pin` on a chip with `count` pins.
pub(crate) fn pin_mask(pin: u8, count: u8) -> Result<u16, ExpanderError> {
    if pin >= count {
        return Err(ExpanderError::PinOutOfRange(pin));
    }
    1u16.checked_shl(u32::from(pin))
        .ok_or(ExpanderError::PinOutOfRange(pin))
}
