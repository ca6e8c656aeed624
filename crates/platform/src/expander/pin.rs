use core::cell::RefCell;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::GpioExpander;
use crate::error::ExpanderError;

/// One pin of a shared expander, usable wherever an `InputPin` is expected.
///
/// Reads come from the expander's cache; the owner refreshes the expander
/// once per poll loop.
pub struct ExpanderPin<'a, E> {
    expander: &'a RefCell<E>,
    pin: u8,
}

impl<'a, E: GpioExpander> ExpanderPin<'a, E> {
    /// Bind `pin` of `expander` without touching the hardware.
    pub fn new(expander: &'a RefCell<E>, pin: u8) -> Self {
        Self { expander, pin }
    }

    /// Bind `pin` and configure it in `mode`.
    pub fn attach(
        expander: &'a RefCell<E>,
        pin: u8,
        mode: crate::gpio::PinMode,
    ) -> Result<Self, ExpanderError> {
        expander
            .try_borrow_mut()
            .map_err(|_| ExpanderError::Busy)?
            .attach_pin(pin, mode)?;
        Ok(Self::new(expander, pin))
    }

    /// Pin number on the expander.
    pub fn pin(&self) -> u8 {
        self.pin
    }
}

impl<E> ErrorType for ExpanderPin<'_, E> {
    type Error = ExpanderError;
}

impl<E: GpioExpander> InputPin for ExpanderPin<'_, E> {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.expander
            .try_borrow()
            .map_err(|_| ExpanderError::Busy)?
            .read(self.pin)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl<E: GpioExpander> OutputPin for ExpanderPin<'_, E> {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.expander
            .try_borrow_mut()
            .map_err(|_| ExpanderError::Busy)?
            .write(self.pin, false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.expander
            .try_borrow_mut()
            .map_err(|_| ExpanderError::Busy)?
            .write(self.pin, true)
    }
}
