//! PCF8574 / PCF8575 quasi-bidirectional expanders
//!
//! These chips have no direction register. Writing a 1 to a pin releases it
//! to the weak pull-up so it can be read as an input; writing a 0 drives it
//! low. The driver keeps the output latch and rewrites it whole.
//!
//! Byte order on the wire: port 0 (P07-P00) first, then port 1 (P17-P10).

use embedded_hal::i2c::I2c;

use super::{pin_mask, GpioExpander};
use crate::config::expander_address;
use crate::error::ExpanderError;
use crate::gpio::PinMode;

/// PCF857x with `PORTS` 8-bit ports.
#[derive(Debug)]
pub struct Pcf857x<I, const PORTS: usize> {
    i2c: I,
    addr: u8,
    latch: u16,
    states: u16,
}

/// 8-pin PCF8574.
pub type Pcf8574<I> = Pcf857x<I, 1>;
/// 16-pin PCF8575.
pub type Pcf8575<I> = Pcf857x<I, 2>;

impl<I: I2c, const PORTS: usize> Pcf857x<I, PORTS> {
    /// Driver at the address set by the A0..A2 straps.
    pub fn new(i2c: I, a0: bool, a1: bool, a2: bool) -> Self {
        Self::with_address(i2c, expander_address(a0, a1, a2))
    }

    /// Driver at an explicit 7-bit address.
    pub fn with_address(i2c: I, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            latch: u16::MAX,
            states: u16::MAX,
        }
    }

    /// 7-bit bus address.
    pub fn address(&self) -> u8 {
        self.addr
    }

    /// All cached pin states, bit n = pin n.
    pub fn states(&self) -> u16 {
        self.states
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn write_latch(&mut self) -> Result<(), ExpanderError> {
        let bytes = self.latch.to_le_bytes();
        let frame = bytes.get(..PORTS).ok_or(ExpanderError::WriteUnsupported)?;
        self.i2c
            .write(self.addr, frame)
            .map_err(|e| ExpanderError::bus(&e))
    }

    #[allow(clippy::cast_possible_truncation)] // PORTS is 1 or 2
    fn count(&self) -> u8 {
        (PORTS as u8).saturating_mul(8)
    }
}

impl<I: I2c, const PORTS: usize> GpioExpander for Pcf857x<I, PORTS> {
    fn begin(&mut self) -> Result<(), ExpanderError> {
        self.latch = u16::MAX;
        self.write_latch()?;
        self.refresh()
    }

    fn refresh(&mut self) -> Result<(), ExpanderError> {
        let mut buf = [0u8; PORTS];
        self.i2c
            .read(self.addr, &mut buf)
            .map_err(|e| ExpanderError::bus(&e))?;
        self.states = buf
            .iter()
            .rev()
            .fold(0u16, |acc, b| acc.wrapping_shl(8) | u16::from(*b));
        Ok(())
    }

    fn attach_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), ExpanderError> {
        let mask = pin_mask(pin, self.count())?;
        if mode.is_input() {
            self.latch |= mask;
            self.write_latch()?;
        }
        Ok(())
    }

    fn read(&self, pin: u8) -> Result<bool, ExpanderError> {
        Ok(self.states & pin_mask(pin, self.count())? != 0)
    }

    fn write(&mut self, pin: u8, high: bool) -> Result<(), ExpanderError> {
        let mask = pin_mask(pin, self.count())?;
        if high {
            self.latch |= mask;
        } else {
            self.latch &= !mask;
        }
        self.write_latch()
    }

    fn can_write(&self) -> bool {
        true
    }

    fn pin_count(&self) -> u8 {
        self.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    #[allow(clippy::unwrap_used)]
    fn pcf8575_begin_releases_all_pins_then_reads() {
        let expectations = [
            Transaction::write(0x20, vec![0xFF, 0xFF]),
            Transaction::read(0x20, vec![0b1111_1110, 0b0111_1111]),
        ];
        let mut chip = Pcf8575::new(I2cMock::new(&expectations), false, false, false);
        chip.begin().unwrap();
        assert!(!chip.read(0).unwrap());
        assert!(chip.read(1).unwrap());
        assert!(!chip.read(15).unwrap());
        assert_eq!(chip.pin_count(), 16);
        chip.release().done();
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn pcf8574_uses_single_byte_frames() {
        let expectations = [
            Transaction::write(0x27, vec![0xFF]),
            Transaction::read(0x27, vec![0b1010_1010]),
            Transaction::write(0x27, vec![0b1111_1011]),
        ];
        let mut chip = Pcf8574::new(I2cMock::new(&expectations), true, true, true);
        chip.begin().unwrap();
        assert!(chip.read(1).unwrap());
        assert!(!chip.read(0).unwrap());
        chip.write(2, false).unwrap();
        assert_eq!(chip.pin_count(), 8);
        assert_eq!(chip.read(8), Err(ExpanderError::PinOutOfRange(8)));
        chip.release().done();
    }

    #[test]
    fn bus_failure_maps_to_bus_error() {
        use embedded_hal::i2c::ErrorKind;
        let expectations =
            [Transaction::read(0x20, vec![0x00]).with_error(ErrorKind::Other)];
        let mut chip = Pcf8574::with_address(I2cMock::new(&expectations), 0x20);
        assert_eq!(chip.refresh(), Err(ExpanderError::Bus(ErrorKind::Other)));
        chip.release().done();
    }
}
