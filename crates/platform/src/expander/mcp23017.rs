//! MCP23017 16-bit I/O expander (IOCON.BANK = 0 register map)
//!
//! Reference: Microchip MCP23017 datasheet (DS20001952C), table 3-3.
//! With BANK = 0 the A and B registers are adjacent, so every 16-bit
//! register is written as `[REG_A, port_a, port_b]` using the chip's
//! sequential address increment.

use embedded_hal::i2c::I2c;

use super::{pin_mask, GpioExpander};
use crate::config::DEFAULT_EXPANDER_ADDR;
use crate::error::ExpanderError;
use crate::gpio::PinMode;

/// IODIRA: direction, 1 = input.
pub const REG_IODIRA: u8 = 0x00;
/// GPPUA: 100 kΩ pull-up enable.
pub const REG_GPPUA: u8 = 0x0C;
/// GPIOA: port value.
pub const REG_GPIOA: u8 = 0x12;
/// OLATA: output latch.
pub const REG_OLATA: u8 = 0x14;

const PIN_COUNT: u8 = 16;

/// MCP23017 driver.
#[derive(Debug)]
pub struct Mcp23017<I> {
    i2c: I,
    addr: u8,
    iodir: u16,
    pullups: u16,
    olat: u16,
    states: u16,
}

impl<I: I2c> Mcp23017<I> {
    /// Driver at the default address 0x20.
    pub fn new(i2c: I) -> Self {
        Self::with_address(i2c, DEFAULT_EXPANDER_ADDR)
    }

    /// Driver at an explicit 7-bit address.
    pub fn with_address(i2c: I, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            iodir: u16::MAX,
            pullups: 0,
            olat: 0,
            states: 0,
        }
    }

    /// All cached pin states, bit n = pin n (GPA0..7 then GPB0..7).
    pub fn states(&self) -> u16 {
        self.states
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn write_pair(&mut self, reg: u8, value: u16) -> Result<(), ExpanderError> {
        let [a, b] = value.to_le_bytes();
        self.i2c
            .write(self.addr, &[reg, a, b])
            .map_err(|e| ExpanderError::bus(&e))
    }
}

impl<I: I2c> GpioExpander for Mcp23017<I> {
    fn begin(&mut self) -> Result<(), ExpanderError> {
        self.write_pair(REG_IODIRA, self.iodir)?;
        self.write_pair(REG_GPPUA, self.pullups)?;
        self.refresh()
    }

    fn refresh(&mut self) -> Result<(), ExpanderError> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.addr, &[REG_GPIOA], &mut buf)
            .map_err(|e| ExpanderError::bus(&e))?;
        self.states = u16::from_le_bytes(buf);
        Ok(())
    }

    fn attach_pin(&mut self, pin: u8, mode: PinMode) -> Result<(), ExpanderError> {
        let mask = pin_mask(pin, PIN_COUNT)?;
        match mode {
            PinMode::Input => {
                self.iodir |= mask;
                self.pullups &= !mask;
            }
            PinMode::InputPullUp => {
                self.iodir |= mask;
                self.pullups |= mask;
            }
            PinMode::Output => {
                self.iodir &= !mask;
                self.pullups &= !mask;
            }
        }
        self.write_pair(REG_IODIRA, self.iodir)?;
        self.write_pair(REG_GPPUA, self.pullups)
    }

    fn read(&self, pin: u8) -> Result<bool, ExpanderError> {
        Ok(self.states & pin_mask(pin, PIN_COUNT)? != 0)
    }

    fn write(&mut self, pin: u8, high: bool) -> Result<(), ExpanderError> {
        let mask = pin_mask(pin, PIN_COUNT)?;
        if high {
            self.olat |= mask;
        } else {
            self.olat &= !mask;
        }
        self.write_pair(REG_OLATA, self.olat)
    }

    fn can_write(&self) -> bool {
        true
    }

    fn pin_count(&self) -> u8 {
        PIN_COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    #[test]
    fn register_addresses_match_bank0_map() {
        assert_eq!(REG_IODIRA, 0x00);
        assert_eq!(REG_GPPUA, 0x0C);
        assert_eq!(REG_GPIOA, 0x12);
        assert_eq!(REG_OLATA, 0x14);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn begin_sets_all_inputs_and_reads_ports() {
        let expectations = [
            Transaction::write(0x20, vec![REG_IODIRA, 0xFF, 0xFF]),
            Transaction::write(0x20, vec![REG_GPPUA, 0x00, 0x00]),
            Transaction::write_read(0x20, vec![REG_GPIOA], vec![0x01, 0x80]),
        ];
        let mut chip = Mcp23017::new(I2cMock::new(&expectations));
        chip.begin().unwrap();
        assert!(chip.read(0).unwrap());
        assert!(!chip.read(1).unwrap());
        assert!(chip.read(15).unwrap());
        assert_eq!(chip.states(), 0x8001);
        chip.release().done();
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn attach_pull_up_and_drive_output() {
        let expectations = [
            Transaction::write(0x21, vec![REG_IODIRA, 0xFF, 0xFF]),
            Transaction::write(0x21, vec![REG_GPPUA, 0x00, 0x02]),
            Transaction::write(0x21, vec![REG_IODIRA, 0xFE, 0xFF]),
            Transaction::write(0x21, vec![REG_GPPUA, 0x00, 0x02]),
            Transaction::write(0x21, vec![REG_OLATA, 0x01, 0x00]),
        ];
        let mut chip = Mcp23017::with_address(I2cMock::new(&expectations), 0x21);
        chip.attach_pin(9, PinMode::InputPullUp).unwrap();
        chip.attach_pin(0, PinMode::Output).unwrap();
        chip.write(0, true).unwrap();
        assert!(chip.can_write());
        assert_eq!(
            chip.attach_pin(16, PinMode::Input),
            Err(ExpanderError::PinOutOfRange(16))
        );
        chip.release().done();
    }
}
