//! Platform timing defaults

/// Default debounce stable interval in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u16 = 10;

/// Default 7-bit address of PCF8574 / PCF8575 / MCP23017 with A2..A0 tied low.
pub const DEFAULT_EXPANDER_ADDR: u8 = 0x20;

/// 7-bit address of a PCF857x or MCP23017 for the given address straps.
#[inline]
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub const fn expander_address(a0: bool, a1: bool, a2: bool) -> u8 {
    DEFAULT_EXPANDER_ADDR | ((a2 as u8) << 2) | ((a1 as u8) << 1) | (a0 as u8)
}
