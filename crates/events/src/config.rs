//! Device configuration and defaults
//!
//! Values are taken at construction. Every field also has a runtime setter
//! on the owning state machine. Nothing here is validated: a zero interval
//! gives odd timing, never a panic.

use input_platform::config::DEFAULT_DEBOUNCE_MS;
use input_platform::Polarity;

/// Default idle timeout in milliseconds.
pub const DEFAULT_IDLE_TIMEOUT_MS: u32 = 10_000;
/// Default gap that ends a click run, in milliseconds.
pub const DEFAULT_MULTI_CLICK_INTERVAL_MS: u16 = 250;
/// Default hold time that turns a click into a long click, in milliseconds.
pub const DEFAULT_LONG_CLICK_DURATION_MS: u16 = 750;
/// Default cadence of repeated LONG_PRESS events, in milliseconds.
pub const DEFAULT_LONG_PRESS_INTERVAL_MS: u16 = 500;
/// Default raw counts per logical encoder step (one detent of a quadrature encoder).
pub const DEFAULT_POSITION_DIVISOR: u8 = 4;

// ---------------------------------------------------------------------------
// LifecycleConfig
// ---------------------------------------------------------------------------

/// Settings shared by every device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LifecycleConfig {
    /// Caller-chosen id, handed back through [`input_id`](crate::Machine::input_id).
    pub id: u8,
    /// Caller-chosen value, handed back through [`input_value`](crate::Machine::input_value).
    pub value: u8,
    /// Time without a qualifying event before IDLE fires.
    pub idle_timeout_ms: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            id: 0,
            value: 0,
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
        }
    }
}

impl LifecycleConfig {
    /// Set the input id.
    #[must_use]
    pub fn id(mut self, id: u8) -> Self {
        self.id = id;
        self
    }

    /// Set the input value.
    #[must_use]
    pub fn value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    /// Set the idle timeout.
    #[must_use]
    pub fn idle_timeout_ms(mut self, ms: u32) -> Self {
        self.idle_timeout_ms = ms;
        self
    }
}

// ---------------------------------------------------------------------------
// ButtonConfig
// ---------------------------------------------------------------------------

/// Button timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ButtonConfig {
    /// Debounce stable interval.
    pub debounce_ms: u16,
    /// Gap after a release that ends a click run.
    pub multi_click_interval_ms: u16,
    /// Hold time for LONG_PRESS and LONG_CLICKED.
    pub long_click_duration_ms: u16,
    /// Cadence of repeated LONG_PRESS events.
    pub long_press_interval_ms: u16,
    /// Repeat LONG_PRESS every interval while held.
    pub repeat_long_press: bool,
    /// Electrical wiring.
    pub polarity: Polarity,
    /// Shared settings.
    pub lifecycle: LifecycleConfig,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            multi_click_interval_ms: DEFAULT_MULTI_CLICK_INTERVAL_MS,
            long_click_duration_ms: DEFAULT_LONG_CLICK_DURATION_MS,
            long_press_interval_ms: DEFAULT_LONG_PRESS_INTERVAL_MS,
            repeat_long_press: false,
            polarity: Polarity::ActiveLow,
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl ButtonConfig {
    /// Set the debounce interval.
    #[must_use]
    pub fn debounce_ms(mut self, ms: u16) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Set the multi-click gap.
    #[must_use]
    pub fn multi_click_interval_ms(mut self, ms: u16) -> Self {
        self.multi_click_interval_ms = ms;
        self
    }

    /// Set the long-click hold time.
    #[must_use]
    pub fn long_click_duration_ms(mut self, ms: u16) -> Self {
        self.long_click_duration_ms = ms;
        self
    }

    /// Set the LONG_PRESS repeat cadence.
    #[must_use]
    pub fn long_press_interval_ms(mut self, ms: u16) -> Self {
        self.long_press_interval_ms = ms;
        self
    }

    /// Repeat LONG_PRESS while held.
    #[must_use]
    pub fn repeat_long_press(mut self, repeat: bool) -> Self {
        self.repeat_long_press = repeat;
        self
    }

    /// Set the wiring.
    #[must_use]
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    /// Set the shared settings.
    #[must_use]
    pub fn lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }
}

// ---------------------------------------------------------------------------
// SwitchConfig
// ---------------------------------------------------------------------------

/// Toggle switch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SwitchConfig {
    /// Debounce stable interval.
    pub debounce_ms: u16,
    /// Swap ON and OFF.
    pub reversed: bool,
    /// Shared settings.
    pub lifecycle: LifecycleConfig,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            reversed: false,
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl SwitchConfig {
    /// Set the debounce interval.
    #[must_use]
    pub fn debounce_ms(mut self, ms: u16) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Swap ON and OFF.
    #[must_use]
    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    /// Set the shared settings.
    #[must_use]
    pub fn lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }
}

// ---------------------------------------------------------------------------
// EncoderConfig
// ---------------------------------------------------------------------------

/// Rotary encoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderConfig {
    /// Raw counts per logical step. Zero is read as one.
    pub position_divisor: u8,
    /// Minimum time between position evaluations.
    pub rate_limit_ms: u16,
    /// Shared settings.
    pub lifecycle: LifecycleConfig,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            position_divisor: DEFAULT_POSITION_DIVISOR,
            rate_limit_ms: 0,
            lifecycle: LifecycleConfig::default(),
        }
    }
}

impl EncoderConfig {
    /// Set the raw counts per logical step.
    #[must_use]
    pub fn position_divisor(mut self, divisor: u8) -> Self {
        self.position_divisor = divisor;
        self
    }

    /// Set the rate limit.
    #[must_use]
    pub fn rate_limit_ms(mut self, ms: u16) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    /// Set the shared settings.
    #[must_use]
    pub fn lifecycle(mut self, lifecycle: LifecycleConfig) -> Self {
        self.lifecycle = lifecycle;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_defaults() {
        let c = ButtonConfig::default();
        assert_eq!(c.debounce_ms, 10);
        assert_eq!(c.multi_click_interval_ms, 250);
        assert_eq!(c.long_click_duration_ms, 750);
        assert_eq!(c.long_press_interval_ms, 500);
        assert!(!c.repeat_long_press);
        assert_eq!(c.polarity, Polarity::ActiveLow);
        assert_eq!(c.lifecycle.idle_timeout_ms, 10_000);
    }

    #[test]
    fn encoder_defaults() {
        let c = EncoderConfig::default();
        assert_eq!(c.position_divisor, 4);
        assert_eq!(c.rate_limit_ms, 0);
    }

    #[test]
    fn builder_chain() {
        let c = ButtonConfig::default()
            .multi_click_interval_ms(300)
            .repeat_long_press(true)
            .lifecycle(LifecycleConfig::default().id(3).value(7));
        assert_eq!(c.multi_click_interval_ms, 300);
        assert!(c.repeat_long_press);
        assert_eq!(c.lifecycle.id, 3);
        assert_eq!(c.lifecycle.value, 7);
        assert!(SwitchConfig::default().reversed(true).reversed);
    }
}
