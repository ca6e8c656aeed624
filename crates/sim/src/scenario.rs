//! Scenario file format
//!
//! ```json
//! {
//!   "device": { "kind": "button", "config": { "multi_click_interval_ms": 300 } },
//!   "tick_ms": 1,
//!   "end_ms": 1200,
//!   "steps": [
//!     { "at_ms": 100, "pins": [false] },
//!     { "at_ms": 160, "pins": [true] }
//!   ]
//! }
//! ```
//!
//! Pin levels are raw: `true` is high. Every pin starts high unless
//! `initial` says otherwise.

use anyhow::{ensure, Result};
use input_events::{ButtonConfig, EncoderConfig, SwitchConfig};
use serde::{Deserialize, Serialize};

/// Which device the scenario drives, with its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeviceSpec {
    /// One pin.
    Button {
        /// Settings, defaults for anything left out.
        #[serde(default)]
        config: ButtonConfig,
    },
    /// One pin.
    Switch {
        /// Settings, defaults for anything left out.
        #[serde(default)]
        config: SwitchConfig,
    },
    /// Two pins, A then B.
    Encoder {
        /// Settings, defaults for anything left out.
        #[serde(default)]
        config: EncoderConfig,
    },
}

impl DeviceSpec {
    /// Number of pins the device reads.
    pub fn pin_count(&self) -> usize {
        match self {
            Self::Button { .. } | Self::Switch { .. } => 1,
            Self::Encoder { .. } => 2,
        }
    }

    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Button { .. } => "button",
            Self::Switch { .. } => "switch",
            Self::Encoder { .. } => "encoder",
        }
    }
}

/// One scheduled change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// When the change happens.
    pub at_ms: u32,
    /// New pin levels. Empty leaves the pins alone.
    #[serde(default)]
    pub pins: Vec<bool>,
    /// Enable or disable the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,
}

fn default_tick_ms() -> u32 {
    1
}

/// A complete replay script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Device under test.
    pub device: DeviceSpec,
    /// Poll period.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u32,
    /// Last tick polled.
    pub end_ms: u32,
    /// Pin levels at `begin`. Defaults to all high.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<Vec<bool>>,
    /// Changes, in time order.
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Parse and validate a scenario.
    pub fn from_json(text: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check pin counts, the tick and step order.
    pub fn validate(&self) -> Result<()> {
        let pins = self.device.pin_count();
        ensure!(self.tick_ms > 0, "tick_ms must be at least 1");
        if let Some(initial) = &self.initial {
            ensure!(
                initial.len() == pins,
                "{} takes {} pin(s), initial has {}",
                self.device.kind(),
                pins,
                initial.len()
            );
        }
        let mut last = 0;
        for step in &self.steps {
            ensure!(
                step.pins.is_empty() || step.pins.len() == pins,
                "step at {} ms sets {} pin(s), {} takes {}",
                step.at_ms,
                step.pins.len(),
                self.device.kind(),
                pins
            );
            ensure!(step.at_ms >= last, "step at {} ms is out of order", step.at_ms);
            ensure!(
                step.at_ms <= self.end_ms,
                "step at {} ms is after end_ms {}",
                step.at_ms,
                self.end_ms
            );
            last = step.at_ms;
        }
        Ok(())
    }

    /// Pin levels at `begin`.
    pub fn initial_levels(&self) -> Vec<bool> {
        self.initial
            .clone()
            .unwrap_or_else(|| vec![true; self.device.pin_count()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::unwrap_used)]
    fn minimal_button_takes_defaults() {
        let s = Scenario::from_json(r#"{"device":{"kind":"button"},"end_ms":10}"#).unwrap();
        assert_eq!(s.tick_ms, 1);
        assert_eq!(
            s.device,
            DeviceSpec::Button {
                config: ButtonConfig::default()
            }
        );
        assert_eq!(s.initial_levels(), [true]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn partial_config_keeps_other_defaults() {
        let s = Scenario::from_json(
            r#"{"device":{"kind":"encoder","config":{"position_divisor":2}},"end_ms":10}"#,
        )
        .unwrap();
        assert_eq!(
            s.device,
            DeviceSpec::Encoder {
                config: EncoderConfig::default().position_divisor(2)
            }
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn wrong_pin_count_is_rejected() {
        let err = Scenario::from_json(
            r#"{"device":{"kind":"encoder"},"end_ms":10,"steps":[{"at_ms":1,"pins":[true]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("takes 2"));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn steps_must_be_ordered() {
        let err = Scenario::from_json(
            r#"{"device":{"kind":"switch"},"end_ms":10,
                "steps":[{"at_ms":5,"pins":[false]},{"at_ms":2,"pins":[true]}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("out of order"));
    }

    #[test]
    fn zero_tick_is_rejected() {
        let text = r#"{"device":{"kind":"switch"},"tick_ms":0,"end_ms":10}"#;
        assert!(Scenario::from_json(text).is_err());
    }
}
