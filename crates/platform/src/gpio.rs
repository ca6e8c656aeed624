//! Pin polarity and pin modes
//!
//! Inputs are wired either active-low (pull-up, switch to ground; the usual
//! case) or active-high. The engine never reasons about "high" or "low"
//! directly; it asks the [`Polarity`] whether a level or an edge means
//! activation.

/// Electrical meaning of an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Polarity {
    /// Active when the pin reads low (pull-up wiring).
    #[default]
    ActiveLow,
    /// Active when the pin reads high (pull-down wiring).
    ActiveHigh,
}

impl Polarity {
    /// True when the raw pin level `high` is the active level.
    #[inline]
    pub const fn is_active(self, high: bool) -> bool {
        match self {
            Self::ActiveLow => !high,
            Self::ActiveHigh => high,
        }
    }

    /// True when a debounced edge (`fell`, `rose`) is an activation.
    #[inline]
    pub const fn activated(self, fell: bool, rose: bool) -> bool {
        match self {
            Self::ActiveLow => fell,
            Self::ActiveHigh => rose,
        }
    }

    /// True when a debounced edge (`fell`, `rose`) is a deactivation.
    #[inline]
    pub const fn deactivated(self, fell: bool, rose: bool) -> bool {
        match self {
            Self::ActiveLow => rose,
            Self::ActiveHigh => fell,
        }
    }

    /// The pin mode that idles this input at its inactive level.
    pub const fn input_mode(self) -> PinMode {
        match self {
            Self::ActiveLow => PinMode::InputPullUp,
            Self::ActiveHigh => PinMode::Input,
        }
    }
}

/// Pin configuration requested from a GPIO expander.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PinMode {
    /// Floating input.
    Input,
    /// Input with the internal pull-up enabled.
    #[default]
    InputPullUp,
    /// Push-pull (or quasi-bidirectional) output.
    Output,
}

impl PinMode {
    /// True for both input variants.
    pub const fn is_input(self) -> bool {
        matches!(self, Self::Input | Self::InputPullUp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_low_is_default() {
        assert_eq!(Polarity::default(), Polarity::ActiveLow);
    }

    #[test]
    fn active_low_levels_and_edges() {
        let p = Polarity::ActiveLow;
        assert!(p.is_active(false));
        assert!(!p.is_active(true));
        assert!(p.activated(true, false));
        assert!(p.deactivated(false, true));
        assert!(!p.activated(false, true));
    }

    #[test]
    fn active_high_levels_and_edges() {
        let p = Polarity::ActiveHigh;
        assert!(p.is_active(true));
        assert!(p.activated(false, true));
        assert!(p.deactivated(true, false));
    }

    #[test]
    fn input_mode_matches_wiring() {
        assert_eq!(Polarity::ActiveLow.input_mode(), PinMode::InputPullUp);
        assert_eq!(Polarity::ActiveHigh.input_mode(), PinMode::Input);
        assert!(PinMode::InputPullUp.is_input());
        assert!(!PinMode::Output.is_input());
    }
}
