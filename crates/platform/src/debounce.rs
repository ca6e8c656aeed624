//! Debounce primitive
//!
//! [`Debounce`] is the seam between the state machines and a physical
//! contact. The machines only ever see the debounced level, its edges, and
//! the two timing queries (`current_duration`, `previous_duration`).
//!
//! [`Bounce`] is the stable-interval debouncer: a raw level is accepted only
//! after it has been read unchanged for `interval_ms`. Any flicker restarts
//! the window.

use embedded_hal::digital::InputPin;

use crate::clock::elapsed_ms;
use crate::config::DEFAULT_DEBOUNCE_MS;

/// Debounced digital input.
///
/// All time arguments are the caller's wrapping millisecond tick.
pub trait Debounce {
    /// Error reported by [`begin`](Debounce::begin).
    type Error;

    /// Sample the pin once and seed the debounced state from it.
    fn begin(&mut self, now_ms: u32) -> Result<(), Self::Error>;

    /// Sample the pin and advance the debouncer.
    ///
    /// Returns `true` when the debounced level changed on this call. The edge
    /// flags are valid until the next call.
    fn update(&mut self, now_ms: u32) -> bool;

    /// Debounced level: `true` when high.
    fn read(&self) -> bool;

    /// The debounced level went high → low on the last `update`.
    fn fell(&self) -> bool;

    /// The debounced level went low → high on the last `update`.
    fn rose(&self) -> bool;

    /// How long the debounced level has been held, in ms.
    fn current_duration(&self, now_ms: u32) -> u32;

    /// How long the previous debounced level was held, in ms.
    fn previous_duration(&self) -> u32;

    /// Change the stable interval.
    fn set_interval(&mut self, interval_ms: u16);
}

/// Stable-interval debouncer over an `embedded_hal` input pin.
///
/// A pin read error holds the last raw level, so a flaky bus read looks like
/// no change instead of a spurious edge.
#[derive(Debug)]
pub struct Bounce<P> {
    pin: P,
    interval_ms: u16,
    debounced_high: bool,
    unstable_high: bool,
    changed: bool,
    previous_ms: u32,
    state_change_ms: u32,
    previous_duration_ms: u32,
}

impl<P: InputPin> Bounce<P> {
    /// Wrap `pin` with the default 10 ms interval.
    pub fn new(pin: P) -> Self {
        Self::with_interval(pin, DEFAULT_DEBOUNCE_MS)
    }

    /// Wrap `pin` with a custom interval.
    pub fn with_interval(pin: P, interval_ms: u16) -> Self {
        Self {
            pin,
            interval_ms,
            // Pull-up default: an unread input idles high.
            debounced_high: true,
            unstable_high: true,
            changed: false,
            previous_ms: 0,
            state_change_ms: 0,
            previous_duration_ms: 0,
        }
    }

    /// Configured stable interval in ms.
    pub fn interval(&self) -> u16 {
        self.interval_ms
    }

    /// Give the pin back.
    pub fn release(self) -> P {
        self.pin
    }

    fn sample(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => high,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::trace!("debounce: pin read failed, holding level");
                self.unstable_high
            }
        }
    }
}

impl<P: InputPin> Debounce for Bounce<P> {
    type Error = P::Error;

    fn begin(&mut self, now_ms: u32) -> Result<(), Self::Error> {
        let high = self.pin.is_high()?;
        self.debounced_high = high;
        self.unstable_high = high;
        self.changed = false;
        self.previous_ms = now_ms;
        self.state_change_ms = now_ms;
        self.previous_duration_ms = 0;
        Ok(())
    }

    fn update(&mut self, now_ms: u32) -> bool {
        self.changed = false;
        let raw = self.sample();

        if raw != self.unstable_high {
            self.previous_ms = now_ms;
            self.unstable_high = raw;
        } else if elapsed_ms(now_ms, self.previous_ms) >= u32::from(self.interval_ms)
            && raw != self.debounced_high
        {
            self.debounced_high = raw;
            self.changed = true;
            self.previous_duration_ms = elapsed_ms(now_ms, self.state_change_ms);
            self.state_change_ms = now_ms;
        }
        self.changed
    }

    fn read(&self) -> bool {
        self.debounced_high
    }

    fn fell(&self) -> bool {
        self.changed && !self.debounced_high
    }

    fn rose(&self) -> bool {
        self.changed && self.debounced_high
    }

    fn current_duration(&self, now_ms: u32) -> u32 {
        elapsed_ms(now_ms, self.state_change_ms)
    }

    fn previous_duration(&self) -> u32 {
        self.previous_duration_ms
    }

    fn set_interval(&mut self, interval_ms: u16) {
        self.interval_ms = interval_ms;
    }
}
