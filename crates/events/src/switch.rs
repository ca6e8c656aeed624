//! Two-position toggle switch

use input_platform::{Clock, Debounce};

use crate::config::SwitchConfig;
use crate::device::Machine;
use crate::event::{emit, EventBuffer, InputEvent};
use crate::lifecycle::Lifecycle;

/// Switch state machine. A falling edge is ON unless reversed.
#[derive(Debug)]
pub struct Switch<D, C> {
    debouncer: D,
    clock: C,
    lifecycle: Lifecycle,
    reversed: bool,
}

impl<D: Debounce, C: Clock> Switch<D, C> {
    /// Switch with default settings.
    pub fn new(debouncer: D, clock: C) -> Self {
        Self::with_config(debouncer, clock, SwitchConfig::default())
    }

    /// Switch with explicit settings.
    pub fn with_config(mut debouncer: D, clock: C, config: SwitchConfig) -> Self {
        debouncer.set_interval(config.debounce_ms);
        Self {
            debouncer,
            clock,
            lifecycle: Lifecycle::new(config.lifecycle),
            reversed: config.reversed,
        }
    }

    /// Switch is in the ON position.
    pub fn is_on(&self) -> bool {
        // low reads as ON for normal wiring
        self.debouncer.read() == self.reversed
    }

    /// Raw debounced level, `true` when high.
    pub fn switch_state(&self) -> bool {
        self.debouncer.read()
    }

    /// Whether ON and OFF are swapped.
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Swap ON and OFF.
    pub fn reverse_on_off(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    /// Set the debounce interval.
    pub fn set_debounce_interval(&mut self, ms: u16) {
        self.debouncer.set_interval(ms);
    }

    /// Time in the current position.
    pub fn current_duration(&self) -> u32 {
        self.debouncer.current_duration(self.clock.now_ms())
    }

    /// Time spent in the previous position.
    pub fn previous_duration(&self) -> u32 {
        self.debouncer.previous_duration()
    }
}

impl<D: Debounce, C: Clock> Machine for Switch<D, C> {
    type Error = D::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.debouncer.begin(self.clock.now_ms())
    }

    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn lifecycle_mut(&mut self) -> &mut Lifecycle {
        &mut self.lifecycle
    }

    fn poll(&mut self, now_ms: u32, events: &mut EventBuffer) {
        if !self.debouncer.update(now_ms) {
            return;
        }
        let (on, off) = if self.reversed {
            (InputEvent::Off, InputEvent::On)
        } else {
            (InputEvent::On, InputEvent::Off)
        };
        if self.debouncer.fell() {
            emit(events, on);
        } else if self.debouncer.rose() {
            emit(events, off);
        }
    }
}
