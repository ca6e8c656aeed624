//! Rotary encoder adapter: raw position to logical steps and CHANGED events

use input_platform::clock::elapsed_ms;
use input_platform::Clock;

use crate::config::EncoderConfig;
use crate::device::Machine;
use crate::event::{emit, EventBuffer, InputEvent};
use crate::lifecycle::Lifecycle;
use crate::rotary::PositionSource;

/// Encoder state machine over a position source `S` and a clock `C`.
///
/// Logical position is `floor(raw / divisor)`. Each evaluation (at most one
/// per rate-limit window) compares it with the last logged value; a
/// non-zero difference becomes the increment, is added to the running
/// position, and fires CHANGED.
#[derive(Debug)]
pub struct Encoder<S, C> {
    source: S,
    clock: C,
    lifecycle: Lifecycle,
    position: i32,
    increment: i32,
    previous_logged: i32,
    divisor: u8,
    rate_limit_ms: u16,
    last_poll_ms: u32,
}

impl<S: PositionSource, C: Clock> Encoder<S, C> {
    /// Encoder with divisor 4 and no rate limit.
    pub fn new(source: S, clock: C) -> Self {
        Self::with_config(source, clock, EncoderConfig::default())
    }

    /// Encoder with explicit settings.
    pub fn with_config(source: S, clock: C, config: EncoderConfig) -> Self {
        Self {
            source,
            clock,
            lifecycle: Lifecycle::new(config.lifecycle),
            position: 0,
            increment: 0,
            previous_logged: 0,
            divisor: config.position_divisor,
            rate_limit_ms: config.rate_limit_ms,
            last_poll_ms: 0,
        }
    }

    /// Running position: the sum of every reported increment.
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Logical steps reported by the last evaluation. Zero when nothing moved.
    pub fn increment(&self) -> i32 {
        self.increment
    }

    /// Overwrite the running position. The source is untouched.
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }

    /// Raw counts per logical step.
    pub fn position_divisor(&self) -> u8 {
        self.divisor
    }

    /// Set the raw counts per logical step. Zero is read as one.
    pub fn set_position_divisor(&mut self, divisor: u8) {
        self.divisor = divisor;
    }

    /// Minimum time between evaluations in ms.
    pub fn rate_limit(&self) -> u16 {
        self.rate_limit_ms
    }

    /// Set the minimum time between evaluations.
    pub fn set_rate_limit(&mut self, ms: u16) {
        self.rate_limit_ms = ms;
    }

    /// The raw position source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The raw position source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    fn effective_divisor(&self) -> i32 {
        i32::from(self.divisor.max(1))
    }

    fn logical_position(&mut self) -> i32 {
        let raw = self.source.position();
        logical_position(raw, self.effective_divisor())
    }
}

/// `floor(raw / divisor)` for a positive divisor: -1 / 4 is -1, not 0.
#[inline]
pub fn logical_position(raw: i32, divisor: i32) -> i32 {
    raw.checked_div_euclid(divisor.max(1)).unwrap_or(raw)
}

impl<S: PositionSource, C: Clock> Machine for Encoder<S, C> {
    type Error = S::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.source.begin()?;
        self.previous_logged = self.logical_position();
        self.last_poll_ms = self.clock.now_ms();
        Ok(())
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
        if elapsed_ms(now_ms, self.last_poll_ms) < u32::from(self.rate_limit_ms) {
            return;
        }
        let logical = self.logical_position();
        self.increment = logical.wrapping_sub(self.previous_logged);
        self.previous_logged = logical;
        if self.increment != 0 {
            self.position = self.position.wrapping_add(self.increment);
            emit(events, InputEvent::Changed);
        }
        self.last_poll_ms = now_ms;
    }

    fn on_enabled(&mut self, _now_ms: u32) {
        // Drop rotation made while disabled.
        let raw = self.previous_logged.wrapping_mul(self.effective_divisor());
        self.source.set_position(raw);
    }
}
