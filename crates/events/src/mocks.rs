//! Mock axis engine for driving the joystick composer from tests

#![cfg(any(test, feature = "std"))]

use core::convert::Infallible;

use heapless::Vec;

use crate::event::InputEvent;
use crate::joystick::AxisEngine;

/// Axis whose events, idle state and position are set by hand.
///
/// Queued events are handed out on the next `update` while enabled.
#[derive(Debug, Clone)]
pub struct MockAxis {
    pending: Vec<InputEvent, 8>,
    enabled: bool,
    idle: bool,
    changed: bool,
    position: i32,
    rate_limit_ms: u16,
}

impl Default for MockAxis {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAxis {
    /// Enabled, busy axis at position 0.
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            enabled: true,
            idle: false,
            changed: false,
            position: 0,
            rate_limit_ms: 0,
        }
    }

    /// Fire `event` on the next update. Ignored once eight are queued.
    pub fn queue(&mut self, event: InputEvent) {
        let _ = self.pending.push(event);
    }

    /// Set what `is_idle` reports.
    pub fn set_idle(&mut self, idle: bool) {
        self.idle = idle;
    }

    /// Set what `position` reports.
    pub fn set_position(&mut self, position: i32) {
        self.position = position;
    }

    /// Last rate limit handed down by the composer.
    pub fn rate_limit(&self) -> u16 {
        self.rate_limit_ms
    }

    /// Events still waiting for an update.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl AxisEngine for MockAxis {
    type Error = Infallible;

    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn update(&mut self, emit: &mut dyn FnMut(InputEvent)) {
        if !self.enabled {
            return;
        }
        self.changed = self.pending.contains(&InputEvent::Changed);
        for event in self.pending.iter().copied() {
            emit(event);
        }
        self.pending.clear();
    }

    fn enable(&mut self, enable: bool) {
        self.enabled = enable;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn is_idle(&self) -> bool {
        self.idle
    }

    fn has_changed(&self) -> bool {
        self.changed
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_rate_limit(&mut self, ms: u16) {
        self.rate_limit_ms = ms;
    }

    fn reset_state(&mut self) {
        self.pending.clear();
        self.changed = false;
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec as StdVec;

    #[test]
    fn disabled_axis_keeps_its_queue() {
        let mut axis = MockAxis::new();
        axis.queue(InputEvent::Changed);
        axis.enable(false);
        let mut seen = StdVec::new();
        axis.update(&mut |ev| seen.push(ev));
        assert!(seen.is_empty());
        assert_eq!(axis.pending(), 1);
        axis.enable(true);
        axis.update(&mut |ev| seen.push(ev));
        assert_eq!(seen, [InputEvent::Changed]);
        assert!(axis.has_changed());
    }
}
