//! Two-axis joystick composed from a pair of axis engines
//!
//! The composer owns no pins. Each axis is an [`AxisEngine`] that reports
//! CHANGED and IDLE on its own; the composer relabels CHANGED per axis,
//! swallows the axes' ENABLED/DISABLED, and lets IDLE through only when both
//! axes are idle at that moment.

use input_platform::Clock;

use crate::config::LifecycleConfig;
use crate::device::Machine;
use crate::event::{emit, EventBuffer, InputEvent};
use crate::lifecycle::Lifecycle;

/// One analog axis, as seen by the composer.
pub trait AxisEngine {
    /// Error reported by [`begin`](AxisEngine::begin).
    type Error;

    /// Initialise the axis hardware.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Poll the axis, handing each event it fires to `emit`.
    fn update(&mut self, emit: &mut dyn FnMut(InputEvent));

    /// Enable or disable the axis.
    fn enable(&mut self, enable: bool);

    /// Whether the axis is enabled.
    fn is_enabled(&self) -> bool;

    /// Whether the axis has been quiet longer than its idle timeout.
    fn is_idle(&self) -> bool;

    /// Whether the last update moved the axis.
    fn has_changed(&self) -> bool;

    /// Current axis position.
    fn position(&self) -> i32;

    /// Minimum time between two CHANGED events.
    fn set_rate_limit(&mut self, ms: u16);

    /// Drop any motion in progress and take the current reading as the
    /// new rest position.
    fn reset_state(&mut self);
}

/// Joystick state machine over two axes of the same kind.
#[derive(Debug)]
pub struct Joystick<A, C> {
    x: A,
    y: A,
    clock: C,
    lifecycle: Lifecycle,
}

impl<A: AxisEngine, C: Clock> Joystick<A, C> {
    /// Joystick over `x` and `y`.
    pub fn new(x: A, y: A, clock: C) -> Self {
        Self::with_config(x, y, clock, LifecycleConfig::default())
    }

    /// Joystick with explicit id, value and idle timeout.
    pub fn with_config(x: A, y: A, clock: C, config: LifecycleConfig) -> Self {
        Self {
            x,
            y,
            clock,
            lifecycle: Lifecycle::new(config),
        }
    }

    /// The X axis.
    pub fn x(&self) -> &A {
        &self.x
    }

    /// The Y axis.
    pub fn y(&self) -> &A {
        &self.y
    }

    /// The X axis, mutably, for axis-specific settings.
    pub fn x_mut(&mut self) -> &mut A {
        &mut self.x
    }

    /// The Y axis, mutably, for axis-specific settings.
    pub fn y_mut(&mut self) -> &mut A {
        &mut self.y
    }

    /// `(x, y)` positions.
    pub fn position(&self) -> (i32, i32) {
        (self.x.position(), self.y.position())
    }

    /// Either axis moved on the last update.
    pub fn has_changed(&self) -> bool {
        self.x.has_changed() || self.y.has_changed()
    }

    /// Apply one CHANGED rate limit to both axes.
    pub fn set_rate_limit(&mut self, ms: u16) {
        self.x.set_rate_limit(ms);
        self.y.set_rate_limit(ms);
    }

    /// Reset both axes.
    pub fn reset_state(&mut self) {
        self.x.reset_state();
        self.y.reset_state();
    }

    fn both_idle(&self) -> bool {
        self.x.is_idle() && self.y.is_idle()
    }
}

/// Map one axis event to the joystick event it becomes, if any.
fn relabel(event: InputEvent, changed: InputEvent, both_idle: bool) -> Option<InputEvent> {
    match event {
        InputEvent::Changed => Some(changed),
        InputEvent::Enabled | InputEvent::Disabled => None,
        InputEvent::Idle if !both_idle => None,
        other => Some(other),
    }
}

impl<A: AxisEngine, C: Clock> Machine for Joystick<A, C> {
    type Error = A::Error;

    // IDLE comes from the axes.
    const TRACKS_IDLE: bool = false;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.x.begin()?;
        self.y.begin()
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

    fn poll(&mut self, _now_ms: u32, events: &mut EventBuffer) {
        let mut from_x = EventBuffer::new();
        self.x.update(&mut |ev| emit(&mut from_x, ev));
        let both_idle = self.both_idle();
        for ev in from_x {
            if let Some(ev) = relabel(ev, InputEvent::ChangedX, both_idle) {
                emit(events, ev);
            }
        }

        let mut from_y = EventBuffer::new();
        self.y.update(&mut |ev| emit(&mut from_y, ev));
        let both_idle = self.both_idle();
        for ev in from_y {
            if let Some(ev) = relabel(ev, InputEvent::ChangedY, both_idle) {
                emit(events, ev);
            }
        }
    }

    fn on_enabled(&mut self, _now_ms: u32) {
        self.x.enable(true);
        self.y.enable(true);
    }

    fn on_disabled(&mut self) {
        self.x.enable(false);
        self.y.enable(false);
    }

    fn is_enabled(&self) -> bool {
        self.x.is_enabled() && self.y.is_enabled()
    }

    fn is_idle(&self) -> bool {
        self.both_idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::EventInput;
    use crate::mocks::MockAxis;
    use input_platform::mocks::ManualClock;
    use core::cell::RefCell;
    use std::vec::Vec;

    #[test]
    fn changed_is_relabelled_per_axis() {
        assert_eq!(
            relabel(InputEvent::Changed, InputEvent::ChangedX, false),
            Some(InputEvent::ChangedX)
        );
        assert_eq!(relabel(InputEvent::Enabled, InputEvent::ChangedX, true), None);
        assert_eq!(relabel(InputEvent::Idle, InputEvent::ChangedY, false), None);
        assert_eq!(
            relabel(InputEvent::Idle, InputEvent::ChangedY, true),
            Some(InputEvent::Idle)
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn axis_motion_fires_changed_x_and_y() {
        let clock = ManualClock::new(0);
        let log = RefCell::new(Vec::new());
        let mut dev = EventInput::with_callback(
            Joystick::new(MockAxis::new(), MockAxis::new(), &clock),
            |ev, _m| log.borrow_mut().push(ev),
        );
        dev.begin().unwrap();
        dev.x_mut().queue(InputEvent::Changed);
        dev.update();
        dev.y_mut().queue(InputEvent::Changed);
        dev.update();
        assert_eq!(*log.borrow(), [InputEvent::ChangedX, InputEvent::ChangedY]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn idle_needs_both_axes() {
        let clock = ManualClock::new(0);
        let log = RefCell::new(Vec::new());
        let mut dev = EventInput::with_callback(
            Joystick::new(MockAxis::new(), MockAxis::new(), &clock),
            |ev, _m| log.borrow_mut().push(ev),
        );
        dev.begin().unwrap();
        dev.x_mut().set_idle(true);
        dev.x_mut().queue(InputEvent::Idle);
        dev.update();
        assert!(log.borrow().is_empty());
        assert!(!dev.is_idle());

        dev.y_mut().set_idle(true);
        dev.y_mut().queue(InputEvent::Idle);
        dev.update();
        assert_eq!(*log.borrow(), [InputEvent::Idle]);
        assert!(dev.is_idle());
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn enable_cascades_and_axis_lifecycle_events_are_dropped() {
        let clock = ManualClock::new(0);
        let log = RefCell::new(Vec::new());
        let mut dev = EventInput::with_callback(
            Joystick::new(MockAxis::new(), MockAxis::new(), &clock),
            |ev, _m| log.borrow_mut().push(ev),
        );
        dev.begin().unwrap();
        dev.enable(false);
        assert!(!dev.x().is_enabled());
        assert!(!dev.y().is_enabled());
        assert!(!dev.is_enabled());
        dev.enable(true);
        assert!(dev.is_enabled());
        // an axis reporting its own transition is swallowed
        dev.x_mut().queue(InputEvent::Enabled);
        dev.update();
        assert_eq!(*log.borrow(), [InputEvent::Disabled, InputEvent::Enabled]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn position_and_change_flag_come_from_axes() {
        let clock = ManualClock::new(0);
        let mut dev: EventInput<_, fn(InputEvent, &Joystick<MockAxis, &ManualClock>)> =
            EventInput::new(Joystick::new(MockAxis::new(), MockAxis::new(), &clock));
        dev.begin().unwrap();
        dev.x_mut().set_position(12);
        dev.y_mut().set_position(-3);
        dev.y_mut().queue(InputEvent::Changed);
        dev.update();
        assert_eq!(dev.position(), (12, -3));
        assert!(dev.has_changed());
    }

    #[test]
    fn rate_limit_and_reset_reach_both_axes() {
        let clock = ManualClock::new(0);
        let mut joy = Joystick::new(MockAxis::new(), MockAxis::new(), &clock);
        joy.set_rate_limit(40);
        assert_eq!((joy.x().rate_limit(), joy.y().rate_limit()), (40, 40));
        joy.x_mut().set_position(7);
        joy.y_mut().queue(InputEvent::Changed);
        joy.reset_state();
        assert_eq!(joy.position(), (0, 0));
        assert_eq!(joy.y().pending(), 0);
    }
}
