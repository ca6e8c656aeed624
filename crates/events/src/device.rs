//! Device wrapper: one state machine plus one callback slot
//!
//! A state machine ([`Machine`]) only classifies: each poll it pushes the
//! events it would fire into an [`EventBuffer`]. [`EventInput`] owns the
//! machine and the callback, runs every candidate through the lifecycle
//! gate, invokes the callback for those that pass, and then runs the idle
//! step.
//!
//! ```text
//! update()
//!   ├─ machine.poll(now, &mut events)     classification
//!   ├─ for ev in events: gate → callback  dispatch
//!   └─ idle step: gate(IDLE) → callback   once per idle period
//! ```

use core::ops::{Deref, DerefMut};

use crate::event::{EventBuffer, InputEvent};
use crate::lifecycle::Lifecycle;

/// A device-specific state machine.
pub trait Machine {
    /// Error reported by [`begin`](Machine::begin).
    type Error;

    /// Whether the wrapper runs the shared idle step after each poll.
    /// Composite devices that forward their children's IDLE turn it off.
    const TRACKS_IDLE: bool = true;

    /// Initialise the underlying hardware.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Current tick from the machine's clock.
    fn now_ms(&self) -> u32;

    /// Shared lifecycle state.
    fn lifecycle(&self) -> &Lifecycle;

    /// Shared lifecycle state, mutably.
    fn lifecycle_mut(&mut self) -> &mut Lifecycle;

    /// Advance the machine and push candidate events in firing order.
    fn poll(&mut self, now_ms: u32, events: &mut EventBuffer);

    /// Called after the device becomes enabled, before ENABLED fires.
    fn on_enabled(&mut self, _now_ms: u32) {}

    /// Called before the device becomes disabled, before DISABLED fires.
    fn on_disabled(&mut self) {}

    /// Enabled query. Composites may report their children here; polling
    /// follows the lifecycle flag only.
    fn is_enabled(&self) -> bool {
        self.lifecycle().is_enabled()
    }

    /// Idle predicate, independent of the mask and of whether IDLE fired.
    fn is_idle(&self) -> bool {
        self.lifecycle().is_idle(self.now_ms())
    }

    /// Caller-chosen id.
    fn input_id(&self) -> u8 {
        self.lifecycle().id()
    }

    /// Caller-chosen value.
    fn input_value(&self) -> u8 {
        self.lifecycle().value()
    }

    /// Milliseconds since the last qualifying event.
    fn ms_since_last_event(&self) -> u32 {
        self.lifecycle().ms_since_last_event(self.now_ms())
    }
}

/// A device: a [`Machine`] plus the callback its events go to.
///
/// The callback gets the event and a shared reference to the machine, so it
/// can query positions, click counts or durations while handling it. It
/// must not expect to mutate the device; record what it needs and act after
/// `update` returns.
///
/// Derefs to the machine, so machine queries and setters are available
/// directly on the device.
pub struct EventInput<M, H> {
    machine: M,
    callback: Option<H>,
}

impl<M: Machine, H: FnMut(InputEvent, &M)> EventInput<M, H> {
    /// Device with no callback. Nothing fires until one is set.
    pub fn new(machine: M) -> Self {
        Self {
            machine,
            callback: None,
        }
    }

    /// Device with `callback` already set.
    pub fn with_callback(machine: M, callback: H) -> Self {
        Self {
            machine,
            callback: Some(callback),
        }
    }

    /// Initialise the hardware and start the idle clock.
    pub fn begin(&mut self) -> Result<(), M::Error> {
        self.machine.begin()?;
        let now = self.machine.now_ms();
        self.machine.lifecycle_mut().begin(now);
        Ok(())
    }

    /// Poll the device once. Call from the main loop on a regular cadence.
    pub fn update(&mut self) {
        if !self.machine.lifecycle().is_enabled() {
            return;
        }
        let now = self.machine.now_ms();
        let mut events = EventBuffer::new();
        self.machine.poll(now, &mut events);
        for event in events {
            self.dispatch(event, now);
        }
        if M::TRACKS_IDLE && self.machine.lifecycle().idle_due(now) {
            self.dispatch(InputEvent::Idle, now);
            self.machine.lifecycle_mut().mark_idle();
        }
    }

    /// Enable or disable the device. A call that does not change the state
    /// does nothing.
    ///
    /// Disabling runs the machine's reset hook and fires DISABLED while the
    /// device is still enabled, so the event is not gated out.
    pub fn enable(&mut self, enable: bool) {
        if enable == self.machine.lifecycle().is_enabled() {
            return;
        }
        let now = self.machine.now_ms();
        if enable {
            self.machine.lifecycle_mut().set_enabled(true);
            self.machine.on_enabled(now);
            self.dispatch(InputEvent::Enabled, now);
        } else {
            self.machine.on_disabled();
            self.dispatch(InputEvent::Disabled, now);
            self.machine.lifecycle_mut().set_enabled(false);
        }
    }

    /// Install the callback, replacing any previous one.
    pub fn set_callback(&mut self, callback: H) {
        self.callback = Some(callback);
    }

    /// Remove the callback. Events stop firing and stop resetting the idle
    /// timer.
    pub fn unset_callback(&mut self) {
        self.callback = None;
    }

    /// Whether a callback is installed.
    pub fn is_callback_set(&self) -> bool {
        self.callback.is_some()
    }

    /// Stop `event` from firing.
    pub fn block_event(&mut self, event: InputEvent) {
        self.machine.lifecycle_mut().block_event(event);
    }

    /// Let `event` fire again.
    pub fn allow_event(&mut self, event: InputEvent) {
        self.machine.lifecycle_mut().allow_event(event);
    }

    /// Block every event.
    pub fn block_all_events(&mut self) {
        self.machine.lifecycle_mut().block_all_events();
    }

    /// Clear every block.
    pub fn allow_all_events(&mut self) {
        self.machine.lifecycle_mut().allow_all_events();
    }

    /// Pure mask query.
    pub fn is_event_allowed(&self, event: InputEvent) -> bool {
        self.machine.lifecycle().is_event_allowed(event)
    }

    /// Restart the idle timer without firing anything.
    pub fn reset_idle_timer(&mut self) {
        let now = self.machine.now_ms();
        self.machine.lifecycle_mut().reset_idle_timer(now);
    }

    /// Set the idle timeout in ms.
    pub fn set_idle_timeout(&mut self, ms: u32) {
        self.machine.lifecycle_mut().set_idle_timeout(ms);
    }

    /// Set the caller-chosen id.
    pub fn set_input_id(&mut self, id: u8) {
        self.machine.lifecycle_mut().set_id(id);
    }

    /// Set the caller-chosen value.
    pub fn set_input_value(&mut self, value: u8) {
        self.machine.lifecycle_mut().set_value(value);
    }

    /// The wrapped machine.
    pub fn machine(&self) -> &M {
        &self.machine
    }

    /// Split into the machine and the callback.
    pub fn into_parts(self) -> (M, Option<H>) {
        (self.machine, self.callback)
    }

    fn dispatch(&mut self, event: InputEvent, now_ms: u32) -> bool {
        let Some(callback) = self.callback.as_mut() else {
            return false;
        };
        if !self.machine.lifecycle_mut().is_invokable(event, now_ms) {
            return false;
        }
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "input {}: {} @ {} ms",
            self.machine.lifecycle().id(),
            event,
            now_ms
        );
        callback(event, &self.machine);
        true
    }
}

impl<M, H> Deref for EventInput<M, H> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.machine
    }
}

impl<M, H> DerefMut for EventInput<M, H> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.machine
    }
}

impl<M: core::fmt::Debug, H> core::fmt::Debug for EventInput<M, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventInput")
            .field("machine", &self.machine)
            .field("callback_set", &self.callback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LifecycleConfig;
    use crate::event::emit;
    use input_platform::mocks::ManualClock;
    use input_platform::Clock;
    use std::vec::Vec;

    /// Fires whatever is queued in `pending` on the next poll.
    struct Scripted<'c> {
        clock: &'c ManualClock,
        lifecycle: Lifecycle,
        pending: Option<InputEvent>,
        enabled_hooks: u32,
        disabled_hooks: u32,
    }

    impl<'c> Scripted<'c> {
        fn new(clock: &'c ManualClock) -> Self {
            Self {
                clock,
                lifecycle: Lifecycle::new(LifecycleConfig::default().idle_timeout_ms(100)),
                pending: None,
                enabled_hooks: 0,
                disabled_hooks: 0,
            }
        }
    }

    impl Machine for Scripted<'_> {
        type Error = core::convert::Infallible;

        fn begin(&mut self) -> Result<(), Self::Error> {
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
        fn poll(&mut self, _now_ms: u32, events: &mut EventBuffer) {
            if let Some(ev) = self.pending.take() {
                emit(events, ev);
            }
        }
        #[allow(clippy::arithmetic_side_effects)]
        fn on_enabled(&mut self, _now_ms: u32) {
            self.enabled_hooks += 1;
        }
        #[allow(clippy::arithmetic_side_effects)]
        fn on_disabled(&mut self) {
            self.disabled_hooks += 1;
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn no_callback_means_no_dispatch_and_no_timer_reset() {
        let clock = ManualClock::new(0);
        let mut dev = EventInput::new(Scripted::new(&clock));
        dev.set_callback(|_ev, _m| {});
        dev.unset_callback();
        dev.begin().unwrap();
        clock.set(50);
        dev.pending = Some(InputEvent::Pressed);
        dev.update();
        assert!(!dev.is_callback_set());
        assert_eq!(dev.lifecycle().last_event_ms(), 0);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn idle_fires_once_per_idle_period() {
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(Scripted::new(&clock), |ev, _m| log.push(ev));
        dev.begin().unwrap();

        dev.pending = Some(InputEvent::Pressed);
        dev.update();
        clock.set(101);
        dev.update();
        clock.set(500);
        dev.update();
        assert!(dev.is_idle());
        dev.pending = Some(InputEvent::Released);
        dev.update();
        clock.set(602);
        dev.update();
        assert_eq!(
            log,
            [
                InputEvent::Pressed,
                InputEvent::Idle,
                InputEvent::Released,
                InputEvent::Idle
            ]
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn blocked_idle_still_sets_the_flag() {
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(Scripted::new(&clock), |ev, _m| log.push(ev));
        dev.begin().unwrap();
        dev.block_event(InputEvent::Idle);
        dev.pending = Some(InputEvent::Pressed);
        dev.update();
        clock.set(200);
        dev.update();
        assert!(dev.lifecycle().is_idle_flagged());
        dev.allow_event(InputEvent::Idle);
        clock.set(300);
        dev.update();
        assert_eq!(log, [InputEvent::Pressed]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn enable_transitions_run_hooks_and_fire_once() {
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(Scripted::new(&clock), |ev, _m| log.push(ev));
        dev.begin().unwrap();

        dev.enable(true); // already enabled
        dev.enable(false);
        dev.enable(false);
        assert!(!dev.is_enabled());
        dev.pending = Some(InputEvent::Pressed);
        dev.update(); // disabled: no poll
        dev.enable(true);
        assert_eq!((dev.enabled_hooks, dev.disabled_hooks), (1, 1));
        assert_eq!(dev.pending, Some(InputEvent::Pressed));
        assert_eq!(log, [InputEvent::Disabled, InputEvent::Enabled]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn callback_sees_the_machine() {
        let clock = ManualClock::new(0);
        let mut seen = None;
        let mut dev = EventInput::with_callback(Scripted::new(&clock), |_ev, m| {
            seen = Some(m.input_id());
        });
        dev.set_input_id(42);
        dev.begin().unwrap();
        dev.pending = Some(InputEvent::Changed);
        dev.update();
        assert_eq!(seen, Some(42));
    }
}
