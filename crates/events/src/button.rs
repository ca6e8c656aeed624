//! Momentary push button: press, release, click counting and long press
//!
//! Classification runs on the debounced level:
//!
//! - Activation edge: PRESSED, and the press is recorded.
//! - Deactivation edge after a recorded press: the click counter advances
//!   and a click run is pending. RELEASED fires either way.
//! - While held past `long_click + n * long_press_interval`: LONG_PRESS,
//!   once per hold unless repeat is on.
//! - While released for longer than the multi-click gap with a run pending:
//!   the run is finalized as LONG_CLICKED (last hold was long), CLICKED,
//!   DOUBLE_CLICKED or MULTI_CLICKED.

use input_platform::{Clock, Debounce, Polarity};

use crate::config::ButtonConfig;
use crate::device::Machine;
use crate::event::{emit, EventBuffer, InputEvent};
use crate::lifecycle::Lifecycle;

/// Button state machine over a debouncer `D` and a clock `C`.
#[derive(Debug)]
pub struct Button<D, C> {
    debouncer: D,
    clock: C,
    lifecycle: Lifecycle,
    polarity: Polarity,
    active: bool,
    press_recorded: bool,
    click_counter: u8,
    last_click_count: u8,
    long_press_count: u32,
    click_finalized: bool,
    multi_click_interval_ms: u16,
    long_click_duration_ms: u16,
    long_press_interval_ms: u16,
    repeat_long_press: bool,
}

impl<D: Debounce, C: Clock> Button<D, C> {
    /// Button with default timing.
    pub fn new(debouncer: D, clock: C) -> Self {
        Self::with_config(debouncer, clock, ButtonConfig::default())
    }

    /// Button with explicit timing. The debounce interval is applied to
    /// `debouncer`.
    pub fn with_config(mut debouncer: D, clock: C, config: ButtonConfig) -> Self {
        debouncer.set_interval(config.debounce_ms);
        Self {
            debouncer,
            clock,
            lifecycle: Lifecycle::new(config.lifecycle),
            polarity: config.polarity,
            active: false,
            press_recorded: false,
            click_counter: 0,
            last_click_count: 0,
            long_press_count: 0,
            click_finalized: true,
            multi_click_interval_ms: config.multi_click_interval_ms,
            long_click_duration_ms: config.long_click_duration_ms,
            long_press_interval_ms: config.long_press_interval_ms,
            repeat_long_press: config.repeat_long_press,
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Debounced level is the active level.
    pub fn is_pressed(&self) -> bool {
        self.polarity.is_active(self.debouncer.read())
    }

    /// Raw debounced level, `true` when high.
    pub fn button_state(&self) -> bool {
        self.debouncer.read()
    }

    /// Clicks in the current or most recently finalized run. A long click
    /// counts as one.
    pub fn click_count(&self) -> u8 {
        self.last_click_count
    }

    /// LONG_PRESS events fired during the current hold.
    pub fn long_press_count(&self) -> u32 {
        self.long_press_count
    }

    /// Time in the current debounced state.
    pub fn current_duration(&self) -> u32 {
        self.debouncer.current_duration(self.clock.now_ms())
    }

    /// Length of the previous debounced state.
    pub fn previous_duration(&self) -> u32 {
        self.debouncer.previous_duration()
    }

    /// Multi-click gap in ms.
    pub fn multi_click_interval(&self) -> u16 {
        self.multi_click_interval_ms
    }

    /// Long-click hold time in ms.
    pub fn long_click_duration(&self) -> u16 {
        self.long_click_duration_ms
    }

    /// LONG_PRESS repeat cadence in ms.
    pub fn long_press_interval(&self) -> u16 {
        self.long_press_interval_ms
    }

    /// Whether LONG_PRESS repeats while held.
    pub fn is_repeat_long_press(&self) -> bool {
        self.repeat_long_press
    }

    // -----------------------------------------------------------------------
    // Runtime configuration
    // -----------------------------------------------------------------------

    /// Set the debounce interval.
    pub fn set_debounce_interval(&mut self, ms: u16) {
        self.debouncer.set_interval(ms);
    }

    /// Set the multi-click gap.
    pub fn set_multi_click_interval(&mut self, ms: u16) {
        self.multi_click_interval_ms = ms;
    }

    /// Set the long-click hold time.
    pub fn set_long_click_duration(&mut self, ms: u16) {
        self.long_click_duration_ms = ms;
    }

    /// Set the LONG_PRESS repeat cadence.
    pub fn set_long_press_interval(&mut self, ms: u16) {
        self.long_press_interval_ms = ms;
    }

    /// Repeat LONG_PRESS while held.
    pub fn enable_long_press_repeat(&mut self, repeat: bool) {
        self.repeat_long_press = repeat;
    }

    /// Give the debouncer and clock back.
    pub fn release(self) -> (D, C) {
        (self.debouncer, self.clock)
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    fn on_edge(&mut self, events: &mut EventBuffer) {
        let (fell, rose) = (self.debouncer.fell(), self.debouncer.rose());
        self.active = self.polarity.is_active(self.debouncer.read());
        if self.polarity.activated(fell, rose) {
            self.press_recorded = true;
            emit(events, InputEvent::Pressed);
        } else if self.polarity.deactivated(fell, rose) {
            if self.press_recorded {
                self.click_finalized = false;
                self.click_counter = self.click_counter.saturating_add(1);
                self.last_click_count = self.click_counter;
            }
            self.press_recorded = false;
            self.long_press_count = 0;
            emit(events, InputEvent::Released);
        }
    }

    /// Hold time past which the next LONG_PRESS fires, `None` once the
    /// schedule no longer fits the tick.
    fn long_press_threshold(&self) -> Option<u32> {
        self.long_press_count
            .checked_mul(u32::from(self.long_press_interval_ms))?
            .checked_add(u32::from(self.long_click_duration_ms))
    }

    fn check_long_press(&mut self, now_ms: u32, events: &mut EventBuffer) {
        // A held button is activity: keep the device from going idle.
        self.lifecycle.reset_idle_timer(now_ms);
        if self.long_press_count > 0 && !self.repeat_long_press {
            return;
        }
        let Some(threshold) = self.long_press_threshold() else {
            return;
        };
        if self.debouncer.current_duration(now_ms) > threshold {
            let Some(count) = self.long_press_count.checked_add(1) else {
                return;
            };
            self.long_press_count = count;
            emit(events, InputEvent::LongPress);
        }
    }

    fn finalize_clicks(&mut self, now_ms: u32, events: &mut EventBuffer) {
        if self.click_finalized
            || self.active
            || self.debouncer.current_duration(now_ms) <= u32::from(self.multi_click_interval_ms)
        {
            return;
        }
        self.click_finalized = true;
        if self.debouncer.previous_duration() > u32::from(self.long_click_duration_ms) {
            self.click_counter = 0;
            self.last_click_count = 1;
            self.long_press_count = 0;
            emit(events, InputEvent::LongClicked);
        } else {
            let event = match self.click_counter {
                0 | 1 => InputEvent::Clicked,
                2 => InputEvent::DoubleClicked,
                _ => InputEvent::MultiClicked,
            };
            self.click_counter = 0;
            emit(events, event);
        }
    }
}

impl<D: Debounce, C: Clock> Machine for Button<D, C> {
    type Error = D::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.debouncer.begin(self.clock.now_ms())?;
        self.active = self.polarity.is_active(self.debouncer.read());
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
        if self.debouncer.update(now_ms) {
            self.on_edge(events);
        }
        if self.active {
            self.check_long_press(now_ms, events);
        }
        self.finalize_clicks(now_ms, events);
    }

    fn on_disabled(&mut self) {
        self.click_counter = 0;
        self.long_press_count = 0;
        self.click_finalized = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::EventInput;
    use core::cell::{Cell, RefCell};
    use input_platform::mocks::{ManualClock, MockPin};
    use input_platform::Bounce;
    use std::vec::Vec;

    type TestButton<'a> = Button<Bounce<MockPin<'a>>, &'a ManualClock>;

    fn button<'a>(level: &'a Cell<bool>, clock: &'a ManualClock, config: ButtonConfig) -> TestButton<'a> {
        Button::with_config(Bounce::new(MockPin::new(level)), clock, config)
    }

    /// Hold the raw level for `ms`, polling every millisecond.
    fn hold<M, H>(dev: &mut EventInput<M, H>, clock: &ManualClock, ms: u32)
    where
        M: Machine,
        H: FnMut(InputEvent, &M),
    {
        for _ in 0..ms {
            clock.advance(1);
            dev.update();
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn single_click() {
        let level = Cell::new(true);
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(
            button(&level, &clock, ButtonConfig::default()),
            |ev, _m| log.push(ev),
        );
        dev.begin().unwrap();
        hold(&mut dev, &clock, 5);
        level.set(false);
        hold(&mut dev, &clock, 60);
        level.set(true);
        hold(&mut dev, &clock, 400);
        assert_eq!(dev.click_count(), 1);
        assert_eq!(
            log,
            [InputEvent::Pressed, InputEvent::Released, InputEvent::Clicked]
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn no_click_while_still_held() {
        let level = Cell::new(true);
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(
            button(&level, &clock, ButtonConfig::default()),
            |ev, _m| log.push(ev),
        );
        dev.begin().unwrap();
        level.set(false);
        hold(&mut dev, &clock, 50);
        level.set(true);
        hold(&mut dev, &clock, 50);
        // pressed again before the gap closed, then held well past it
        level.set(false);
        hold(&mut dev, &clock, 400);
        assert!(dev.is_pressed());
        assert!(!log.contains(&InputEvent::Clicked));
        assert!(!log.contains(&InputEvent::DoubleClicked));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn long_press_then_long_click() {
        let level = Cell::new(true);
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(
            button(&level, &clock, ButtonConfig::default()),
            |ev, _m| log.push(ev),
        );
        dev.begin().unwrap();
        level.set(false);
        hold(&mut dev, &clock, 3_000);
        level.set(true);
        hold(&mut dev, &clock, 400);
        assert_eq!(dev.click_count(), 1);
        assert_eq!(dev.long_press_count(), 0);
        assert_eq!(
            log,
            [
                InputEvent::Pressed,
                InputEvent::LongPress,
                InputEvent::Released,
                InputEvent::LongClicked
            ]
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn repeat_long_press_follows_interval() {
        let level = Cell::new(true);
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let config = ButtonConfig::default().repeat_long_press(true);
        let mut dev = EventInput::with_callback(button(&level, &clock, config), |ev, _m| log.push(ev));
        dev.begin().unwrap();
        level.set(false);
        // debounce settles at 10 ms; thresholds at 750, 1250, 1750 ms held
        hold(&mut dev, &clock, 1_800);
        assert_eq!(dev.long_press_count(), 3);
        let presses = log.iter().filter(|e| **e == InputEvent::LongPress).count();
        assert_eq!(presses, 3);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn holding_keeps_device_awake() {
        let level = Cell::new(true);
        let clock = ManualClock::new(0);
        let log = RefCell::new(Vec::new());
        let config = ButtonConfig::default()
            .lifecycle(crate::config::LifecycleConfig::default().idle_timeout_ms(500));
        let mut dev = EventInput::with_callback(button(&level, &clock, config), |ev, _m| {
            log.borrow_mut().push(ev);
        });
        dev.begin().unwrap();
        level.set(false);
        hold(&mut dev, &clock, 2_000);
        assert!(!log.borrow().contains(&InputEvent::Idle));
        level.set(true);
        hold(&mut dev, &clock, 1_000);
        assert_eq!(log.borrow().last(), Some(&InputEvent::Idle));
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn rise_without_recorded_press_does_not_count() {
        let level = Cell::new(false);
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(
            button(&level, &clock, ButtonConfig::default()),
            |ev, _m| log.push(ev),
        );
        // started while held
        dev.begin().unwrap();
        level.set(true);
        hold(&mut dev, &clock, 400);
        assert_eq!(dev.click_count(), 0);
        assert_eq!(log, [InputEvent::Released]);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn active_high_wiring() {
        let level = Cell::new(false);
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let config = ButtonConfig::default().polarity(Polarity::ActiveHigh);
        let mut dev = EventInput::with_callback(button(&level, &clock, config), |ev, _m| log.push(ev));
        dev.begin().unwrap();
        level.set(true);
        hold(&mut dev, &clock, 40);
        assert!(dev.is_pressed());
        level.set(false);
        hold(&mut dev, &clock, 400);
        assert_eq!(
            log,
            [InputEvent::Pressed, InputEvent::Released, InputEvent::Clicked]
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn disable_clears_pending_counts() {
        let level = Cell::new(true);
        let clock = ManualClock::new(0);
        let mut log = Vec::new();
        let mut dev = EventInput::with_callback(
            button(&level, &clock, ButtonConfig::default()),
            |ev, _m| log.push(ev),
        );
        dev.begin().unwrap();
        level.set(false);
        hold(&mut dev, &clock, 30);
        level.set(true);
        hold(&mut dev, &clock, 30);
        dev.enable(false);
        hold(&mut dev, &clock, 400);
        dev.enable(true);
        assert_eq!(
            log,
            [
                InputEvent::Pressed,
                InputEvent::Released,
                InputEvent::Disabled,
                InputEvent::Enabled
            ]
        );
    }

    #[test]
    fn long_press_schedule_past_the_tick_stops() {
        let level = Cell::new(true);
        let clock = ManualClock::new(0);
        let mut b = button(&level, &clock, ButtonConfig::default().repeat_long_press(true));
        assert_eq!(b.long_press_threshold(), Some(750));
        b.long_press_count = 2;
        assert_eq!(b.long_press_threshold(), Some(1_750));
        b.long_press_count = u32::MAX / 500;
        assert_eq!(b.long_press_threshold(), None);
        let mut events = EventBuffer::new();
        b.check_long_press(0, &mut events);
        assert!(events.is_empty());
    }
}
