//! Enable state, idle timer and event gate shared by every device

use input_platform::clock::elapsed_ms;

use crate::config::LifecycleConfig;
use crate::event::{EventMask, InputEvent};

/// Per-device lifecycle state.
///
/// `idle_flagged` starts set so a freshly started device does not report
/// IDLE before it has produced anything.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Lifecycle {
    id: u8,
    value: u8,
    enabled: bool,
    idle_flagged: bool,
    last_event_ms: u32,
    idle_timeout_ms: u32,
    mask: EventMask,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new(LifecycleConfig::default())
    }
}

impl Lifecycle {
    /// Enabled lifecycle with nothing blocked.
    pub fn new(config: LifecycleConfig) -> Self {
        Self {
            id: config.id,
            value: config.value,
            enabled: true,
            idle_flagged: true,
            last_event_ms: 0,
            idle_timeout_ms: config.idle_timeout_ms,
            mask: EventMask::default(),
        }
    }

    /// Start the idle clock at `now_ms`.
    pub fn begin(&mut self, now_ms: u32) {
        self.last_event_ms = now_ms;
    }

    /// Gate run immediately before an event fires.
    ///
    /// Returns false when the device is disabled or `event` is blocked.
    /// Otherwise a non-lifecycle event restarts the idle timer and clears
    /// the idle flag. A `true` result commits the caller to firing.
    pub fn is_invokable(&mut self, event: InputEvent, now_ms: u32) -> bool {
        if !self.enabled || !self.mask.is_allowed(event) {
            return false;
        }
        if !event.is_lifecycle() {
            self.last_event_ms = now_ms;
            self.idle_flagged = false;
        }
        true
    }

    /// Pure mask query.
    pub fn is_event_allowed(&self, event: InputEvent) -> bool {
        self.mask.is_allowed(event)
    }

    /// True once more than the idle timeout has passed since the last
    /// qualifying event, whether or not IDLE has already fired.
    pub fn is_idle(&self, now_ms: u32) -> bool {
        elapsed_ms(now_ms, self.last_event_ms) > self.idle_timeout_ms
    }

    /// True when IDLE should be attempted on this poll.
    pub fn idle_due(&self, now_ms: u32) -> bool {
        !self.idle_flagged && self.is_idle(now_ms)
    }

    /// Record that the IDLE step ran for this idle period.
    pub fn mark_idle(&mut self) {
        self.idle_flagged = true;
    }

    /// True after IDLE and before the next qualifying event.
    pub fn is_idle_flagged(&self) -> bool {
        self.idle_flagged
    }

    /// Restart the idle timer without firing anything.
    pub fn reset_idle_timer(&mut self, now_ms: u32) {
        self.last_event_ms = now_ms;
    }

    /// Milliseconds since the last qualifying event.
    pub fn ms_since_last_event(&self, now_ms: u32) -> u32 {
        elapsed_ms(now_ms, self.last_event_ms)
    }

    /// Tick of the last qualifying event.
    pub fn last_event_ms(&self) -> u32 {
        self.last_event_ms
    }

    /// Whether the device is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Caller-chosen id.
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Set the caller-chosen id.
    pub fn set_id(&mut self, id: u8) {
        self.id = id;
    }

    /// Caller-chosen value.
    pub fn value(&self) -> u8 {
        self.value
    }

    /// Set the caller-chosen value.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Idle timeout in ms.
    pub fn idle_timeout_ms(&self) -> u32 {
        self.idle_timeout_ms
    }

    /// Set the idle timeout in ms.
    pub fn set_idle_timeout(&mut self, ms: u32) {
        self.idle_timeout_ms = ms;
    }

    /// Current mask.
    pub fn mask(&self) -> EventMask {
        self.mask
    }

    /// Stop `event` from firing.
    pub fn block_event(&mut self, event: InputEvent) {
        self.mask.block(event);
    }

    /// Let `event` fire again.
    pub fn allow_event(&mut self, event: InputEvent) {
        self.mask.allow(event);
    }

    /// Block every event.
    pub fn block_all_events(&mut self) {
        self.mask.block_all();
    }

    /// Clear every block.
    pub fn allow_all_events(&mut self) {
        self.mask.allow_all();
    }
}
