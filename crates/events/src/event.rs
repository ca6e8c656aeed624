//! Event types and the block/allow mask

/// Semantic event dispatched to a device callback.
///
/// The discriminant doubles as the bit index in [`EventMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[repr(u8)]
pub enum InputEvent {
    /// Button went to its active level.
    Pressed = 0,
    /// Button went back to its inactive level.
    Released = 1,
    /// One short press, finalized after the multi-click gap.
    Clicked = 2,
    /// Two short presses within the multi-click gap.
    DoubleClicked = 3,
    /// Three or more short presses within the multi-click gap.
    MultiClicked = 4,
    /// A press held past the long-click duration, then released.
    LongClicked = 5,
    /// Fired while a press is held past the long-click duration.
    LongPress = 6,
    /// Switch turned on.
    On = 7,
    /// Switch turned off.
    Off = 8,
    /// Encoder or axis position changed.
    Changed = 9,
    /// Joystick X axis changed.
    ChangedX = 10,
    /// Joystick Y axis changed.
    ChangedY = 11,
    /// Device was enabled.
    Enabled = 12,
    /// Device was disabled.
    Disabled = 13,
    /// No qualifying event for the idle timeout.
    Idle = 14,
}

impl InputEvent {
    /// Number of event types.
    pub const COUNT: usize = 15;

    /// Every event type in discriminant order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pressed,
        Self::Released,
        Self::Clicked,
        Self::DoubleClicked,
        Self::MultiClicked,
        Self::LongClicked,
        Self::LongPress,
        Self::On,
        Self::Off,
        Self::Changed,
        Self::ChangedX,
        Self::ChangedY,
        Self::Enabled,
        Self::Disabled,
        Self::Idle,
    ];

    /// Mask bit for this event.
    #[inline]
    #[allow(clippy::arithmetic_side_effects)] // discriminant < 16
    pub const fn bit(self) -> u16 {
        1 << (self as u8)
    }

    /// ENABLED, DISABLED and IDLE describe the device, not the user, and
    /// never reset the idle timer.
    #[inline]
    pub const fn is_lifecycle(self) -> bool {
        matches!(self, Self::Enabled | Self::Disabled | Self::Idle)
    }

    /// Upper-case name for logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pressed => "PRESSED",
            Self::Released => "RELEASED",
            Self::Clicked => "CLICKED",
            Self::DoubleClicked => "DOUBLE_CLICKED",
            Self::MultiClicked => "MULTI_CLICKED",
            Self::LongClicked => "LONG_CLICKED",
            Self::LongPress => "LONG_PRESS",
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Changed => "CHANGED",
            Self::ChangedX => "CHANGED_X",
            Self::ChangedY => "CHANGED_Y",
            Self::Enabled => "ENABLED",
            Self::Disabled => "DISABLED",
            Self::Idle => "IDLE",
        }
    }
}

impl core::fmt::Display for InputEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of blocked event types. The default blocks nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EventMask {
    blocked: u16,
}

impl EventMask {
    // One bit per event type.
    const FULL: u16 = 0x7FFF;

    /// Mask that allows every event.
    pub const fn allow_all_mask() -> Self {
        Self { blocked: 0 }
    }

    /// Stop `event` from firing.
    pub fn block(&mut self, event: InputEvent) {
        self.blocked |= event.bit();
    }

    /// Let a previously blocked `event` fire again.
    pub fn allow(&mut self, event: InputEvent) {
        self.blocked &= !event.bit();
    }

    /// Block every event. Usually followed by a few [`allow`](Self::allow) calls.
    pub fn block_all(&mut self) {
        self.blocked = Self::FULL;
    }

    /// Clear every block.
    pub fn allow_all(&mut self) {
        self.blocked = 0;
    }

    /// True when `event` is not blocked.
    pub const fn is_allowed(&self, event: InputEvent) -> bool {
        self.blocked & event.bit() == 0
    }

    /// Raw blocked bits, bit n = discriminant n.
    pub const fn bits(&self) -> u16 {
        self.blocked
    }
}

/// Candidate events produced by one poll, dispatched in order.
pub type EventBuffer = heapless::Vec<InputEvent, 8>;

/// Append `event`, dropping it if the buffer is full.
pub(crate) fn emit(events: &mut EventBuffer, event: InputEvent) {
    if events.push(event).is_err() {
        #[cfg(feature = "defmt")]
        defmt::warn!("event buffer full, dropped {}", event);
    }
}
