//! Monotonic millisecond clock
//!
//! Every timing decision in the engine (debounce interval, multi-click gap,
//! long-press threshold, encoder rate limit, idle timeout) is a comparison of
//! two readings of a free-running `u32` millisecond counter. The counter wraps
//! after ~49.7 days; all elapsed-time arithmetic goes through [`elapsed_ms`],
//! which uses wrapping subtraction so the roll-over is invisible.

/// Source of the current time in milliseconds.
pub trait Clock {
    /// Current tick in milliseconds. Wraps at `u32::MAX`.
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds from `since` to `now` on a wrapping tick.
#[inline]
#[must_use]
pub const fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Clock backed by `embassy_time::Instant`.
///
/// On hardware this reads the Embassy time driver; on desktop it needs the
/// `embassy-time/std` feature.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    /// Create the clock. Stateless; copies are interchangeable.
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for EmbassyClock {
    #[allow(clippy::cast_possible_truncation)] // intentional: the tick wraps like millis()
    fn now_ms(&self) -> u32 {
        embassy_time::Instant::now().as_millis() as u32
    }
}
