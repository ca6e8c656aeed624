//! Raw position sources for the encoder adapter
//!
//! A source counts raw steps; the [`Encoder`](crate::Encoder) machine turns
//! them into logical positions and CHANGED events.
//!
//! | Source                | Decodes                          | Use when                        |
//! |-----------------------|----------------------------------|---------------------------------|
//! | [`QuadratureEncoder`] | inside `position()`              | polled fast enough for every edge |
//! | [`InterruptEncoder`]  | in the pin-change interrupt      | pins raise interrupts           |
//! | [`SingleEdgeEncoder`] | rising edge of A only            | slow pins, e.g. on an expander  |

use core::cell::Cell;
use core::convert::Infallible;

use critical_section::Mutex;
use embedded_hal::digital::InputPin;

use super::quadrature::{QuadratureDecoder, COUNTS_PER_DETENT};

/// Raw step counter behind an encoder.
pub trait PositionSource {
    /// Error reported by [`begin`](PositionSource::begin).
    type Error;

    /// Take the initial pin state.
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Current raw position. Polled sources decode here.
    fn position(&mut self) -> i32;

    /// Overwrite the raw position.
    fn set_position(&mut self, position: i32);
}

fn read_pair<A, B>(a: &mut A, b: &mut B) -> Result<(bool, bool), A::Error>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    Ok((a.is_high()?, b.is_high()?))
}

// ---------------------------------------------------------------------------
// QuadratureEncoder: polled full quadrature
// ---------------------------------------------------------------------------

/// Full-quadrature decoding, run each time the position is read.
#[derive(Debug)]
pub struct QuadratureEncoder<A, B> {
    pin_a: A,
    pin_b: B,
    decoder: QuadratureDecoder,
    position: i32,
}

impl<A, B> QuadratureEncoder<A, B>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    /// Encoder on pins A and B.
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self {
            pin_a,
            pin_b,
            decoder: QuadratureDecoder::new(),
            position: 0,
        }
    }

    /// Give the pins back.
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}

impl<A, B> PositionSource for QuadratureEncoder<A, B>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    type Error = A::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        let (a, b) = read_pair(&mut self.pin_a, &mut self.pin_b)?;
        self.decoder.reset(a, b);
        Ok(())
    }

    fn position(&mut self) -> i32 {
        // A failed read counts as no motion.
        if let Ok((a, b)) = read_pair(&mut self.pin_a, &mut self.pin_b) {
            let step = self.decoder.decode(a, b);
            self.position = self.position.wrapping_add(i32::from(step));
        } else {
            #[cfg(feature = "defmt")]
            defmt::trace!("encoder: pin read failed");
        }
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}

// ---------------------------------------------------------------------------
// SharedPosition / InterruptEncoder / PositionReader: interrupt driven
// ---------------------------------------------------------------------------

/// Position counter shared between an interrupt handler and the main loop.
///
/// Every access runs inside a critical section. Usable as a `static`.
pub struct SharedPosition {
    position: Mutex<Cell<i32>>,
}

impl core::fmt::Debug for SharedPosition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedPosition")
            .field("position", &self.get())
            .finish()
    }
}

impl Default for SharedPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedPosition {
    /// Counter at zero.
    pub const fn new() -> Self {
        Self {
            position: Mutex::new(Cell::new(0)),
        }
    }

    /// Current value.
    pub fn get(&self) -> i32 {
        critical_section::with(|cs| self.position.borrow(cs).get())
    }

    /// Overwrite the value.
    pub fn set(&self, position: i32) {
        critical_section::with(|cs| self.position.borrow(cs).set(position));
    }

    /// Add `delta`, wrapping.
    pub fn add(&self, delta: i32) {
        critical_section::with(|cs| {
            let cell = self.position.borrow(cs);
            cell.set(cell.get().wrapping_add(delta));
        });
    }

    /// Read-side handle for the encoder adapter.
    pub fn reader(&self) -> PositionReader<'_> {
        PositionReader { shared: self }
    }
}

/// Decoder half of the interrupt-driven encoder. Owned by the interrupt
/// handler; call [`on_interrupt`](Self::on_interrupt) on every pin change.
#[derive(Debug)]
pub struct InterruptEncoder<'a, A, B> {
    pin_a: A,
    pin_b: B,
    decoder: QuadratureDecoder,
    shared: &'a SharedPosition,
}

impl<'a, A, B> InterruptEncoder<'a, A, B>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    /// Decoder writing into `shared`.
    pub fn new(pin_a: A, pin_b: B, shared: &'a SharedPosition) -> Self {
        Self {
            pin_a,
            pin_b,
            decoder: QuadratureDecoder::new(),
            shared,
        }
    }

    /// Seed the decoder from the current pin state.
    pub fn begin(&mut self) -> Result<(), A::Error> {
        let (a, b) = read_pair(&mut self.pin_a, &mut self.pin_b)?;
        self.decoder.reset(a, b);
        Ok(())
    }

    /// Decode one transition into the shared counter.
    pub fn on_interrupt(&mut self) -> Result<(), A::Error> {
        let (a, b) = read_pair(&mut self.pin_a, &mut self.pin_b)?;
        let step = self.decoder.decode(a, b);
        if step != 0 {
            self.shared.add(i32::from(step));
        }
        Ok(())
    }

    /// Read-side handle for the encoder adapter.
    pub fn reader(&self) -> PositionReader<'a> {
        self.shared.reader()
    }
}

/// Read side of a [`SharedPosition`]. Never decodes.
#[derive(Debug, Clone, Copy)]
pub struct PositionReader<'a> {
    shared: &'a SharedPosition,
}

impl PositionSource for PositionReader<'_> {
    type Error = Infallible;

    fn begin(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn position(&mut self) -> i32 {
        self.shared.get()
    }

    fn set_position(&mut self, position: i32) {
        self.shared.set(position);
    }
}

// ---------------------------------------------------------------------------
// SingleEdgeEncoder: rising edge of A only
// ---------------------------------------------------------------------------

/// Counts only rising edges of A; B's level gives the direction. Each edge
/// moves the position by `multiplier` so a detent reads like full
/// quadrature.
#[derive(Debug)]
pub struct SingleEdgeEncoder<A, B> {
    pin_a: A,
    pin_b: B,
    previous_a: bool,
    position: i32,
    multiplier: i32,
}

impl<A, B> SingleEdgeEncoder<A, B>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    /// Encoder with the default multiplier of 4.
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self::with_multiplier(pin_a, pin_b, COUNTS_PER_DETENT)
    }

    /// Encoder with a custom multiplier.
    pub fn with_multiplier(pin_a: A, pin_b: B, multiplier: i32) -> Self {
        Self {
            pin_a,
            pin_b,
            previous_a: true,
            position: 0,
            multiplier,
        }
    }

    /// Counts per rising edge.
    pub fn multiplier(&self) -> i32 {
        self.multiplier
    }

    /// Give the pins back.
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}

impl<A, B> PositionSource for SingleEdgeEncoder<A, B>
where
    A: InputPin,
    B: InputPin<Error = A::Error>,
{
    type Error = A::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.previous_a = self.pin_a.is_high()?;
        Ok(())
    }

    fn position(&mut self) -> i32 {
        if let Ok((a, b)) = read_pair(&mut self.pin_a, &mut self.pin_b) {
            if a && !self.previous_a {
                self.position = if b {
                    self.position.wrapping_add(self.multiplier)
                } else {
                    self.position.wrapping_sub(self.multiplier)
                };
            }
            self.previous_a = a;
        }
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}
