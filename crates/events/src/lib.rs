//! Input event classification engine
//!
//! Turns debounced pin levels and rotary positions into semantic events
//! (pressed, clicked, long-pressed, on/off, changed, idle) and hands each one
//! to a per-device callback. Runs from a cooperative poll loop: no heap, no
//! blocking, no interrupts except an optional encoder position counter.
//!
//! # Architecture
//!
//! ```text
//! EventInput<M, H>            callback slot + lifecycle gate + idle step
//!   └─ M: Machine
//!        ├─ Button<D, C>      click / double / multi / long-click / long-press
//!        ├─ Switch<D, C>      on / off
//!        ├─ Encoder<S, C>     floor(raw / divisor) → CHANGED
//!        └─ Joystick<A, C>    two AxisEngines → CHANGED_X / CHANGED_Y / IDLE
//! ```
//!
//! `D` is an [`input_platform::Debounce`], `C` an [`input_platform::Clock`],
//! `S` a [`rotary::PositionSource`] and `A` a [`joystick::AxisEngine`].
//!
//! # Features
//!
//! - `std`: [`mocks::MockAxis`] and the platform mocks
//! - `defmt`: `defmt::Format` derives and dispatch tracing
//! - `serde`: `Serialize`/`Deserialize` on [`InputEvent`] and the configs
//!
//! # Example
//!
//! ```no_run
//! use input_events::{Button, EventInput, InputEvent};
//! use input_platform::{Bounce, EmbassyClock};
//!
//! fn run<P: embedded_hal::digital::InputPin>(pin: P) {
//!     let mut button = EventInput::with_callback(
//!         Button::new(Bounce::new(pin), EmbassyClock),
//!         |event: InputEvent, b: &Button<_, _>| {
//!             if event == InputEvent::DoubleClicked {
//!                 let _ = b.click_count();
//!             }
//!         },
//!     );
//!     let _ = button.begin();
//!     loop {
//!         button.update();
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod button;
pub mod config;
pub mod device;
pub mod encoder;
pub mod event;
pub mod joystick;
pub mod lifecycle;
pub mod mocks;
pub mod rotary;
pub mod switch;

pub use button::Button;
pub use config::{ButtonConfig, EncoderConfig, LifecycleConfig, SwitchConfig};
pub use device::{EventInput, Machine};
pub use encoder::Encoder;
pub use event::{EventBuffer, EventMask, InputEvent};
pub use joystick::{AxisEngine, Joystick};
pub use lifecycle::Lifecycle;
pub use rotary::{
    InterruptEncoder, PositionReader, PositionSource, QuadratureDecoder, QuadratureEncoder,
    SharedPosition, SingleEdgeEncoder,
};
pub use switch::Switch;

/// Button device: debouncer `D`, clock `C`, callback `H`.
pub type EventButton<D, C, H> = EventInput<Button<D, C>, H>;

/// Switch device.
pub type EventSwitch<D, C, H> = EventInput<Switch<D, C>, H>;

/// Encoder device over position source `S`.
pub type EventEncoder<S, C, H> = EventInput<Encoder<S, C>, H>;

/// Joystick device over axis engine `A`.
pub type EventJoystick<A, C, H> = EventInput<Joystick<A, C>, H>;
