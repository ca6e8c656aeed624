//! Hardware-facing layer for `input-events`
//!
//! Everything the classification engine consumes from the board lives here,
//! behind small traits so the engine can be driven by real pins, GPIO
//! expanders, or test mocks without change.
//!
//! # Architecture Layers
//!
//! ```text
//! Application (poll loop, user callbacks)
//!         ↓
//! input-events (button / switch / encoder / joystick state machines)
//!         ↓
//! input-platform (this crate - clock, debouncer, expanders)
//!         ↓
//! embedded-hal pins and I2C buses (HAL crate of the target)
//! ```
//!
//! # Modules
//!
//! - [`clock`] - wrapping millisecond tick ([`Clock`], [`EmbassyClock`])
//! - [`gpio`] - pin polarity and pin modes
//! - [`debounce`] - debounce primitive ([`Debounce`]) and [`Bounce`]
//! - [`expander`] - GPIO expanders over I2C and [`ExpanderPin`]
//! - [`error`] - [`ExpanderError`]
//!
//! # Features
//!
//! - `std`: mocks for desktop tests and `std::error::Error` impls
//! - `defmt`: `defmt::Format` derives and log statements
//! - `serde`: `Serialize`/`Deserialize` on configuration types
//!
//! # Example
//!
//! ```no_run
//! use input_platform::{Bounce, Debounce, EmbassyClock, Clock};
//!
//! fn poll<P: embedded_hal::digital::InputPin>(bounce: &mut Bounce<P>, clock: &EmbassyClock) {
//!     if bounce.update(clock.now_ms()) && bounce.fell() {
//!         // pin settled low
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
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
// Pedantic lints suppressed for this hardware crate:
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod clock;
pub mod config;
pub mod debounce;
pub mod error;
pub mod expander;
pub mod gpio;
pub mod mocks;

pub use clock::{Clock, EmbassyClock};
pub use debounce::{Bounce, Debounce};
pub use error::ExpanderError;
pub use expander::{ExpanderPin, GpioExpander, Mcp23017, Pcf8574, Pcf8575};
pub use gpio::{PinMode, Polarity};
