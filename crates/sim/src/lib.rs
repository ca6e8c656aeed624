//! Desktop scenario replay for the input event engine
//!
//! A scenario names one device and a timeline of raw pin levels. [`replay`]
//! builds the device over mock pins and a [`ManualClock`], polls it once per
//! tick and records every event the callback receives together with the
//! device state it could see at that moment.
//!
//! [`ManualClock`]: input_platform::mocks::ManualClock

// Desktop crate: begin errors are reported through their Debug form.
#![allow(clippy::use_debug)]

pub mod replay;
pub mod scenario;

pub use replay::{replay, LoggedEvent, Snapshot};
pub use scenario::{DeviceSpec, Scenario, Step};
