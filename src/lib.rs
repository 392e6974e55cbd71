//! Control core for a relay-driven antenna azimuth rotator
//!
//! A fixed 10 ms tick drives a finite-state machine that sequences the
//! rotator's power, brake and direction relays with mechanical settle
//! delays, plus a preset controller that steers toward an operator-dialed
//! target heading. In the foreground, a byte-at-a-time decoder
//! reconstructs `$ACRAW` sentences from the compass sensor head and feeds
//! a tilt-compensated, wraparound-safe heading pipeline.
//!
//! Hardware is reached only through the traits in [`hal`]; the crate is
//! `no_std`, allocation-free and panic-free outside of tests.

#![cfg_attr(not(test), no_std)]

pub mod application;
pub mod compass;
pub mod config;
pub mod drivers;
pub mod hal;
pub mod math;
pub mod protocol;
pub mod rotator;

pub use application::Controller;
pub use compass::{HeadingAverager, HeadingEstimator, MagCalibration};
pub use hal::{HeadingDisplay, KeyState, RelayBank};
pub use math::{IVector, Vector3};
pub use protocol::{Sentence, SentenceDecoder};
pub use rotator::{Command, Preset, PresetCommand, Rotator, State};
