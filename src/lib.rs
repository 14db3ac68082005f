//! Hardware-independent core of the tone generator: waveform construction,
//! frequency timing math, menu/volume/ambient state machines, settings
//! persistence policy, and screen redraw logic.
//!
//! Everything here is pure or generic over `embedded-hal` traits, so it can be
//! unit tested on the host (`cargo test --lib --target <host-triple>`) as well
//! as on the target via the `testsuite` workspace member.

#![cfg_attr(not(test), no_std)]

pub mod ambient;
pub mod config;
pub mod leds;
pub mod menu;
pub mod screen;
pub mod settings;
pub mod time;
pub mod tone;
pub mod volume;
pub mod wave;
