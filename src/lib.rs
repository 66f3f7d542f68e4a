//! Breathalyzer firmware core.
//!
//! Everything that decides *what* the device does lives here and builds on
//! the host: the mode controller, the sampler, and the button classifier,
//! plus the capability traits they drive.  The ESP-IDF drivers that
//! implement those traits are part of the firmware binary (`main.rs`).
//!
//! Usage: `cargo test` on the host; flash the binary for the device target.

pub mod bac;
pub mod clock;
pub mod config;
pub mod controller;
pub mod events;
pub mod hal;
pub mod input;
pub mod led;
pub mod sampler;
pub mod screen;
pub mod sim;

pub use controller::{DeviceState, ModeController, ReadingResult};
pub use events::{DeviceMode, DisplayUnit, Gesture, Level, ResultBand};
