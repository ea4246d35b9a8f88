//! SRAM retention test for AVR power-down sleep.
//!
//! A pattern is written to a memory region that start-up code never
//! touches. Each reset reads it back, reports it over the serial line,
//! rewrites it and puts the chip back into power-down.

#![cfg_attr(not(test), no_std)]

pub mod boot;
pub mod config;
pub mod drivers;
pub mod hal;
pub mod pattern;
pub mod protocol;
#[cfg(target_arch = "avr")]
pub mod retained;
pub mod selftest;

pub use boot::{Application, BootPath, Dispatcher};
pub use pattern::{PatternEngine, Verdict};
pub use selftest::SelfTest;
