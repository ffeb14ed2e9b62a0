//! AlarmSim library.
//!
//! Exposes the pure-logic modules (classifier, blink timer, output mapper,
//! beep synthesis) and the adapters for integration testing.  The binary
//! in `main.rs` only wires adapters to [`runtime::Simulator`].

#![deny(unused_must_use)]

pub mod app;
pub mod blink;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod layout;
pub mod outputs;
pub mod runtime;
pub mod severity;
pub mod tone;

pub mod adapters;
