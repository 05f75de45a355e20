//! Morse beacon firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod pins;
pub mod scheduler;
pub mod sequence;

// The hardware-facing modules compile on every target; the actual
// peripheral access is guarded by cfg attributes inside.
pub mod adapters;
pub mod drivers;
