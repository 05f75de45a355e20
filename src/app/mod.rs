//! Application core — playback orchestration, zero I/O.
//!
//! All interaction with hardware happens through the **port traits**
//! defined in [`ports`], keeping this layer testable without real
//! peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
