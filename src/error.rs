//! Unified error type for the beacon firmware.
//!
//! The playback core is total and never fails; everything here comes from
//! the layers around it (peripheral bring-up and configuration).  All
//! variants are `Copy` so they can be passed around without allocation.

use core::fmt;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `gpio_config` or a level write failed (ESP-IDF return code).
    Gpio(i32),
    /// Tick timer could not be created or started.
    Timer(i32),
    /// GPIO ISR service install or handler registration failed.
    Isr(i32),
    /// Configuration is invalid or could not be parsed.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio(rc) => write!(f, "gpio: call failed (rc={rc})"),
            Self::Timer(rc) => write!(f, "timer: start failed (rc={rc})"),
            Self::Isr(rc) => write!(f, "isr: install failed (rc={rc})"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
