//! System configuration parameters
//!
//! All tunable parameters for the beacon.  Defaults match the reference
//! board; a build can override them by setting `MORSE_BEACON_CONFIG` to a
//! JSON object at compile time, e.g.
//!
//! ```text
//! MORSE_BEACON_CONFIG='{"tick_period_ms":250,"initial_speed":"X2"}' cargo build --features espidf
//! ```
//!
//! Missing fields keep their defaults.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::controls::SpeedMultiplier;
use crate::error::{Error, Result};
use crate::sequence::Message;

/// Shortest accepted base tick.
pub const MIN_TICK_PERIOD_MS: u32 = 10;
/// Longest accepted base tick.
pub const MAX_TICK_PERIOD_MS: u32 = 10_000;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Timing ---
    /// Base tick period (one Morse dot) in milliseconds
    pub tick_period_ms: u32,

    // --- Playback ---
    /// Message played after boot
    pub initial_message: Message,
    /// Speed multiplier after boot
    pub initial_speed: SpeedMultiplier,
    /// Light LED 0 before the first tick to show the board is alive
    pub boot_indicator: bool,

    // --- Inputs ---
    /// Edges closer together than this are treated as switch bounce
    pub button_debounce_ms: u32,

    // --- Logging ---
    /// Emit a status line every N ticks (0 = never)
    pub status_interval_ticks: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: 500,

            initial_message: Message::Sos,
            initial_speed: SpeedMultiplier::X1,
            boot_indicator: true,

            button_debounce_ms: 50,

            status_interval_ticks: 120, // once a minute at 500 ms
        }
    }
}

impl SystemConfig {
    /// Range-check every field.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TICK_PERIOD_MS..=MAX_TICK_PERIOD_MS).contains(&self.tick_period_ms) {
            return Err(Error::Config("tick_period_ms out of range"));
        }
        if self.button_debounce_ms >= self.tick_period_ms {
            return Err(Error::Config("button_debounce_ms must be shorter than a tick"));
        }
        Ok(())
    }

    /// Parse and validate a JSON override.  Absent fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|_| Error::Config("malformed JSON"))?;
        config.validate()?;
        Ok(config)
    }

    /// Build-time configuration: the `MORSE_BEACON_CONFIG` override if it
    /// was set and is valid, otherwise defaults.
    pub fn load() -> Self {
        match option_env!("MORSE_BEACON_CONFIG") {
            Some(json) => match Self::from_json(json) {
                Ok(config) => {
                    info!("Config: using build-time override");
                    config
                }
                Err(e) => {
                    warn!("Config: override rejected ({}), using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.tick_period_ms, 500);
        assert_eq!(c.initial_message, Message::Sos);
        assert_eq!(c.initial_speed, SpeedMultiplier::X1);
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig {
            initial_message: Message::Ok,
            initial_speed: SpeedMultiplier::X3,
            ..SystemConfig::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c, c2);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let c = SystemConfig::from_json(r#"{"tick_period_ms":250,"initial_speed":"X2"}"#).unwrap();
        assert_eq!(c.tick_period_ms, 250);
        assert_eq!(c.initial_speed, SpeedMultiplier::X2);
        assert_eq!(c.initial_message, Message::Sos);
        assert_eq!(c.button_debounce_ms, 50);
    }

    #[test]
    fn rejects_tick_period_out_of_range() {
        let too_fast = SystemConfig {
            tick_period_ms: 5,
            button_debounce_ms: 1,
            ..SystemConfig::default()
        };
        assert!(matches!(too_fast.validate(), Err(Error::Config(_))));

        let too_slow = SystemConfig {
            tick_period_ms: 60_000,
            ..SystemConfig::default()
        };
        assert!(too_slow.validate().is_err());
    }

    #[test]
    fn rejects_debounce_longer_than_tick() {
        let c = SystemConfig {
            tick_period_ms: 100,
            button_debounce_ms: 100,
            ..SystemConfig::default()
        };
        assert_eq!(
            c.validate(),
            Err(Error::Config("button_debounce_ms must be shorter than a tick"))
        );
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert_eq!(
            SystemConfig::from_json("{not json"),
            Err(Error::Config("malformed JSON"))
        );
    }

    #[test]
    fn zero_speed_cannot_be_configured() {
        assert!(SystemConfig::from_json(r#"{"initial_speed":0}"#).is_err());
    }
}
