//! Shared playback controls: the message-switch request and the speed
//! multiplier.
//!
//! These are the only fields touched from interrupt context.  Button ISRs
//! (or any other thread) call [`Controls::request_message_switch`] and
//! [`Controls::cycle_speed`]; the scheduler reads them once per tick.
//!
//! ```text
//!  Button ISR ──store(Release)──▶ ┌──────────┐ ──load/swap(Acquire)──▶ Scheduler
//!  Button ISR ──fetch_update────▶ │ Controls │
//!                                 └──────────┘
//! ```
//!
//! Every field is a standalone atomic.  No operation needs a multi-field
//! transaction: the handlers never read the playback cursor and the
//! scheduler reads each control at most once per tick.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Playback speed multiplier applied to every committed step.
///
/// Higher is slower: each step is held `duration_ticks * factor` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpeedMultiplier {
    /// Normal speed.
    X1 = 1,
    /// Half speed.
    X2 = 2,
    /// Third speed.
    X3 = 3,
}

impl SpeedMultiplier {
    pub const fn factor(self) -> u32 {
        self as u32
    }

    /// The next speed in the 1 → 2 → 3 → 1 cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::X1 => Self::X2,
            Self::X2 => Self::X3,
            Self::X3 => Self::X1,
        }
    }

    /// Decode a stored value.  Returns `None` for anything outside 1..=3.
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::X1),
            2 => Some(Self::X2),
            3 => Some(Self::X3),
            _ => None,
        }
    }
}

/// Lock-free control block shared between edge handlers and the scheduler.
pub struct Controls {
    switch_requested: AtomicBool,
    speed: AtomicU8,
}

impl Controls {
    /// Initial state: no switch pending, speed 1.
    pub const fn new() -> Self {
        Self::with_speed(SpeedMultiplier::X1)
    }

    pub const fn with_speed(speed: SpeedMultiplier) -> Self {
        Self {
            switch_requested: AtomicBool::new(false),
            speed: AtomicU8::new(speed as u8),
        }
    }

    // ── Edge handlers (ISR-safe) ──────────────────────────────

    /// Ask for the other message once the current one finishes.
    ///
    /// Idempotent: any number of calls before the boundary collapse into a
    /// single switch.
    pub fn request_message_switch(&self) {
        self.switch_requested.store(true, Ordering::Release);
    }

    /// Advance the speed 1 → 2 → 3 → 1 and return the new value.
    ///
    /// Takes effect on the next committed step; the step currently being
    /// held keeps its duration.
    pub fn cycle_speed(&self) -> SpeedMultiplier {
        let step = |raw: u8| {
            let next = match SpeedMultiplier::from_raw(raw) {
                Some(speed) => speed.next(),
                None => SpeedMultiplier::X1,
            };
            Some(next as u8)
        };
        // The closure never returns `None`, so both arms carry the previous value.
        let prev = match self
            .speed
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, step)
        {
            Ok(prev) | Err(prev) => prev,
        };
        match SpeedMultiplier::from_raw(prev) {
            Some(speed) => speed.next(),
            None => SpeedMultiplier::X1,
        }
    }

    /// Set the speed directly (configuration / commands).
    pub fn set_speed(&self, speed: SpeedMultiplier) {
        self.speed.store(speed as u8, Ordering::Release);
    }

    // ── Scheduler side ────────────────────────────────────────

    /// Current speed.  An out-of-range stored value reads as [`SpeedMultiplier::X1`].
    pub fn speed(&self) -> SpeedMultiplier {
        SpeedMultiplier::from_raw(self.speed.load(Ordering::Acquire)).unwrap_or(SpeedMultiplier::X1)
    }

    /// Speed to apply to a step being committed.
    ///
    /// A stored value outside 1..=3 (in particular 0) is normalised to 1
    /// and written back, so a step is never committed with zero length.
    pub fn speed_for_commit(&self) -> SpeedMultiplier {
        let raw = self.speed.load(Ordering::Acquire);
        match SpeedMultiplier::from_raw(raw) {
            Some(speed) => speed,
            None => {
                log::warn!("controls: invalid speed multiplier {} normalised to 1", raw);
                // Only replace the bad value; a concurrent cycle_speed() wins.
                let _ = self.speed.compare_exchange(
                    raw,
                    SpeedMultiplier::X1 as u8,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                );
                SpeedMultiplier::X1
            }
        }
    }

    /// Whether a switch is pending.  Does not consume it.
    pub fn switch_pending(&self) -> bool {
        self.switch_requested.load(Ordering::Acquire)
    }

    /// Consume a pending switch request.  Returns `true` if one was pending.
    pub fn take_switch_request(&self) -> bool {
        self.switch_requested.swap(false, Ordering::AcqRel)
    }

    /// Overwrite the raw speed byte, bypassing validation.
    #[cfg(test)]
    pub(crate) fn store_raw_speed(&self, raw: u8) {
        self.speed.store(raw, Ordering::Release);
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new()
    }
}
