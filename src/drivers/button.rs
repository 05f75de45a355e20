//! ISR-debounced control buttons.
//!
//! ## Hardware
//!
//! Two active-low momentary switches with pull-ups.  Each GPIO fires on
//! the falling edge; the ISR passes the edge timestamp here, the edge is
//! debounced, and an accepted edge calls the matching control handler and
//! queues a notification for the main loop.
//!
//! | Button | Edge handler                | Control                         |
//! |--------|-----------------------------|---------------------------------|
//! | 0      | `on_message_toggle_edge()`  | `Controls::request_message_switch()` |
//! | 1      | `on_speed_cycle_edge()`     | `Controls::cycle_speed()`       |
//!
//! Everything here is lock-free and allocation-free so it can run in
//! interrupt context.  Nothing here writes outputs.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::controls::{Controls, SpeedMultiplier};
use crate::events::{Event, EventQueue};

/// Default bounce window, used until configuration is applied.
pub const DEFAULT_DEBOUNCE_MS: u32 = 50;

/// Rejects edges that arrive within `window_ms` of the last accepted one.
///
/// Timestamps are milliseconds since boot, truncated to `u32`; comparisons
/// use wrapping arithmetic.  One writer (the ISR for that pin).
pub struct EdgeDebouncer {
    last_ms: AtomicU32,
    seen: AtomicBool,
    window_ms: AtomicU32,
}

impl EdgeDebouncer {
    pub const fn new(window_ms: u32) -> Self {
        Self {
            last_ms: AtomicU32::new(0),
            seen: AtomicBool::new(false),
            window_ms: AtomicU32::new(window_ms),
        }
    }

    pub fn set_window(&self, window_ms: u32) {
        self.window_ms.store(window_ms, Ordering::Release);
    }

    /// Returns `true` if the edge at `now_ms` is a real press.
    pub fn accept(&self, now_ms: u32) -> bool {
        let window = self.window_ms.load(Ordering::Acquire);
        if self.seen.load(Ordering::Acquire) {
            let last = self.last_ms.load(Ordering::Acquire);
            if now_ms.wrapping_sub(last) < window {
                return false;
            }
        }
        self.last_ms.store(now_ms, Ordering::Release);
        self.seen.store(true, Ordering::Release);
        true
    }
}

/// The two control buttons bound to a shared [`Controls`] block.
pub struct ControlButtons<'c> {
    controls: &'c Controls,
    toggle: EdgeDebouncer,
    speed: EdgeDebouncer,
}

impl<'c> ControlButtons<'c> {
    pub const fn new(controls: &'c Controls, debounce_ms: u32) -> Self {
        Self {
            controls,
            toggle: EdgeDebouncer::new(debounce_ms),
            speed: EdgeDebouncer::new(debounce_ms),
        }
    }

    pub fn set_debounce_ms(&self, debounce_ms: u32) {
        self.toggle.set_window(debounce_ms);
        self.speed.set_window(debounce_ms);
    }

    /// Falling edge on the message button.  Returns `true` if accepted.
    pub fn on_message_toggle_edge(&self, now_ms: u32, events: &EventQueue) -> bool {
        if !self.toggle.accept(now_ms) {
            return false;
        }
        self.controls.request_message_switch();
        events.push(Event::MessageToggleRequested);
        true
    }

    /// Falling edge on the speed button.  Returns the new speed if accepted.
    pub fn on_speed_cycle_edge(&self, now_ms: u32, events: &EventQueue) -> Option<SpeedMultiplier> {
        if !self.speed.accept(now_ms) {
            return None;
        }
        let speed = self.controls.cycle_speed();
        events.push(Event::SpeedCycled);
        Some(speed)
    }
}
