//! Interrupt-driven event system.
//!
//! Events are produced by:
//! - the tick timer callback (one [`Event::PlaybackTick`] per period)
//! - the button ISRs, after they have already updated the shared controls
//!
//! and consumed by the main loop, which runs the scheduler and logs.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Timer task  │────▶│              │     │              │
//! │ Button ISR  │────▶│  EventQueue  │────▶│  Main Loop   │
//! │ Button ISR  │────▶│  (atomics)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! There are several producers, so instead of a ring buffer each event
//! kind has its own atomic slot.  Ticks are counted, so a slow main loop
//! catches up instead of losing time; button notifications coalesce,
//! since the control change itself was applied in the ISR.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// System event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Event {
    /// A message switch was requested from a button.
    MessageToggleRequested = 0,
    /// The speed multiplier was cycled from a button.
    SpeedCycled = 1,
    /// One base tick elapsed.
    PlaybackTick = 10,
}

/// Lock-free, multi-producer / single-consumer event slots.
pub struct EventQueue {
    ticks: AtomicU32,
    toggle: AtomicBool,
    speed: AtomicBool,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU32::new(0),
            toggle: AtomicBool::new(false),
            speed: AtomicBool::new(false),
        }
    }

    /// Record an event.  Safe to call from ISR context.
    pub fn push(&self, event: Event) {
        match event {
            Event::PlaybackTick => {
                self.ticks.fetch_add(1, Ordering::Release);
            }
            Event::MessageToggleRequested => self.toggle.store(true, Ordering::Release),
            Event::SpeedCycled => self.speed.store(true, Ordering::Release),
        }
    }

    /// Hand every pending event to `handler`.
    ///
    /// Button notifications come first, then one `PlaybackTick` per elapsed
    /// period.  Returns the number of ticks delivered.
    pub fn drain(&self, mut handler: impl FnMut(Event)) -> u32 {
        if self.toggle.swap(false, Ordering::AcqRel) {
            handler(Event::MessageToggleRequested);
        }
        if self.speed.swap(false, Ordering::AcqRel) {
            handler(Event::SpeedCycled);
        }

        let ticks = self.ticks.swap(0, Ordering::AcqRel);
        if ticks > 1 {
            log::warn!("events: main loop {} ticks behind, catching up", ticks - 1);
        }
        for _ in 0..ticks {
            handler(Event::PlaybackTick);
        }
        ticks
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.load(Ordering::Acquire) == 0
            && !self.toggle.load(Ordering::Acquire)
            && !self.speed.load(Ordering::Acquire)
    }

    pub fn pending_ticks(&self) -> u32 {
        self.ticks.load(Ordering::Acquire)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide queue fed by the timer callback and button ISRs.
pub static EVENTS: EventQueue = EventQueue::new();

/// Push an event into the global queue.
pub fn push_event(event: Event) {
    EVENTS.push(event);
}

/// Drain the global queue.
pub fn drain_events(handler: impl FnMut(Event)) -> u32 {
    EVENTS.drain(handler)
}
