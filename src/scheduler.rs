//! Step-sequence scheduler.
//!
//! Advances through the active message's step table once per base tick,
//! writing each step's level through an [`OutputPort`] and holding it for
//! the step's scaled duration.
//!
//! ```text
//!              ┌─────────────── advance_one_tick() ───────────────┐
//!              │                                                  │
//!   remaining == 0 ?──no──────────────────────────────┐           │
//!        │ yes                                        │           │
//!        ▼                                            │           │
//!   index < len ?──yes──▶ commit step (write output,  │           │
//!        │ no             remaining = ticks × speed,  │           │
//!        ▼                index += 1)                 │           │
//!   boundary: index = 0,          │                   │           │
//!   take switch → flip message    │                   │           │
//!        │                        ▼                   ▼           │
//!        └──────────────▶ remaining > 0 ? remaining -= 1          │
//!              └──────────────────────────────────────────────────┘
//! ```
//!
//! A newly committed step is decremented in the same tick it starts, so a
//! one-tick step holds its level for exactly one tick period.  The boundary
//! tick (wrap or switch) commits nothing and is the only tick in a pass
//! with no output write.

use log::{debug, info};

use crate::app::ports::OutputPort;
use crate::controls::{Controls, SpeedMultiplier};
use crate::sequence::{Message, Step};

/// The scheduler-owned playback cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackState {
    /// Message currently playing.
    pub active_message: Message,
    /// Index of the next step to commit, in `0..=len`.
    pub step_index: usize,
    /// Ticks left on the committed step.
    pub remaining_ticks: u32,
}

impl PlaybackState {
    /// Start of `message`, nothing committed yet.
    pub const fn new(message: Message) -> Self {
        Self {
            active_message: message,
            step_index: 0,
            remaining_ticks: 0,
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(Message::Sos)
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A step was written to its output and loaded into the countdown.
    Committed {
        message: Message,
        index: usize,
        step: Step,
        speed: SpeedMultiplier,
        /// Total ticks this step holds, including the current one.
        held_ticks: u32,
    },
    /// The message finished and starts again.
    Repeated(Message),
    /// The message finished and a pending switch was applied.
    Switched { from: Message, to: Message },
    /// The current step is still being held.
    Holding,
}

/// Drives the [`PlaybackState`] through the step tables.
pub struct Scheduler {
    state: PlaybackState,
}

impl Scheduler {
    pub const fn new(initial: Message) -> Self {
        Self {
            state: PlaybackState::new(initial),
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn active_message(&self) -> Message {
        self.state.active_message
    }

    /// Advance by one base tick.  Call exactly once per tick period.
    pub fn advance_one_tick(
        &mut self,
        controls: &Controls,
        outputs: &mut impl OutputPort,
    ) -> TickOutcome {
        let message = self.state.active_message;
        let sequence = message.sequence();
        let mut outcome = TickOutcome::Holding;

        if self.state.remaining_ticks == 0 {
            match sequence.step(self.state.step_index) {
                Some(step) => {
                    outputs.write_output(step.output, step.level);
                    let speed = controls.speed_for_commit();
                    let held_ticks = step.scaled_ticks(speed);
                    let index = self.state.step_index;
                    self.state.remaining_ticks = held_ticks;
                    self.state.step_index += 1;
                    debug!(
                        "Scheduler: {}[{}] {:?}={} for {} ticks",
                        message.name(),
                        index,
                        step.output,
                        if step.level { "on" } else { "off" },
                        held_ticks
                    );
                    outcome = TickOutcome::Committed {
                        message,
                        index,
                        step: *step,
                        speed,
                        held_ticks,
                    };
                }
                None => {
                    self.state.step_index = 0;
                    if controls.take_switch_request() {
                        let next = message.toggled();
                        self.state.active_message = next;
                        info!("Scheduler: switched {} -> {}", message.name(), next.name());
                        outcome = TickOutcome::Switched {
                            from: message,
                            to: next,
                        };
                    } else {
                        outcome = TickOutcome::Repeated(message);
                    }
                }
            }
        }

        if self.state.remaining_ticks > 0 {
            self.state.remaining_ticks -= 1;
        }

        outcome
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(Message::Sos)
    }
}
