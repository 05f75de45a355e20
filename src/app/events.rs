//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log, test recorder).

use crate::controls::SpeedMultiplier;
use crate::sequence::{Message, Step};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Playback has started (carries the initial message and speed).
    Started {
        message: Message,
        speed: SpeedMultiplier,
    },

    /// A step was written to its output.
    StepCommitted {
        message: Message,
        index: usize,
        step: Step,
        held_ticks: u32,
    },

    /// The message finished and is playing again.
    SequenceRepeated(Message),

    /// The message finished and playback moved to the other one.
    MessageSwitched { from: Message, to: Message },

    /// A switch was requested; it applies at the next boundary.
    SwitchRequested { pending_on: Message },

    /// The speed multiplier changed; applies from the next step.
    SpeedChanged(SpeedMultiplier),

    /// Periodic status snapshot.
    Status(PlaybackStatus),
}

/// A point-in-time playback snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub message: Message,
    pub step_index: usize,
    pub remaining_ticks: u32,
    pub speed: SpeedMultiplier,
    pub switch_pending: bool,
    /// Ticks processed since start.
    pub ticks: u64,
    /// Completed passes (repeats and switches).
    pub passes: u32,
}
