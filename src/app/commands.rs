//! Inbound commands to the application service.
//!
//! The button ISRs drive [`Controls`](crate::controls::Controls) directly.
//! These commands cover the same actions for sources that run in task
//! context (host simulation, tests) and want the matching event emitted.

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Switch to the other message at the next boundary.
    ToggleMessage,

    /// Advance the speed multiplier 1 → 2 → 3 → 1.
    CycleSpeed,
}
