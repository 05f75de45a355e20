//! Port traits — the hexagonal boundary between playback logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService / Scheduler (domain)
//! ```
//!
//! Driven adapters implement these traits; the domain consumes them via
//! generics so it never touches GPIO directly.

use crate::sequence::OutputId;

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → indicator LEDs)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the two indicator outputs.
///
/// Infallible from the domain's point of view.  Adapters that can fail
/// report the failure themselves (log) and carry on.
pub trait OutputPort {
    /// Drive `output` to `level` (`true` = on).
    fn write_output(&mut self, output: OutputId, level: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
