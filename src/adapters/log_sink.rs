//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the logger
//! (UART / USB-CDC on the board, stderr on the host).  Per-step commits go
//! out at `debug` so a release build at `info` only shows the state
//! changes.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { message, speed } => {
                info!(
                    "START | message={} \"{}\" speed=x{}",
                    message.name(),
                    message.sequence().pattern(),
                    speed.factor()
                );
            }
            AppEvent::StepCommitted {
                message,
                index,
                step,
                held_ticks,
            } => {
                debug!(
                    "STEP  | {}[{}] {:?}={} for {} ticks",
                    message.name(),
                    index,
                    step.output,
                    if step.level { "on" } else { "off" },
                    held_ticks
                );
            }
            AppEvent::SequenceRepeated(message) => {
                debug!("LOOP  | {} again", message.name());
            }
            AppEvent::MessageSwitched { from, to } => {
                info!("SWAP  | {} -> {}", from.name(), to.name());
            }
            AppEvent::SwitchRequested { pending_on } => {
                info!("SWAP  | requested, applies after current {}", pending_on.name());
            }
            AppEvent::SpeedChanged(speed) => {
                info!("SPEED | x{} from next step", speed.factor());
            }
            AppEvent::Status(s) => {
                info!(
                    "STAT  | {} step={} rem={} speed=x{} pending={} ticks={} passes={}",
                    s.message.name(),
                    s.step_index,
                    s.remaining_ticks,
                    s.speed.factor(),
                    s.switch_pending,
                    s.ticks,
                    s.passes
                );
            }
        }
    }
}
