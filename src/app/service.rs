//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the [`Scheduler`] and turns each tick's outcome into
//! [`AppEvent`]s.  Outputs and the event sink are injected at call sites,
//! and the shared [`Controls`] are borrowed, so the whole service runs
//! against mock adapters in tests.
//!
//! ```text
//!   Controls ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                │       AppService        │
//! OutputPort ◀── │  Scheduler · Step Table │
//!                └────────────────────────┘
//! ```

use log::info;

use crate::config::SystemConfig;
use crate::controls::Controls;
use crate::scheduler::{Scheduler, TickOutcome};
use crate::sequence::OutputId;

use super::commands::AppCommand;
use super::events::{AppEvent, PlaybackStatus};
use super::ports::{EventSink, OutputPort};

/// The application service orchestrates playback.
pub struct AppService<'c> {
    scheduler: Scheduler,
    controls: &'c Controls,
    config: SystemConfig,
    tick_count: u64,
    passes: u32,
}

impl<'c> AppService<'c> {
    /// Construct the service.  Applies the configured initial speed to
    /// `controls`; does **not** touch outputs until [`start`](Self::start).
    pub fn new(config: SystemConfig, controls: &'c Controls) -> Self {
        controls.set_speed(config.initial_speed);
        Self {
            scheduler: Scheduler::new(config.initial_message),
            controls,
            config,
            tick_count: 0,
            passes: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Light the boot indicator (if enabled) and announce the start.
    pub fn start(&mut self, outputs: &mut impl OutputPort, sink: &mut impl EventSink) {
        if self.config.boot_indicator {
            outputs.write_output(OutputId::A, true);
        }
        let message = self.scheduler.active_message();
        let speed = self.controls.speed();
        info!(
            "AppService started: {} \"{}\" at x{}",
            message.name(),
            message.sequence().pattern(),
            speed.factor()
        );
        sink.emit(&AppEvent::Started { message, speed });
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one base tick and report what happened.
    pub fn tick(
        &mut self,
        outputs: &mut impl OutputPort,
        sink: &mut impl EventSink,
    ) -> TickOutcome {
        self.tick_count += 1;
        let outcome = self.scheduler.advance_one_tick(self.controls, outputs);

        match outcome {
            TickOutcome::Committed {
                message,
                index,
                step,
                held_ticks,
                ..
            } => sink.emit(&AppEvent::StepCommitted {
                message,
                index,
                step,
                held_ticks,
            }),
            TickOutcome::Repeated(message) => {
                self.passes = self.passes.wrapping_add(1);
                sink.emit(&AppEvent::SequenceRepeated(message));
            }
            TickOutcome::Switched { from, to } => {
                self.passes = self.passes.wrapping_add(1);
                sink.emit(&AppEvent::MessageSwitched { from, to });
            }
            TickOutcome::Holding => {}
        }

        let interval = u64::from(self.config.status_interval_ticks);
        if interval > 0 && self.tick_count % interval == 0 {
            sink.emit(&AppEvent::Status(self.status()));
        }

        outcome
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply a control command from task context and emit the result.
    pub fn handle_command(&mut self, cmd: AppCommand, sink: &mut impl EventSink) {
        match cmd {
            AppCommand::ToggleMessage => {
                self.controls.request_message_switch();
                self.report_switch_request(sink);
            }
            AppCommand::CycleSpeed => {
                let speed = self.controls.cycle_speed();
                sink.emit(&AppEvent::SpeedChanged(speed));
            }
        }
    }

    /// Emit a [`AppEvent::SwitchRequested`] for a request already made on
    /// the shared controls (e.g. by a button ISR).
    pub fn report_switch_request(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::SwitchRequested {
            pending_on: self.scheduler.active_message(),
        });
    }

    /// Emit the current speed after a change made on the shared controls.
    pub fn report_speed(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::SpeedChanged(self.controls.speed()));
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn status(&self) -> PlaybackStatus {
        let state = self.scheduler.state();
        PlaybackStatus {
            message: state.active_message,
            step_index: state.step_index,
            remaining_ticks: state.remaining_ticks,
            speed: self.controls.speed(),
            switch_pending: self.controls.switch_pending(),
            ticks: self.tick_count,
            passes: self.passes,
        }
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
