//! Mock adapters for integration tests.
//!
//! Records every output write and emitted event so tests can assert on
//! the full history without touching real GPIO.

use morse_beacon::app::events::AppEvent;
use morse_beacon::app::ports::{EventSink, OutputPort};
use morse_beacon::sequence::OutputId;

// ── Output write record ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    /// 1-based tick the write happened on (0 = before the first tick).
    pub tick: u32,
    pub output: OutputId,
    pub level: bool,
}

// ── MockOutputs ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockOutputs {
    pub writes: Vec<Write>,
    tick: u32,
}

#[allow(dead_code)]
impl MockOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the tick stamp applied to subsequent writes.
    pub fn begin_tick(&mut self) {
        self.tick += 1;
    }

    pub fn level(&self, output: OutputId) -> bool {
        self.writes
            .iter()
            .rev()
            .find(|w| w.output == output)
            .is_some_and(|w| w.level)
    }

    pub fn writes_on(&self, tick: u32) -> Vec<Write> {
        self.writes.iter().copied().filter(|w| w.tick == tick).collect()
    }
}

impl OutputPort for MockOutputs {
    fn write_output(&mut self, output: OutputId, level: bool) {
        self.writes.push(Write {
            tick: self.tick,
            output,
            level,
        });
    }
}

// ── Recording event sink ──────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
