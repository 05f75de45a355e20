//! Hardware adapter — bridges the two indicator pins to [`OutputPort`].
//!
//! Generic over any embedded-hal [`OutputPin`], so the same adapter
//! drives [`GpioLed`](crate::drivers::led::GpioLed) on the board and a
//! mock pin in tests.  This is the only place the domain's
//! `(OutputId, level)` writes turn into pin operations.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::OutputPort;
use crate::sequence::OutputId;

/// Concrete adapter that owns both indicator pins.
pub struct PinOutputs<A, B> {
    led_a: A,
    led_b: B,
    write_failures: u32,
}

impl<A: OutputPin, B: OutputPin> PinOutputs<A, B> {
    pub fn new(led_a: A, led_b: B) -> Self {
        Self {
            led_a,
            led_b,
            write_failures: 0,
        }
    }

    /// Writes that the pin driver rejected since construction.
    pub fn write_failures(&self) -> u32 {
        self.write_failures
    }

    pub fn release(self) -> (A, B) {
        (self.led_a, self.led_b)
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<A: OutputPin, B: OutputPin> OutputPort for PinOutputs<A, B> {
    fn write_output(&mut self, output: OutputId, level: bool) {
        let state = PinState::from(level);
        let failed = match output {
            OutputId::A => self.led_a.set_state(state).is_err(),
            OutputId::B => self.led_b.set_state(state).is_err(),
        };
        if failed {
            self.write_failures = self.write_failures.saturating_add(1);
            warn!("hardware: write {:?}={} failed, playback continues", output, level);
        }
    }
}
