//! Compiled-in Morse step tables.
//!
//! Each message is a fixed list of [`Step`]s: which LED to drive, the level
//! to drive it to, and how many base ticks to hold that level before the
//! next step.  Durations follow the usual Morse ratios with one tick as the
//! dot unit:
//!
//! | Element          | On/Off | Ticks |
//! |------------------|--------|-------|
//! | Dot              | on     | 1     |
//! | Dash             | on     | 3     |
//! | Intra-letter gap | off    | 1     |
//! | Letter gap       | off    | 3     |
//!
//! Dots are shown on LED 0 ([`OutputId::A`]), dashes on LED 1
//! ([`OutputId::B`]).

use serde::{Deserialize, Serialize};

use crate::controls::SpeedMultiplier;

/// One of the two indicator outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputId {
    /// LED 0 (dots).
    A,
    /// LED 1 (dashes).
    B,
}

/// A single (output, level, duration) instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub output: OutputId,
    /// `true` = LED on.
    pub level: bool,
    /// Hold time in base ticks, before speed scaling.  Always >= 1.
    pub duration_ticks: u8,
}

impl Step {
    const fn on(output: OutputId, duration_ticks: u8) -> Self {
        Self {
            output,
            level: true,
            duration_ticks,
        }
    }

    const fn off(output: OutputId, duration_ticks: u8) -> Self {
        Self {
            output,
            level: false,
            duration_ticks,
        }
    }

    /// Hold time once scaled by `speed`.
    pub fn scaled_ticks(&self, speed: SpeedMultiplier) -> u32 {
        u32::from(self.duration_ticks) * speed.factor()
    }
}

/// Which message is playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Message {
    Sos,
    Ok,
}

impl Message {
    /// The other message.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Sos => Self::Ok,
            Self::Ok => Self::Sos,
        }
    }

    pub fn sequence(self) -> &'static Sequence {
        match self {
            Self::Sos => &SOS,
            Self::Ok => &OK,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sos => "SOS",
            Self::Ok => "OK",
        }
    }
}

/// Ordered, immutable list of steps encoding one message.
#[derive(Debug)]
pub struct Sequence {
    message: Message,
    steps: &'static [Step],
}

/// Capacity of the rendered dot/dash pattern.
///
/// Each step renders to at most one symbol, so the longest table bounds it.
pub const PATTERN_CAP: usize = if SOS_STEPS.len() > OK_STEPS.len() {
    SOS_STEPS.len()
} else {
    OK_STEPS.len()
};

impl Sequence {
    pub const fn message(&self) -> Message {
        self.message
    }

    pub const fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always `false` for the built-in tables; present for API symmetry.
    pub const fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `index`, or `None` once the sequence is exhausted.
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    /// Ticks for one full pass at `speed`, excluding the boundary tick.
    pub fn total_ticks(&self, speed: SpeedMultiplier) -> u32 {
        self.steps.iter().map(|s| s.scaled_ticks(speed)).sum()
    }

    /// Render the message as dot/dash text, e.g. `"... --- ..."`.
    ///
    /// On-steps become `.` or `-` by duration; a letter-length gap becomes a
    /// space unless it ends the message.
    pub fn pattern(&self) -> heapless::String<PATTERN_CAP> {
        let mut out = heapless::String::new();
        let last = self.steps.len().saturating_sub(1);
        for (i, step) in self.steps.iter().enumerate() {
            let symbol = match (step.level, step.duration_ticks) {
                (true, 1) => Some('.'),
                (true, _) => Some('-'),
                (false, d) if d >= 3 && i != last => Some(' '),
                (false, _) => None,
            };
            if let Some(c) = symbol {
                let pushed = out.push(c);
                debug_assert!(pushed.is_ok(), "PATTERN_CAP below step count");
            }
        }
        out
    }
}

use OutputId::{A, B};

/// `... --- ...`
const SOS_STEPS: [Step; 18] = [
    Step::on(A, 1),
    Step::off(A, 1),
    Step::on(A, 1),
    Step::off(A, 1),
    Step::on(A, 1),
    Step::off(A, 3),
    Step::on(B, 3),
    Step::off(B, 1),
    Step::on(B, 3),
    Step::off(B, 1),
    Step::on(B, 3),
    Step::off(B, 3),
    Step::on(A, 1),
    Step::off(A, 1),
    Step::on(A, 1),
    Step::off(A, 1),
    Step::on(A, 1),
    Step::off(A, 3),
];

/// `--- -.-`
const OK_STEPS: [Step; 12] = [
    Step::on(B, 3),
    Step::off(B, 1),
    Step::on(B, 3),
    Step::off(B, 1),
    Step::on(B, 3),
    Step::off(B, 3),
    Step::on(B, 3),
    Step::off(B, 1),
    Step::on(A, 1),
    Step::off(A, 1),
    Step::on(B, 3),
    Step::off(B, 3),
];

pub static SOS: Sequence = Sequence {
    message: Message::Sos,
    steps: &SOS_STEPS,
};

pub static OK: Sequence = Sequence {
    message: Message::Ok,
    steps: &OK_STEPS,
};
