//! GPIO pin assignments for the beacon board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Indicator LEDs (active HIGH through a series resistor)
// ---------------------------------------------------------------------------

/// LED 0 — dots and the boot indicator.
pub const LED_A_GPIO: i32 = 4;
/// LED 1 — dashes.
pub const LED_B_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Control buttons (active LOW, internal pull-up, falling-edge interrupt)
// ---------------------------------------------------------------------------

/// Button 0 — switch between SOS and OK.
pub const BUTTON_TOGGLE_GPIO: i32 = 0;
/// Button 1 — cycle playback speed.
pub const BUTTON_SPEED_GPIO: i32 = 14;
