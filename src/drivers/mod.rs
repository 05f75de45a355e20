//! LED and button drivers, hardware initialisation, and the tick timer.

pub mod button;
pub mod hw_init;
pub mod hw_timer;
pub mod led;
