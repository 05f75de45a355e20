//! Single indicator LED on a raw GPIO.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the pin through `gpio_set_level` via hw_init.
//! On host/test: tracks state in-memory only.
//!
//! Implements [`embedded_hal::digital::OutputPin`] so it plugs into the
//! generic [`PinOutputs`](crate::adapters::hardware::PinOutputs) adapter.

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::hw_init;
use crate::error::Error;

pub struct GpioLed {
    pin: i32,
    lit: bool,
}

impl GpioLed {
    /// The pin must already be configured as an output by
    /// [`hw_init::init_peripherals`].
    pub fn new(pin: i32) -> Self {
        Self { pin, lit: false }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Last level successfully written.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    fn write(&mut self, high: bool) -> Result<(), Error> {
        hw_init::gpio_write(self.pin, high)?;
        self.lit = high;
        Ok(())
    }
}

impl ErrorType for GpioLed {
    type Error = Error;
}

impl OutputPin for GpioLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
