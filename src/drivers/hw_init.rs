//! One-shot hardware peripheral initialization.
//!
//! Configures the two LED outputs and the two button inputs using raw
//! ESP-IDF sys calls, then installs the per-pin GPIO ISR service.  Called
//! once from `main()` before the tick timer starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::drivers::button::ControlButtons;
#[cfg(target_os = "espidf")]
use crate::error::Error;
use crate::error::Result;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<()> {
    // SAFETY: Called once from main() before the timer and ISRs start.
    unsafe {
        init_gpio_outputs()?;
        init_gpio_inputs()?;
    }
    info!("hw_init: LEDs and buttons configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<()> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<()> {
    for pin in [pins::LED_A_GPIO, pins::LED_B_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(Error::Gpio(ret)); }
        let ret = unsafe { gpio_set_level(pin, 0) };
        if ret != ESP_OK as i32 { return Err(Error::Gpio(ret)); }
    }
    info!("hw_init: GPIO outputs configured (LED A={}, LED B={})", pins::LED_A_GPIO, pins::LED_B_GPIO);
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) -> Result<()> {
    // SAFETY: gpio_set_level writes to an output pin configured during
    // init_gpio_outputs(). Main-loop only.
    let ret = unsafe { gpio_set_level(pin, u32::from(high)) };
    if ret != ESP_OK as i32 {
        return Err(Error::Gpio(ret));
    }
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) -> Result<()> {
    Ok(())
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<()> {
    for pin in [pins::BUTTON_TOGGLE_GPIO, pins::BUTTON_SPEED_GPIO] {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_NEGEDGE,
            ..Default::default()
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 { return Err(Error::Gpio(ret)); }
    }
    info!("hw_init: button inputs configured (falling edge, pull-up)");
    Ok(())
}

// ── GPIO ISR Service ──────────────────────────────────────────

#[cfg(target_os = "espidf")]
use crate::events::EVENTS;

#[cfg(target_os = "espidf")]
fn isr_now_ms() -> u32 {
    // SAFETY: esp_timer_get_time is a counter read; safe in ISR context.
    (unsafe { esp_timer_get_time() } / 1_000) as u32
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn toggle_button_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static ControlButtons` registered in
    // init_isr_service(); it is never freed.
    let buttons = unsafe { &*(arg as *const ControlButtons<'static>) };
    buttons.on_message_toggle_edge(isr_now_ms(), &EVENTS);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn speed_button_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: same contract as toggle_button_isr().
    let buttons = unsafe { &*(arg as *const ControlButtons<'static>) };
    buttons.on_speed_cycle_edge(isr_now_ms(), &EVENTS);
}

/// Install the per-pin GPIO ISR service and register the button handlers.
/// Call after init_peripherals().
#[cfg(target_os = "espidf")]
pub fn init_isr_service(buttons: &'static ControlButtons<'static>) -> Result<()> {
    let arg = core::ptr::from_ref(buttons).cast_mut().cast::<core::ffi::c_void>();
    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed. The handlers only touch atomics
    // reachable from the 'static `buttons` reference.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
            return Err(Error::Isr(ret));
        }

        let ret = gpio_isr_handler_add(pins::BUTTON_TOGGLE_GPIO, Some(toggle_button_isr), arg);
        if ret != ESP_OK { return Err(Error::Isr(ret)); }
        gpio_intr_enable(pins::BUTTON_TOGGLE_GPIO);

        let ret = gpio_isr_handler_add(pins::BUTTON_SPEED_GPIO, Some(speed_button_isr), arg);
        if ret != ESP_OK { return Err(Error::Isr(ret)); }
        gpio_intr_enable(pins::BUTTON_SPEED_GPIO);
    }
    info!("hw_init: ISR service installed (toggle, speed)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service(_buttons: &'static ControlButtons<'static>) -> Result<()> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
