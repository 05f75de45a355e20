//! Playback tick timer using ESP-IDF's esp_timer API.
//!
//! One periodic timer pushes [`Event::PlaybackTick`] into the event queue
//! every base tick.  On simulation targets nothing is started; the main
//! loop sleeps for one period and pushes the tick itself.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), so
//! they can safely call push_event(), which only touches atomics.

use crate::error::Result;

#[cfg(target_os = "espidf")]
use crate::error::Error;
#[cfg(target_os = "espidf")]
use crate::events::{push_event, Event};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn playback_tick_cb(_arg: *mut core::ffi::c_void) {
    push_event(Event::PlaybackTick);
}

/// Start the periodic playback tick.
#[cfg(target_os = "espidf")]
pub fn start_tick_timer(period_ms: u32) -> Result<()> {
    // SAFETY: TICK_TIMER is written here once at boot from the main task
    // before the callback can fire.  The callback only calls push_event().
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(playback_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"playback\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut TICK_TIMER);
        if ret != ESP_OK {
            return Err(Error::Timer(ret));
        }
        let ret = esp_timer_start_periodic(TICK_TIMER, u64::from(period_ms) * 1_000);
        if ret != ESP_OK {
            return Err(Error::Timer(ret));
        }
    }
    info!("hw_timer: playback tick started ({} ms)", period_ms);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_tick_timer(period_ms: u32) -> Result<()> {
    log::info!("hw_timer(sim): {} ms tick driven by sleep loop", period_ms);
    Ok(())
}
