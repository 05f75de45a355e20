//! Morse Beacon Firmware — Main Entry Point
//!
//! Hexagonal architecture with timer-driven, event-queued execution.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  PinOutputs<GpioLed, GpioLed>          LogEventSink            │
//! │  (OutputPort)                          (EventSink)             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  Scheduler · Step tables                               │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Tick timer ─┐                                                 │
//! │  Button ISRs ┴─▶ Controls (atomics) + EventQueue ─▶ main loop  │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use log::{info, warn};

use morse_beacon::adapters::hardware::PinOutputs;
use morse_beacon::adapters::log_sink::LogEventSink;
use morse_beacon::app::service::AppService;
use morse_beacon::config::SystemConfig;
use morse_beacon::controls::Controls;
use morse_beacon::drivers::button::{ControlButtons, DEFAULT_DEBOUNCE_MS};
use morse_beacon::drivers::led::GpioLed;
use morse_beacon::drivers::{hw_init, hw_timer};
use morse_beacon::events::{self, Event};
use morse_beacon::pins;

// ── Shared state ──────────────────────────────────────────────
//
// Written by the button ISRs, read by the scheduler on each tick.
// Both live for the whole program so the ISRs can hold plain
// references.

static CONTROLS: Controls = Controls::new();
static BUTTONS: ControlButtons<'static> = ControlButtons::new(&CONTROLS, DEFAULT_DEBOUNCE_MS);

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Morse Beacon v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::load();
    BUTTONS.set_debounce_ms(config.button_debounce_ms);
    info!(
        "Config: tick={}ms debounce={}ms status every {} ticks",
        config.tick_period_ms, config.button_debounce_ms, config.status_interval_ticks
    );

    // ── 3. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals() {
        // Without the LEDs there is nothing to show; halt and let the
        // task watchdog reset the board.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 4. Construct adapters + app service ───────────────────
    // AppService::new applies the configured speed to CONTROLS; it must run
    // before the button ISRs are registered.
    let mut outputs = PinOutputs::new(
        GpioLed::new(pins::LED_A_GPIO),
        GpioLed::new(pins::LED_B_GPIO),
    );
    let mut log_sink = LogEventSink::new();
    let mut app = AppService::new(config.clone(), &CONTROLS);

    if let Err(e) = hw_init::init_isr_service(&BUTTONS) {
        warn!("ISR service init failed: {} — buttons disabled", e);
    }

    app.start(&mut outputs, &mut log_sink);

    // ── 5. Start the tick ─────────────────────────────────────
    hw_timer::start_tick_timer(config.tick_period_ms)?;

    info!("System ready. Entering event loop.");

    // ── 6. Event loop ─────────────────────────────────────────
    loop {
        // Simulate the timer on non-espidf targets.  On the board the
        // timer task pushes ticks and this loop only needs to poll.
        #[cfg(not(target_os = "espidf"))]
        {
            std::thread::sleep(std::time::Duration::from_millis(u64::from(
                config.tick_period_ms,
            )));
            events::push_event(Event::PlaybackTick);
        }
        #[cfg(target_os = "espidf")]
        std::thread::sleep(std::time::Duration::from_millis(10));

        events::drain_events(|event| match event {
            Event::MessageToggleRequested => app.report_switch_request(&mut log_sink),
            Event::SpeedCycled => app.report_speed(&mut log_sink),
            Event::PlaybackTick => {
                app.tick(&mut outputs, &mut log_sink);
            }
        });
    }
}
