//! End-to-end playback through AppService → Scheduler → outputs.
//!
//! Drives the service tick by tick with mock adapters, the same way the
//! main loop does after draining the event queue.

use std::sync::Arc;
use std::thread;

use crate::mock_hw::{MockOutputs, RecordingSink, Write};

use morse_beacon::app::commands::AppCommand;
use morse_beacon::app::events::AppEvent;
use morse_beacon::app::service::AppService;
use morse_beacon::config::SystemConfig;
use morse_beacon::controls::{Controls, SpeedMultiplier};
use morse_beacon::drivers::button::ControlButtons;
use morse_beacon::events::{Event, EventQueue};
use morse_beacon::sequence::{Message, OutputId};

/// Tick on which each SOS step commits at speed 1 (1-based).
const SOS_COMMIT_TICKS: [u32; 18] = [1, 2, 3, 4, 5, 6, 9, 12, 13, 16, 17, 20, 23, 24, 25, 26, 27, 28];

fn quiet_config() -> SystemConfig {
    SystemConfig {
        boot_indicator: false,
        status_interval_ticks: 0,
        ..SystemConfig::default()
    }
}

fn run_ticks(app: &mut AppService<'_>, outs: &mut MockOutputs, sink: &mut RecordingSink, n: u32) {
    for _ in 0..n {
        outs.begin_tick();
        app.tick(outs, sink);
    }
}

#[test]
fn sos_plays_in_order_with_morse_timing() {
    let controls = Controls::new();
    let mut app = AppService::new(quiet_config(), &controls);
    let (mut outs, mut sink) = (MockOutputs::new(), RecordingSink::new());

    run_ticks(&mut app, &mut outs, &mut sink, 29);

    let ticks: Vec<u32> = outs.writes.iter().map(|w| w.tick).collect();
    assert_eq!(ticks, SOS_COMMIT_TICKS);

    let steps = Message::Sos.sequence().steps();
    for (write, step) in outs.writes.iter().zip(steps) {
        assert_eq!((write.output, write.level), (step.output, step.level));
    }
}

#[test]
fn sos_repeats_after_one_silent_boundary_tick() {
    let controls = Controls::new();
    let mut app = AppService::new(quiet_config(), &controls);
    let (mut outs, mut sink) = (MockOutputs::new(), RecordingSink::new());

    run_ticks(&mut app, &mut outs, &mut sink, 32);

    // The last step holds for ticks 28..=30; 31 is the boundary.
    assert!(outs.writes_on(31).is_empty());
    assert!(sink.events.contains(&AppEvent::SequenceRepeated(Message::Sos)));
    assert_eq!(
        outs.writes_on(32),
        [Write {
            tick: 32,
            output: OutputId::A,
            level: true
        }]
    );
    assert_eq!(app.status().message, Message::Sos);
}

#[test]
fn switch_requested_in_long_gap_applies_at_boundary() {
    let controls = Controls::new();
    let mut app = AppService::new(quiet_config(), &controls);
    let (mut outs, mut sink) = (MockOutputs::new(), RecordingSink::new());

    // Step 5 (the letter gap) commits on tick 6.
    run_ticks(&mut app, &mut outs, &mut sink, 6);
    assert_eq!(app.status().step_index, 6);
    app.handle_command(AppCommand::ToggleMessage, &mut sink);

    run_ticks(&mut app, &mut outs, &mut sink, 24);
    assert_eq!(app.status().message, Message::Sos, "no switch mid-sequence");

    run_ticks(&mut app, &mut outs, &mut sink, 1);
    let status = app.status();
    assert_eq!(status.message, Message::Ok);
    assert_eq!(status.step_index, 0);
    assert!(!status.switch_pending);
    assert!(sink.events.contains(&AppEvent::MessageSwitched {
        from: Message::Sos,
        to: Message::Ok
    }));

    // First OK step: dash on LED 1.
    run_ticks(&mut app, &mut outs, &mut sink, 1);
    assert_eq!(outs.writes.last().map(|w| (w.output, w.level)), Some((OutputId::B, true)));
}

#[test]
fn speed_three_triples_every_hold() {
    let controls = Controls::new();
    let config = SystemConfig {
        initial_speed: SpeedMultiplier::X3,
        ..quiet_config()
    };
    let mut app = AppService::new(config, &controls);
    let (mut outs, mut sink) = (MockOutputs::new(), RecordingSink::new());

    run_ticks(&mut app, &mut outs, &mut sink, 4);

    let ticks: Vec<u32> = outs.writes.iter().map(|w| w.tick).collect();
    assert_eq!(ticks, [1, 4]);
}

#[test]
fn outputs_are_written_only_on_commits() {
    let controls = Controls::new();
    let mut app = AppService::new(quiet_config(), &controls);
    let (mut outs, mut sink) = (MockOutputs::new(), RecordingSink::new());

    app.handle_command(AppCommand::ToggleMessage, &mut sink);
    run_ticks(&mut app, &mut outs, &mut sink, 200);

    let commits = sink.count(|e| matches!(e, AppEvent::StepCommitted { .. }));
    assert_eq!(outs.writes.len(), commits);
}

#[test]
fn button_edges_reach_playback_through_the_event_queue() {
    let controls = Controls::new();
    let events = EventQueue::new();
    let buttons = ControlButtons::new(&controls, 50);
    let mut app = AppService::new(quiet_config(), &controls);
    let (mut outs, mut sink) = (MockOutputs::new(), RecordingSink::new());

    assert!(buttons.on_message_toggle_edge(1_000, &events));
    assert!(!buttons.on_message_toggle_edge(1_005, &events));
    assert_eq!(buttons.on_speed_cycle_edge(1_000, &events), Some(SpeedMultiplier::X2));
    for _ in 0..3 {
        events.push(Event::PlaybackTick);
    }

    let delivered = events.drain(|event| match event {
        Event::MessageToggleRequested => app.report_switch_request(&mut sink),
        Event::SpeedCycled => app.report_speed(&mut sink),
        Event::PlaybackTick => {
            outs.begin_tick();
            app.tick(&mut outs, &mut sink);
        }
    });

    assert_eq!(delivered, 3);
    assert_eq!(
        &sink.events[..2],
        [
            AppEvent::SwitchRequested {
                pending_on: Message::Sos
            },
            AppEvent::SpeedChanged(SpeedMultiplier::X2),
        ]
    );
    // First step committed at x2 holds two ticks, so tick 3 commits step 1.
    let ticks: Vec<u32> = outs.writes.iter().map(|w| w.tick).collect();
    assert_eq!(ticks, [1, 3]);
    assert!(app.status().switch_pending);
}

#[test]
fn concurrent_speed_cycles_are_not_lost() {
    let controls = Arc::new(Controls::new());
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let controls = Arc::clone(&controls);
            thread::spawn(move || {
                for _ in 0..999 {
                    let speed = controls.cycle_speed();
                    assert!((1..=3).contains(&speed.factor()));
                }
            })
        })
        .collect();

    for w in workers {
        w.join().unwrap();
    }
    // 3996 cycles is a whole number of 1 → 2 → 3 rounds.
    assert_eq!(controls.speed(), SpeedMultiplier::X1);
}

#[test]
fn controls_racing_the_scheduler_keep_playback_consistent() {
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Stops the workers even if an assertion below panics.
    struct StopOnDrop<'a>(&'a AtomicBool);

    impl Drop for StopOnDrop<'_> {
        fn drop(&mut self) {
            self.0.store(true, Ordering::Release);
        }
    }

    let controls = Controls::new();
    let done = AtomicBool::new(false);
    let mut app = AppService::new(quiet_config(), &controls);
    let (mut outs, mut sink) = (MockOutputs::new(), RecordingSink::new());
    let mut switches = 0;

    thread::scope(|s| {
        let _stop = StopOnDrop(&done);
        s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                controls.request_message_switch();
                thread::yield_now();
            }
        });
        s.spawn(|| {
            while !done.load(Ordering::Acquire) {
                controls.cycle_speed();
                thread::yield_now();
            }
        });

        while !controls.switch_pending() {
            thread::yield_now();
        }

        for _ in 0..20_000 {
            let writes_before = outs.writes.len();
            let events_before = sink.events.len();
            outs.begin_tick();
            app.tick(&mut outs, &mut sink);

            let status = app.status();
            assert!(status.step_index <= status.message.sequence().len());

            let wrote = outs.writes.len() - writes_before;
            for event in &sink.events[events_before..] {
                match event {
                    AppEvent::StepCommitted {
                        step, held_ticks, ..
                    } => {
                        let unit = u32::from(step.duration_ticks);
                        assert_eq!(held_ticks % unit, 0);
                        assert!((1..=3).contains(&(held_ticks / unit)));
                    }
                    AppEvent::MessageSwitched { .. } => {
                        assert_eq!(wrote, 0, "switch on a tick that wrote an output");
                        switches += 1;
                    }
                    _ => {}
                }
            }
        }
    });

    assert!(switches > 0);
}
