//! Integration tests for the sensor → ControlLoop → fan pipeline.
//!
//! These run on the host and drive the loop with scripted readings and
//! mock outputs, covering the transient-failure and shutdown paths.

use std::time::Duration;

use super::mock_hw::{MockFan, Reading, RecordingSink, ScriptedSensor, SharedPin};

use fanctl::app::events::AppEvent;
use fanctl::app::ports::Actuator;
use fanctl::app::service::{ControlLoop, TickOutcome};
use fanctl::config::ControllerConfig;
use fanctl::control::FanState::{Off, On};
use fanctl::control::hysteresis::Thresholds;
use fanctl::drivers::fan::FanDriver;
use fanctl::shutdown::Shutdown;

fn make_loop() -> ControlLoop {
    ControlLoop::new(
        Thresholds::new(56.0, 55.5).unwrap(),
        Duration::from_millis(1),
    )
}

// ── Reading sequence through hysteresis ──────────────────────

#[test]
fn reading_sequence_switches_on_then_off_once() {
    let mut control = make_loop();
    let mut sensor = ScriptedSensor::celsius(&[50.0, 56.0, 55.7, 55.4, 55.6]);
    let mut fan = MockFan::new();
    let mut sink = RecordingSink::new();

    let outcomes: Vec<_> = (0..5)
        .map(|_| control.tick(&mut sensor, &mut fan, &mut sink))
        .collect();

    assert_eq!(
        outcomes,
        [
            TickOutcome::Held(Off),
            TickOutcome::Switched { from: Off, to: On },
            TickOutcome::Held(On),
            TickOutcome::Switched { from: On, to: Off },
            TickOutcome::Held(Off),
        ]
    );
    assert_eq!(fan.applied, [On, Off]);
    assert_eq!(sink.switches(), [(Off, On), (On, Off)]);
}

// ── Read failures are skipped ────────────────────────────────

#[test]
fn read_failure_between_stable_readings_changes_nothing() {
    let mut control = make_loop();
    let mut sensor = ScriptedSensor::new([
        Reading::Celsius(57.0),
        Reading::Unreadable,
        Reading::Garbage,
        Reading::Celsius(57.0),
    ]);
    let mut fan = MockFan::new();
    let mut sink = RecordingSink::new();

    assert_eq!(
        control.tick(&mut sensor, &mut fan, &mut sink),
        TickOutcome::Switched { from: Off, to: On }
    );
    assert_eq!(control.tick(&mut sensor, &mut fan, &mut sink), TickOutcome::ReadFailed);
    assert_eq!(control.state(), On);
    assert_eq!(control.tick(&mut sensor, &mut fan, &mut sink), TickOutcome::ReadFailed);
    assert_eq!(control.state(), On);
    assert_eq!(control.tick(&mut sensor, &mut fan, &mut sink), TickOutcome::Held(On));

    assert_eq!(fan.attempts, [On], "no writes during or after the gap");
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ReadFailed { .. })),
        2
    );
}

#[test]
fn decision_after_gap_uses_fresh_reading() {
    let mut control = make_loop();
    let mut sensor = ScriptedSensor::new([
        Reading::Celsius(57.0),
        Reading::Unreadable,
        Reading::Celsius(50.0),
    ]);
    let mut fan = MockFan::new();
    let mut sink = RecordingSink::new();

    for _ in 0..3 {
        control.tick(&mut sensor, &mut fan, &mut sink);
    }
    assert_eq!(control.state(), Off);
    assert_eq!(fan.applied, [On, Off]);
}

// ── Write failures are retried next cycle ────────────────────

#[test]
fn failed_write_keeps_state_and_next_cycle_completes_it() {
    let mut control = make_loop();
    let mut sensor = ScriptedSensor::celsius(&[58.0, 58.0]);
    let mut fan = MockFan::failing(1);
    let mut sink = RecordingSink::new();

    assert_eq!(
        control.tick(&mut sensor, &mut fan, &mut sink),
        TickOutcome::WriteFailed { intended: On }
    );
    assert_eq!(control.state(), Off);
    assert_eq!(fan.state(), Off);
    assert!(sink.events.contains(&AppEvent::WriteFailed {
        target: On,
        error: "could not set fan ON: No such device".into(),
    }));

    assert_eq!(
        control.tick(&mut sensor, &mut fan, &mut sink),
        TickOutcome::Switched { from: Off, to: On }
    );
    assert_eq!(fan.attempts, [On, On]);
    assert_eq!(fan.applied, [On]);
    assert_eq!(sink.switches(), [(Off, On)]);
}

#[test]
fn failed_pin_write_through_fan_driver_is_retried() {
    let mut control = make_loop();
    let mut sensor = ScriptedSensor::celsius(&[60.0, 60.0]);
    let pin = SharedPin::default();
    let mut fan = FanDriver::new(pin.clone()).unwrap();
    let mut sink = RecordingSink::new();

    pin.break_line(true);
    assert_eq!(
        control.tick(&mut sensor, &mut fan, &mut sink),
        TickOutcome::WriteFailed { intended: On }
    );
    assert_eq!(fan.state(), Off);

    pin.break_line(false);
    control.tick(&mut sensor, &mut fan, &mut sink);
    assert_eq!(fan.state(), On);
    assert_eq!(pin.last_level(), Some(true));
}

// ── Shutdown always ends with the fan off ────────────────────

#[test]
fn shutdown_while_on_ends_with_off_write() {
    let shutdown = Shutdown::new();
    let mut control = make_loop();
    let mut sensor = ScriptedSensor::celsius(&[50.0, 57.0]).stop_after(&shutdown);
    let pin = SharedPin::default();
    let mut fan = FanDriver::new(pin.clone()).unwrap();
    let mut sink = RecordingSink::new();

    let last = control.run(&mut sensor, &mut fan, &mut sink, &shutdown);
    assert_eq!(last, On);
    assert_eq!(pin.last_level(), Some(true));
    assert_eq!(sensor.reads, 2);

    fan.release();
    assert_eq!(*pin.levels.borrow(), [false, true, false]);
    assert_eq!(sink.events.last(), Some(&AppEvent::Stopped { state: On }));
}

#[test]
fn panic_while_on_still_switches_fan_off() {
    let pin = SharedPin::default();
    let observed = pin.clone();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
        let mut fan = FanDriver::new(pin).unwrap();
        fan.set(On).unwrap();
        panic!("control loop crashed");
    }));

    assert!(result.is_err());
    assert_eq!(*observed.levels.borrow(), [false, true, false]);
}

#[test]
fn shutdown_from_another_thread_interrupts_the_wait() {
    let shutdown = Shutdown::new();
    let mut control = ControlLoop::new(
        Thresholds::new(56.0, 55.5).unwrap(),
        Duration::from_secs(3600),
    );
    let mut sensor = ScriptedSensor::celsius(&[40.0; 4]);
    let mut fan = MockFan::new();
    let mut sink = RecordingSink::new();

    let remote = shutdown.clone();
    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(50));
        remote.trigger();
    });

    let last = control.run(&mut sensor, &mut fan, &mut sink, &shutdown);
    stopper.join().unwrap();

    assert_eq!(last, Off);
    assert_eq!(control.cycles(), 1, "woke from the hour-long wait on shutdown");
}

// ── Construction from config ─────────────────────────────────

#[test]
fn loop_from_default_config_uses_its_values() {
    let control = ControlLoop::from_config(&ControllerConfig::default()).unwrap();
    assert_eq!(control.interval(), Duration::from_secs(2));
    assert!((control.thresholds().turn_on_at().celsius() - 56.0).abs() < f64::EPSILON);
    assert!((control.thresholds().turn_off_at().celsius() - 55.5).abs() < f64::EPSILON);
    assert_eq!(control.state(), Off);
}
