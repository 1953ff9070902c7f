//! Integration tests for the AppService → FSM → actuators → display
//! pipeline, driven by scripted readings.

use super::mock_hw::{ActuatorCall, LogSink, MockHardware};

use airmon::adapters::sim::SimDisplay;
use airmon::app::display::BANNER;
use airmon::app::events::AppEvent;
use airmon::app::service::AppService;
use airmon::config::SystemConfig;
use airmon::error::SensorError;
use airmon::fsm::StateId;

fn make_app() -> (AppService, MockHardware, SimDisplay, LogSink) {
    let mut app = AppService::new(SystemConfig::default());
    let mut hw = MockHardware::new();
    let mut lcd = SimDisplay::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut lcd, &mut sink);
    (app, hw, lcd, sink)
}

fn step(
    app: &mut AppService,
    hw: &mut MockHardware,
    lcd: &mut SimDisplay,
    sink: &mut LogSink,
    gas: f32,
    temp: f32,
) -> StateId {
    hw.push(gas, temp);
    app.tick(hw, lcd, sink);
    app.state()
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_drives_outputs_off_and_shows_banner() {
    let (app, hw, lcd, sink) = make_app();
    assert_eq!(app.state(), StateId::Idle);
    assert_eq!(hw.calls.first(), Some(&ActuatorCall::AllOff));
    assert!(!hw.fan_on());
    assert!(!hw.alarm_on());
    assert_eq!(lcd.row(0).trim_end(), BANNER);
    assert_eq!(sink.events, [AppEvent::Started(StateId::Idle)]);
}

// ── Hysteresis scenarios ──────────────────────────────────────

#[test]
fn clean_air_stays_idle() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    for _ in 0..5 {
        assert_eq!(
            step(&mut app, &mut hw, &mut lcd, &mut sink, 10.0, 20.0),
            StateId::Idle
        );
    }
    assert!(!hw.fan_on());
    assert!(!hw.alarm_on());
}

#[test]
fn gas_spike_turns_fan_and_alarm_on() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    assert_eq!(
        step(&mut app, &mut hw, &mut lcd, &mut sink, 35.0, 20.0),
        StateId::Active
    );
    assert!(hw.fan_on());
    assert!(hw.alarm_on());
    assert!(sink.events.contains(&AppEvent::StateChanged {
        from: StateId::Idle,
        to: StateId::Active,
    }));
}

#[test]
fn heat_alone_activates() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    assert_eq!(
        step(&mut app, &mut hw, &mut lcd, &mut sink, 5.0, 46.0),
        StateId::Active
    );
}

#[test]
fn hysteresis_band_keeps_fan_running() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 35.0, 20.0);
    assert_eq!(
        step(&mut app, &mut hw, &mut lcd, &mut sink, 28.0, 38.0),
        StateId::Active
    );
    assert!(hw.fan_on());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::StateChanged { .. })),
        1,
        "no chatter inside the band"
    );
}

#[test]
fn clearing_air_releases_fan() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 35.0, 20.0);
    step(&mut app, &mut hw, &mut lcd, &mut sink, 28.0, 38.0);
    assert_eq!(
        step(&mut app, &mut hw, &mut lcd, &mut sink, 20.0, 35.0),
        StateId::Idle
    );
    assert!(!hw.fan_on());
    assert!(!hw.alarm_on());
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::StateChanged {
            from: StateId::Active,
            to: StateId::Idle,
        })
    );
}

#[test]
fn hot_but_clean_air_stays_active() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 35.0, 20.0);
    assert_eq!(
        step(&mut app, &mut hw, &mut lcd, &mut sink, 10.0, 41.0),
        StateId::Active
    );
}

#[test]
fn outputs_are_refreshed_every_tick() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    hw.calls.clear();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 10.0, 20.0);
    step(&mut app, &mut hw, &mut lcd, &mut sink, 10.0, 20.0);
    assert_eq!(
        hw.calls,
        [
            ActuatorCall::SetFan(false),
            ActuatorCall::SetAlarm(false),
            ActuatorCall::SetFan(false),
            ActuatorCall::SetAlarm(false),
        ]
    );
}

// ── Display ───────────────────────────────────────────────────

#[test]
fn readings_replace_the_banner() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 12.34, 23.45);
    assert_eq!(lcd.row(0), "T:23.5C         ");
    assert_eq!(lcd.row(1), "Gas:12.3%       ");
}

#[test]
fn steady_reading_renders_identically() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 5.0, 23.45);
    let first = (lcd.row(0).to_owned(), lcd.row(1).to_owned());
    step(&mut app, &mut hw, &mut lcd, &mut sink, 5.0, 23.45);
    assert_eq!((lcd.row(0).to_owned(), lcd.row(1).to_owned()), first);
}

#[test]
fn shorter_value_leaves_no_stale_characters() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 100.0, 123.4);
    step(&mut app, &mut hw, &mut lcd, &mut sink, 1.0, 1.0);
    assert_eq!(lcd.row(0), "T:1.0C          ");
    assert_eq!(lcd.row(1), "Gas:1.0%        ");
}

// ── Sensor faults ─────────────────────────────────────────────

#[test]
fn fault_holds_active_outputs() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 35.0, 20.0);
    let calls_before = hw.calls.len();

    let err = SensorError::ConversionTimeout { channel: 0 };
    hw.push_fault(err);
    for _ in 0..3 {
        app.tick(&mut hw, &mut lcd, &mut sink);
    }

    assert_eq!(app.state(), StateId::Active);
    assert_eq!(hw.calls.len(), calls_before, "no actuator writes while faulted");
    assert!(hw.fan_on());
    assert_eq!(app.sensor_fault(), Some(err));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::FaultDetected(_))),
        1,
        "fault reported once"
    );
    assert_eq!(lcd.row(0), "SENSOR FAULT    ");
    assert_eq!(lcd.row(1), "ADC ch0 timeout ");
}

#[test]
fn fault_does_not_activate_from_idle() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 10.0, 20.0);
    hw.push_fault(SensorError::ConversionTimeout { channel: 2 });
    app.tick(&mut hw, &mut lcd, &mut sink);
    assert_eq!(app.state(), StateId::Idle);
    assert!(!hw.fan_on());
}

#[test]
fn recovery_resumes_the_state_machine() {
    let (mut app, mut hw, mut lcd, mut sink) = make_app();
    step(&mut app, &mut hw, &mut lcd, &mut sink, 35.0, 20.0);
    hw.push_fault(SensorError::ConversionTimeout { channel: 2 });
    app.tick(&mut hw, &mut lcd, &mut sink);

    assert_eq!(
        step(&mut app, &mut hw, &mut lcd, &mut sink, 20.0, 35.0),
        StateId::Idle
    );
    assert_eq!(app.sensor_fault(), None);

    let tail = &sink.events[sink.events.len() - 2..];
    assert_eq!(
        tail,
        [
            AppEvent::FaultCleared,
            AppEvent::StateChanged {
                from: StateId::Active,
                to: StateId::Idle,
            },
        ]
    );
    assert_eq!(lcd.row(0), "T:35.0C         ");
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_reports_fault_flag() {
    let mut config = SystemConfig::default();
    config.telemetry_interval_ticks = 1;
    let mut app = AppService::new(config);
    let mut hw = MockHardware::new();
    let mut lcd = SimDisplay::new();
    let mut sink = LogSink::new();
    app.start(&mut hw, &mut lcd, &mut sink);

    hw.push(35.0, 20.0);
    hw.push_fault(SensorError::ConversionTimeout { channel: 0 });
    app.tick(&mut hw, &mut lcd, &mut sink);
    app.tick(&mut hw, &mut lcd, &mut sink);

    let telemetry: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Telemetry(t) => Some(*t),
            _ => None,
        })
        .collect();
    assert_eq!(telemetry.len(), 2);
    assert!(!telemetry[0].sensor_fault);
    assert!(telemetry[0].fan_on);
    assert_eq!(telemetry[0].state, StateId::Active);
    assert!(telemetry[1].sensor_fault);
    assert_eq!(telemetry[1].tick_count, 2);
    assert_eq!(telemetry[1].gas_percent, 35.0, "last good reading kept");
}
