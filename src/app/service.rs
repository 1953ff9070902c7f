//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the FSM and the shared context.  It exposes a
//! hardware-agnostic API; all I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!    SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!                   │       AppService       │
//!  ActuatorPort ◀── │  FSM · fault latch     │ ──▶ CharacterDisplay
//!                   └────────────────────────┘
//! ```
//!
//! ## Sensor faults
//!
//! A failed read holds everything: the FSM is not ticked, the actuators
//! keep their last level and the display switches to the fault screen.
//! `FaultDetected` is emitted on the first failure only; the next good
//! read emits `FaultCleared` and the normal cycle resumes.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::SensorError;
use crate::fsm::context::FsmContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId, Transition};
use crate::sensors::SensorReading;

use super::display;
use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, CharacterDisplay, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    tick_count: u64,
    /// Latched while sensor reads are failing.
    fault: Option<SensorError>,
}

impl AppService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM: call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Self {
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table());
        Self {
            fsm,
            ctx,
            tick_count: 0,
            fault: None,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive both outputs off, show the banner and enter `Idle`.
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        lcd: &mut impl CharacterDisplay,
        sink: &mut impl EventSink,
    ) {
        hw.all_off();
        display::render_banner(lcd);
        self.fsm.start(&mut self.ctx);
        self.apply_actuators(hw);
        sink.emit(&AppEvent::Started(self.fsm.current_state()));
        info!("AppService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: read sensors → FSM → actuators → display.
    ///
    /// `hw` implements both [`SensorPort`] and [`ActuatorPort`], so one
    /// mutable borrow covers the read and the write side.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        lcd: &mut impl CharacterDisplay,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        match hw.read_all() {
            Ok(reading) => self.on_reading(reading, hw, lcd, sink),
            Err(e) => self.on_sensor_fault(e, lcd, sink),
        }

        let interval = u64::from(self.ctx.config.telemetry_interval_ticks);
        if interval != 0 && self.tick_count % interval == 0 {
            sink.emit(&AppEvent::Telemetry(self.build_telemetry()));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            temperature_c: self.ctx.sensors.temperature_c,
            gas_percent: self.ctx.sensors.gas_percent,
            fan_on: self.ctx.commands.fan_on,
            alarm_on: self.ctx.commands.alarm_on,
            sensor_fault: self.fault.is_some(),
            tick_count: self.tick_count,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// The latched sensor error, if reads are currently failing.
    pub fn sensor_fault(&self) -> Option<SensorError> {
        self.fault
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn on_reading(
        &mut self,
        reading: SensorReading,
        hw: &mut impl ActuatorPort,
        lcd: &mut impl CharacterDisplay,
        sink: &mut impl EventSink,
    ) {
        if self.fault.take().is_some() {
            info!("Sensor reads recovered");
            sink.emit(&AppEvent::FaultCleared);
        }

        self.ctx.sensors = reading;
        let transition = self.fsm.tick(&mut self.ctx);
        self.apply_actuators(hw);
        display::render_readings(lcd, &reading);

        if let Some(Transition { from, to }) = transition {
            sink.emit(&AppEvent::StateChanged { from, to });
        }
    }

    fn on_sensor_fault(
        &mut self,
        error: SensorError,
        lcd: &mut impl CharacterDisplay,
        sink: &mut impl EventSink,
    ) {
        if self.fault.is_none() {
            warn!(
                "Sensor fault: {}, holding {:?}",
                error,
                self.fsm.current_state()
            );
            sink.emit(&AppEvent::FaultDetected(error));
        }
        self.fault = Some(error);
        display::render_fault(lcd, error);
    }

    /// Translate FSM output commands into port calls.
    fn apply_actuators(&self, hw: &mut impl ActuatorPort) {
        let cmds = self.ctx.commands;
        hw.set_fan(cmds.fan_on);
        hw.set_alarm(cmds.alarm_on);
    }
}
