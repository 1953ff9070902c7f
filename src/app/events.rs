//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The firmware logs them over
//! RTT; tests record them.

use crate::error::SensorError;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The fan/alarm state machine switched state.
    StateChanged { from: StateId, to: StateId },

    /// A sensor read failed; outputs are being held.
    FaultDetected(SensorError),

    /// Sensor reads are succeeding again.
    FaultCleared,

    /// The application service has started (carries initial state).
    Started(StateId),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryData {
    pub state: StateId,
    pub temperature_c: f32,
    pub gas_percent: f32,
    pub fan_on: bool,
    pub alarm_on: bool,
    pub sensor_fault: bool,
    pub tick_count: u64,
}
