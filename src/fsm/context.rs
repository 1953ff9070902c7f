//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to: the latest sensor reading, the output commands, the tick
//! count in the current state and the configuration.  Think of it as the
//! "blackboard" in a blackboard architecture.

use crate::config::SystemConfig;
use crate::sensors::SensorReading;

// ---------------------------------------------------------------------------
// Output commands (written by state handlers; consumed by AppService)
// ---------------------------------------------------------------------------

/// Logical output levels requested by the current state.  The service
/// applies them through the `ActuatorPort` after each FSM tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputCommands {
    pub fan_on: bool,
    pub alarm_on: bool,
}

impl OutputCommands {
    /// Fan and alarm off: safe default.
    pub const fn all_off() -> Self {
        Self {
            fan_on: false,
            alarm_on: false,
        }
    }

    pub const fn all_on() -> Self {
        Self {
            fan_on: true,
            alarm_on: true,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,

    // -- Sensor data --
    /// Latest sensor reading.  Updated before each FSM tick.
    pub sensors: SensorReading,

    // -- Outputs --
    /// Commands to be applied to the actuators after the FSM tick.
    pub commands: OutputCommands,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            sensors: SensorReading::default(),
            commands: OutputCommands::all_off(),
            config,
        }
    }

    /// Either signal above its ON threshold.
    pub fn activation_requested(&self) -> bool {
        self.sensors.gas_percent > self.config.gas_on_percent
            || self.sensors.temperature_c > self.config.temp_on_c
    }

    /// Gas strictly below its OFF threshold and temperature at or below
    /// its own.
    pub fn release_permitted(&self) -> bool {
        self.sensors.gas_percent < self.config.gas_off_percent
            && self.sensors.temperature_c <= self.config.temp_off_c
    }
}
