//! Hardware adapter: bridges the drivers to domain port traits.
//!
//! Owns the [`SensorHub`] and the [`ActuatorBank`], exposing them through
//! [`SensorPort`] and [`ActuatorPort`].  Generic over the converter and
//! the GPIO port, so the same adapter runs on LPC17xx registers in the
//! firmware and on the simulation in tests.

use crate::app::ports::{ActuatorPort, AnalogConverter, DigitalOutputPort, SensorPort};
use crate::drivers::outputs::ActuatorBank;
use crate::error::SensorError;
use crate::sensors::{SensorHub, SensorReading};

/// Concrete adapter that combines sensors and actuators behind port traits.
pub struct HardwareAdapter<A, P> {
    sensors: SensorHub<A>,
    actuators: ActuatorBank<P>,
}

impl<A: AnalogConverter, P: DigitalOutputPort> HardwareAdapter<A, P> {
    pub fn new(sensors: SensorHub<A>, actuators: ActuatorBank<P>) -> Self {
        Self { sensors, actuators }
    }

    /// Configure the actuator pins (both off).  The ADC is initialised by
    /// its own driver before the hub is built.
    pub fn initialize(&mut self) {
        self.actuators.initialize();
    }

    pub fn sensors_mut(&mut self) -> &mut SensorHub<A> {
        &mut self.sensors
    }

    pub fn actuators(&self) -> &ActuatorBank<P> {
        &self.actuators
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<A: AnalogConverter, P> SensorPort for HardwareAdapter<A, P> {
    fn read_all(&mut self) -> Result<SensorReading, SensorError> {
        self.sensors.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<A, P: DigitalOutputPort> ActuatorPort for HardwareAdapter<A, P> {
    fn set_fan(&mut self, on: bool) {
        self.actuators.set_fan(on);
    }

    fn set_alarm(&mut self, on: bool) {
        self.actuators.set_alarm(on);
    }

    fn all_off(&mut self) {
        self.actuators.all_off();
    }
}
