//! Fan relay and alarm buzzer outputs.
//!
//! ## Hardware contract
//!
//! | Line          | Pin   | Polarity    | Level when off |
//! |---------------|-------|-------------|----------------|
//! | Fan relay     | P1.28 | active LOW  | HIGH           |
//! | Alarm buzzer  | P1.27 | active HIGH | LOW            |
//!
//! Callers speak in logical on/off; [`OutputLine`] owns the electrical
//! translation.  This driver is a dumb actuator: the policy deciding when
//! to run the fan lives in the state machine.

use log::debug;

use crate::app::ports::DigitalOutputPort;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

/// A single GPIO line with a known polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputLine {
    mask: u32,
    polarity: Polarity,
}

impl OutputLine {
    pub const fn active_high(mask: u32) -> Self {
        Self {
            mask,
            polarity: Polarity::ActiveHigh,
        }
    }

    pub const fn active_low(mask: u32) -> Self {
        Self {
            mask,
            polarity: Polarity::ActiveLow,
        }
    }

    pub const fn mask(&self) -> u32 {
        self.mask
    }

    /// Electrical level (true = HIGH) that produces logical `on`.
    pub const fn level_for(&self, on: bool) -> bool {
        match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        }
    }

    pub fn drive(&self, port: &mut impl DigitalOutputPort, on: bool) {
        if self.level_for(on) {
            port.set_high(self.mask);
        } else {
            port.set_low(self.mask);
        }
    }
}

pub const FAN_RELAY: OutputLine = OutputLine::active_low(pins::FAN_RELAY);
pub const ALARM: OutputLine = OutputLine::active_high(pins::ALARM_BUZZER);

/// [`FAN_RELAY`] and [`ALARM`] on one GPIO port.
pub struct ActuatorBank<P> {
    port: P,
}

impl<P: DigitalOutputPort> ActuatorBank<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Latch the off levels, then switch both pins to output.  Latching
    /// first means the relay never sees a LOW glitch at boot.
    pub fn initialize(&mut self) {
        FAN_RELAY.drive(&mut self.port, false);
        ALARM.drive(&mut self.port, false);
        self.port
            .configure_outputs(FAN_RELAY.mask() | ALARM.mask());
        debug!("outputs: fan and alarm configured, both off");
    }

    pub fn set_fan(&mut self, on: bool) {
        FAN_RELAY.drive(&mut self.port, on);
    }

    pub fn set_alarm(&mut self, on: bool) {
        ALARM.drive(&mut self.port, on);
    }

    pub fn all_off(&mut self) {
        self.set_fan(false);
        self.set_alarm(false);
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}
