//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Two layers of ports live here:
//!
//! - **Capability ports** ([`DigitalOutputPort`], [`AnalogConverter`],
//!   [`CharacterDisplay`]) describe the raw peripherals.  Drivers are generic
//!   over them, and each has a register-backed implementation
//!   (`adapters::lpc17xx`, the drivers) and an in-memory one
//!   (`adapters::sim`).
//! - **Domain ports** ([`SensorPort`], [`ActuatorPort`], [`EventSink`]) are
//!   what the [`AppService`](super::service::AppService) consumes.  The
//!   [`HardwareAdapter`](crate::adapters::hardware::HardwareAdapter) bridges
//!   the capability layer to them.

use crate::drivers::adc::AdcChannel;
use crate::error::SensorError;
use crate::sensors::SensorReading;

// ───────────────────────────────────────────────────────────────
// Capability ports
// ───────────────────────────────────────────────────────────────

/// A 32-bit GPIO port driven through write-one-to-set / write-one-to-clear
/// registers.
///
/// Every method takes a bit mask.  Bits outside the mask must be left
/// untouched, so two drivers owning disjoint masks never clobber each other.
pub trait DigitalOutputPort {
    /// Switch the masked pins to output direction.
    fn configure_outputs(&mut self, mask: u32);

    /// Drive the masked pins HIGH.
    fn set_high(&mut self, mask: u32);

    /// Drive the masked pins LOW.
    fn set_low(&mut self, mask: u32);
}

/// Single-channel, blocking analog-to-digital conversion.
pub trait AnalogConverter {
    /// Convert one sample on `channel`.  Returns the 12-bit result
    /// (0–4095), or an error if the converter never completes.
    fn read_channel(&mut self, channel: AdcChannel) -> Result<u16, SensorError>;
}

/// A two-row character display addressed by (row, column).
pub trait CharacterDisplay {
    /// Move the write position.  `row` is 0 or 1.
    fn set_cursor(&mut self, row: u8, col: u8);

    /// Write characters from the current position.  No wrapping: text past
    /// the last column is the caller's problem.
    fn write_str(&mut self, s: &str);
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Read every sensor and return a fresh reading.
    fn read_all(&mut self) -> Result<SensorReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
///
/// Arguments are logical (`true` = running / sounding); electrical
/// polarity is the adapter's concern.
pub trait ActuatorPort {
    /// Switch the ventilation fan.
    fn set_fan(&mut self, on: bool);

    /// Switch the audible alarm.
    fn set_alarm(&mut self, on: bool);

    /// Fan and alarm off: safe state.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
