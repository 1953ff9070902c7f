//! LM35 precision temperature sensor (10 mV/°C, 0 V at 0 °C).
//!
//! The output sits directly on AD0.2 with the converter referenced to
//! 3.3 V, so one sample is enough: the LM35 is low-impedance and slow.

use crate::app::ports::AnalogConverter;
use crate::drivers::adc::{AdcChannel, FULL_SCALE};
use crate::error::SensorError;

/// ADC reference voltage.
pub const V_REF: f32 = 3.3;
/// LM35 transfer: 100 °C per volt.
pub const CELSIUS_PER_VOLT: f32 = 100.0;

/// `raw * 3.3 / 4095 * 100`.
pub fn raw_to_celsius(raw: u16) -> f32 {
    f32::from(raw) * V_REF / f32::from(FULL_SCALE) * CELSIUS_PER_VOLT
}

pub struct TemperatureSensor {
    channel: AdcChannel,
}

impl TemperatureSensor {
    pub fn new(channel: AdcChannel) -> Self {
        Self { channel }
    }

    /// One conversion, in degrees Celsius.
    pub fn read_celsius(&self, adc: &mut impl AnalogConverter) -> Result<f32, SensorError> {
        adc.read_channel(self.channel).map(raw_to_celsius)
    }
}
