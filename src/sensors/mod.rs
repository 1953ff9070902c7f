//! Sensor subsystem: the two sensor models and the aggregating
//! [`SensorHub`].
//!
//! The hub owns the analog converter and produces a [`SensorReading`] each
//! tick that gets written into `FsmContext.sensors`.

pub mod gas;
pub mod temperature;

use crate::app::ports::AnalogConverter;
use crate::config::SystemConfig;
use crate::error::SensorError;
use crate::pins;
use gas::GasSensor;
use temperature::TemperatureSensor;

/// One sample of both signals, already in engineering units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorReading {
    pub temperature_c: f32,
    pub gas_percent: f32,
}

/// Aggregates both sensors over one shared converter.
pub struct SensorHub<A> {
    adc: A,
    temperature: TemperatureSensor,
    gas: GasSensor,
}

impl<A: AnalogConverter> SensorHub<A> {
    /// Hub on the board channels, averaging `config.gas_sample_count`.
    pub fn new(adc: A, config: &SystemConfig) -> Self {
        Self {
            adc,
            temperature: TemperatureSensor::new(pins::TEMP_ADC),
            gas: GasSensor::new(pins::GAS_ADC, config.gas_sample_count),
        }
    }

    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.temperature.read_celsius(&mut self.adc)
    }

    fn read_gas_percent(&mut self) -> Result<f32, SensorError> {
        self.gas.read_percent(&mut self.adc)
    }

    /// Temperature first, then the gas burst.  The first failure wins.
    pub fn read_all(&mut self) -> Result<SensorReading, SensorError> {
        let temperature_c = self.read_temperature()?;
        let gas_percent = self.read_gas_percent()?;
        Ok(SensorReading {
            temperature_c,
            gas_percent,
        })
    }

    pub fn converter_mut(&mut self) -> &mut A {
        &mut self.adc
    }
}
