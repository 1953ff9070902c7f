//! MQ-series gas sensor, reported as a percentage of ADC full scale.
//!
//! The heater-element sensor is noisy sample to sample, so each reading
//! averages a small burst of conversions taken back to back on AD0.0.
//! No calibration to ppm: the thresholds are tuned in percent.

use crate::app::ports::AnalogConverter;
use crate::drivers::adc::{AdcChannel, FULL_SCALE};
use crate::error::SensorError;

/// Upper bound on the averaging burst (`SystemConfig::gas_sample_count`).
pub const MAX_GAS_SAMPLES: usize = 16;

/// Arithmetic mean.  Accumulates in `u32` (16 × 4095 cannot overflow) and
/// divides once in `f32`, so N identical samples average back exactly.
pub fn mean(samples: &[u16]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: u32 = samples.iter().map(|&s| u32::from(s)).sum();
    sum as f32 / samples.len() as f32
}

/// `mean / 4095 * 100`.
pub fn mean_to_percent(mean: f32) -> f32 {
    mean / f32::from(FULL_SCALE) * 100.0
}

pub struct GasSensor {
    channel: AdcChannel,
    sample_count: usize,
}

impl GasSensor {
    /// `sample_count` is clamped to `1..=MAX_GAS_SAMPLES`.
    pub fn new(channel: AdcChannel, sample_count: u8) -> Self {
        Self {
            channel,
            sample_count: usize::from(sample_count).clamp(1, MAX_GAS_SAMPLES),
        }
    }

    /// Take `sample_count` conversions and return their mean as a
    /// percentage of full scale.  The first failed conversion aborts the
    /// burst.
    pub fn read_percent(&self, adc: &mut impl AnalogConverter) -> Result<f32, SensorError> {
        let mut samples = [0u16; MAX_GAS_SAMPLES];
        for slot in samples.iter_mut().take(self.sample_count) {
            *slot = adc.read_channel(self.channel)?;
        }
        Ok(mean_to_percent(mean(&samples[..self.sample_count])))
    }
}
