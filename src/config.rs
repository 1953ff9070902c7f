//! System configuration parameters
//!
//! All tunable parameters for the air-quality monitor.  Values are
//! compile-time defaults; [`SystemConfig::validate`] is run once at boot
//! before any peripheral is touched.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sensors::gas::MAX_GAS_SAMPLES;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Gas thresholds ---
    /// Gas concentration (%) above which the fan and alarm switch on
    pub gas_on_percent: f32,
    /// Gas concentration (%) below which the fan and alarm may switch off
    pub gas_off_percent: f32,

    // --- Temperature thresholds ---
    /// Temperature (Celsius) above which the fan and alarm switch on
    pub temp_on_c: f32,
    /// Temperature (Celsius) at or below which the fan and alarm may switch off
    pub temp_off_c: f32,

    // --- Sampling ---
    /// Gas ADC samples averaged per reading
    pub gas_sample_count: u8,
    /// Maximum DONE-flag polls before a conversion is declared stalled
    pub adc_timeout_polls: u32,

    // --- Timing ---
    /// Pause between control loop iterations (milliseconds)
    pub sample_period_ms: u32,
    /// How long the start-up banner stays on screen (milliseconds)
    pub banner_hold_ms: u32,
    /// Telemetry event interval (control loop iterations)
    pub telemetry_interval_ticks: u32,
}

impl SystemConfig {
    /// Compile-time defaults, usable in `const` context.
    pub const DEFAULT: Self = Self {
        // Gas thresholds
        gas_on_percent: 30.0,
        gas_off_percent: 25.0,

        // Temperature thresholds
        temp_on_c: 45.0,
        temp_off_c: 40.0,

        // Sampling
        gas_sample_count: 5,
        // A conversion is 65 ADC clocks (~21 us at 25 MHz PCLK / 8), a few
        // hundred polls at 100 MHz.
        adc_timeout_polls: 10_000,

        // Timing
        sample_period_ms: 200,
        banner_hold_ms: 300,
        telemetry_interval_ticks: 25, // ~5 s at the default period
    };

    /// Check every range rule.  Returns the first violation found.
    ///
    /// Comparisons are written negated so that NaN fails them.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gas_on_percent > self.gas_off_percent) {
            return Err(ConfigError("gas_on_percent must be above gas_off_percent"));
        }
        if !(self.temp_on_c > self.temp_off_c) {
            return Err(ConfigError("temp_on_c must be above temp_off_c"));
        }
        if !(0.0..=100.0).contains(&self.gas_off_percent)
            || !(0.0..=100.0).contains(&self.gas_on_percent)
        {
            return Err(ConfigError("gas thresholds must lie within 0-100%"));
        }
        if self.gas_sample_count == 0 || self.gas_sample_count as usize > MAX_GAS_SAMPLES {
            return Err(ConfigError("gas_sample_count must be 1-16"));
        }
        if self.adc_timeout_polls == 0 {
            return Err(ConfigError("adc_timeout_polls must be non-zero"));
        }
        if self.sample_period_ms == 0 {
            return Err(ConfigError("sample_period_ms must be non-zero"));
        }
        if self.telemetry_interval_ticks == 0 {
            return Err(ConfigError("telemetry_interval_ticks must be non-zero"));
        }
        Ok(())
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
