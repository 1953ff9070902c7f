//! Peripheral drivers: busy-wait timing, ADC0, the character LCD and the
//! fan/alarm outputs.

pub mod adc;
pub mod delay;
pub mod lcd;
pub mod outputs;
