//! GPIO / peripheral pin assignments for the air-quality monitor board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding bit positions.  Masks are bit positions within the owning
//! GPIO port's 32-bit FIOSET/FIOCLR/FIODIR registers.

use crate::drivers::adc::AdcChannel;

// ---------------------------------------------------------------------------
// Character LCD (HD44780, 4-bit bus): GPIO port 0
// ---------------------------------------------------------------------------

/// GPIO port that carries every LCD line.
pub const LCD_PORT: u8 = 0;

/// Register select, P0.10.  LOW = command, HIGH = character data.
pub const LCD_RS: u32 = 1 << 10;
/// Enable strobe, P0.11.  Falling edge latches the nibble.
pub const LCD_EN: u32 = 1 << 11;
/// Data line D4, P0.19.
pub const LCD_D4: u32 = 1 << 19;
/// Data line D5, P0.20.
pub const LCD_D5: u32 = 1 << 20;
/// Data line D6, P0.21.
pub const LCD_D6: u32 = 1 << 21;
/// Data line D7, P0.22.
pub const LCD_D7: u32 = 1 << 22;

// ---------------------------------------------------------------------------
// Actuators: GPIO port 1
// ---------------------------------------------------------------------------

/// GPIO port that carries the relay and buzzer.
pub const ACTUATOR_PORT: u8 = 1;

/// Fan relay module input, P1.28.  Active LOW (see `drivers::outputs`).
pub const FAN_RELAY: u32 = 1 << 28;
/// Piezo buzzer driver, P1.27.  Active HIGH.
pub const ALARM_BUZZER: u32 = 1 << 27;

// ---------------------------------------------------------------------------
// Sensors: Analog (ADC0)
// ---------------------------------------------------------------------------

/// MQ-series gas sensor analog output, P0.23 / AD0.0.
pub const GAS_ADC: AdcChannel = AdcChannel::AD0_0;
/// LM35 temperature sensor (10 mV/°C), P0.25 / AD0.2.
pub const TEMP_ADC: AdcChannel = AdcChannel::AD0_2;

// ---------------------------------------------------------------------------
// Clocking
// ---------------------------------------------------------------------------

/// CPU core clock after the boot ROM / SystemInit PLL setup.
pub const CORE_CLOCK_HZ: u32 = 100_000_000;
