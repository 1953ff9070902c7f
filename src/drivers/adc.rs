//! LPC17xx ADC0 driver: single channel, software-triggered, polled.
//!
//! The conversion protocol (select one channel, START = 001, wait for DONE,
//! extract the 12-bit result) lives here; raw register access sits behind
//! [`AdcRegisters`] so the same protocol runs against silicon
//! (`adapters::lpc17xx`) and the simulation (`adapters::sim`).
//!
//! ## Bounded completion wait
//!
//! The DONE poll gives up after `timeout_polls` reads and returns
//! [`SensorError::ConversionTimeout`].  A wedged converter therefore
//! surfaces as a sensor fault instead of freezing the control loop.

use log::{debug, trace, warn};

use crate::app::ports::AnalogConverter;
use crate::error::SensorError;

/// Largest raw sample value (12-bit converter).
pub const FULL_SCALE: u16 = 4095;

/// ADCR.CLKDIV: PCLK_ADC / (CLKDIV + 1) must stay at or below 13 MHz.
pub const CLOCK_DIVIDER: u32 = 7;

/// AD0CR (control register) fields.
pub mod cr {
    /// SEL: one bit per input, exactly one may be set in software mode.
    pub const SEL_MASK: u32 = 0xFF;
    pub const CLKDIV_SHIFT: u32 = 8;
    /// PDN: 1 = converter operational.
    pub const PDN: u32 = 1 << 21;
    pub const START_MASK: u32 = 0b111 << 24;
    /// START = 001: begin a conversion now.
    pub const START_NOW: u32 = 0b001 << 24;
}

/// AD0GDR (global data register) fields.
pub mod gdr {
    pub const RESULT_SHIFT: u32 = 4;
    pub const RESULT_MASK: u32 = 0xFFF;
    pub const CHN_SHIFT: u32 = 24;
    pub const CHN_MASK: u32 = 0b111;
    /// Set by hardware when a conversion completes; cleared on read.
    pub const DONE: u32 = 1 << 31;
}

/// One of the eight ADC0 inputs.
///
/// Only constructible for channels 0–7, and it always selects exactly one
/// SEL bit, so an invalid multi-channel selection cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdcChannel(u8);

impl AdcChannel {
    pub const AD0_0: Self = Self(0);
    pub const AD0_1: Self = Self(1);
    pub const AD0_2: Self = Self(2);
    pub const AD0_3: Self = Self(3);
    pub const AD0_4: Self = Self(4);
    pub const AD0_5: Self = Self(5);
    pub const AD0_6: Self = Self(6);
    pub const AD0_7: Self = Self(7);

    /// Number of ADC0 inputs.
    pub const COUNT: usize = 8;

    pub const fn number(self) -> u8 {
        self.0
    }

    /// The one-hot SEL bit for this input.
    pub const fn select_bit(self) -> u32 {
        1 << self.0
    }
}

/// Raw access to the ADC-related registers.
pub trait AdcRegisters {
    /// Enable the converter's power/clock gate (PCONP.PCADC).
    fn power_up(&mut self);

    /// Route `channel`'s package pin to its analog function (PINSEL),
    /// leaving every other pin's function field untouched.
    fn route_to_analog(&mut self, channel: AdcChannel);

    fn read_control(&mut self) -> u32;

    fn write_control(&mut self, value: u32);

    fn read_global_data(&mut self) -> u32;
}

/// Polled ADC0 driver.
pub struct AdcDriver<R> {
    regs: R,
    timeout_polls: u32,
}

impl<R: AdcRegisters> AdcDriver<R> {
    pub fn new(regs: R, timeout_polls: u32) -> Self {
        Self {
            regs,
            timeout_polls: timeout_polls.max(1),
        }
    }

    /// Power the block, route the given inputs, and set PDN + CLKDIV.
    /// Call once before the first conversion.
    pub fn initialize(&mut self, channels: &[AdcChannel]) {
        self.regs.power_up();
        for &channel in channels {
            self.regs.route_to_analog(channel);
        }
        self.regs
            .write_control(cr::PDN | (CLOCK_DIVIDER << cr::CLKDIV_SHIFT));
        debug!(
            "adc: powered, {} input(s) routed, CLKDIV={}",
            channels.len(),
            CLOCK_DIVIDER
        );
    }

    /// Borrow the register backend (used by tests to inspect the simulation).
    pub fn registers(&self) -> &R {
        &self.regs
    }

    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }
}

impl<R: AdcRegisters> AnalogConverter for AdcDriver<R> {
    fn read_channel(&mut self, channel: AdcChannel) -> Result<u16, SensorError> {
        // Drop any previous selection and START request before selecting.
        let idle = self.regs.read_control() & !(cr::SEL_MASK | cr::START_MASK);
        let selected = idle | channel.select_bit();
        self.regs.write_control(selected);
        self.regs.write_control(selected | cr::START_NOW);

        for _ in 0..self.timeout_polls {
            let data = self.regs.read_global_data();
            if data & gdr::DONE != 0 {
                self.regs.write_control(selected);
                let raw = ((data >> gdr::RESULT_SHIFT) & gdr::RESULT_MASK) as u16;
                trace!("adc: AD0.{} = {}", channel.number(), raw);
                return Ok(raw);
            }
        }

        // Leave the converter idle so the next request starts clean.
        self.regs.write_control(selected);
        warn!(
            "adc: AD0.{} no DONE after {} polls",
            channel.number(),
            self.timeout_polls
        );
        Err(SensorError::ConversionTimeout {
            channel: channel.number(),
        })
    }
}
