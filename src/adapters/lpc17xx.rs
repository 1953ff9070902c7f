//! LPC17xx register backends for the capability ports.
//!
//! Addresses and bit fields follow the LPC176x/5x user manual (UM10360).
//! Each handle is created once in `main` through an `unsafe fn steal` and
//! then moved into exactly one driver; nothing else in the crate performs
//! raw register access.
//!
//! GPIO outputs go through FIOSET/FIOCLR, which only act on the bits
//! written as 1, so two owners of disjoint masks on one port never race.
//! FIODIR is the one read-modify-write, touching only the caller's mask.

use core::ptr::{read_volatile, write_volatile};

use crate::app::ports::DigitalOutputPort;
use crate::drivers::adc::{AdcChannel, AdcRegisters};

/// Register addresses.
mod addr {
    /// Power control for peripherals.
    pub const PCONP: usize = 0x400F_C0C4;

    pub const PINSEL0: usize = 0x4002_C000;
    pub const PINSEL1: usize = 0x4002_C004;
    pub const PINSEL3: usize = 0x4002_C00C;

    /// Fast GPIO port 0; ports 1–4 follow at `GPIO_STRIDE`.
    pub const GPIO_BASE: usize = 0x2009_C000;
    pub const GPIO_STRIDE: usize = 0x20;
    pub const FIODIR: usize = 0x00;
    pub const FIOSET: usize = 0x18;
    pub const FIOCLR: usize = 0x1C;

    pub const AD0CR: usize = 0x4003_4000;
    pub const AD0GDR: usize = 0x4003_4004;
}

/// PCONP.PCADC.
const PCONP_PCADC: u32 = 1 << 12;

/// Highest fast-GPIO port number.
pub const MAX_GPIO_PORT: u8 = 4;

/// Pin-function field per ADC input: (PINSEL register, field shift,
/// function code).
const ANALOG_ROUTING: [(usize, u32, u32); AdcChannel::COUNT] = [
    (addr::PINSEL1, 14, 0b01), // AD0.0  P0.23
    (addr::PINSEL1, 16, 0b01), // AD0.1  P0.24
    (addr::PINSEL1, 18, 0b01), // AD0.2  P0.25
    (addr::PINSEL1, 20, 0b01), // AD0.3  P0.26
    (addr::PINSEL3, 28, 0b11), // AD0.4  P1.30
    (addr::PINSEL3, 30, 0b11), // AD0.5  P1.31
    (addr::PINSEL0, 6, 0b10),  // AD0.6  P0.3
    (addr::PINSEL0, 4, 0b10),  // AD0.7  P0.2
];

/// PINSEL value after routing one input: its two-bit field replaced, every
/// other field kept.
pub const fn route_field(pinsel: u32, shift: u32, function: u32) -> u32 {
    (pinsel & !(0b11 << shift)) | (function << shift)
}

#[inline]
unsafe fn read_reg(address: usize) -> u32 {
    // SAFETY: caller passes a valid, aligned MMIO register address.
    unsafe { read_volatile(address as *const u32) }
}

#[inline]
unsafe fn write_reg(address: usize, value: u32) {
    // SAFETY: caller passes a valid, aligned MMIO register address.
    unsafe { write_volatile(address as *mut u32, value) }
}

// ───────────────────────────────────────────────────────────────
// GPIO
// ───────────────────────────────────────────────────────────────

/// One fast-GPIO port (FIOxDIR / FIOxSET / FIOxCLR).
#[derive(Debug)]
pub struct GpioPort {
    base: usize,
}

impl GpioPort {
    /// Handle to fast-GPIO port `port` (0–4).
    ///
    /// # Safety
    ///
    /// Must run on an LPC17xx.  The caller must ensure no other live handle
    /// drives the same pins; handles for one port may coexist only when
    /// their users keep to disjoint masks.
    pub unsafe fn steal(port: u8) -> Self {
        debug_assert!(port <= MAX_GPIO_PORT, "no GPIO port {port}");
        Self {
            base: addr::GPIO_BASE + usize::from(port.min(MAX_GPIO_PORT)) * addr::GPIO_STRIDE,
        }
    }
}

impl DigitalOutputPort for GpioPort {
    fn configure_outputs(&mut self, mask: u32) {
        let fiodir = self.base + addr::FIODIR;
        // SAFETY: `base` points at a fast-GPIO block (see `steal`); the
        // single-threaded main loop is the only writer.
        unsafe { write_reg(fiodir, read_reg(fiodir) | mask) }
    }

    fn set_high(&mut self, mask: u32) {
        // SAFETY: FIOSET ignores zero bits, so only `mask` is affected.
        unsafe { write_reg(self.base + addr::FIOSET, mask) }
    }

    fn set_low(&mut self, mask: u32) {
        // SAFETY: FIOCLR ignores zero bits, so only `mask` is affected.
        unsafe { write_reg(self.base + addr::FIOCLR, mask) }
    }
}

// ───────────────────────────────────────────────────────────────
// ADC0
// ───────────────────────────────────────────────────────────────

/// ADC0 register block plus the PCONP and PINSEL fields it depends on.
#[derive(Debug)]
pub struct Lpc17xxAdc {
    _private: (),
}

impl Lpc17xxAdc {
    /// # Safety
    ///
    /// Must run on an LPC17xx, and only one handle may exist.  The handle
    /// also read-modify-writes PCONP and the PINSEL registers, so nothing
    /// else may touch them concurrently.
    pub unsafe fn steal() -> Self {
        Self { _private: () }
    }
}

impl AdcRegisters for Lpc17xxAdc {
    fn power_up(&mut self) {
        // SAFETY: PCONP is a valid register; single-threaded RMW.
        unsafe { write_reg(addr::PCONP, read_reg(addr::PCONP) | PCONP_PCADC) }
    }

    fn route_to_analog(&mut self, channel: AdcChannel) {
        let (pinsel, shift, function) = ANALOG_ROUTING[usize::from(channel.number())];
        // SAFETY: `pinsel` comes from the routing table of valid registers.
        unsafe { write_reg(pinsel, route_field(read_reg(pinsel), shift, function)) }
    }

    fn read_control(&mut self) -> u32 {
        // SAFETY: AD0CR is a valid register.
        unsafe { read_reg(addr::AD0CR) }
    }

    fn write_control(&mut self, value: u32) {
        // SAFETY: AD0CR is a valid register.
        unsafe { write_reg(addr::AD0CR, value) }
    }

    fn read_global_data(&mut self) -> u32 {
        // SAFETY: AD0GDR is a valid register; reading clears DONE.
        unsafe { read_reg(addr::AD0GDR) }
    }
}
