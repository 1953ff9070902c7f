//! Busy-wait timing primitive.
//!
//! There is no timer peripheral in use: every pulse width and settle time
//! in the firmware is a calibrated spin.  [`SpinDelay`] spins for *at
//! least* the requested number of ticks (one tick ≈ 1 µs); interrupts
//! never fire, so the only error is the calibration constant.
//!
//! Drivers take any `embedded_hal::delay::DelayNs`, so tests substitute a
//! recording delay and never wait on the wall clock.

use core::hint::black_box;

use embedded_hal::delay::DelayNs;

/// Approximate core cycles for one pass of the spin loop on a Cortex-M3
/// built with `opt-level = "s"`.  Re-calibrate against a scope on the LCD
/// enable strobe if the optimisation level changes.
pub const CYCLES_PER_SPIN: u32 = 4;

/// Nanoseconds per [`SpinDelay::wait`] tick.
pub const TICK_NS: u32 = 1_000;

/// Calibrated busy-wait delay.  `Copy`, so every driver can own one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinDelay {
    spins_per_tick: u32,
}

impl SpinDelay {
    /// Calibrate for the given core clock.
    pub const fn new(core_clock_hz: u32) -> Self {
        let spins = core_clock_hz / 1_000_000 / CYCLES_PER_SPIN;
        Self {
            spins_per_tick: if spins == 0 { 1 } else { spins },
        }
    }

    /// Spin for at least `ticks` microseconds.
    pub fn wait(&self, ticks: u32) {
        for _ in 0..ticks {
            let mut n = self.spins_per_tick;
            // black_box keeps the counter opaque so the loop survives LTO.
            while black_box(n) > 0 {
                n -= 1;
            }
        }
    }
}

/// Ticks needed to cover `ns`, rounded up.
pub const fn ticks_for_ns(ns: u32) -> u32 {
    ns.div_ceil(TICK_NS)
}

impl DelayNs for SpinDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.wait(ticks_for_ns(ns));
    }

    fn delay_us(&mut self, us: u32) {
        self.wait(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.wait(1_000);
        }
    }
}
