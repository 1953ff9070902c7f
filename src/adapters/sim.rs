//! In-memory peripherals for host tests.
//!
//! - [`SimGpioPort`]: a 32-bit port latch with direction bits.
//! - [`SimAdc`]: register-level ADC0 model: tracks power and routing,
//!   applies a configurable conversion latency, can stall (DONE never
//!   rises) and flags any write that selects more than one channel.
//! - [`SimDisplay`]: a 2×16 character grid implementing
//!   [`CharacterDisplay`].

use crate::app::ports::{CharacterDisplay, DigitalOutputPort};
use crate::drivers::adc::{AdcChannel, AdcRegisters, cr, gdr};

// ───────────────────────────────────────────────────────────────
// GPIO
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone)]
pub struct SimGpioPort {
    direction: u32,
    level: u32,
    /// Bits that have ever been an output at LOW level.
    driven_low: u32,
}

impl SimGpioPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// All bits of `mask` are outputs.
    pub fn is_output(&self, mask: u32) -> bool {
        self.direction & mask == mask
    }

    /// All bits of `mask` are latched HIGH.
    pub fn is_high(&self, mask: u32) -> bool {
        self.level & mask == mask
    }

    /// All bits of `mask` are latched LOW.
    pub fn is_low(&self, mask: u32) -> bool {
        self.level & mask == 0
    }

    /// Any bit of `mask` has been an output at LOW level.
    pub fn ever_driven_low(&self, mask: u32) -> bool {
        self.driven_low & mask != 0
    }

    fn track(&mut self) {
        self.driven_low |= self.direction & !self.level;
    }
}

impl DigitalOutputPort for SimGpioPort {
    fn configure_outputs(&mut self, mask: u32) {
        self.direction |= mask;
        self.track();
    }

    fn set_high(&mut self, mask: u32) {
        self.level |= mask;
        self.track();
    }

    fn set_low(&mut self, mask: u32) {
        self.level &= !mask;
        self.track();
    }
}

// ───────────────────────────────────────────────────────────────
// ADC
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SimAdc {
    powered: bool,
    routed: u8,
    control: u32,
    samples: [u16; AdcChannel::COUNT],
    latency_polls: u32,
    /// (channel, polls remaining) of the conversion in flight.
    pending: Option<(u8, u32)>,
    stalled: bool,
    conversions: u32,
    multi_select_seen: bool,
}

impl Default for SimAdc {
    fn default() -> Self {
        Self::new()
    }
}

impl SimAdc {
    /// Powered down, nothing routed, every input at 0, DONE on first poll.
    pub fn new() -> Self {
        Self {
            powered: false,
            routed: 0,
            control: 0,
            samples: [0; AdcChannel::COUNT],
            latency_polls: 0,
            pending: None,
            stalled: false,
            conversions: 0,
            multi_select_seen: false,
        }
    }

    /// Value the next conversion on `channel` returns (kept to 12 bits).
    pub fn set_sample(&mut self, channel: AdcChannel, raw: u16) {
        self.samples[usize::from(channel.number())] = raw & gdr::RESULT_MASK as u16;
    }

    /// Polls of AD0GDR that read not-done before DONE rises.
    pub fn set_latency(&mut self, polls: u32) {
        self.latency_polls = polls;
    }

    /// A stalled converter never raises DONE.
    pub fn set_stalled(&mut self, stalled: bool) {
        self.stalled = stalled;
    }

    pub fn is_powered(&self) -> bool {
        self.powered
    }

    pub fn is_routed(&self, channel: AdcChannel) -> bool {
        self.routed & (1 << channel.number()) != 0
    }

    pub fn control(&self) -> u32 {
        self.control
    }

    /// Completed conversions.
    pub fn conversions(&self) -> u32 {
        self.conversions
    }

    /// Whether any AD0CR write ever had more than one SEL bit set.
    pub fn multi_select_seen(&self) -> bool {
        self.multi_select_seen
    }

    fn can_convert(&self, channel: u8) -> bool {
        self.powered && self.control & cr::PDN != 0 && self.routed & (1 << channel) != 0
    }
}

impl AdcRegisters for SimAdc {
    fn power_up(&mut self) {
        self.powered = true;
    }

    fn route_to_analog(&mut self, channel: AdcChannel) {
        self.routed |= 1 << channel.number();
    }

    fn read_control(&mut self) -> u32 {
        self.control
    }

    fn write_control(&mut self, value: u32) {
        self.control = value;
        let sel = value & cr::SEL_MASK;
        if sel.count_ones() > 1 {
            self.multi_select_seen = true;
        }
        match value & cr::START_MASK {
            cr::START_NOW if sel.count_ones() == 1 => {
                let channel = sel.trailing_zeros() as u8;
                if self.can_convert(channel) {
                    self.pending = Some((channel, self.latency_polls));
                }
            }
            0 => self.pending = None,
            _ => {}
        }
    }

    fn read_global_data(&mut self) -> u32 {
        let Some((channel, remaining)) = self.pending else {
            return 0;
        };
        let chn = (u32::from(channel) & gdr::CHN_MASK) << gdr::CHN_SHIFT;
        if self.stalled {
            return chn;
        }
        if remaining > 0 {
            self.pending = Some((channel, remaining - 1));
            return chn;
        }
        self.pending = None;
        self.conversions += 1;
        let result = u32::from(self.samples[usize::from(channel)]) << gdr::RESULT_SHIFT;
        gdr::DONE | chn | result
    }
}

// ───────────────────────────────────────────────────────────────
// Display
// ───────────────────────────────────────────────────────────────

pub const SIM_ROWS: usize = 2;
pub const SIM_COLUMNS: usize = 16;

/// A 2×16 character grid.  Writes past the last column are dropped.
#[derive(Debug, Clone)]
pub struct SimDisplay {
    cells: [[u8; SIM_COLUMNS]; SIM_ROWS],
    row: usize,
    col: usize,
}

impl Default for SimDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; SIM_COLUMNS]; SIM_ROWS],
            row: 0,
            col: 0,
        }
    }

    /// Contents of `row` (empty if it holds non-UTF-8 bytes).
    pub fn row(&self, row: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| core::str::from_utf8(r).ok())
            .unwrap_or("")
    }
}

impl CharacterDisplay for SimDisplay {
    fn set_cursor(&mut self, row: u8, col: u8) {
        self.row = if row == 0 { 0 } else { 1 };
        self.col = usize::from(col);
    }

    fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            if self.col < SIM_COLUMNS {
                self.cells[self.row][self.col] = byte;
            }
            self.col += 1;
        }
    }
}
