//! HD44780 16×2 character LCD over a 4-bit parallel bus.
//!
//! Write-only: R/W is strapped to ground, so the busy flag is never read and
//! every command is followed by a fixed settle delay instead.
//!
//! ## Bus protocol
//!
//! Each byte goes out as two nibbles, high nibble first.  For each nibble
//! the four data lines are first driven LOW, the set bits are then driven
//! HIGH, and EN is pulsed HIGH→LOW; the controller latches on the falling
//! edge.  RS selects command (LOW) or character data (HIGH) for the whole
//! byte.
//!
//! ## Initialisation
//!
//! After power-on the controller may be in 8-bit mode or, after an MCU-only
//! reset, halfway through a 4-bit byte.  [`Hd44780::initialize`] first runs
//! the datasheet reset-by-instruction sequence (nibbles 3, 3, 3, 2), then
//! sends function-set (4-bit, 2 lines), display-on/cursor-off, entry-mode
//! increment and clear.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{CharacterDisplay, DigitalOutputPort};
use crate::pins;

/// Instruction bytes.
pub mod command {
    /// Clear display, cursor home.
    pub const CLEAR: u8 = 0x01;
    /// Entry mode: increment, no shift.
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    /// Display on, cursor off, blink off.
    pub const DISPLAY_ON_CURSOR_OFF: u8 = 0x0C;
    /// Function set: 4-bit bus, 2 lines, 5×8 font.
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    /// Set DDRAM address; OR in the address.
    pub const SET_DDRAM_ADDRESS: u8 = 0x80;
}

/// DDRAM address of the first cell on row 1.
pub const ROW1_OFFSET: u8 = 0x40;
/// Highest column addressable within one DDRAM line.
pub const LAST_DDRAM_COLUMN: u8 = 39;

/// Power-on settle before the first nibble.
pub const POWER_ON_SETTLE_MS: u32 = 200;
/// Gap after each reset-by-instruction nibble.
pub const WAKE_SETTLE_US: u32 = 4_500;
/// EN high time.  The controller needs 450 ns.
pub const ENABLE_PULSE_US: u32 = 1;
/// Settle after a command byte (covers clear/home at 1.52 ms).
pub const COMMAND_SETTLE_US: u32 = 2_000;
/// Settle after a data byte (37 µs + margin).
pub const DATA_SETTLE_US: u32 = 50;
/// Extra settle after clearing.
pub const CLEAR_SETTLE_MS: u32 = 5;

/// Masks of the six bus lines, all within one GPIO port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdPins {
    pub rs: u32,
    pub en: u32,
    pub d4: u32,
    pub d5: u32,
    pub d6: u32,
    pub d7: u32,
}

impl LcdPins {
    /// The board wiring from [`crate::pins`].
    pub const BOARD: Self = Self {
        rs: pins::LCD_RS,
        en: pins::LCD_EN,
        d4: pins::LCD_D4,
        d5: pins::LCD_D5,
        d6: pins::LCD_D6,
        d7: pins::LCD_D7,
    };

    pub const fn data_mask(&self) -> u32 {
        self.d4 | self.d5 | self.d6 | self.d7
    }

    pub const fn all(&self) -> u32 {
        self.rs | self.en | self.data_mask()
    }

    /// Port bits that encode `nibble` (low four bits) on D4–D7.
    pub const fn nibble_bits(&self, nibble: u8) -> u32 {
        let mut bits = 0;
        if nibble & 0x1 != 0 {
            bits |= self.d4;
        }
        if nibble & 0x2 != 0 {
            bits |= self.d5;
        }
        if nibble & 0x4 != 0 {
            bits |= self.d6;
        }
        if nibble & 0x8 != 0 {
            bits |= self.d7;
        }
        bits
    }
}

/// DDRAM set-address command for (`row`, `col`).  Any non-zero row is row 1.
pub const fn ddram_address(row: u8, col: u8) -> u8 {
    let base = if row == 0 { 0 } else { ROW1_OFFSET };
    let col = if col > LAST_DDRAM_COLUMN {
        LAST_DDRAM_COLUMN
    } else {
        col
    };
    command::SET_DDRAM_ADDRESS | (base + col)
}

/// HD44780 driver, generic over the GPIO port and the delay source.
pub struct Hd44780<P, D> {
    port: P,
    pins: LcdPins,
    delay: D,
}

impl<P: DigitalOutputPort, D: DelayNs> Hd44780<P, D> {
    pub fn new(port: P, pins: LcdPins, delay: D) -> Self {
        Self { port, pins, delay }
    }

    /// Configure the bus pins and bring the controller to a known state:
    /// 4-bit, two lines, display on, cursor off, cleared.
    pub fn initialize(&mut self) {
        let all = self.pins.all();
        self.port.configure_outputs(all);
        self.port.set_low(all);
        self.delay.delay_ms(POWER_ON_SETTLE_MS);

        for _ in 0..3 {
            self.write_nibble(0x3);
            self.delay.delay_us(WAKE_SETTLE_US);
        }
        self.write_nibble(0x2);
        self.delay.delay_us(COMMAND_SETTLE_US);

        self.send_command(command::FUNCTION_SET_4BIT_2LINE);
        self.send_command(command::DISPLAY_ON_CURSOR_OFF);
        self.send_command(command::ENTRY_MODE_INCREMENT);
        self.send_command(command::CLEAR);
        self.delay.delay_ms(CLEAR_SETTLE_MS);
        debug!("lcd: 4-bit, 2-line, display on");
    }

    /// Send one instruction byte (RS LOW).
    pub fn send_command(&mut self, byte: u8) {
        self.port.set_low(self.pins.rs);
        self.write_byte(byte);
        self.delay.delay_us(COMMAND_SETTLE_US);
    }

    /// Send one character byte (RS HIGH).
    pub fn send_data(&mut self, byte: u8) {
        self.port.set_high(self.pins.rs);
        self.write_byte(byte);
        self.delay.delay_us(DATA_SETTLE_US);
    }

    pub fn set_cursor(&mut self, row: u8, col: u8) {
        self.send_command(ddram_address(row, col));
    }

    /// Write each byte of `s` as character data.
    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.send_data(byte);
        }
    }

    /// Give back the port and delay.
    pub fn release(self) -> (P, D) {
        (self.port, self.delay)
    }

    fn write_byte(&mut self, byte: u8) {
        self.write_nibble(byte >> 4);
        self.write_nibble(byte & 0x0F);
    }

    fn write_nibble(&mut self, nibble: u8) {
        self.port.set_low(self.pins.data_mask());
        let bits = self.pins.nibble_bits(nibble);
        if bits != 0 {
            self.port.set_high(bits);
        }
        self.pulse_enable();
    }

    fn pulse_enable(&mut self) {
        self.port.set_high(self.pins.en);
        self.delay.delay_us(ENABLE_PULSE_US);
        self.port.set_low(self.pins.en);
    }
}

impl<P: DigitalOutputPort, D: DelayNs> CharacterDisplay for Hd44780<P, D> {
    fn set_cursor(&mut self, row: u8, col: u8) {
        Hd44780::set_cursor(self, row, col);
    }

    fn write_str(&mut self, s: &str) {
        Hd44780::write_str(self, s);
    }
}
