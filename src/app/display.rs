//! Screen content for the 16×2 character display.
//!
//! Every refresh writes full 16-column lines, padded with trailing spaces,
//! so characters from a longer previous value never linger.  Lines are
//! built in a stack `heapless::String`; text beyond 16 columns is dropped.

use core::fmt::{self, Write};

use heapless::String;

use super::ports::CharacterDisplay;
use crate::error::SensorError;
use crate::sensors::SensorReading;

/// Visible columns per row.
pub const COLUMNS: usize = 16;

/// One display row.
pub type Line = String<COLUMNS>;

/// Start-up banner shown on row 0.
pub const BANNER: &str = "Air Quality Mon";

/// `fmt::Write` adapter that silently drops everything past the line end.
struct Truncating<'a>(&'a mut Line);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Format `args` into exactly [`COLUMNS`] characters.
pub fn fixed_width(args: fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    let written = Truncating(&mut line).write_fmt(args);
    debug_assert!(written.is_ok());
    while line.push(' ').is_ok() {}
    line
}

/// Row 0: `T:<celsius, 1 decimal>C`.
pub fn temperature_line(celsius: f32) -> Line {
    fixed_width(format_args!("T:{celsius:.1}C"))
}

/// Row 1: `Gas:<percent, 1 decimal>%`.
pub fn gas_line(percent: f32) -> Line {
    fixed_width(format_args!("Gas:{percent:.1}%"))
}

/// Both rows of the fault screen.
pub fn fault_lines(error: SensorError) -> (Line, Line) {
    let detail = match error {
        SensorError::ConversionTimeout { channel } => {
            fixed_width(format_args!("ADC ch{channel} timeout"))
        }
    };
    (fixed_width(format_args!("SENSOR FAULT")), detail)
}

fn write_row(display: &mut impl CharacterDisplay, row: u8, text: &str) {
    display.set_cursor(row, 0);
    display.write_str(text);
}

/// Banner on row 0.  The display is expected to be freshly cleared.
pub fn render_banner(display: &mut impl CharacterDisplay) {
    write_row(display, 0, BANNER);
}

/// Live readings on both rows.
pub fn render_readings(display: &mut impl CharacterDisplay, reading: &SensorReading) {
    write_row(display, 0, &temperature_line(reading.temperature_c));
    write_row(display, 1, &gas_line(reading.gas_percent));
}

pub fn render_fault(display: &mut impl CharacterDisplay, error: SensorError) {
    let (top, bottom) = fault_lines(error);
    write_row(display, 0, &top);
    write_row(display, 1, &bottom);
}
