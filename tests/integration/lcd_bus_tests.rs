//! HD44780 4-bit bus protocol, checked against a recorded GPIO trace.

use super::mock_hw::{BusWord, LcdModel, PortOp, RecordingDelay, RecordingPort, decode_trace};

use airmon::drivers::lcd::{
    self, CLEAR_SETTLE_MS, COMMAND_SETTLE_US, DATA_SETTLE_US, ENABLE_PULSE_US, Hd44780, LcdPins,
    POWER_ON_SETTLE_MS, command,
};

const PINS: LcdPins = LcdPins::BOARD;

fn initialized() -> Hd44780<RecordingPort, RecordingDelay> {
    let mut lcd = Hd44780::new(RecordingPort::new(), PINS, RecordingDelay::new());
    lcd.initialize();
    lcd
}

#[test]
fn initialize_configures_the_six_lines_first() {
    let (port, _) = initialized().release();
    assert_eq!(port.ops[0], PortOp::Configure(PINS.all()));
    assert_eq!(port.direction, PINS.all());
}

#[test]
fn power_on_settle_precedes_the_first_nibble() {
    let (_, delay) = initialized().release();
    assert!(delay.calls[0] >= POWER_ON_SETTLE_MS * 1_000_000);
}

#[test]
fn init_sequence() {
    let (port, _) = initialized().release();
    let (wake, words) = decode_trace(&port.ops, &PINS);

    assert_eq!(
        wake.iter().map(|n| n.value).collect::<Vec<_>>(),
        [0x3, 0x3, 0x3, 0x2]
    );
    assert!(wake.iter().all(|n| !n.rs));
    assert_eq!(
        words,
        [
            BusWord::Command(command::FUNCTION_SET_4BIT_2LINE),
            BusWord::Command(command::DISPLAY_ON_CURSOR_OFF),
            BusWord::Command(command::ENTRY_MODE_INCREMENT),
            BusWord::Command(command::CLEAR),
        ]
    );
}

#[test]
fn text_goes_out_as_data_bytes() {
    let mut lcd = initialized();
    lcd.set_cursor(1, 0);
    lcd.write_str("Hi!");
    let (port, _) = lcd.release();
    let (_, words) = decode_trace(&port.ops, &PINS);

    assert_eq!(
        &words[4..],
        [
            BusWord::Command(0xC0),
            BusWord::Data(b'H'),
            BusWord::Data(b'i'),
            BusWord::Data(b'!'),
        ]
    );
}

#[test]
fn data_lines_are_cleared_before_every_nibble() {
    let mut lcd = initialized();
    lcd.write_str("AZ");
    let (port, _) = lcd.release();

    let clears = port
        .ops
        .iter()
        .filter(|op| **op == PortOp::Low(PINS.data_mask()))
        .count();
    let strobes = port
        .ops
        .iter()
        .filter(|op| **op == PortOp::Low(PINS.en))
        .count();
    assert_eq!(clears, strobes);
}

#[test]
fn enable_pulse_meets_minimum_width() {
    let (_, delay) = initialized().release();
    assert!(delay.calls.iter().all(|&ns| ns >= 450));
}

#[test]
fn data_byte_waits_the_short_settle() {
    let mut lcd = initialized();
    lcd.send_data(b'x');
    let (_, delay) = lcd.release();
    assert_eq!(delay.calls.last(), Some(&(DATA_SETTLE_US * 1_000)));
}

#[test]
fn command_byte_waits_the_long_settle() {
    let mut lcd = initialized();
    lcd.send_command(command::DISPLAY_ON_CURSOR_OFF);
    let (_, delay) = lcd.release();

    let settle = *delay.calls.last().unwrap();
    assert_eq!(settle, COMMAND_SETTLE_US * 1_000);
    assert!(settle > DATA_SETTLE_US * 1_000);
}

#[test]
fn each_byte_is_two_strobes_then_its_settle() {
    let before = initialized().release().1.calls.len();
    let mut lcd = initialized();
    lcd.send_command(0x80);
    lcd.send_data(b'A');
    let (_, delay) = lcd.release();

    let pulse = ENABLE_PULSE_US * 1_000;
    assert_eq!(
        delay.calls[before..],
        [
            pulse,
            pulse,
            COMMAND_SETTLE_US * 1_000,
            pulse,
            pulse,
            DATA_SETTLE_US * 1_000,
        ]
    );
}

#[test]
fn clear_is_followed_by_its_own_settle() {
    let (port, delay) = initialized().release();
    let (_, words) = decode_trace(&port.ops, &PINS);

    assert_eq!(words.last(), Some(&BusWord::Command(command::CLEAR)));
    assert_eq!(
        delay.calls[delay.calls.len() - 2..],
        [COMMAND_SETTLE_US * 1_000, CLEAR_SETTLE_MS * 1_000_000]
    );
}

#[test]
fn rows_land_at_their_ddram_addresses() {
    let mut lcd = initialized();
    lcd.set_cursor(0, 0);
    lcd.write_str("top");
    lcd.set_cursor(1, 13);
    lcd.write_str("bot");
    let (port, _) = lcd.release();
    let (_, words) = decode_trace(&port.ops, &PINS);

    let screen = LcdModel::replay(&words);
    assert_eq!(screen.row(0), "top             ");
    assert_eq!(screen.row(1), "             bot");
}

#[test]
fn ddram_helper_matches_the_wire() {
    let mut lcd = initialized();
    lcd.set_cursor(1, 5);
    let (port, _) = lcd.release();
    let (_, words) = decode_trace(&port.ops, &PINS);
    assert_eq!(words.last(), Some(&BusWord::Command(lcd::ddram_address(1, 5))));
}
