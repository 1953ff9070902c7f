//! Air-quality monitor firmware: main entry point (LPC1768).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  GpioPort (P0: LCD, P1: relay/buzzer)   Lpc17xxAdc (ADC0)    │
//! │  Hd44780 (CharacterDisplay)   HardwareAdapter   LogEventSink │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │            AppService (pure logic)                     │  │
//! │  │            hysteresis FSM · fault latch                │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One unbounded loop: read, decide, actuate, render, wait.  No
//! interrupts, no timers; every wait is a calibrated spin.

#![no_std]
#![no_main]
#![deny(unused_must_use)]

use cortex_m_rt::entry;
use embedded_hal::delay::DelayNs;
use log::{LevelFilter, error, info};
use rtt_target::rtt_init_log;

use airmon::adapters::hardware::HardwareAdapter;
use airmon::adapters::log_sink::LogEventSink;
use airmon::adapters::lpc17xx::{GpioPort, Lpc17xxAdc};
use airmon::app::service::AppService;
use airmon::config::SystemConfig;
use airmon::drivers::adc::AdcDriver;
use airmon::drivers::delay::SpinDelay;
use airmon::drivers::lcd::{Hd44780, LcdPins};
use airmon::drivers::outputs::ActuatorBank;
use airmon::error::Error;
use airmon::pins;
use airmon::sensors::SensorHub;

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {
        cortex_m::asm::nop();
    }
}

#[entry]
fn main() -> ! {
    rtt_init_log!(LevelFilter::Info);
    info!("Air-quality monitor v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        error!("Refusing to start: {}", Error::from(e));
        loop {
            cortex_m::asm::nop();
        }
    }

    let mut delay = SpinDelay::new(pins::CORE_CLOCK_HZ);

    // ── Peripheral ownership ──────────────────────────────────
    // SAFETY: single-core, runs once before anything else touches the
    // peripherals; each handle moves into exactly one driver below.
    let (lcd_port, actuator_port, adc_regs) = unsafe {
        (
            GpioPort::steal(pins::LCD_PORT),
            GpioPort::steal(pins::ACTUATOR_PORT),
            Lpc17xxAdc::steal(),
        )
    };

    // ── Drivers ───────────────────────────────────────────────
    let mut adc = AdcDriver::new(adc_regs, config.adc_timeout_polls);
    adc.initialize(&[pins::GAS_ADC, pins::TEMP_ADC]);

    let mut lcd = Hd44780::new(lcd_port, LcdPins::BOARD, delay);
    lcd.initialize();

    let mut hw = HardwareAdapter::new(
        SensorHub::new(adc, &config),
        ActuatorBank::new(actuator_port),
    );
    hw.initialize();

    let mut sink = LogEventSink::new();
    let sample_period_ms = config.sample_period_ms;
    let banner_hold_ms = config.banner_hold_ms;

    // ── Application ───────────────────────────────────────────
    let mut app = AppService::new(config);
    app.start(&mut hw, &mut lcd, &mut sink);
    delay.delay_ms(banner_hold_ms);

    info!("Entering control loop, period {} ms", sample_period_ms);
    loop {
        app.tick(&mut hw, &mut lcd, &mut sink);
        delay.delay_ms(sample_period_ms);
    }
}
