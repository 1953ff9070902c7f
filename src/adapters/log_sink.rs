//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  On the target the logger is `rtt-target`, so every
//! line lands in the debug probe's RTT console.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | #{} state={:?} | T={:.1}\u{00b0}C gas={:.1}% | fan={} alarm={} | fault={}",
                    t.tick_count,
                    t.state,
                    t.temperature_c,
                    t.gas_percent,
                    if t.fan_on { "ON" } else { "off" },
                    if t.alarm_on { "ON" } else { "off" },
                    t.sensor_fault,
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::FaultDetected(e) => {
                warn!("FAULT | {}", e);
            }
            AppEvent::FaultCleared => {
                info!("FAULT | cleared");
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
