//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control rules for the monitor: hysteresis FSM
//! orchestration, actuation and display refresh.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod display;
pub mod events;
pub mod ports;
pub mod service;
