//! Air-quality monitor firmware library.
//!
//! Exposes the pure-logic modules for integration testing.  Raw register
//! access is confined to `adapters::lpc17xx`; everything else is generic
//! over the port traits in `app::ports` and builds on the host.

#![cfg_attr(not(test), no_std)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod sensors;
