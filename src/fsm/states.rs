//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers: no closures, no
//! dynamic dispatch, no heap.
//!
//! ```text
//!        [gas > ON  or  temp > ON]
//!  IDLE ───────────────────────────▶ ACTIVE
//!    ▲                                 │
//!    └──────[gas < OFF and temp <= OFF]┘
//! ```
//!
//! The gap between the ON and OFF thresholds is the hysteresis band: a
//! reading inside it never changes state, so the relay cannot chatter
//! around a single set point.
//!
//! Both update handlers re-assert their output commands every tick.

use super::context::{FsmContext, OutputCommands};
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: Idle
        StateDescriptor {
            id: StateId::Idle,
            on_enter: Some(idle_enter),
            on_exit: None,
            on_update: idle_update,
        },
        // Index 1: Active
        StateDescriptor {
            id: StateId::Active,
            on_enter: Some(active_enter),
            on_exit: Some(active_exit),
            on_update: active_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE state
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut FsmContext) {
    ctx.commands = OutputCommands::all_off();
    info!("IDLE: fan off, alarm off");
}

fn idle_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.commands = OutputCommands::all_off();
    if ctx.activation_requested() {
        info!(
            "IDLE: gas {:.1}% / {:.1} C over ON threshold ({:.1}% / {:.1} C)",
            ctx.sensors.gas_percent,
            ctx.sensors.temperature_c,
            ctx.config.gas_on_percent,
            ctx.config.temp_on_c
        );
        return Some(StateId::Active);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ACTIVE state
// ═══════════════════════════════════════════════════════════════════════════

fn active_enter(ctx: &mut FsmContext) {
    ctx.commands = OutputCommands::all_on();
    info!("ACTIVE: fan on, alarm on");
}

fn active_exit(ctx: &mut FsmContext) {
    info!("ACTIVE: cleared after {} ticks", ctx.ticks_in_state);
}

fn active_update(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.commands = OutputCommands::all_on();
    if ctx.release_permitted() {
        return Some(StateId::Idle);
    }
    None
}
