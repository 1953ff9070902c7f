//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌─────────┬───────────┬──────────┬───────────────────┐  │
//! │  │ StateId │ on_enter  │ on_exit  │ on_update         │  │
//! │  ├─────────┼───────────┼──────────┼───────────────────┤  │
//! │  │ Idle    │ fn(ctx)   │ -        │ fn(ctx)->Option<> │  │
//! │  │ Active  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Option<> │  │
//! │  └─────────┴───────────┴──────────┴───────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The machine always starts in `Idle`.  Each tick the engine calls
//! `on_update` for the current state; `Some(next)` runs `on_exit` for the
//! current state, then `on_enter` for the next, and [`Fsm::tick`] reports
//! the [`Transition`] to the caller.  All handlers receive
//! `&mut FsmContext`: the latest reading, output commands, config and the
//! tick count in the current state.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Fan/alarm state.  The discriminant is the row index in the table built
/// by [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    /// Air clean: fan off, alarm silent.
    Idle = 0,
    /// Threshold exceeded: fan running, alarm sounding.
    Active = 1,
}

impl StateId {
    /// Rows in the state table.
    pub const COUNT: usize = 2;

    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Active => "Active",
        }
    }
}

/// A state change taken during one [`Fsm::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: StateId,
    pub to: StateId,
}

// ---------------------------------------------------------------------------
// Handler signatures and table rows
// ---------------------------------------------------------------------------

/// `on_enter` / `on_exit`: run once per transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Per-tick handler.  `Some(next)` requests a transition.
pub type StateUpdateFn = fn(&mut FsmContext) -> Option<StateId>;

/// One row of the state table.
pub struct StateDescriptor {
    pub id: StateId,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Table-driven engine for the fan/alarm machine.
pub struct Fsm {
    table: [StateDescriptor; StateId::COUNT],
    current: StateId,
}

impl Fsm {
    /// Engine over `table`, positioned in `Idle`.  Call
    /// [`start`](Self::start) before the first tick.
    pub fn new(table: [StateDescriptor; StateId::COUNT]) -> Self {
        Self {
            table,
            current: StateId::Idle,
        }
    }

    /// Run `on_enter` for the initial state.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.current.name());
        ctx.ticks_in_state = 0;
        if let Some(enter) = self.row().on_enter {
            enter(ctx);
        }
    }

    /// Advance by one tick.  Returns the transition taken, if any.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<Transition> {
        ctx.ticks_in_state += 1;

        let next = (self.row().on_update)(ctx)?;
        if next == self.current {
            return None;
        }

        let from = self.current;
        info!("FSM transition: {} -> {}", from.name(), next.name());
        if let Some(exit) = self.row().on_exit {
            exit(ctx);
        }
        self.current = next;
        ctx.ticks_in_state = 0;
        if let Some(enter) = self.row().on_enter {
            enter(ctx);
        }
        Some(Transition { from, to: next })
    }

    pub fn current_state(&self) -> StateId {
        self.current
    }

    fn row(&self) -> &StateDescriptor {
        &self.table[self.current as usize]
    }
}
