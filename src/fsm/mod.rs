//! Finite state machine framework.
//!
//! A machine is declared through [`FsmBuilder`]: named states wrapping
//! user data, named events as (from, to) pairs, and one designated
//! initial state. The build step validates every declaration and
//! produces an immutable [`Fsm`] definition; instances spawned from it
//! share the catalog read-only and carry only their own current-state
//! slot and transition log.
//!
//! Handling an event with no edge from the current state is a defined
//! no-op, not an error: the transition function is a total function with
//! identity self-loops wherever no edge is declared.

mod builder;
mod error;
mod event;
mod history;
mod machine;
mod state;

pub use builder::FsmBuilder;
pub use error::BuildError;
pub use event::{Event, EventId};
pub use history::{TransitionLog, TransitionRecord};
pub use machine::{Fsm, Machine};
pub use state::{StateId, StateNode};
