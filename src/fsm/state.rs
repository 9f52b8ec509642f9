//! Named states wrapping user data and their outgoing transition tables.

use crate::fsm::event::EventId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

/// Opaque identifier of a declared state within one machine definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(pub(crate) usize);

/// A state node: a declared name, one instance of wrapped user data, and
/// the outgoing transition table built once at definition time.
///
/// The node dereferences to its wrapped data, so state-specific behavior
/// is reachable without branching on which state is active.
pub struct StateNode<T> {
    name: String,
    data: T,
    transitions: HashMap<EventId, StateId>,
}

impl<T> StateNode<T> {
    pub(crate) fn new(name: String, data: T) -> Self {
        Self {
            name,
            data,
            transitions: HashMap::new(),
        }
    }

    pub(crate) fn add_transition(&mut self, event: EventId, target: StateId) {
        self.transitions.insert(event, target);
    }

    /// The declared state name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Target state for an event, if an outgoing edge is registered.
    pub fn next(&self, event: EventId) -> Option<StateId> {
        self.transitions.get(&event).copied()
    }

    /// Whether an outgoing edge is registered for the event.
    pub fn handles(&self, event: EventId) -> bool {
        self.transitions.contains_key(&event)
    }
}

impl<T> Deref for StateNode<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

impl<T: fmt::Debug> fmt::Debug for StateNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateNode")
            .field("name", &self.name)
            .field("data", &self.data)
            .field("transitions", &self.transitions.len())
            .finish()
    }
}
