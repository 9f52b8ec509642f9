//! Declared transition triggers.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a declared event within one machine definition.
///
/// Obtained from [`Fsm::event`](crate::fsm::Fsm::event). Ids carry the
/// issuing definition's token, so an id resolved against one definition
/// never matches an edge in another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId {
    pub(crate) definition: u64,
    pub(crate) index: usize,
}

/// A declared event: a named, immutable (from-state, to-state) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    from: String,
    to: String,
}

impl Event {
    pub(crate) fn new(name: String, from: String, to: String) -> Self {
        Self { name, from, to }
    }

    /// The event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the state this event transitions from.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Name of the state this event transitions to.
    pub fn to(&self) -> &str {
        &self.to
    }
}
