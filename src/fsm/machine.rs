//! Shared machine definitions and per-instance handles.

use crate::error::LookupError;
use crate::fsm::event::{Event, EventId};
use crate::fsm::history::{TransitionLog, TransitionRecord};
use crate::fsm::state::{StateId, StateNode};
use crate::spec::Capability;
use chrono::Utc;
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issue a token unique to one built definition. Event ids carry it so
/// they can be told apart from ids issued by another definition.
pub(crate) fn next_definition_token() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// Immutable catalog shared by every machine spawned from one definition.
pub(crate) struct Catalog<T> {
    pub(crate) definition: u64,
    pub(crate) states: Vec<StateNode<T>>,
    pub(crate) state_index: HashMap<String, StateId>,
    pub(crate) events: Vec<Event>,
    pub(crate) event_index: HashMap<String, EventId>,
    pub(crate) initial: StateId,
    pub(crate) capability: Capability,
}

/// A built state machine definition.
///
/// Holds the declared states, events and per-state transition tables,
/// constructed and validated once by [`FsmBuilder`](crate::fsm::FsmBuilder).
/// The catalog is immutable after the build and shared, read-only, across
/// every [`Machine`] spawned from it. Cloning an `Fsm` is cheap.
pub struct Fsm<T> {
    catalog: Arc<Catalog<T>>,
}

impl<T> Fsm<T> {
    pub(crate) fn new(catalog: Catalog<T>) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Spawn a machine instance positioned at the initial state.
    pub fn machine(&self) -> Machine<T> {
        Machine {
            catalog: Arc::clone(&self.catalog),
            current: self.catalog.initial,
            log: TransitionLog::new(),
        }
    }

    /// Declared states, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &StateNode<T>> {
        self.catalog.states.iter()
    }

    /// Declared events, in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.catalog.events.iter()
    }

    /// A declared state by name.
    pub fn state(&self, name: &str) -> Result<&StateNode<T>, LookupError> {
        self.catalog
            .state_index
            .get(name)
            .map(|id| &self.catalog.states[id.0])
            .ok_or_else(|| LookupError::UnknownState {
                name: name.to_string(),
            })
    }

    /// Resolve an event name to its identifier.
    pub fn event(&self, name: &str) -> Result<EventId, LookupError> {
        self.catalog
            .event_index
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::UnknownEvent {
                name: name.to_string(),
            })
    }

    /// The designated initial state.
    pub fn initial(&self) -> &StateNode<T> {
        &self.catalog.states[self.catalog.initial.0]
    }

    /// The delegated capability surface this definition was built with.
    pub fn capability(&self) -> &Capability {
        &self.catalog.capability
    }
}

impl<T> Clone for Fsm<T> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Fsm<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("states", &self.catalog.states)
            .field("events", &self.catalog.events)
            .finish()
    }
}

/// Per-instance machine handle.
///
/// Each instance holds its own current-state slot and transition log;
/// the states/events catalog stays shared with the definition. The
/// handle dereferences to the current state's wrapped data, so calls it
/// does not define itself are resolved against the current state's data.
///
/// Transitions are plain read-modify-write updates behind `&mut self`;
/// embedders that share an instance across threads add their own
/// synchronization.
pub struct Machine<T> {
    catalog: Arc<Catalog<T>>,
    current: StateId,
    log: TransitionLog,
}

impl<T> Machine<T> {
    /// The live current state (read-only view).
    pub fn state(&self) -> &StateNode<T> {
        &self.catalog.states[self.current.0]
    }

    /// The current state's wrapped data.
    pub fn data(&self) -> &T {
        self.state().data()
    }

    /// Handle an event by name.
    ///
    /// An unknown event name is a [`LookupError`]. A known event with no
    /// edge registered from the current state is a defined no-op: the
    /// machine stays where it is and `Ok(false)` is returned. `Ok(true)`
    /// means the transition was taken.
    pub fn handle(&mut self, event: &str) -> Result<bool, LookupError> {
        let id = self
            .catalog
            .event_index
            .get(event)
            .copied()
            .ok_or_else(|| LookupError::UnknownEvent {
                name: event.to_string(),
            })?;
        Ok(self.handle_event(id))
    }

    /// Handle an already-resolved event.
    ///
    /// Identifiers carry their issuing definition's token, so an id
    /// resolved against a different definition never matches an edge
    /// here and is treated as a no-op.
    pub fn handle_event(&mut self, event: EventId) -> bool {
        if event.definition != self.catalog.definition {
            return false;
        }
        let Some(target) = self.state().next(event) else {
            return false;
        };

        let record = TransitionRecord {
            event: self.catalog.events[event.index].name().to_string(),
            from: self.state().name().to_string(),
            to: self.catalog.states[target.0].name().to_string(),
            timestamp: Utc::now(),
        };
        self.log = self.log.record(record);
        self.current = target;
        true
    }

    /// Move the instance back to the initial state without touching the
    /// transition log.
    pub fn reset(&mut self) {
        self.current = self.catalog.initial;
    }

    /// Transitions taken by this instance, oldest first.
    pub fn history(&self) -> &TransitionLog {
        &self.log
    }
}

impl<T> Deref for Machine<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.data()
    }
}

impl<T: fmt::Debug> fmt::Debug for Machine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("state", &self.state().name())
            .field("transitions_taken", &self.log.len())
            .finish()
    }
}
