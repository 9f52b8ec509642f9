//! Builder for state machine definitions.

use crate::fsm::error::BuildError;
use crate::fsm::event::{Event, EventId};
use crate::fsm::machine::{Catalog, Fsm};
use crate::fsm::state::{StateId, StateNode};
use crate::spec::CapabilitySpec;
use std::collections::HashMap;

/// Builder that declares states and events, then validates the whole
/// catalog in one [`build`](FsmBuilder::build) step.
///
/// Every event's from/to names must resolve to declared states, and
/// exactly one state must be designated as initial. The built definition
/// is immutable: there is no post-build mutation of states, events or
/// transition tables.
///
/// # Example
///
/// ```rust
/// use ensemble::fsm::FsmBuilder;
/// use ensemble::spec::CapabilitySpec;
///
/// let fsm = FsmBuilder::new()
///     .capability(CapabilitySpec::new().method("display"))
///     .state("open", "door is open")
///     .state("closed", "door is closed")
///     .initial("closed")
///     .event("open_up", "closed", "open")
///     .event("shut", "open", "closed")
///     .build()
///     .unwrap();
///
/// let mut door = fsm.machine();
/// assert_eq!(door.state().name(), "closed");
/// door.handle("open_up").unwrap();
/// assert_eq!(*door.data(), "door is open");
/// ```
pub struct FsmBuilder<T> {
    capability: CapabilitySpec,
    states: Vec<(String, T)>,
    initials: Vec<String>,
    events: Vec<Event>,
}

impl<T> FsmBuilder<T> {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            capability: CapabilitySpec::new(),
            states: Vec::new(),
            initials: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Declare the capability surface delegated to state data (required).
    pub fn capability(mut self, spec: CapabilitySpec) -> Self {
        self.capability = spec;
        self
    }

    /// Declare a named state wrapping one instance of the data type.
    pub fn state(mut self, name: impl Into<String>, data: T) -> Self {
        self.states.push((name.into(), data));
        self
    }

    /// Designate the initial state. Must be called exactly once.
    pub fn initial(mut self, name: impl Into<String>) -> Self {
        self.initials.push(name.into());
        self
    }

    /// Declare a named event transitioning between two declared states.
    pub fn event(
        mut self,
        name: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        self.events
            .push(Event::new(name.into(), from.into(), to.into()));
        self
    }

    /// Validate the declarations and build the definition.
    pub fn build(self) -> Result<Fsm<T>, BuildError> {
        let capability = self.capability.resolve()?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut nodes: Vec<StateNode<T>> = Vec::with_capacity(self.states.len());
        let mut state_index: HashMap<String, StateId> = HashMap::new();
        for (name, data) in self.states {
            if state_index.contains_key(&name) {
                return Err(BuildError::DuplicateState { name });
            }
            state_index.insert(name.clone(), StateId(nodes.len()));
            nodes.push(StateNode::new(name, data));
        }

        let initial = match self.initials.as_slice() {
            [] => return Err(BuildError::MissingInitialState),
            [name] => *state_index.get(name).ok_or_else(|| {
                BuildError::UnknownInitialState { name: name.clone() }
            })?,
            _ => return Err(BuildError::MultipleInitialStates),
        };

        let definition = crate::fsm::machine::next_definition_token();
        let mut event_index: HashMap<String, EventId> = HashMap::new();
        for (position, event) in self.events.iter().enumerate() {
            if event_index.contains_key(event.name()) {
                return Err(BuildError::DuplicateEvent {
                    name: event.name().to_string(),
                });
            }
            let id = EventId {
                definition,
                index: position,
            };
            event_index.insert(event.name().to_string(), id);

            let from = *state_index.get(event.from()).ok_or_else(|| {
                BuildError::UnknownState {
                    event: event.name().to_string(),
                    state: event.from().to_string(),
                }
            })?;
            let to = *state_index.get(event.to()).ok_or_else(|| {
                BuildError::UnknownState {
                    event: event.name().to_string(),
                    state: event.to().to_string(),
                }
            })?;
            nodes[from.0].add_transition(id, to);
        }

        Ok(Fsm::new(Catalog {
            definition,
            states: nodes,
            state_index,
            events: self.events,
            event_index,
            initial,
            capability,
        }))
    }
}

impl<T> Default for FsmBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::spec::InterfaceSpec;

    fn spec() -> CapabilitySpec {
        CapabilitySpec::new().method("display")
    }

    #[test]
    fn build_requires_a_capability_spec() {
        let result = FsmBuilder::new().state("only", ()).initial("only").build();
        assert_eq!(result.err(), Some(ConfigError::NoCapability.into()));
    }

    #[test]
    fn capability_can_come_from_an_interface() {
        let iface = InterfaceSpec::new("Lamp", ["display", "_wire"]);
        let fsm = FsmBuilder::new()
            .capability(CapabilitySpec::new().interface(iface))
            .state("only", ())
            .initial("only")
            .build()
            .unwrap();

        assert!(fsm.capability().supports("display"));
        assert!(!fsm.capability().supports("_wire"));
    }

    #[test]
    fn build_requires_at_least_one_state() {
        let result = FsmBuilder::<()>::new().capability(spec()).build();
        assert_eq!(result.err(), Some(BuildError::NoStates));
    }

    #[test]
    fn build_requires_exactly_one_initial_state() {
        let missing = FsmBuilder::new()
            .capability(spec())
            .state("a", ())
            .build();
        assert_eq!(missing.err(), Some(BuildError::MissingInitialState));

        let several = FsmBuilder::new()
            .capability(spec())
            .state("a", ())
            .state("b", ())
            .initial("a")
            .initial("b")
            .build();
        assert_eq!(several.err(), Some(BuildError::MultipleInitialStates));

        let unknown = FsmBuilder::new()
            .capability(spec())
            .state("a", ())
            .initial("ghost")
            .build();
        assert_eq!(
            unknown.err(),
            Some(BuildError::UnknownInitialState {
                name: "ghost".to_string()
            })
        );
    }

    #[test]
    fn duplicate_declarations_fail_the_build() {
        let state = FsmBuilder::new()
            .capability(spec())
            .state("a", ())
            .state("a", ())
            .initial("a")
            .build();
        assert_eq!(
            state.err(),
            Some(BuildError::DuplicateState {
                name: "a".to_string()
            })
        );

        let event = FsmBuilder::new()
            .capability(spec())
            .state("a", ())
            .state("b", ())
            .initial("a")
            .event("hop", "a", "b")
            .event("hop", "b", "a")
            .build();
        assert_eq!(
            event.err(),
            Some(BuildError::DuplicateEvent {
                name: "hop".to_string()
            })
        );
    }

    #[test]
    fn events_must_reference_declared_states() {
        let from = FsmBuilder::new()
            .capability(spec())
            .state("a", ())
            .initial("a")
            .event("hop", "ghost", "a")
            .build();
        assert_eq!(
            from.err(),
            Some(BuildError::UnknownState {
                event: "hop".to_string(),
                state: "ghost".to_string()
            })
        );

        let to = FsmBuilder::new()
            .capability(spec())
            .state("a", ())
            .initial("a")
            .event("hop", "a", "ghost")
            .build();
        assert_eq!(
            to.err(),
            Some(BuildError::UnknownState {
                event: "hop".to_string(),
                state: "ghost".to_string()
            })
        );
    }

    #[test]
    fn a_machine_with_no_events_builds_and_stays_put() {
        let fsm = FsmBuilder::new()
            .capability(spec())
            .state("only", ())
            .initial("only")
            .build()
            .unwrap();

        let machine = fsm.machine();
        assert_eq!(machine.state().name(), "only");
        assert_eq!(fsm.events().count(), 0);
    }
}
