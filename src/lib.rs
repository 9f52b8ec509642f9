//! Ensemble: composite aggregation and finite state machine building blocks.
//!
//! Two independent components behind one small crate:
//!
//! - **Composite**: an ordered, name-addressable collection of members
//!   that broadcasts method calls to every member in insertion order,
//!   optionally folding the per-member results into one value.
//! - **FSM**: a declarative finite state machine whose states wrap user
//!   data and whose catalog of states, events and transition tables is
//!   validated once at build time and immutable afterwards.
//!
//! Both are built from a validated [`CapabilitySpec`]; configuration
//! mistakes fail loudly before any instance exists, while run-time name
//! lookups fail with a recoverable [`LookupError`].
//!
//! # Example
//!
//! ```rust
//! use ensemble::fsm::FsmBuilder;
//! use ensemble::spec::CapabilitySpec;
//!
//! struct Lamp {
//!     color: &'static str,
//! }
//!
//! impl Lamp {
//!     fn display(&self) -> String {
//!         format!("{} light on", self.color)
//!     }
//! }
//!
//! let semaphore = FsmBuilder::new()
//!     .capability(CapabilitySpec::new().method("display"))
//!     .state("green", Lamp { color: "green" })
//!     .state("yellow", Lamp { color: "yellow" })
//!     .state("red", Lamp { color: "red" })
//!     .initial("yellow")
//!     .event("slowdown", "green", "yellow")
//!     .event("stop", "yellow", "red")
//!     .event("prepare", "red", "yellow")
//!     .event("go", "yellow", "green")
//!     .build()
//!     .unwrap();
//!
//! let mut machine = semaphore.machine();
//! machine.handle("go").unwrap();
//!
//! // Calls the handle does not define delegate to the current state's data.
//! assert_eq!(machine.display(), "green light on");
//! ```

pub mod composite;
pub mod error;
pub mod expected;
pub mod fsm;
pub mod inspect;
pub mod spec;

// Re-export commonly used types
pub use composite::Composite;
pub use error::{ConfigError, LookupError};
pub use expected::{Expected, ExpectedError};
pub use fsm::{Event, EventId, Fsm, FsmBuilder, Machine, StateNode};
pub use spec::{Capability, CapabilitySpec, InterfaceSpec};
