//! Capability specifications and their resolved catalogs.
//!
//! Both the composite aggregator and the finite state machine are built
//! from a [`CapabilitySpec`]: the declaration of which method names make
//! up the broadcast/delegation surface. Resolution validates the spec
//! once, at build time, and produces an immutable [`Capability`] catalog
//! used for the lifetime of the built object.

use crate::error::ConfigError;
use crate::inspect::{is_private, is_special};
use serde::{Deserialize, Serialize};

/// Descriptor of an interface: a named set of declared method names.
///
/// Rust offers no method reflection, so the interface participating in a
/// capability spec is described explicitly. Only names that are neither
/// special nor private (see [`crate::inspect`]) are eligible for
/// broadcast/delegation synthesis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSpec {
    name: String,
    methods: Vec<String>,
}

impl InterfaceSpec {
    /// Describe an interface by name with its declared method names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ensemble::spec::InterfaceSpec;
    ///
    /// let iface = InterfaceSpec::new("Counter", ["add", "_bump", "__eq__"]);
    /// assert_eq!(iface.eligible_methods().collect::<Vec<_>>(), vec!["add"]);
    /// ```
    pub fn new<N, I, S>(name: N, methods: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            methods: methods.into_iter().map(Into::into).collect(),
        }
    }

    /// The interface name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared method names, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(String::as_str)
    }

    /// Declared method names eligible for synthesis: neither special nor
    /// private under the naming convention.
    pub fn eligible_methods(&self) -> impl Iterator<Item = &str> {
        self.methods()
            .filter(|name| !is_special(name) && !is_private(name))
    }
}

/// Builder-style capability declaration.
///
/// At least one of an explicit method list or an interface descriptor
/// must be supplied before [`CapabilitySpec::resolve`] succeeds.
#[derive(Clone, Debug, Default)]
pub struct CapabilitySpec {
    methods: Option<Vec<String>>,
    interface: Option<InterfaceSpec>,
    reductions: Vec<String>,
}

impl CapabilitySpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a single method name explicitly.
    pub fn method(mut self, name: impl Into<String>) -> Self {
        self.methods.get_or_insert_with(Vec::new).push(name.into());
        self
    }

    /// Declare several method names explicitly.
    pub fn methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.methods.get_or_insert_with(Vec::new);
        list.extend(names.into_iter().map(Into::into));
        self
    }

    /// Derive method names from an interface descriptor.
    pub fn interface(mut self, interface: InterfaceSpec) -> Self {
        self.interface = Some(interface);
        self
    }

    /// Mark a declared method as reduced: during a broadcast its
    /// per-member return values are folded into one aggregate result.
    pub fn reduction(mut self, name: impl Into<String>) -> Self {
        self.reductions.push(name.into());
        self
    }

    /// Validate the spec and produce the immutable capability catalog.
    ///
    /// Explicit names come first, then the interface-derived eligible
    /// names; duplicates keep their first-seen position. Fails with
    /// [`ConfigError::NoCapability`] when neither methods nor an
    /// interface were supplied, and with [`ConfigError::UnknownReduction`]
    /// when a reduction names a method outside the resolved set.
    pub fn resolve(self) -> Result<Capability, ConfigError> {
        if self.methods.is_none() && self.interface.is_none() {
            return Err(ConfigError::NoCapability);
        }

        let mut names: Vec<String> = Vec::new();
        if let Some(explicit) = self.methods {
            names.extend(explicit);
        }
        if let Some(interface) = &self.interface {
            names.extend(interface.eligible_methods().map(str::to_string));
        }
        let mut seen: Vec<String> = Vec::new();
        for name in names {
            if !seen.contains(&name) {
                seen.push(name);
            }
        }

        for reduction in &self.reductions {
            if !seen.contains(reduction) {
                return Err(ConfigError::UnknownReduction {
                    method: reduction.clone(),
                });
            }
        }

        let methods = seen
            .into_iter()
            .map(|name| {
                let reduced = self.reductions.contains(&name);
                MethodSpec { name, reduced }
            })
            .collect();
        Ok(Capability { methods })
    }
}

/// One entry of a resolved capability catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSpec {
    name: String,
    reduced: bool,
}

impl MethodSpec {
    /// The method name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether per-member return values are folded during a broadcast.
    pub fn is_reduced(&self) -> bool {
        self.reduced
    }
}

/// Immutable, ordered catalog of methods resolved from a
/// [`CapabilitySpec`]. Built once at setup time; queried at run time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    methods: Vec<MethodSpec>,
}

impl Capability {
    /// Whether the catalog declares the given method name.
    pub fn supports(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name)
    }

    /// Whether the given method folds its per-member return values.
    pub fn is_reduced(&self, name: &str) -> bool {
        self.methods.iter().any(|m| m.name == name && m.reduced)
    }

    /// The declared methods, in resolution order.
    pub fn methods(&self) -> impl Iterator<Item = &MethodSpec> {
        self.methods.iter()
    }

    /// The declared method names, in resolution order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.iter().map(|m| m.name.as_str())
    }

    /// Number of declared methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
