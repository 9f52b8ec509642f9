//! Ordered, name-addressable member container with broadcast dispatch.

use crate::error::LookupError;
use crate::spec::Capability;
use std::collections::HashMap;
use std::fmt;
use std::ops::{Index, IndexMut};

struct Entry<M: ?Sized> {
    token: u64,
    value: Box<M>,
}

/// Ordered collection of members driven through a single interface.
///
/// Members are held in insertion order, which is also broadcast order.
/// A member may additionally be bound to a string name; the name index
/// is a non-owning identity index: it tracks the exact member it was
/// bound to, so replacing or removing that member invalidates the name
/// while bindings to other members survive positional shifts.
///
/// A composite is only constructed from a resolved [`Capability`], so its
/// dispatch catalog is validated before any instance exists.
///
/// # Example
///
/// ```rust
/// use ensemble::composite::Composite;
/// use ensemble::spec::CapabilitySpec;
///
/// let capability = CapabilitySpec::new().method("speak").resolve().unwrap();
/// let mut group: Composite<String> = Composite::new(capability);
///
/// group.push(Box::new("alpha".to_string()));
/// group.push_named("lead", Box::new("beta".to_string()));
///
/// assert_eq!(group.len(), 2);
/// assert_eq!(group.by_name("lead").unwrap(), "beta");
///
/// group.remove(1).unwrap();
/// assert!(!group.contains_name("lead"));
/// ```
pub struct Composite<M: ?Sized> {
    members: Vec<Entry<M>>,
    names: HashMap<String, u64>,
    next_token: u64,
    capability: Capability,
}

impl<M: ?Sized> Composite<M> {
    /// Create an empty composite with the given dispatch catalog.
    pub fn new(capability: Capability) -> Self {
        Self {
            members: Vec::new(),
            names: HashMap::new(),
            next_token: 0,
            capability,
        }
    }

    /// The resolved capability catalog this composite was built from.
    pub fn capability(&self) -> &Capability {
        &self.capability
    }

    /// Whether the catalog declares the given broadcast method.
    pub fn supports(&self, method: &str) -> bool {
        self.capability.supports(method)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the composite holds no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append a member.
    pub fn push(&mut self, member: Box<M>) {
        let token = self.issue_token();
        self.members.push(Entry {
            token,
            value: member,
        });
    }

    /// Append a member and bind it to a name, overwriting any prior
    /// binding of that name.
    pub fn push_named(&mut self, name: impl Into<String>, member: Box<M>) {
        let token = self.issue_token();
        self.members.push(Entry {
            token,
            value: member,
        });
        self.names.insert(name.into(), token);
    }

    /// Insert a member at the given position, shifting later members.
    /// Existing name bindings are unaffected. An index past the end is
    /// a [`LookupError::IndexOutOfBounds`]; `index == len` appends.
    pub fn insert(&mut self, index: usize, member: Box<M>) -> Result<(), LookupError> {
        if index > self.members.len() {
            return Err(LookupError::IndexOutOfBounds {
                index,
                len: self.members.len(),
            });
        }
        let token = self.issue_token();
        self.members.insert(
            index,
            Entry {
                token,
                value: member,
            },
        );
        Ok(())
    }

    /// Member at a position, if any.
    pub fn get(&self, index: usize) -> Option<&M> {
        self.members.get(index).map(|e| &*e.value)
    }

    /// Mutable member at a position, if any.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut M> {
        self.members.get_mut(index).map(|e| &mut *e.value)
    }

    /// Member bound to a name.
    pub fn by_name(&self, name: &str) -> Result<&M, LookupError> {
        let token = self.name_token(name)?;
        self.members
            .iter()
            .find(|e| e.token == token)
            .map(|e| &*e.value)
            .ok_or_else(|| LookupError::UnboundName {
                name: name.to_string(),
            })
    }

    /// Mutable member bound to a name.
    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut M, LookupError> {
        let token = self.name_token(name)?;
        self.members
            .iter_mut()
            .find(|e| e.token == token)
            .map(|e| &mut *e.value)
            .ok_or_else(|| LookupError::UnboundName {
                name: name.to_string(),
            })
    }

    /// Replace the member at a position, returning the old member.
    /// Names bound to the replaced member are invalidated.
    pub fn set(&mut self, index: usize, member: Box<M>) -> Result<Box<M>, LookupError> {
        if index >= self.members.len() {
            return Err(LookupError::IndexOutOfBounds {
                index,
                len: self.members.len(),
            });
        }
        let token = self.issue_token();
        let old = std::mem::replace(
            &mut self.members[index],
            Entry {
                token,
                value: member,
            },
        );
        self.prune_names();
        Ok(old.value)
    }

    /// Remove the member at a position, returning it.
    /// Names bound to the removed member are invalidated.
    pub fn remove(&mut self, index: usize) -> Result<Box<M>, LookupError> {
        if index >= self.members.len() {
            return Err(LookupError::IndexOutOfBounds {
                index,
                len: self.members.len(),
            });
        }
        let entry = self.members.remove(index);
        self.prune_names();
        Ok(entry.value)
    }

    /// Remove and return the last member, invalidating names bound to it.
    pub fn pop(&mut self) -> Option<Box<M>> {
        let entry = self.members.pop()?;
        self.prune_names();
        Some(entry.value)
    }

    /// Whether a name is currently bound.
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    /// Currently bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &M> {
        self.members.iter().map(|e| &*e.value)
    }

    /// Mutable members in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut M> {
        self.members.iter_mut().map(|e| &mut *e.value)
    }

    /// Invoke `f` on every member, in insertion order.
    pub fn broadcast<F>(&self, mut f: F)
    where
        F: FnMut(&M),
    {
        for member in self.iter() {
            f(member);
        }
    }

    /// Invoke `f` on every member with mutable access, in insertion order.
    pub fn broadcast_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut M),
    {
        for member in self.iter_mut() {
            f(member);
        }
    }

    /// Call each member in order and fold the per-member return values.
    /// An empty composite yields `init`; otherwise the result is the last
    /// folded value.
    pub fn reduce<V, A, C, F>(&self, init: A, mut call: C, mut fold: F) -> A
    where
        C: FnMut(&M) -> V,
        F: FnMut(A, V) -> A,
    {
        let mut acc = init;
        for member in self.iter() {
            acc = fold(acc, call(member));
        }
        acc
    }

    /// [`reduce`](Composite::reduce) with mutable access to each member.
    pub fn reduce_mut<V, A, C, F>(&mut self, init: A, mut call: C, mut fold: F) -> A
    where
        C: FnMut(&mut M) -> V,
        F: FnMut(A, V) -> A,
    {
        let mut acc = init;
        for member in self.iter_mut() {
            acc = fold(acc, call(member));
        }
        acc
    }

    fn issue_token(&mut self) -> u64 {
        let token = self.next_token;
        self.next_token += 1;
        token
    }

    fn name_token(&self, name: &str) -> Result<u64, LookupError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| LookupError::UnboundName {
                name: name.to_string(),
            })
    }

    /// Drop name bindings whose member is no longer present.
    fn prune_names(&mut self) {
        let live: Vec<u64> = self.members.iter().map(|e| e.token).collect();
        self.names.retain(|_, token| live.contains(token));
    }
}

impl<M: ?Sized + PartialEq> Composite<M> {
    /// Whether a member equal to `candidate` is present.
    pub fn contains(&self, candidate: &M) -> bool {
        self.iter().any(|member| member == candidate)
    }
}

impl<M: ?Sized> Index<usize> for Composite<M> {
    type Output = M;

    fn index(&self, index: usize) -> &M {
        &*self.members[index].value
    }
}

impl<M: ?Sized> IndexMut<usize> for Composite<M> {
    fn index_mut(&mut self, index: usize) -> &mut M {
        &mut *self.members[index].value
    }
}

impl<'k, M: ?Sized> Index<&'k str> for Composite<M> {
    type Output = M;

    /// Panicking form of [`Composite::by_name`].
    fn index(&self, name: &'k str) -> &M {
        match self.by_name(name) {
            Ok(member) => member,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<M: ?Sized + fmt::Debug> fmt::Debug for Composite<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("members", &self.members.iter().map(|e| &e.value).collect::<Vec<_>>())
            .field("names", &self.names.keys().collect::<Vec<_>>())
            .finish()
    }
}
