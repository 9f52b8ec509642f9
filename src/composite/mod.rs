//! Composite pattern: an ordered collection of members driven through a
//! single shared interface.
//!
//! The container, [`Composite`], keeps members in insertion order and
//! optionally addressable by name, and exposes the broadcast primitives
//! (`broadcast`, `reduce`) that invoke the same method on every member.
//! The [`composite!`](crate::composite!) macro synthesizes the per-method
//! broadcast surface for a trait, so an aggregate can stand in wherever
//! one of its members would.

mod aggregate;
mod macros;

pub use aggregate::Composite;
