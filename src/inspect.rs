//! Naming-convention classifier for method names.
//!
//! Capability resolution derives broadcast/delegation surfaces from
//! interface descriptors, and only "public" method names are eligible.
//! The convention here mirrors the common underscore notation: special
//! names are wrapped on both sides by double underscores, private names
//! start with a single underscore.

/// Returns true if the name is a special (operator-style) method name.
///
/// A name is special when it is delimited by double underscores on both
/// sides and the delimited interior is non-empty, does not begin or end
/// with an underscore, and contains no double underscore of its own.
///
/// # Example
///
/// ```rust
/// use ensemble::inspect::is_special;
///
/// assert!(is_special("__eq__"));
/// assert!(is_special("__deep_copy__"));
/// assert!(!is_special("___eq__"));
/// assert!(!is_special("_eq_"));
/// assert!(!is_special("eq"));
/// ```
pub fn is_special(name: &str) -> bool {
    if name.len() < 5 || !name.starts_with("__") || !name.ends_with("__") {
        return false;
    }
    let inner = &name[2..name.len() - 2];
    !inner.starts_with('_') && !inner.ends_with('_') && !inner.contains("__")
}

/// Returns true if the name follows the private naming convention.
///
/// Private names start with an underscore and are not special.
///
/// # Example
///
/// ```rust
/// use ensemble::inspect::is_private;
///
/// assert!(is_private("_hidden"));
/// assert!(is_private("__mangled"));
/// assert!(!is_private("__eq__"));
/// assert!(!is_private("visible"));
/// ```
pub fn is_private(name: &str) -> bool {
    name.starts_with('_') && !is_special(name)
}
