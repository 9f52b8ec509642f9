//! Guarded value slot validated against a predicate.

use std::fmt;
use thiserror::Error;

/// Errors raised by an [`Expected`] slot.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExpectedError {
    #[error("{0}")]
    Invalid(String),

    #[error("No value has been set")]
    Unset,
}

/// A settable/gettable slot that validates its held value.
///
/// The predicate is always checked on read. With
/// [`check_on_set`](Expected::check_on_set) enabled it is also checked on
/// write, and a failing write rolls the slot back to its previous value,
/// so a caught error leaves the slot in its last valid state.
///
/// # Example
///
/// ```rust
/// use ensemble::expected::Expected;
///
/// let mut slot = Expected::new(|v: &i64| *v >= 0)
///     .message("'{value}' is negative")
///     .check_on_set(true);
///
/// slot.set(3).unwrap();
/// assert_eq!(slot.get(), Ok(&3));
///
/// let err = slot.set(-1).unwrap_err();
/// assert_eq!(err.to_string(), "'-1' is negative");
/// assert_eq!(slot.get(), Ok(&3)); // rolled back
/// ```
pub struct Expected<T> {
    value: Option<T>,
    predicate: Box<dyn Fn(&T) -> bool + Send + Sync>,
    message: String,
    check_on_set: bool,
}

impl<T: fmt::Debug> Expected<T> {
    /// Create a slot guarded by the given predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            value: None,
            predicate: Box::new(predicate),
            message: "Invalid value set".to_string(),
            check_on_set: false,
        }
    }

    /// Set the violation message template. The `{value}` placeholder is
    /// replaced with the offending value's `Debug` rendering.
    pub fn message(mut self, template: impl Into<String>) -> Self {
        self.message = template.into();
        self
    }

    /// Whether the predicate is also checked on write (default: false).
    pub fn check_on_set(mut self, check: bool) -> Self {
        self.check_on_set = check;
        self
    }

    /// Store a value.
    ///
    /// When checking on write, a failing predicate restores the previous
    /// value and returns the violation.
    pub fn set(&mut self, value: T) -> Result<(), ExpectedError> {
        let previous = self.value.replace(value);
        if self.check_on_set {
            if let Err(err) = self.check() {
                self.value = previous;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Read the held value, validating it against the predicate.
    pub fn get(&self) -> Result<&T, ExpectedError> {
        self.check()?;
        match &self.value {
            Some(value) => Ok(value),
            None => Err(ExpectedError::Unset),
        }
    }

    fn check(&self) -> Result<(), ExpectedError> {
        match &self.value {
            None => Err(ExpectedError::Unset),
            Some(value) if !(self.predicate)(value) => {
                let rendered = self.message.replace("{value}", &format!("{value:?}"));
                Err(ExpectedError::Invalid(rendered))
            }
            Some(_) => Ok(()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Expected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expected")
            .field("value", &self.value)
            .field("check_on_set", &self.check_on_set)
            .finish()
    }
}
