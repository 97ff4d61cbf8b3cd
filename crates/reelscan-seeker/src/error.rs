//! Error types for the seeker crate.

use thiserror::Error;

/// Errors that can occur when sorting a collection.
///
/// Searching never fails: an empty result is a valid outcome, not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeekerError {
    /// The sort key is absent from one of the items.
    #[error("field '{field}' is missing from item {index}")]
    MissingField { field: String, index: usize },

    /// Values under the sort key are of different kinds.
    #[error("field '{field}' mixes {expected} and {found} values (first {found} at item {index})")]
    MixedTypes {
        field: String,
        expected: &'static str,
        found: &'static str,
        index: usize,
    },

    /// Two values of the same kind have no defined order (NaN).
    #[error("field '{field}' holds values that cannot be ordered")]
    Incomparable { field: String },
}

impl SeekerError {
    /// Returns the field the failing operation was keyed on.
    pub fn field(&self) -> &str {
        match self {
            SeekerError::MissingField { field, .. }
            | SeekerError::MixedTypes { field, .. }
            | SeekerError::Incomparable { field } => field,
        }
    }
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
