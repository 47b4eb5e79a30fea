//! Required-field validation shared by every builder in the workspace.
//!
//! Validating builders report exactly which required field was never set,
//! so a caller can fix the construction site without reading the builder
//! source. All of them funnel that check through [`require`].

use thiserror::Error;

/// Error returned by a validating `build()` call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A required field was never set on the builder.
    #[error("missing required field: {field}")]
    MissingField {
        /// Key of the missing field.
        field: &'static str,
    },
}

impl BuildError {
    /// Creates a missing field error.
    #[must_use]
    pub const fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}

/// Unwraps a required builder field, naming the field on failure.
///
/// # Errors
///
/// Returns [`BuildError::MissingField`] carrying `field` when `value` is
/// `None`.
pub fn require<T>(field: &'static str, value: Option<T>) -> Result<T, BuildError> {
    value.ok_or(BuildError::MissingField { field })
}
