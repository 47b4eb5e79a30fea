//! Diagnostic events attached to an execution context.

use std::fmt;

use serde::{Deserialize, Serialize};

use modelforge_model::ShapeId;

/// Severity of a validation event, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Informational finding.
    Note,
    /// Suspicious but non-fatal finding.
    Warning,
    /// Serious finding that consumers may refuse to build on.
    Danger,
    /// Fatal finding.
    Error,
}

impl Severity {
    /// Returns the severity as its string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Note => "NOTE",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic produced while assembling or transforming a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationEvent {
    severity: Severity,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape_id: Option<ShapeId>,
}

impl ValidationEvent {
    /// Creates an event with the given severity and message.
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            shape_id: None,
        }
    }

    /// Attaches the shape the event is about.
    #[must_use]
    pub fn with_shape_id(mut self, shape_id: ShapeId) -> Self {
        self.shape_id = Some(shape_id);
        self
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the shape the event is about, if any.
    #[must_use]
    pub const fn shape_id(&self) -> Option<&ShapeId> {
        self.shape_id.as_ref()
    }
}

impl fmt::Display for ValidationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if let Some(shape_id) = &self.shape_id {
            write!(f, " ({shape_id})")?;
        }
        Ok(())
    }
}
