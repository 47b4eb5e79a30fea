//! Structured identifiers for model elements.
//!
//! A shape identifier is the canonical textual reference
//! `namespace#name`. Identifiers are parsed with [`str::parse`], rendered
//! with [`std::fmt::Display`], and serialize through their string form, so
//! they can travel inside document nodes as plain string members.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a string is not a valid shape identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeIdError {
    /// The string is not of the form `namespace#name`.
    #[error("invalid shape ID `{value}`: expected `namespace#name`")]
    Malformed {
        /// The rejected input.
        value: String,
    },
}

impl ShapeIdError {
    fn malformed(value: impl Into<String>) -> Self {
        Self::Malformed {
            value: value.into(),
        }
    }
}

/// A canonical `namespace#name` reference to a model element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId {
    namespace: String,
    name: String,
}

impl ShapeId {
    /// Creates an identifier from its namespace and name parts.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeIdError::Malformed`] when either part is empty or
    /// contains the `#` separator.
    pub fn from_parts(
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ShapeIdError> {
        let namespace = namespace.into();
        let name = name.into();
        if namespace.is_empty()
            || name.is_empty()
            || namespace.contains('#')
            || name.contains('#')
        {
            return Err(ShapeIdError::malformed(format!("{namespace}#{name}")));
        }
        Ok(Self { namespace, name })
    }

    /// Returns the namespace part.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the name part.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ShapeId {
    type Err = ShapeIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some((namespace, name)) = value.split_once('#') else {
            return Err(ShapeIdError::malformed(value));
        };
        if namespace.is_empty() || name.is_empty() || name.contains('#') {
            return Err(ShapeIdError::malformed(value));
        }
        Ok(Self {
            namespace: namespace.to_owned(),
            name: name.to_owned(),
        })
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)
    }
}

impl From<&ShapeId> for ShapeId {
    fn from(id: &ShapeId) -> Self {
        id.clone()
    }
}

impl Serialize for ShapeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShapeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}
