//! Projection configuration.
//!
//! A projection names the transformation pipeline that produced a
//! particular view of the model. Its configuration is part of the build
//! configuration document, so it round-trips through serde with unknown
//! members rejected.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for one build projection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectionConfig {
    /// Abstract projections produce no artifacts and exist only to be
    /// extended by other projections.
    #[serde(rename = "abstract")]
    is_abstract: bool,

    /// Model files imported into the projection before transforms run.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    imports: Vec<PathBuf>,

    /// Names of the transform pipeline steps applied, in order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    transforms: Vec<String>,
}

impl ProjectionConfig {
    /// Creates a builder for assembling a projection configuration.
    #[must_use]
    pub fn builder() -> ProjectionConfigBuilder {
        ProjectionConfigBuilder::default()
    }

    /// Returns true when the projection is abstract.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Returns the imported model files.
    #[must_use]
    pub fn imports(&self) -> &[PathBuf] {
        &self.imports
    }

    /// Returns the transform step names, in application order.
    #[must_use]
    pub fn transforms(&self) -> &[String] {
        &self.transforms
    }
}

/// Builder for [`ProjectionConfig`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ProjectionConfigBuilder {
    is_abstract: bool,
    imports: Vec<PathBuf>,
    transforms: Vec<String>,
}

impl ProjectionConfigBuilder {
    /// Marks the projection abstract.
    pub const fn is_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    /// Replaces the full import list.
    pub fn imports(mut self, imports: impl IntoIterator<Item = PathBuf>) -> Self {
        self.imports = imports.into_iter().collect();
        self
    }

    /// Adds one imported model file.
    pub fn add_import(mut self, import: impl Into<PathBuf>) -> Self {
        self.imports.push(import.into());
        self
    }

    /// Replaces the full transform list.
    pub fn transforms(mut self, transforms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.transforms = transforms.into_iter().map(Into::into).collect();
        self
    }

    /// Adds one transform step name.
    pub fn add_transform(mut self, transform: impl Into<String>) -> Self {
        self.transforms.push(transform.into());
        self
    }

    /// Freezes the configuration.
    #[must_use]
    pub fn build(self) -> ProjectionConfig {
        ProjectionConfig {
            is_abstract: self.is_abstract,
            imports: self.imports,
            transforms: self.transforms,
        }
    }
}
