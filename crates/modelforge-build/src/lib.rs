//! # modelforge-build
//!
//! The build-side surface of modelforge: everything a code generation
//! plugin receives when a projection of a model is handed to it.
//!
//! - [`context::PluginContext`]: the immutable bundle of model, settings,
//!   sources, and output sink passed to plugins, with a lazily memoized
//!   non-trait view of its model.
//! - [`manifest::FileManifest`]: the opaque sink plugins write artifacts
//!   through, with in-memory and on-disk implementations.
//! - [`projection::ProjectionConfig`]: configuration of the projection
//!   that produced a context.
//! - [`event::ValidationEvent`]: diagnostics attached to a context.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use modelforge_build::{MockManifest, PluginContext};
//! use modelforge_model::Model;
//!
//! let context = PluginContext::builder()
//!     .model(Model::default())
//!     .file_manifest(Arc::new(MockManifest::new()))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(context.projection_name(), "source");
//! assert!(context.non_trait_shapes().is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod event;
pub mod manifest;
pub mod projection;

pub use context::{PluginContext, PluginContextBuilder, SOURCE_PROJECTION};
pub use event::{Severity, ValidationEvent};
pub use manifest::{DirectoryManifest, FileManifest, ManifestError, MockManifest};
pub use projection::{ProjectionConfig, ProjectionConfigBuilder};
