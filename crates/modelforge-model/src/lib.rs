//! # modelforge-model
//!
//! The document and model layer shared by every modelforge crate:
//!
//! - [`node`]: a JSON-like tagged tree value ([`node::Node`]) used as the
//!   universal interchange format, with error-returning member accessors
//!   and ordered object emission for hand-written codecs.
//! - [`shape_id`]: canonical `namespace#name` references to model elements.
//! - [`model`]: the immutable shape graph handed to build plugins, plus the
//!   read-only [`model::ShapeIndex`] derived from it.
//! - [`transform`]: the one model transformation the build core consumes,
//!   deriving the non-trait shape view of a model.
//! - [`builder`]: the required-field validation helper every validating
//!   builder in the workspace funnels through.
//!
//! ## Example
//!
//! ```rust
//! use modelforge_model::{Model, Shape, ShapeId, ShapeKind, transform};
//!
//! let weather: ShapeId = "example.weather#GetForecast".parse().unwrap();
//! let model = Model::builder()
//!     .add_shape(Shape::new(weather.clone(), ShapeKind::Operation))
//!     .build();
//!
//! let index = transform::non_trait_shapes(&model);
//! assert!(index.get(&weather).is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod model;
pub mod node;
pub mod shape_id;
pub mod transform;

#[cfg(test)]
mod proptest_shape_id;

pub use builder::{require, BuildError};
pub use model::{Model, ModelBuilder, Shape, ShapeIndex, ShapeKind};
pub use node::{Node, NodeError, ObjectNode, ObjectNodeBuilder};
pub use shape_id::{ShapeId, ShapeIdError};
