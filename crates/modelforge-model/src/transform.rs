//! Model transformations consumed by the build core.

use tracing::trace;

use crate::model::{Model, ShapeIndex};

/// Derives the read-only index of every shape in `model` that is not a
/// trait definition.
///
/// The result depends only on the model value: equal models yield equal
/// indexes, so callers are free to memoize the index and reuse it for the
/// lifetime of the model.
#[must_use]
pub fn non_trait_shapes(model: &Model) -> ShapeIndex {
    let index = ShapeIndex::from_shapes(
        model
            .shapes()
            .filter(|shape| !shape.is_trait_definition())
            .cloned(),
    );
    trace!(
        total = model.shape_count(),
        kept = index.len(),
        "derived non-trait shape index"
    );
    index
}
