//! The execution context handed to build plugins.
//!
//! A [`PluginContext`] is built once, stays immutable for its whole
//! lifetime, and is shared with every plugin that runs against one
//! projection of a model. The only mutable thing about it is invisible to
//! callers: the non-trait view of the model is derived lazily, at most
//! once, on first request.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use modelforge_model::builder::{require, BuildError};
use modelforge_model::model::{Model, ShapeIndex};
use modelforge_model::node::{Node, ObjectMap};
use modelforge_model::transform;

use crate::event::ValidationEvent;
use crate::manifest::FileManifest;
use crate::projection::ProjectionConfig;

/// Name of the implicit projection every build starts from.
pub const SOURCE_PROJECTION: &str = "source";

/// Immutable bundle of model, settings, sources, and output sink passed to
/// build plugins.
///
/// Contexts are created through [`PluginContext::builder`] and copied with
/// modification through [`PluginContext::to_builder`]. Equality compares
/// every field by value except the file manifest, which is compared by
/// identity, and the derived-view cache, which is ignored.
#[derive(Debug)]
pub struct PluginContext {
    model: Model,
    original_model: Option<Model>,
    projection_name: String,
    projection_config: Option<ProjectionConfig>,
    settings: Node,
    sources: Vec<PathBuf>,
    file_manifest: Arc<dyn FileManifest>,
    events: Vec<ValidationEvent>,
    non_trait_shapes: OnceLock<ShapeIndex>,
}

impl PluginContext {
    /// Creates a builder for assembling a context.
    #[must_use]
    pub fn builder() -> PluginContextBuilder {
        PluginContextBuilder::default()
    }

    /// Returns the model the plugin runs against.
    #[must_use]
    pub const fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the model as it was before transforms ran, if a snapshot
    /// was taken.
    #[must_use]
    pub const fn original_model(&self) -> Option<&Model> {
        self.original_model.as_ref()
    }

    /// Returns the name of the projection that produced this context.
    #[must_use]
    pub fn projection_name(&self) -> &str {
        &self.projection_name
    }

    /// Returns the projection's configuration, if one was supplied.
    #[must_use]
    pub const fn projection_config(&self) -> Option<&ProjectionConfig> {
        self.projection_config.as_ref()
    }

    /// Returns the free-form plugin settings node.
    #[must_use]
    pub const fn settings(&self) -> &Node {
        &self.settings
    }

    /// Returns the source model paths, in the order they were given.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Returns the output sink handle.
    #[must_use]
    pub fn file_manifest(&self) -> &Arc<dyn FileManifest> {
        &self.file_manifest
    }

    /// Returns the diagnostic events attached to this context.
    #[must_use]
    pub fn events(&self) -> &[ValidationEvent] {
        &self.events
    }

    /// Returns the non-trait shape view of the model.
    ///
    /// The view is derived on first call and stored; every later call on
    /// the same context returns the stored index without recomputation.
    /// Derivation is pure, so the cache is purely a performance
    /// optimization; concurrent first calls still derive the view at most
    /// once and observe the same result.
    pub fn non_trait_shapes(&self) -> &ShapeIndex {
        self.non_trait_shapes.get_or_init(|| {
            debug!(projection = %self.projection_name, "deriving non-trait shape view");
            transform::non_trait_shapes(&self.model)
        })
    }

    /// Returns a builder pre-populated with every field of this context.
    ///
    /// The derived-view cache is not carried over: a context rebuilt from
    /// the returned builder starts uncomputed even when this context has
    /// already derived its view.
    #[must_use]
    pub fn to_builder(&self) -> PluginContextBuilder {
        PluginContextBuilder {
            model: Some(self.model.clone()),
            original_model: self.original_model.clone(),
            projection_name: Some(self.projection_name.clone()),
            projection_config: self.projection_config.clone(),
            settings: Some(self.settings.clone()),
            sources: self.sources.clone(),
            file_manifest: Some(Arc::clone(&self.file_manifest)),
            events: self.events.clone(),
        }
    }
}

impl Clone for PluginContext {
    /// The clone shares the manifest handle and starts with an uncomputed
    /// derived-view cache.
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            original_model: self.original_model.clone(),
            projection_name: self.projection_name.clone(),
            projection_config: self.projection_config.clone(),
            settings: self.settings.clone(),
            sources: self.sources.clone(),
            file_manifest: Arc::clone(&self.file_manifest),
            events: self.events.clone(),
            non_trait_shapes: OnceLock::new(),
        }
    }
}

impl PartialEq for PluginContext {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model
            && self.original_model == other.original_model
            && self.projection_name == other.projection_name
            && self.projection_config == other.projection_config
            && self.settings == other.settings
            && self.sources == other.sources
            && Arc::ptr_eq(&self.file_manifest, &other.file_manifest)
            && self.events == other.events
    }
}

/// Builder for [`PluginContext`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct PluginContextBuilder {
    model: Option<Model>,
    original_model: Option<Model>,
    projection_name: Option<String>,
    projection_config: Option<ProjectionConfig>,
    settings: Option<Node>,
    sources: Vec<PathBuf>,
    file_manifest: Option<Arc<dyn FileManifest>>,
    events: Vec<ValidationEvent>,
}

impl PluginContextBuilder {
    /// Sets the model the plugin runs against.
    pub fn model(mut self, model: Model) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the pre-transform snapshot of the model.
    pub fn original_model(mut self, model: Model) -> Self {
        self.original_model = Some(model);
        self
    }

    /// Sets the projection that produced this context, together with its
    /// configuration. When never called, the projection name defaults to
    /// [`SOURCE_PROJECTION`] and no configuration is present.
    pub fn projection(mut self, name: impl Into<String>, config: ProjectionConfig) -> Self {
        self.projection_name = Some(name.into());
        self.projection_config = Some(config);
        self
    }

    /// Sets the free-form plugin settings node.
    pub fn settings(mut self, settings: Node) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Replaces the full source path list.
    pub fn sources(mut self, sources: impl IntoIterator<Item = PathBuf>) -> Self {
        self.sources = sources.into_iter().collect();
        self
    }

    /// Sets the output sink handle.
    pub fn file_manifest(mut self, manifest: Arc<dyn FileManifest>) -> Self {
        self.file_manifest = Some(manifest);
        self
    }

    /// Replaces the full event list.
    pub fn events(mut self, events: impl IntoIterator<Item = ValidationEvent>) -> Self {
        self.events = events.into_iter().collect();
        self
    }

    /// Adds one diagnostic event.
    pub fn add_event(mut self, event: ValidationEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Validates the two required fields and freezes the context.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingField`] naming `model` or
    /// `file_manifest` when that field was never set.
    pub fn build(self) -> Result<PluginContext, BuildError> {
        Ok(PluginContext {
            model: require("model", self.model)?,
            file_manifest: require("file_manifest", self.file_manifest)?,
            original_model: self.original_model,
            projection_name: self
                .projection_name
                .unwrap_or_else(|| SOURCE_PROJECTION.to_owned()),
            projection_config: self.projection_config,
            settings: self.settings.unwrap_or_else(|| Node::Object(ObjectMap::new())),
            sources: self.sources,
            events: self.events,
            non_trait_shapes: OnceLock::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use modelforge_model::{Shape, ShapeKind};

    use super::*;
    use crate::manifest::MockManifest;

    fn sample_model() -> Model {
        Model::builder()
            .add_shape(Shape::new("example#City".parse().unwrap(), ShapeKind::Structure))
            .add_shape(Shape::new("example#sensitive".parse().unwrap(), ShapeKind::Trait))
            .build()
    }

    fn sample_context(manifest: Arc<dyn FileManifest>) -> PluginContext {
        PluginContext::builder()
            .model(sample_model())
            .file_manifest(manifest)
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_model_and_manifest() {
        let err = PluginContext::builder()
            .file_manifest(Arc::new(MockManifest::new()))
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::missing_field("model"));

        let err = PluginContext::builder()
            .model(Model::default())
            .build()
            .unwrap_err();
        assert_eq!(err, BuildError::missing_field("file_manifest"));
    }

    #[test]
    fn settings_default_to_an_empty_object_node() {
        let context = sample_context(Arc::new(MockManifest::new()));
        assert_eq!(context.settings(), &json!({}));
    }

    #[test]
    fn derived_view_is_computed_at_most_once() {
        let context = sample_context(Arc::new(MockManifest::new()));

        let first = context.non_trait_shapes();
        let second = context.non_trait_shapes();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, &transform::non_trait_shapes(context.model()));
    }

    #[test]
    fn clone_is_equal_but_starts_uncomputed() {
        let context = sample_context(Arc::new(MockManifest::new()));
        let original_view = context.non_trait_shapes();

        let copy = context.clone();
        assert_eq!(copy, context);

        let copied_view = copy.non_trait_shapes();
        assert_eq!(copied_view, original_view);
        assert!(!std::ptr::eq(copied_view, original_view));
    }

    #[test]
    fn equality_compares_manifests_by_identity() {
        let shared: Arc<dyn FileManifest> = Arc::new(MockManifest::new());
        let a = sample_context(Arc::clone(&shared));
        let b = sample_context(Arc::clone(&shared));
        let c = sample_context(Arc::new(MockManifest::new()));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn equality_ignores_the_derived_view_cache() {
        let shared: Arc<dyn FileManifest> = Arc::new(MockManifest::new());
        let a = sample_context(Arc::clone(&shared));
        let b = sample_context(Arc::clone(&shared));

        a.non_trait_shapes();
        assert_eq!(a, b);
    }
}
