//! The malformed request a protocol test sends.

use std::collections::BTreeMap;

use modelforge_model::builder::{require, BuildError};
use modelforge_model::node::{
    expect_object, string_map, Node, NodeError, ObjectMap, ObjectNode, ObjectNodeBuilder,
};

const BODY: &str = "body";
const BODY_MEDIA_TYPE: &str = "bodyMediaType";
const HEADERS: &str = "headers";
const HOST: &str = "host";
const METHOD: &str = "method";
const QUERY_PARAMS: &str = "queryParams";
const URI: &str = "uri";

/// Describes the raw request a protocol test sends at a service.
///
/// `method` and `uri` are required; everything else is optional. The
/// request is deliberately described below the protocol layer (raw query
/// strings, raw header values, an optional opaque body) because it is
/// usually malformed on purpose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRequestDefinition {
    method: String,
    uri: String,
    host: Option<String>,
    query_params: Vec<String>,
    headers: BTreeMap<String, String>,
    body: Option<String>,
    body_media_type: Option<String>,
}

impl MalformedRequestDefinition {
    /// Creates a builder for assembling a request definition.
    #[must_use]
    pub fn builder() -> MalformedRequestDefinitionBuilder {
        MalformedRequestDefinitionBuilder::default()
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the host header override, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the raw `key=value` query parameters, in order.
    #[must_use]
    pub fn query_params(&self) -> &[String] {
        &self.query_params
    }

    /// Returns the request headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the media type of the body, if any.
    #[must_use]
    pub fn body_media_type(&self) -> Option<&str> {
        self.body_media_type.as_deref()
    }

    /// Parses a request definition from its object node form.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::SchemaMismatch`] naming the offending member
    /// when `node` is not an object, a required member is absent, or a
    /// member has the wrong kind.
    pub fn from_node(node: &Node) -> Result<Self, NodeError> {
        Self::from_object(expect_object(node, "request")?)
    }

    pub(crate) fn from_object(object: &ObjectMap) -> Result<Self, NodeError> {
        Ok(Self {
            method: object.expect_string_member(METHOD)?.to_owned(),
            uri: object.expect_string_member(URI)?.to_owned(),
            host: object.get_string_member(HOST)?.map(str::to_owned),
            query_params: object
                .get_string_array_member(QUERY_PARAMS)?
                .unwrap_or_default(),
            headers: object.get_string_map_member(HEADERS)?.unwrap_or_default(),
            body: object.get_string_member(BODY)?.map(str::to_owned),
            body_media_type: object.get_string_member(BODY_MEDIA_TYPE)?.map(str::to_owned),
        })
    }

    /// Converts the definition to its object node form.
    ///
    /// Absent optional members and empty collections are omitted entirely.
    #[must_use]
    pub fn to_node(&self) -> Node {
        ObjectNodeBuilder::new()
            .with_optional_member(BODY, self.body.as_deref())
            .with_optional_member(BODY_MEDIA_TYPE, self.body_media_type.as_deref())
            .with_optional_member(
                HEADERS,
                (!self.headers.is_empty()).then(|| string_map(&self.headers)),
            )
            .with_optional_member(HOST, self.host.as_deref())
            .with_member(METHOD, self.method.as_str())
            .with_optional_member(
                QUERY_PARAMS,
                (!self.query_params.is_empty()).then(|| Node::from(self.query_params.clone())),
            )
            .with_member(URI, self.uri.as_str())
            .build()
    }

    /// Returns a builder pre-populated with every field of this
    /// definition.
    #[must_use]
    pub fn to_builder(&self) -> MalformedRequestDefinitionBuilder {
        MalformedRequestDefinitionBuilder {
            method: Some(self.method.clone()),
            uri: Some(self.uri.clone()),
            host: self.host.clone(),
            query_params: self.query_params.clone(),
            headers: self.headers.clone(),
            body: self.body.clone(),
            body_media_type: self.body_media_type.clone(),
        }
    }
}

/// Builder for [`MalformedRequestDefinition`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct MalformedRequestDefinitionBuilder {
    method: Option<String>,
    uri: Option<String>,
    host: Option<String>,
    query_params: Vec<String>,
    headers: BTreeMap<String, String>,
    body: Option<String>,
    body_media_type: Option<String>,
}

impl MalformedRequestDefinitionBuilder {
    /// Sets the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the request URI.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Sets the host header override.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Replaces the full query parameter list.
    pub fn query_params(mut self, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.query_params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the full header map.
    pub fn headers(
        mut self,
        headers: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        self.headers = headers
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self
    }

    /// Adds one header.
    pub fn put_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the media type of the body.
    pub fn body_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.body_media_type = Some(media_type.into());
        self
    }

    /// Validates the required fields and freezes the definition.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingField`] naming `method` or `uri` when
    /// that field was never set.
    pub fn build(self) -> Result<MalformedRequestDefinition, BuildError> {
        Ok(MalformedRequestDefinition {
            method: require("method", self.method)?,
            uri: require("uri", self.uri)?,
            host: self.host,
            query_params: self.query_params,
            headers: self.headers,
            body: self.body,
            body_media_type: self.body_media_type,
        })
    }
}
