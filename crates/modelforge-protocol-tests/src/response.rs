//! The error response a protocol test expects back.

use std::collections::BTreeMap;

use modelforge_model::builder::{require, BuildError};
use modelforge_model::node::{
    expect_object, string_map, Node, NodeError, ObjectMap, ObjectNode, ObjectNodeBuilder,
};

const BODY: &str = "body";
const BODY_MEDIA_TYPE: &str = "bodyMediaType";
const CODE: &str = "code";
const HEADERS: &str = "headers";

/// Describes the response a service must produce when it receives a
/// malformed request.
///
/// Only the status `code` is required: many protocols constrain nothing
/// else about their error responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedResponseDefinition {
    code: u16,
    headers: BTreeMap<String, String>,
    body: Option<String>,
    body_media_type: Option<String>,
}

impl MalformedResponseDefinition {
    /// Creates a builder for assembling a response definition.
    #[must_use]
    pub fn builder() -> MalformedResponseDefinitionBuilder {
        MalformedResponseDefinitionBuilder::default()
    }

    /// Returns the expected status code.
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.code
    }

    /// Returns the expected response headers.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Returns the expected response body, if constrained.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Returns the media type of the expected body, if constrained.
    #[must_use]
    pub fn body_media_type(&self) -> Option<&str> {
        self.body_media_type.as_deref()
    }

    /// Parses a response definition from its object node form.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::SchemaMismatch`] naming the offending member
    /// when `node` is not an object, `code` is absent or not an integer,
    /// or another member has the wrong kind.
    pub fn from_node(node: &Node) -> Result<Self, NodeError> {
        Self::from_object(expect_object(node, "response")?)
    }

    pub(crate) fn from_object(object: &ObjectMap) -> Result<Self, NodeError> {
        Ok(Self {
            code: object.expect_u16_member(CODE)?,
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
            .with_member(CODE, self.code)
            .with_optional_member(
                HEADERS,
                (!self.headers.is_empty()).then(|| string_map(&self.headers)),
            )
            .build()
    }

    /// Returns a builder pre-populated with every field of this
    /// definition.
    #[must_use]
    pub fn to_builder(&self) -> MalformedResponseDefinitionBuilder {
        MalformedResponseDefinitionBuilder {
            code: Some(self.code),
            headers: self.headers.clone(),
            body: self.body.clone(),
            body_media_type: self.body_media_type.clone(),
        }
    }
}

/// Builder for [`MalformedResponseDefinition`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct MalformedResponseDefinitionBuilder {
    code: Option<u16>,
    headers: BTreeMap<String, String>,
    body: Option<String>,
    body_media_type: Option<String>,
}

impl MalformedResponseDefinitionBuilder {
    /// Sets the expected status code.
    pub const fn code(mut self, code: u16) -> Self {
        self.code = Some(code);
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

    /// Adds one expected header.
    pub fn put_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets the expected response body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the media type of the expected body.
    pub fn body_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.body_media_type = Some(media_type.into());
        self
    }

    /// Validates the required field and freezes the definition.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingField`] naming `code` when it was
    /// never set.
    pub fn build(self) -> Result<MalformedResponseDefinition, BuildError> {
        Ok(MalformedResponseDefinition {
            code: require("code", self.code)?,
            headers: self.headers,
            body: self.body,
            body_media_type: self.body_media_type,
        })
    }
}
