//! A single malformed-request protocol compliance test case.

use modelforge_model::builder::{require, BuildError};
use modelforge_model::node::{expect_object, Node, NodeError, ObjectNode, ObjectNodeBuilder};
use modelforge_model::shape_id::ShapeId;

use crate::request::MalformedRequestDefinition;
use crate::response::MalformedResponseDefinition;

const DOCUMENTATION: &str = "documentation";
const ID: &str = "id";
const PROTOCOL: &str = "protocol";
const REQUEST: &str = "request";
const RESPONSE: &str = "response";
const TAGS: &str = "tags";

/// A test case pairing one deliberately malformed request with the error
/// response a compliant service must produce for it.
///
/// Test cases are immutable once built. `id` must be unique within
/// whatever collection aggregates the cases; that collection enforces the
/// uniqueness, not this type. Tags are ordered but carry no ordering
/// semantics, and duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedRequestTestCase {
    documentation: Option<String>,
    id: String,
    protocol: ShapeId,
    request: MalformedRequestDefinition,
    response: MalformedResponseDefinition,
    tags: Vec<String>,
}

impl MalformedRequestTestCase {
    /// Creates a builder for assembling a test case.
    #[must_use]
    pub fn builder() -> MalformedRequestTestCaseBuilder {
        MalformedRequestTestCaseBuilder::default()
    }

    /// Returns the human-readable description, if any.
    #[must_use]
    pub fn documentation(&self) -> Option<&str> {
        self.documentation.as_deref()
    }

    /// Returns the test case identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the protocol this test case targets.
    #[must_use]
    pub const fn protocol(&self) -> &ShapeId {
        &self.protocol
    }

    /// Returns the request to send.
    #[must_use]
    pub const fn request(&self) -> &MalformedRequestDefinition {
        &self.request
    }

    /// Returns the response to expect.
    #[must_use]
    pub const fn response(&self) -> &MalformedResponseDefinition {
        &self.response
    }

    /// Returns the tags, in the order they were given.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Parses a test case from its object node form.
    ///
    /// # Errors
    ///
    /// Returns [`NodeError::SchemaMismatch`] naming the offending member
    /// when `node` is not an object, a required member is absent, a member
    /// has the wrong kind, or `protocol` is not a parsable shape ID.
    pub fn from_node(node: &Node) -> Result<Self, NodeError> {
        let object = expect_object(node, "test case")?;
        Ok(Self {
            documentation: object.get_string_member(DOCUMENTATION)?.map(str::to_owned),
            id: object.expect_string_member(ID)?.to_owned(),
            protocol: object
                .expect_string_member(PROTOCOL)?
                .parse()
                .map_err(|_| NodeError::schema_mismatch(PROTOCOL, "shape ID string"))?,
            request: MalformedRequestDefinition::from_object(
                object.expect_object_member(REQUEST)?,
            )?,
            response: MalformedResponseDefinition::from_object(
                object.expect_object_member(RESPONSE)?,
            )?,
            tags: object.get_string_array_member(TAGS)?.unwrap_or_default(),
        })
    }

    /// Converts the test case to its object node form.
    ///
    /// Members are emitted in a fixed order. Absent documentation and an
    /// empty tag list are omitted entirely; the protocol is emitted in its
    /// canonical string form.
    #[must_use]
    pub fn to_node(&self) -> Node {
        ObjectNodeBuilder::new()
            .with_optional_member(DOCUMENTATION, self.documentation.as_deref())
            .with_member(ID, self.id.as_str())
            .with_member(PROTOCOL, self.protocol.to_string())
            .with_member(REQUEST, self.request.to_node())
            .with_member(RESPONSE, self.response.to_node())
            .with_optional_member(
                TAGS,
                (!self.tags.is_empty()).then(|| Node::from(self.tags.clone())),
            )
            .build()
    }

    /// Returns a builder pre-populated with every field of this test
    /// case, for copy-with-modification.
    #[must_use]
    pub fn to_builder(&self) -> MalformedRequestTestCaseBuilder {
        MalformedRequestTestCaseBuilder {
            documentation: self.documentation.clone(),
            id: Some(self.id.clone()),
            protocol: Some(self.protocol.clone()),
            request: Some(self.request.clone()),
            response: Some(self.response.clone()),
            tags: self.tags.clone(),
        }
    }
}

/// Builder for [`MalformedRequestTestCase`].
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct MalformedRequestTestCaseBuilder {
    documentation: Option<String>,
    id: Option<String>,
    protocol: Option<ShapeId>,
    request: Option<MalformedRequestDefinition>,
    response: Option<MalformedResponseDefinition>,
    tags: Vec<String>,
}

impl MalformedRequestTestCaseBuilder {
    /// Sets the human-readable description.
    pub fn documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = Some(documentation.into());
        self
    }

    /// Sets the test case identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the protocol this test case targets.
    pub fn protocol(mut self, protocol: impl Into<ShapeId>) -> Self {
        self.protocol = Some(protocol.into());
        self
    }

    /// Sets the request to send.
    pub fn request(mut self, request: MalformedRequestDefinition) -> Self {
        self.request = Some(request);
        self
    }

    /// Sets the response to expect.
    pub fn response(mut self, response: MalformedResponseDefinition) -> Self {
        self.response = Some(response);
        self
    }

    /// Replaces the full tag list: earlier tags are cleared before the
    /// given sequence is copied in.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.clear();
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Validates that every required field is set and freezes the test
    /// case. The builder is consumed, so nothing can alias the built
    /// value's tag sequence afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MissingField`] naming `id`, `protocol`,
    /// `request`, or `response` when that field was never set.
    pub fn build(self) -> Result<MalformedRequestTestCase, BuildError> {
        Ok(MalformedRequestTestCase {
            documentation: self.documentation,
            id: require("id", self.id)?,
            protocol: require("protocol", self.protocol)?,
            request: require("request", self.request)?,
            response: require("response", self.response)?,
            tags: self.tags,
        })
    }
}
