//! Generic tree-structured document values.
//!
//! Models, build settings, and protocol test definitions all travel as a
//! JSON-like tagged tree. [`serde_json::Value`] already is that closed
//! union (object/array/string/number/boolean/null); this module layers on
//! what hand-written codecs need: error-returning member accessors that
//! name the offending member on failure, and ordered object emission that
//! omits absent optional members instead of emitting null.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// The generic tree-structured document value.
pub type Node = Value;

/// Member map of an object node.
pub type ObjectMap = Map<String, Value>;

/// Error raised when a document does not match the expected schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A member is absent or has the wrong structural kind.
    #[error("expected `{member}` to be {expected} node")]
    SchemaMismatch {
        /// Name of the offending member.
        member: &'static str,
        /// Shape the member was expected to have.
        expected: &'static str,
    },
}

impl NodeError {
    /// Creates a schema mismatch error.
    #[must_use]
    pub const fn schema_mismatch(member: &'static str, expected: &'static str) -> Self {
        Self::SchemaMismatch { member, expected }
    }
}

/// Checks that `node` is an object and returns its member map.
///
/// # Errors
///
/// Returns [`NodeError::SchemaMismatch`] carrying `label` when `node` is
/// any other kind of node.
pub fn expect_object<'a>(node: &'a Node, label: &'static str) -> Result<&'a ObjectMap, NodeError> {
    node.as_object()
        .ok_or(NodeError::schema_mismatch(label, "object"))
}

/// Converts a string-to-string map into an object node with string members.
#[must_use]
pub fn string_map(map: &BTreeMap<String, String>) -> Node {
    let mut members = ObjectMap::new();
    for (name, value) in map {
        members.insert(name.clone(), Node::from(value.as_str()));
    }
    Node::Object(members)
}

/// Error-returning member accessors for object nodes.
///
/// `expect_*` accessors treat an absent member as a schema mismatch;
/// `get_*` accessors return `Ok(None)` for absent members and only fail
/// when a member is present with the wrong kind.
pub trait ObjectNode {
    /// Returns the required string member `member`.
    ///
    /// # Errors
    ///
    /// Fails when the member is absent or not a string.
    fn expect_string_member(&self, member: &'static str) -> Result<&str, NodeError>;

    /// Returns the optional string member `member`.
    ///
    /// # Errors
    ///
    /// Fails when the member is present but not a string.
    fn get_string_member(&self, member: &'static str) -> Result<Option<&str>, NodeError>;

    /// Returns the required object member `member`.
    ///
    /// # Errors
    ///
    /// Fails when the member is absent or not an object.
    fn expect_object_member(&self, member: &'static str) -> Result<&ObjectMap, NodeError>;

    /// Returns the required unsigned integer member `member`.
    ///
    /// # Errors
    ///
    /// Fails when the member is absent, not a number, or out of range.
    fn expect_u16_member(&self, member: &'static str) -> Result<u16, NodeError>;

    /// Returns the optional array-of-strings member `member`.
    ///
    /// # Errors
    ///
    /// Fails when the member is present but is not an array or contains a
    /// non-string element.
    fn get_string_array_member(
        &self,
        member: &'static str,
    ) -> Result<Option<Vec<String>>, NodeError>;

    /// Returns the optional object member `member` as a string-to-string
    /// map.
    ///
    /// # Errors
    ///
    /// Fails when the member is present but is not an object or has a
    /// non-string member value.
    fn get_string_map_member(
        &self,
        member: &'static str,
    ) -> Result<Option<BTreeMap<String, String>>, NodeError>;
}

impl ObjectNode for ObjectMap {
    fn expect_string_member(&self, member: &'static str) -> Result<&str, NodeError> {
        self.get(member)
            .and_then(Value::as_str)
            .ok_or(NodeError::schema_mismatch(member, "string"))
    }

    fn get_string_member(&self, member: &'static str) -> Result<Option<&str>, NodeError> {
        match self.get(member) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(NodeError::schema_mismatch(member, "string")),
        }
    }

    fn expect_object_member(&self, member: &'static str) -> Result<&ObjectMap, NodeError> {
        self.get(member)
            .and_then(Value::as_object)
            .ok_or(NodeError::schema_mismatch(member, "object"))
    }

    fn expect_u16_member(&self, member: &'static str) -> Result<u16, NodeError> {
        self.get(member)
            .and_then(Value::as_u64)
            .and_then(|value| u16::try_from(value).ok())
            .ok_or(NodeError::schema_mismatch(member, "integer"))
    }

    fn get_string_array_member(
        &self,
        member: &'static str,
    ) -> Result<Option<Vec<String>>, NodeError> {
        let Some(node) = self.get(member) else {
            return Ok(None);
        };
        let elements = node
            .as_array()
            .ok_or(NodeError::schema_mismatch(member, "array of strings"))?;
        elements
            .iter()
            .map(|element| {
                element
                    .as_str()
                    .map(str::to_owned)
                    .ok_or(NodeError::schema_mismatch(member, "array of strings"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn get_string_map_member(
        &self,
        member: &'static str,
    ) -> Result<Option<BTreeMap<String, String>>, NodeError> {
        let Some(node) = self.get(member) else {
            return Ok(None);
        };
        let members = node
            .as_object()
            .ok_or(NodeError::schema_mismatch(member, "object of strings"))?;
        members
            .iter()
            .map(|(name, value)| {
                value
                    .as_str()
                    .map(|value| (name.clone(), value.to_owned()))
                    .ok_or(NodeError::schema_mismatch(member, "object of strings"))
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Some)
    }
}

/// Ordered construction of object nodes.
///
/// Members are emitted in insertion order; absent optional members are
/// omitted entirely rather than emitted as null.
#[derive(Debug, Default)]
#[must_use]
pub struct ObjectNodeBuilder {
    members: ObjectMap,
}

impl ObjectNodeBuilder {
    /// Creates an empty object node builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the member `name` with `value`.
    ///
    /// Inserting the same name twice overwrites the earlier value while
    /// keeping its original position.
    pub fn with_member(mut self, name: &str, value: impl Into<Node>) -> Self {
        self.members.insert(name.to_owned(), value.into());
        self
    }

    /// Appends the member `name` when `value` is present, and otherwise
    /// leaves the member out of the object entirely.
    pub fn with_optional_member<V: Into<Node>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with_member(name, value),
            None => self,
        }
    }

    /// Finishes the object node.
    #[must_use]
    pub fn build(self) -> Node {
        Node::Object(self.members)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> ObjectMap {
        let Value::Object(object) = json!({
            "id": "case_1",
            "count": 3,
            "tags": ["a", "b"],
            "nested": {"k": "v"},
            "headers": {"content-type": "application/json"},
        }) else {
            unreachable!("literal is an object")
        };
        object
    }

    #[test]
    fn expect_object_rejects_other_kinds() {
        let err = expect_object(&json!("text"), "settings").unwrap_err();
        assert_eq!(err, NodeError::schema_mismatch("settings", "object"));
        assert_eq!(err.to_string(), "expected `settings` to be object node");
    }

    #[test]
    fn string_member_accessors() {
        let object = sample();
        assert_eq!(object.expect_string_member("id").unwrap(), "case_1");
        assert_eq!(object.get_string_member("missing").unwrap(), None);
        assert_eq!(
            object.expect_string_member("count").unwrap_err(),
            NodeError::schema_mismatch("count", "string")
        );
        assert_eq!(
            object.get_string_member("count").unwrap_err(),
            NodeError::schema_mismatch("count", "string")
        );
    }

    #[test]
    fn object_member_accessor() {
        let object = sample();
        assert!(object.expect_object_member("nested").unwrap().contains_key("k"));
        assert_eq!(
            object.expect_object_member("tags").unwrap_err(),
            NodeError::schema_mismatch("tags", "object")
        );
        assert_eq!(
            object.expect_object_member("missing").unwrap_err(),
            NodeError::schema_mismatch("missing", "object")
        );
    }

    #[test]
    fn integer_member_accessor() {
        let object = sample();
        assert_eq!(object.expect_u16_member("count").unwrap(), 3);
        assert_eq!(
            object.expect_u16_member("id").unwrap_err(),
            NodeError::schema_mismatch("id", "integer")
        );
    }

    #[test]
    fn string_array_member_accessor() {
        let object = sample();
        assert_eq!(
            object.get_string_array_member("tags").unwrap(),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
        assert_eq!(object.get_string_array_member("missing").unwrap(), None);

        let Value::Object(mixed) = json!({"tags": ["a", 1]}) else {
            unreachable!()
        };
        assert_eq!(
            mixed.get_string_array_member("tags").unwrap_err(),
            NodeError::schema_mismatch("tags", "array of strings")
        );
    }

    #[test]
    fn string_map_member_accessor() {
        let object = sample();
        let headers = object.get_string_map_member("headers").unwrap().unwrap();
        assert_eq!(
            headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(object.get_string_map_member("missing").unwrap(), None);
        assert_eq!(
            object.get_string_map_member("tags").unwrap_err(),
            NodeError::schema_mismatch("tags", "object of strings")
        );
    }

    #[test]
    fn builder_keeps_insertion_order_and_omits_absent_members() {
        let node = ObjectNodeBuilder::new()
            .with_optional_member("documentation", None::<&str>)
            .with_member("id", "case_1")
            .with_optional_member("tags", Some(vec!["a".to_owned()]))
            .build();

        let object = node.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "tags"]);
        assert!(!object.contains_key("documentation"));
    }

    #[test]
    fn string_map_emits_string_members() {
        let mut map = BTreeMap::new();
        map.insert("x-amzn-errortype".to_owned(), "ValidationException".to_owned());
        assert_eq!(
            string_map(&map),
            json!({"x-amzn-errortype": "ValidationException"})
        );
    }
}
