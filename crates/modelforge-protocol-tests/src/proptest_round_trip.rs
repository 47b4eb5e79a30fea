//! Property-based test for the test-case node codec.
//!
//! The codec contract is that parsing and emitting are inverse operations
//! for every buildable value, including the awkward corners: absent
//! documentation, empty tag lists, and duplicated tags.

use proptest::prelude::*;

use modelforge_model::shape_id::ShapeId;

use crate::request::MalformedRequestDefinition;
use crate::response::MalformedResponseDefinition;
use crate::test_case::MalformedRequestTestCase;

fn identifier() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,12}"
}

fn tag_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..4)
}

fn fixed_request() -> MalformedRequestDefinition {
    MalformedRequestDefinition::builder()
        .method("POST")
        .uri("/forecast")
        .build()
        .expect("method and uri are set")
}

fn fixed_response() -> MalformedResponseDefinition {
    MalformedResponseDefinition::builder()
        .code(400)
        .build()
        .expect("code is set")
}

proptest! {
    /// Property: `from_node(to_node(v))` deep-equals `v`.
    #[test]
    fn prop_node_round_trip(
        id in identifier(),
        namespace in identifier(),
        protocol in identifier(),
        documentation in prop::option::of("[ -~]{0,32}"),
        tags in tag_list(),
    ) {
        let mut builder = MalformedRequestTestCase::builder()
            .id(id)
            .protocol(ShapeId::from_parts(namespace, protocol).expect("valid parts"))
            .request(fixed_request())
            .response(fixed_response())
            .tags(tags);
        if let Some(documentation) = documentation {
            builder = builder.documentation(documentation);
        }
        let case = builder.build().expect("all required fields are set");

        let reparsed = MalformedRequestTestCase::from_node(&case.to_node())
            .expect("emitted node reparses");
        prop_assert_eq!(reparsed, case);
    }
}
