//! Property-based tests for shape identifier parsing.
//!
//! These verify that rendering and parsing are inverse operations over the
//! whole space of structurally valid identifiers, not just the handful of
//! fixtures in the unit tests.

use proptest::prelude::*;

use crate::shape_id::ShapeId;

/// Strategy for a single identifier segment.
fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,15}"
}

/// Strategy for a dotted namespace of one to three segments.
fn namespace() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..=3).prop_map(|parts| parts.join("."))
}

proptest! {
    /// Property: display then parse returns the original identifier.
    #[test]
    fn prop_parse_display_round_trip(namespace in namespace(), name in segment()) {
        let id = ShapeId::from_parts(&namespace, &name).expect("valid parts");
        let parsed: ShapeId = id.to_string().parse().expect("canonical form parses");
        prop_assert_eq!(parsed, id);
    }

    /// Property: strings without a `#` separator never parse.
    #[test]
    fn prop_rejects_missing_separator(value in "[a-zA-Z0-9_.]{0,24}") {
        prop_assert!(value.parse::<ShapeId>().is_err());
    }
}
