//! End-to-end codec tests against raw JSON documents, the way test suites
//! actually ship: parsed from text, inspected, and re-emitted.

use serde_json::Value;

use modelforge_protocol_tests::MalformedRequestTestCase;

const SUITE: &str = r#"[
    {
        "documentation": "Rejects a truncated body outright",
        "id": "truncated_body",
        "protocol": "example.weather#restJson",
        "request": {
            "body": "{\"city\": \"Port",
            "bodyMediaType": "application/json",
            "headers": {"content-type": "application/json"},
            "method": "POST",
            "uri": "/forecast"
        },
        "response": {
            "code": 400,
            "headers": {"x-errortype": "SerializationException"}
        },
        "tags": ["body", "json"]
    },
    {
        "id": "unknown_query_param",
        "protocol": "example.weather#restJson",
        "request": {
            "method": "GET",
            "queryParams": ["pressure=low"],
            "uri": "/forecast"
        },
        "response": {
            "code": 400
        }
    }
]"#;

fn parse_suite() -> Vec<MalformedRequestTestCase> {
    let documents: Value = serde_json::from_str(SUITE).unwrap();
    documents
        .as_array()
        .unwrap()
        .iter()
        .map(|document| MalformedRequestTestCase::from_node(document).unwrap())
        .collect()
}

#[test]
fn parses_a_shipped_test_suite() {
    let cases = parse_suite();
    assert_eq!(cases.len(), 2);

    let first = &cases[0];
    assert_eq!(first.id(), "truncated_body");
    assert_eq!(first.protocol().to_string(), "example.weather#restJson");
    assert_eq!(first.documentation(), Some("Rejects a truncated body outright"));
    assert_eq!(first.request().method(), "POST");
    assert_eq!(
        first.request().headers().get("content-type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(first.response().code(), 400);
    assert_eq!(first.tags(), ["body", "json"]);

    let second = &cases[1];
    assert_eq!(second.documentation(), None);
    assert_eq!(second.request().query_params(), ["pressure=low"]);
    assert!(second.tags().is_empty());
}

#[test]
fn re_emits_each_document_it_parsed() {
    let documents: Value = serde_json::from_str(SUITE).unwrap();
    for document in documents.as_array().unwrap() {
        let case = MalformedRequestTestCase::from_node(document).unwrap();
        assert_eq!(&case.to_node(), document);
    }
}

#[test]
fn emitted_members_keep_the_documented_order() {
    let case = &parse_suite()[0];
    let node = case.to_node();

    let keys: Vec<&str> = node.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["documentation", "id", "protocol", "request", "response", "tags"]
    );
}
