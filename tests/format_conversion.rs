use ldp_resource::{convert, ConvertError};
use rstest::rstest;

const SUBJECT: &str = "https://a.example/x";
const PERSON_TURTLE: &str = "<https://a.example/x> a <http://schema.org/Person> .";

#[rstest]
#[case::to_json_ld("application/ld+json")]
#[case::to_turtle("text/turtle")]
#[case::to_rdf_xml("application/rdf+xml")]
#[case::to_n3("text/n3")]
#[case::to_n_triples("application/n-triples")]
fn turtle_subject_survives_conversion_to_every_format(#[case] target: &str) {
    let output = convert(PERSON_TURTLE, "text/turtle", target).expect("conversion succeeds");
    assert!(
        output.contains(SUBJECT),
        "expected `{SUBJECT}` in {target} output:\n{output}"
    );
}

#[rstest]
#[case::from_turtle(PERSON_TURTLE, "text/turtle")]
#[case::from_n3(PERSON_TURTLE, "text/n3")]
#[case::from_n_triples(
    "<https://a.example/x> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://schema.org/Person> .",
    "application/n-triples"
)]
fn first_subject_becomes_the_json_ld_id(#[case] data: &str, #[case] source: &str) {
    let json = convert(data, source, "application/ld+json").expect("conversion succeeds");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output is JSON");
    assert_eq!(value["@id"], SUBJECT);
}

#[test]
fn json_ld_round_trip_is_id_only() {
    let json_ld = r#"{"@id":"https://a.example/n1","@type":"Note","text":"hello"}"#;
    let turtle = convert(json_ld, "application/ld+json", "text/turtle").expect("to turtle");
    // Only the identifier survives; the note body is not carried forward.
    assert!(turtle.contains("https://a.example/n1"));
    assert!(!turtle.contains("hello"));

    let back = convert(&turtle, "text/turtle", "application/ld+json").expect("back to JSON-LD");
    let value: serde_json::Value = serde_json::from_str(&back).expect("output is JSON");
    assert_eq!(value["@id"], "https://a.example/n1");
}

#[rstest]
#[case::unknown("unsupported/x")]
#[case::declared_but_unwired("application/rdf+json")]
fn unsupported_source_formats_are_named_in_the_error(#[case] source: &str) {
    let err = convert("data", source, "text/turtle").expect_err("source is rejected");
    match err {
        ConvertError::UnsupportedSource(format) => assert_eq!(format, source),
        other => panic!("expected an unsupported-source error, got {other:?}"),
    }
}

#[test]
fn unsupported_target_format_is_named_in_the_error() {
    let err = convert(PERSON_TURTLE, "text/turtle", "unsupported/x").expect_err("target rejected");
    match err {
        ConvertError::UnsupportedTarget(format) => assert_eq!(format, "unsupported/x"),
        other => panic!("expected an unsupported-target error, got {other:?}"),
    }
}

#[test]
fn literal_objects_stay_quoted_across_line_formats() {
    let turtle = "<https://a.example/x> <http://schema.org/name> \"Alice Smith\" .";
    for target in ["text/turtle", "text/n3", "application/n-triples"] {
        let output = convert(turtle, "text/turtle", target).expect("conversion succeeds");
        assert!(output.contains("\"Alice Smith\""), "missing literal in {target}");
    }

    let json = convert(turtle, "text/turtle", "application/ld+json").expect("to JSON-LD");
    let value: serde_json::Value = serde_json::from_str(&json).expect("output is JSON");
    assert_eq!(value["http://schema.org/name"], "Alice Smith");
}

#[test]
fn rdf_xml_output_describes_only_the_first_subject() {
    let turtle = concat!(
        "<https://a.example/x> <http://schema.org/name> \"Alice\" .\n",
        "<https://a.example/y> <http://schema.org/name> \"Bob\" .\n",
    );
    let rdfxml = convert(turtle, "text/turtle", "application/rdf+xml").expect("to RDF/XML");
    assert!(rdfxml.contains("rdf:about=\"https://a.example/x\""));
    assert!(!rdfxml.contains("https://a.example/y"));
}

#[test]
fn syntax_errors_in_the_source_are_parse_failures() {
    let err = convert("<https://a.example/x> <p", "text/turtle", "application/ld+json")
        .expect_err("malformed turtle");
    assert!(matches!(err, ConvertError::Parse(_)));
}
