use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::debug;

use super::format::RdfSerialization;
use super::triples::{json_ld_triples, parse_quads, QuadFormat, Triple};
use super::validate::ValidationError;

/// Error raised by [`convert`].
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source content type is not recognized or has no wired parser.
    #[error("unsupported source format: `{0}`")]
    UnsupportedSource(String),
    /// The target content type is not recognized or has no wired serializer.
    #[error("unsupported target format: `{0}`")]
    UnsupportedTarget(String),
    /// The source data could not be parsed in its claimed format.
    #[error("failed to parse source data: {0}")]
    Parse(#[from] ValidationError),
    /// The target document could not be serialized.
    #[error("failed to serialize target data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Converts RDF data between serializations by decomposing the source into
/// triples and re-serializing them for the target.
///
/// `from_format` and `to_format` are content-type strings matched exactly
/// against the recognized serializations; `application/rdf+json` is
/// declared for negotiation but has no wired converter and is rejected
/// like an unknown type.
///
/// Conversion is subject-centric and deliberately lossy: only the subject
/// identifier and directly-modeled statements survive. JSON-LD sources
/// contribute a single synthesized `rdf:type` statement for their `@id`;
/// language tags, datatypes and blank-node structure are not preserved.
pub fn convert(data: &str, from_format: &str, to_format: &str) -> Result<String, ConvertError> {
    let from = RdfSerialization::from_content_type(from_format)
        .ok_or_else(|| ConvertError::UnsupportedSource(from_format.to_owned()))?;
    let to = RdfSerialization::from_content_type(to_format)
        .ok_or_else(|| ConvertError::UnsupportedTarget(to_format.to_owned()))?;

    let triples = match from {
        RdfSerialization::JsonLd => json_ld_triples(data)?,
        RdfSerialization::Turtle => parse_quads(data, QuadFormat::Turtle)?,
        RdfSerialization::RdfXml => parse_quads(data, QuadFormat::RdfXml)?,
        RdfSerialization::N3 => parse_quads(data, QuadFormat::N3)?,
        RdfSerialization::NTriples => parse_quads(data, QuadFormat::NTriples)?,
        RdfSerialization::RdfJson => {
            return Err(ConvertError::UnsupportedSource(from_format.to_owned()))
        }
    };

    let output = match to {
        RdfSerialization::JsonLd => serialize_json_ld(&triples)?,
        RdfSerialization::Turtle | RdfSerialization::N3 | RdfSerialization::NTriples => {
            serialize_lines(&triples)
        }
        RdfSerialization::RdfXml => serialize_rdf_xml(&triples),
        RdfSerialization::RdfJson => {
            return Err(ConvertError::UnsupportedTarget(to_format.to_owned()))
        }
    };

    debug!(from = %from, to = %to, triples = triples.len(), "converted resource representation");
    Ok(output)
}

/// Builds a flat JSON-LD object: `@id` from the first subject, one key per
/// predicate. Literal objects become strings, references become `@id`
/// objects. Repeated predicates keep the last statement.
fn serialize_json_ld(triples: &[Triple]) -> Result<String, serde_json::Error> {
    let mut document = Map::new();
    if let Some(first) = triples.first() {
        document.insert("@id".to_owned(), Value::String(first.subject.clone()));
        for triple in triples {
            let object = if triple.is_literal {
                Value::String(triple.object.clone())
            } else {
                json!({ "@id": triple.object })
            };
            document.insert(triple.predicate.clone(), object);
        }
    }
    serde_json::to_string_pretty(&Value::Object(document))
}

/// One statement per line, `<s> <p> <o> .` with literals quoted. Shared by
/// Turtle, N3 and N-Triples output.
fn serialize_lines(triples: &[Triple]) -> String {
    let mut output = String::new();
    for triple in triples {
        output.push_str(&format!("<{}> <{}> ", triple.subject, triple.predicate));
        if triple.is_literal {
            output.push_str(&format!("\"{}\"", triple.object));
        } else {
            output.push_str(&format!("<{}>", triple.object));
        }
        output.push_str(" .\n");
    }
    output
}

/// One `rdf:Description` block about the first subject; statements with
/// other subjects are dropped.
fn serialize_rdf_xml(triples: &[Triple]) -> String {
    let mut output = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    output.push_str("<rdf:RDF xmlns:rdf=\"http://www.w3.org/1999/02/22-rdf-syntax-ns#\">\n");

    if let Some(first) = triples.first() {
        output.push_str(&format!(
            "  <rdf:Description rdf:about=\"{}\">\n",
            first.subject
        ));
        for triple in triples.iter().filter(|t| t.subject == first.subject) {
            if triple.is_literal {
                output.push_str(&format!(
                    "    <{}>{}</{}>\n",
                    triple.predicate, triple.object, triple.predicate
                ));
            } else {
                output.push_str(&format!(
                    "    <{} rdf:resource=\"{}\"/>\n",
                    triple.predicate, triple.object
                ));
            }
        }
        output.push_str("  </rdf:Description>\n");
    }

    output.push_str("</rdf:RDF>\n");
    output
}
