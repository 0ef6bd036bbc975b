use oxrdf::NamedOrBlankNode;
use serde_json::Value;
use thiserror::Error;

use super::format::RdfSerialization;
use super::triples::{parse_first_quad, parse_quads, QuadFormat};

/// Error raised when a representation fails format validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The underlying parser rejected the document.
    ///
    /// `line` and `column` are populated only when the parser reports a
    /// location for the failure.
    #[error("{} syntax error: {message}", .format.name())]
    Syntax {
        format: RdfSerialization,
        message: String,
        line: Option<u64>,
        column: Option<u64>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    /// The document parsed but yielded no usable subject identifier.
    #[error("no identifier found in {} data", .format.name())]
    NoIdentifier { format: RdfSerialization },
}

impl ValidationError {
    /// Returns the serialization the failing document claimed to be in.
    #[must_use]
    pub fn format(&self) -> RdfSerialization {
        match self {
            Self::Syntax { format, .. } | Self::NoIdentifier { format } => *format,
        }
    }
}

/// Validates a JSON-LD document and extracts its top-level `@id`.
///
/// The document must parse as JSON and pass a light structural check;
/// the identifier must be a non-empty string. A missing or non-string
/// `@id` is [`ValidationError::NoIdentifier`].
pub fn validate_json_ld(data: &str) -> Result<String, ValidationError> {
    let document = parse_json_ld_document(data)?;
    json_ld_identifier(&document).ok_or(ValidationError::NoIdentifier {
        format: RdfSerialization::JsonLd,
    })
}

/// Validates a Turtle document and extracts the subject of its first triple.
pub fn validate_turtle(data: &str) -> Result<String, ValidationError> {
    first_subject(data, QuadFormat::Turtle)
}

/// Validates an N3 document and extracts the subject of its first triple.
pub fn validate_n3(data: &str) -> Result<String, ValidationError> {
    first_subject(data, QuadFormat::N3)
}

/// Validates an RDF/XML document and extracts the IRI subject of its first
/// decoded triple.
///
/// A well-formed document with zero triples, like one whose first subject
/// is a blank node, is [`ValidationError::NoIdentifier`].
pub fn validate_rdf_xml(data: &str) -> Result<String, ValidationError> {
    first_iri_subject(data, QuadFormat::RdfXml)
}

/// Validates an N-Triples document and extracts the IRI subject of its
/// first decoded triple. Same contract as [`validate_rdf_xml`].
pub fn validate_n_triples(data: &str) -> Result<String, ValidationError> {
    first_iri_subject(data, QuadFormat::NTriples)
}

pub(crate) fn parse_json_ld_document(data: &str) -> Result<Value, ValidationError> {
    let document: Value = serde_json::from_str(data).map_err(|source| {
        let (line, column) = (source.line() as u64, source.column() as u64);
        ValidationError::Syntax {
            format: RdfSerialization::JsonLd,
            message: format!("invalid JSON syntax: {source}"),
            line: (line > 0).then_some(line),
            column: (column > 0).then_some(column),
            source: Some(Box::new(source)),
        }
    })?;
    check_expandable(&document)?;
    Ok(document)
}

pub(crate) fn json_ld_identifier(document: &Value) -> Option<String> {
    match document.get("@id") {
        Some(Value::String(id)) if !id.is_empty() => Some(id.clone()),
        _ => None,
    }
}

/// Structural stand-in for JSON-LD expansion: recognizable keyword usage
/// is tolerated but not mandatory, while shapes no processor could expand
/// are rejected.
fn check_expandable(document: &Value) -> Result<(), ValidationError> {
    let expansion_failed = |message: &str| ValidationError::Syntax {
        format: RdfSerialization::JsonLd,
        message: format!("JSON-LD expansion failed: {message}"),
        line: None,
        column: None,
        source: None,
    };

    match document {
        Value::Object(object) => {
            if let Some(context) = object.get("@context") {
                if !(context.is_string()
                    || context.is_object()
                    || context.is_array()
                    || context.is_null())
                {
                    return Err(expansion_failed(
                        "`@context` must be a string, object or array",
                    ));
                }
            }
            if let Some(graph) = object.get("@graph") {
                if !(graph.is_array() || graph.is_object()) {
                    return Err(expansion_failed("`@graph` must be an array or object"));
                }
            }
            Ok(())
        }
        Value::Array(_) => Ok(()),
        _ => Err(expansion_failed("document must be an object or array")),
    }
}

fn first_subject(data: &str, format: QuadFormat) -> Result<String, ValidationError> {
    let triples = parse_quads(data, format)?;
    triples
        .into_iter()
        .map(|triple| triple.subject)
        .find(|subject| !subject.is_empty())
        .ok_or(ValidationError::NoIdentifier {
            format: format.serialization(),
        })
}

fn first_iri_subject(data: &str, format: QuadFormat) -> Result<String, ValidationError> {
    match parse_first_quad(data, format)? {
        Some(quad) => match quad.subject {
            NamedOrBlankNode::NamedNode(node) => Ok(node.into_string()),
            NamedOrBlankNode::BlankNode(_) => Err(ValidationError::NoIdentifier {
                format: format.serialization(),
            }),
        },
        None => Err(ValidationError::NoIdentifier {
            format: format.serialization(),
        }),
    }
}
