use oxrdf::{NamedOrBlankNode, Quad, Term};
use oxrdfio::{RdfFormat, RdfParseError, RdfParser};

use super::format::RdfSerialization;
use super::validate::{self, ValidationError};

pub(crate) const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
pub(crate) const RDFS_RESOURCE: &str = "http://www.w3.org/2000/01/rdf-schema#Resource";

/// Canonical intermediate statement used by the converter.
///
/// Constructed per conversion call and discarded afterwards; never
/// persisted. Subjects and objects hold the raw IRI text (or `_:label`
/// for blank nodes); literal objects hold the lexical value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Triple {
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub is_literal: bool,
}

impl From<Quad> for Triple {
    fn from(quad: Quad) -> Self {
        let subject = match quad.subject {
            NamedOrBlankNode::NamedNode(node) => node.into_string(),
            NamedOrBlankNode::BlankNode(node) => node.to_string(),
        };
        let predicate = quad.predicate.into_string();
        let (object, is_literal) = match quad.object {
            Term::Literal(literal) => (literal.value().to_owned(), true),
            other => (reference_text(&other), false),
        };
        Self {
            subject,
            predicate,
            object,
            is_literal,
        }
    }
}

/// The serializations read through the shared quad-iterator seam.
#[derive(Copy, Clone, Debug)]
pub(crate) enum QuadFormat {
    Turtle,
    N3,
    NTriples,
    RdfXml,
}

impl QuadFormat {
    pub(crate) fn serialization(self) -> RdfSerialization {
        match self {
            Self::Turtle => RdfSerialization::Turtle,
            Self::N3 => RdfSerialization::N3,
            Self::NTriples => RdfSerialization::NTriples,
            Self::RdfXml => RdfSerialization::RdfXml,
        }
    }

    fn rdf_format(self) -> RdfFormat {
        match self {
            Self::Turtle => RdfFormat::Turtle,
            Self::N3 => RdfFormat::N3,
            Self::NTriples => RdfFormat::NTriples,
            Self::RdfXml => RdfFormat::RdfXml,
        }
    }
}

/// Parses the whole document into triples; any syntax error fails the call.
pub(crate) fn parse_quads(data: &str, format: QuadFormat) -> Result<Vec<Triple>, ValidationError> {
    let mut triples = Vec::new();
    for quad in RdfParser::from_format(format.rdf_format()).for_reader(data.as_bytes()) {
        let quad = quad.map_err(|source| syntax_error(format.serialization(), source))?;
        triples.push(Triple::from(quad));
    }
    Ok(triples)
}

/// Decodes only the first statement of the document, if any.
pub(crate) fn parse_first_quad(
    data: &str,
    format: QuadFormat,
) -> Result<Option<Quad>, ValidationError> {
    let mut reader = RdfParser::from_format(format.rdf_format()).for_reader(data.as_bytes());
    match reader.next() {
        None => Ok(None),
        Some(Ok(quad)) => Ok(Some(quad)),
        Some(Err(source)) => Err(syntax_error(format.serialization(), source)),
    }
}

/// Reads a JSON-LD document into triples under the simplified contract:
/// only the top-level `@id` is carried forward, as a single synthesized
/// `rdf:type -> rdfs:Resource` statement. A document without an `@id`
/// yields no triples and no error.
pub(crate) fn json_ld_triples(data: &str) -> Result<Vec<Triple>, ValidationError> {
    let document = validate::parse_json_ld_document(data)?;
    Ok(validate::json_ld_identifier(&document)
        .map(|subject| {
            vec![Triple {
                subject,
                predicate: RDF_TYPE.to_owned(),
                object: RDFS_RESOURCE.to_owned(),
                is_literal: false,
            }]
        })
        .unwrap_or_default())
}

fn reference_text(term: &Term) -> String {
    let text = term.to_string();
    text.trim_start_matches('<').trim_end_matches('>').to_owned()
}

fn syntax_error(format: RdfSerialization, source: RdfParseError) -> ValidationError {
    let location = match &source {
        RdfParseError::Syntax(syntax) => syntax.location(),
        _ => None,
    };
    let (line, column) = location.map_or((None, None), |range| {
        (Some(range.start.line), Some(range.start.column))
    });
    ValidationError::Syntax {
        format,
        message: source.to_string(),
        line,
        column,
        source: Some(Box::new(source)),
    }
}
