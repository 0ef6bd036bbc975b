use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value object naming one of the RDF serializations this crate recognizes.
///
/// The content-type strings are an external contract shared with the HTTP
/// collaborator and must match exactly, case-sensitively.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RdfSerialization {
    /// JSON-LD documents (`application/ld+json`).
    #[serde(rename = "application/ld+json")]
    JsonLd,
    /// Turtle documents (`text/turtle`).
    #[serde(rename = "text/turtle")]
    Turtle,
    /// RDF/XML documents (`application/rdf+xml`).
    #[serde(rename = "application/rdf+xml")]
    RdfXml,
    /// Notation3 documents (`text/n3`).
    #[serde(rename = "text/n3")]
    N3,
    /// N-Triples documents (`application/n-triples`).
    #[serde(rename = "application/n-triples")]
    NTriples,
    /// RDF/JSON documents (`application/rdf+json`). Declared for content
    /// negotiation but not wired to a validator or converter.
    #[serde(rename = "application/rdf+json")]
    RdfJson,
}

impl RdfSerialization {
    /// Returns the exact content-type string for this serialization.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::JsonLd => "application/ld+json",
            Self::Turtle => "text/turtle",
            Self::RdfXml => "application/rdf+xml",
            Self::N3 => "text/n3",
            Self::NTriples => "application/n-triples",
            Self::RdfJson => "application/rdf+json",
        }
    }

    /// Resolves a content-type string to a serialization.
    ///
    /// Matching is exact and case-sensitive; no media-type parameter
    /// stripping is performed.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "application/ld+json" => Some(Self::JsonLd),
            "text/turtle" => Some(Self::Turtle),
            "application/rdf+xml" => Some(Self::RdfXml),
            "text/n3" => Some(Self::N3),
            "application/n-triples" => Some(Self::NTriples),
            "application/rdf+json" => Some(Self::RdfJson),
            _ => None,
        }
    }

    /// Returns the human-readable format name used in error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::JsonLd => "JSON-LD",
            Self::Turtle => "Turtle",
            Self::RdfXml => "RDF/XML",
            Self::N3 => "N3",
            Self::NTriples => "N-Triples",
            Self::RdfJson => "RDF/JSON",
        }
    }
}

impl Display for RdfSerialization {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}

impl FromStr for RdfSerialization {
    type Err = UnknownContentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_content_type(s).ok_or_else(|| UnknownContentTypeError {
            content_type: s.to_owned(),
        })
    }
}

/// Error produced when a content-type string matches no known serialization.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown RDF content type: `{content_type}`")]
pub struct UnknownContentTypeError {
    /// The rejected content-type string.
    pub content_type: String,
}

/// Lists the content types with a wired validator and converter, in the
/// order they are advertised to content negotiation.
#[must_use]
pub fn supported_content_types() -> [&'static str; 5] {
    [
        RdfSerialization::JsonLd.content_type(),
        RdfSerialization::Turtle.content_type(),
        RdfSerialization::RdfXml.content_type(),
        RdfSerialization::N3.content_type(),
        RdfSerialization::NTriples.content_type(),
    ]
}
