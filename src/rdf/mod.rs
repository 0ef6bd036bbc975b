//! RDF format machinery: the content-type contract, per-format validation
//! with identifier extraction, and subject-centric conversion between
//! serializations.
//!
//! Everything here is pure and stateless; validators and the converter are
//! safe to call concurrently from independent aggregates. Format-specific
//! parser quirks are isolated behind one internal triple-producing seam so
//! the validator and converter share a single model of a statement.

pub mod convert;
pub mod format;
mod triples;
pub mod validate;

pub use convert::{convert, ConvertError};
pub use format::{supported_content_types, RdfSerialization, UnknownContentTypeError};
pub use validate::{
    validate_json_ld, validate_n3, validate_n_triples, validate_rdf_xml, validate_turtle,
    ValidationError,
};
