//! Event-sourced linked-data resource domain with multi-format RDF
//! validation and conversion.
//!
//! The crate ingests textual RDF representations (JSON-LD, Turtle,
//! RDF/XML, N3, N-Triples), decides whether they are valid, extracts the
//! resource's canonical identifier and records the resource lifecycle as a
//! sequence of immutable events instead of directly-mutated state.
//!
//! It has no network, file or CLI surface of its own: an HTTP layer calls
//! the [`resource::Resource`] operations and [`rdf::convert`] for content
//! negotiation, and a persistence collaborator consumes
//! [`resource::Resource::uncommitted_events`] and replays streams through
//! [`resource::Resource::load_from_history`].

pub mod rdf;
pub mod resource;

pub use rdf::{convert, ConvertError, RdfSerialization, ValidationError};
pub use resource::{Resource, ResourceError, ResourceEvent};
