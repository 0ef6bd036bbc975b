use std::cell::OnceCell;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, warn};

use super::events::ResourceEvent;
use crate::rdf::{self, RdfSerialization, ValidationError};

/// Event-sourced aggregate root for a linked-data resource.
///
/// State is never assigned directly: every operation appends an event to
/// the uncommitted list and derives the observable fields by applying it.
/// Failures are accumulated rather than raised, and once any error is
/// recorded further chained operations stop doing new work.
///
/// A `Resource` is a plain value with no internal synchronization; one
/// logical request builds or replays one instance and hands it to the
/// persistence collaborator.
#[derive(Debug)]
pub struct Resource {
    id: String,
    uri: String,
    content_type: String,
    data: String,
    last_modified: DateTime<Utc>,
    etag: OnceCell<String>,
    deleted: bool,
    errors: Vec<ResourceError>,
    uncommitted_events: Vec<ResourceEvent>,
    version: u64,
    sequence_no: u64,
}

/// Failure recorded against a resource operation.
///
/// All failures are local and recoverable; mapping them to protocol
/// responses is the calling collaborator's concern.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A construction or mutation operation received empty input.
    #[error("empty {0} data")]
    EmptyInput(&'static str),
    /// `with_uri` received an empty URI.
    #[error("invalid URI")]
    InvalidUri,
    /// The representation failed format validation.
    #[error("validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
    /// The operation was ignored because the resource already carries
    /// errors from earlier in the chain.
    #[error("`{0}` skipped: resource has prior errors")]
    Skipped(&'static str),
}

impl Resource {
    /// Creates an empty resource. Identity is established by the first
    /// successful creation operation, never supplied by the caller.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: String::new(),
            uri: String::new(),
            content_type: String::new(),
            data: String::new(),
            last_modified: Utc::now(),
            etag: OnceCell::new(),
            deleted: false,
            errors: Vec::new(),
            uncommitted_events: Vec::new(),
            version: 0,
            sequence_no: 0,
        }
    }

    /// Rebuilds a resource by replaying a stored event stream in order.
    ///
    /// Replay is trusted: no validation runs and nothing is appended to
    /// the uncommitted list. `version` is taken from the last event and
    /// `sequence_no` from the stream length.
    #[must_use]
    pub fn load_from_history(events: impl IntoIterator<Item = ResourceEvent>) -> Self {
        let mut resource = Self::new();
        let mut last_version = 0;
        for event in events {
            resource.apply(&event);
            resource.sequence_no += 1;
            last_version = event.version();
        }
        resource.version = last_version;
        resource
    }

    /// Creates the resource from a JSON-LD representation.
    #[must_use]
    pub fn from_json_ld(self, data: &str) -> Self {
        self.create_from(
            data,
            RdfSerialization::JsonLd,
            rdf::validate_json_ld,
            "from_json_ld",
        )
    }

    /// Creates the resource from a Turtle representation.
    #[must_use]
    pub fn from_turtle(self, data: &str) -> Self {
        self.create_from(
            data,
            RdfSerialization::Turtle,
            rdf::validate_turtle,
            "from_turtle",
        )
    }

    /// Creates the resource from an RDF/XML representation.
    #[must_use]
    pub fn from_rdf_xml(self, data: &str) -> Self {
        self.create_from(
            data,
            RdfSerialization::RdfXml,
            rdf::validate_rdf_xml,
            "from_rdf_xml",
        )
    }

    /// Assigns a URI to the resource. The URI is independent of the
    /// identifier and does not change it.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        if uri.is_empty() {
            self.record_error(ResourceError::InvalidUri);
            return self;
        }
        if self.has_errors() {
            self.record_error(ResourceError::Skipped("with_uri"));
            return self;
        }

        let event = ResourceEvent::uri_assigned(self.id.clone(), uri);
        self.append(event);
        self
    }

    /// Replaces the representation, keeping the previous data in the event
    /// for audit.
    #[must_use]
    pub fn update(mut self, data: &str, content_type: impl Into<String>) -> Self {
        if data.is_empty() {
            self.record_error(ResourceError::EmptyInput("update"));
            return self;
        }
        if self.has_errors() {
            self.record_error(ResourceError::Skipped("update"));
            return self;
        }

        let event =
            ResourceEvent::updated(self.id.clone(), self.data.clone(), data, content_type);
        self.append(event);
        self
    }

    /// Marks the resource as logically deleted, capturing its current URI.
    /// The value itself stays inspectable for audit.
    #[must_use]
    pub fn delete(mut self) -> Self {
        if self.has_errors() {
            self.record_error(ResourceError::Skipped("delete"));
            return self;
        }

        let event = ResourceEvent::deleted(self.id.clone(), self.uri.clone());
        self.append(event);
        self
    }

    /// Clears the uncommitted event list after the persistence collaborator
    /// has stored it. Accumulated errors are left untouched.
    pub fn mark_events_as_committed(&mut self) {
        self.uncommitted_events.clear();
    }

    /// Returns the events appended since the last commit boundary.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[ResourceEvent] {
        &self.uncommitted_events
    }

    /// Returns `true` when events are waiting to be persisted.
    #[must_use]
    pub fn has_uncommitted_events(&self) -> bool {
        !self.uncommitted_events.is_empty()
    }

    /// Returns the number of events waiting to be persisted.
    #[must_use]
    pub fn uncommitted_event_count(&self) -> usize {
        self.uncommitted_events.len()
    }

    /// Returns `true` when any operation in the chain has failed.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the accumulated operation failures in order.
    #[must_use]
    pub fn errors(&self) -> &[ResourceError] {
        &self.errors
    }

    /// Returns the identifier extracted from the first successful creation,
    /// or an empty string before that.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the assigned URI, or an empty string before assignment.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the content type of the current representation.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the current representation.
    #[must_use]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Returns the timestamp of the most recently applied event.
    #[must_use]
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.last_modified
    }

    /// Returns `true` once a deletion event has been applied.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Returns the aggregate version advanced by event application.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Returns the number of events applied to this aggregate.
    #[must_use]
    pub fn sequence_no(&self) -> u64 {
        self.sequence_no
    }

    /// Returns the entity tag for conditional requests: a fingerprint of
    /// the representation and its modification time. The value is memoized
    /// and recomputed only after a state-mutating event.
    #[must_use]
    pub fn etag(&self) -> &str {
        self.etag.get_or_init(|| {
            let mut hasher = Sha256::new();
            hasher.update(self.data.as_bytes());
            hasher.update(b"-");
            hasher.update(self.last_modified.timestamp().to_string().as_bytes());
            format!("\"{:x}\"", hasher.finalize())
        })
    }

    fn create_from(
        mut self,
        data: &str,
        format: RdfSerialization,
        validate: fn(&str) -> Result<String, ValidationError>,
        operation: &'static str,
    ) -> Self {
        if data.is_empty() {
            self.record_error(ResourceError::EmptyInput(format.name()));
            return self;
        }
        if self.has_errors() {
            self.record_error(ResourceError::Skipped(operation));
            return self;
        }

        let extracted = match validate(data) {
            Ok(extracted) => extracted,
            Err(source) => {
                warn!(format = %format, error = %source, "representation failed validation");
                self.record_error(ResourceError::ValidationFailed(source));
                return self;
            }
        };

        // First successful creation wins; later creations bind their event
        // to the existing identifier.
        if self.id.is_empty() {
            self.id = extracted.clone();
        }
        debug!(id = %self.id, format = %format, "resource created from representation");

        let event = ResourceEvent::created(self.id.clone(), data, format, extracted);
        self.append(event);
        self
    }

    fn append(&mut self, mut event: ResourceEvent) {
        self.sequence_no += 1;
        event.set_version(self.sequence_no);
        self.version = self.sequence_no;
        self.apply(&event);
        self.uncommitted_events.push(event);
    }

    fn apply(&mut self, event: &ResourceEvent) {
        match event {
            ResourceEvent::CreatedFromFormat {
                meta,
                data,
                content_type,
                extracted_id,
            } => {
                if self.id.is_empty() {
                    self.id = if extracted_id.is_empty() {
                        meta.aggregate_id.clone()
                    } else {
                        extracted_id.clone()
                    };
                }
                self.data = data.clone();
                self.content_type = content_type.content_type().to_owned();
                self.last_modified = meta.occurred_at;
            }
            ResourceEvent::UriAssigned { meta, uri } => {
                self.uri = uri.clone();
                self.last_modified = meta.occurred_at;
            }
            ResourceEvent::Updated {
                meta,
                new_data,
                content_type,
                ..
            } => {
                self.data = new_data.clone();
                self.content_type = content_type.clone();
                self.last_modified = meta.occurred_at;
            }
            ResourceEvent::Deleted { meta, .. } => {
                self.deleted = true;
                self.last_modified = meta.occurred_at;
            }
        }
        self.etag.take();
    }

    fn record_error(&mut self, error: ResourceError) {
        self.errors.push(error);
    }
}

impl Default for Resource {
    fn default() -> Self {
        Self::new()
    }
}
