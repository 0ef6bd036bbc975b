use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rdf::RdfSerialization;

/// Metadata shared by every resource event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventMeta {
    /// Identifier of the aggregate the event belongs to.
    pub aggregate_id: String,
    /// Timestamp captured when the event was constructed; never mutated.
    pub occurred_at: DateTime<Utc>,
    /// Position within the aggregate's event stream. Defaults to 1 and is
    /// overwritten by the aggregate when the event is appended.
    pub version: u64,
}

impl EventMeta {
    fn new(aggregate_id: impl Into<String>) -> Self {
        Self {
            aggregate_id: aggregate_id.into(),
            occurred_at: Utc::now(),
            version: 1,
        }
    }
}

/// Everything that can happen to a resource, recorded as replayable facts.
///
/// Events are immutable once constructed; replay logic matches on the
/// variants exhaustively so new lifecycle facts cannot be silently
/// ignored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ResourceEvent {
    /// A resource came into existence from a validated representation.
    CreatedFromFormat {
        meta: EventMeta,
        /// The representation exactly as supplied by the caller.
        data: String,
        content_type: RdfSerialization,
        /// Identifier extracted from the representation.
        extracted_id: String,
    },
    /// A URI was assigned to the resource.
    UriAssigned { meta: EventMeta, uri: String },
    /// The representation was replaced with new data.
    Updated {
        meta: EventMeta,
        /// The representation in effect before the update, kept for audit.
        previous_data: String,
        new_data: String,
        content_type: String,
    },
    /// The resource was logically deleted.
    Deleted { meta: EventMeta, uri: String },
}

impl ResourceEvent {
    /// Creates a creation event for a validated representation.
    #[must_use]
    pub fn created(
        aggregate_id: impl Into<String>,
        data: impl Into<String>,
        content_type: RdfSerialization,
        extracted_id: impl Into<String>,
    ) -> Self {
        Self::CreatedFromFormat {
            meta: EventMeta::new(aggregate_id),
            data: data.into(),
            content_type,
            extracted_id: extracted_id.into(),
        }
    }

    /// Creates a creation event for a JSON-LD representation.
    #[must_use]
    pub fn created_from_json_ld(
        aggregate_id: impl Into<String>,
        data: impl Into<String>,
        extracted_id: impl Into<String>,
    ) -> Self {
        Self::created(aggregate_id, data, RdfSerialization::JsonLd, extracted_id)
    }

    /// Creates a creation event for a Turtle representation.
    #[must_use]
    pub fn created_from_turtle(
        aggregate_id: impl Into<String>,
        data: impl Into<String>,
        extracted_id: impl Into<String>,
    ) -> Self {
        Self::created(aggregate_id, data, RdfSerialization::Turtle, extracted_id)
    }

    /// Creates a creation event for an RDF/XML representation.
    #[must_use]
    pub fn created_from_rdf_xml(
        aggregate_id: impl Into<String>,
        data: impl Into<String>,
        extracted_id: impl Into<String>,
    ) -> Self {
        Self::created(aggregate_id, data, RdfSerialization::RdfXml, extracted_id)
    }

    /// Creates a URI assignment event.
    #[must_use]
    pub fn uri_assigned(aggregate_id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::UriAssigned {
            meta: EventMeta::new(aggregate_id),
            uri: uri.into(),
        }
    }

    /// Creates an update event carrying the replaced representation.
    #[must_use]
    pub fn updated(
        aggregate_id: impl Into<String>,
        previous_data: impl Into<String>,
        new_data: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self::Updated {
            meta: EventMeta::new(aggregate_id),
            previous_data: previous_data.into(),
            new_data: new_data.into(),
            content_type: content_type.into(),
        }
    }

    /// Creates a deletion event capturing the resource's URI at the time.
    #[must_use]
    pub fn deleted(aggregate_id: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::Deleted {
            meta: EventMeta::new(aggregate_id),
            uri: uri.into(),
        }
    }

    /// Returns the stable event type identifier.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::CreatedFromFormat { .. } => "resource.created",
            Self::UriAssigned { .. } => "resource.uri_assigned",
            Self::Updated { .. } => "resource.updated",
            Self::Deleted { .. } => "resource.deleted",
        }
    }

    /// Returns the identifier of the owning aggregate.
    #[must_use]
    pub fn aggregate_id(&self) -> &str {
        &self.meta().aggregate_id
    }

    /// Returns the construction timestamp.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.meta().occurred_at
    }

    /// Returns the position within the aggregate's event stream.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.meta().version
    }

    /// Overwrites the stream position; called exactly once by the aggregate
    /// when the event is appended.
    pub(crate) fn set_version(&mut self, version: u64) {
        self.meta_mut().version = version;
    }

    pub(crate) fn meta(&self) -> &EventMeta {
        match self {
            Self::CreatedFromFormat { meta, .. }
            | Self::UriAssigned { meta, .. }
            | Self::Updated { meta, .. }
            | Self::Deleted { meta, .. } => meta,
        }
    }

    fn meta_mut(&mut self) -> &mut EventMeta {
        match self {
            Self::CreatedFromFormat { meta, .. }
            | Self::UriAssigned { meta, .. }
            | Self::Updated { meta, .. }
            | Self::Deleted { meta, .. } => meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceEvent;
    use crate::rdf::RdfSerialization;

    #[test]
    fn creation_helpers_fix_the_content_type() {
        let json = ResourceEvent::created_from_json_ld("https://a.example/n1", "{}", "x");
        let turtle = ResourceEvent::created_from_turtle("https://a.example/n1", ".", "x");
        let rdfxml = ResourceEvent::created_from_rdf_xml("https://a.example/n1", "<r/>", "x");

        for (event, expected) in [
            (&json, RdfSerialization::JsonLd),
            (&turtle, RdfSerialization::Turtle),
            (&rdfxml, RdfSerialization::RdfXml),
        ] {
            match event {
                ResourceEvent::CreatedFromFormat { content_type, .. } => {
                    assert_eq!(*content_type, expected);
                }
                other => panic!("expected a creation event, got {other:?}"),
            }
        }
    }

    #[test]
    fn events_carry_stable_type_identifiers() {
        assert_eq!(
            ResourceEvent::created_from_turtle("a", "d", "a").event_type(),
            "resource.created"
        );
        assert_eq!(
            ResourceEvent::uri_assigned("a", "https://a.example/x").event_type(),
            "resource.uri_assigned"
        );
        assert_eq!(
            ResourceEvent::updated("a", "old", "new", "text/turtle").event_type(),
            "resource.updated"
        );
        assert_eq!(
            ResourceEvent::deleted("a", "https://a.example/x").event_type(),
            "resource.deleted"
        );
    }

    #[test]
    fn new_events_default_to_version_one() {
        let mut event = ResourceEvent::uri_assigned("a", "https://a.example/x");
        assert_eq!(event.version(), 1);
        event.set_version(7);
        assert_eq!(event.version(), 7);
    }

    #[test]
    fn update_events_keep_the_replaced_representation() {
        let event = ResourceEvent::updated("a", "old body", "new body", "text/turtle");
        match event {
            ResourceEvent::Updated {
                previous_data,
                new_data,
                ..
            } => {
                assert_eq!(previous_data, "old body");
                assert_eq!(new_data, "new body");
            }
            other => panic!("expected an update event, got {other:?}"),
        }
    }

    #[test]
    fn events_round_trip_through_json() {
        let event = ResourceEvent::created_from_json_ld(
            "https://a.example/n1",
            r#"{"@id": "https://a.example/n1"}"#,
            "https://a.example/n1",
        );
        let encoded = serde_json::to_string(&event).expect("serializable");
        assert!(encoded.contains("application/ld+json"));
        let decoded: ResourceEvent = serde_json::from_str(&encoded).expect("deserializable");
        assert_eq!(decoded, event);
    }
}
