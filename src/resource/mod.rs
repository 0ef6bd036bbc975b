//! Event-sourced resource domain.
//!
//! The module keeps the lifecycle of a linked-data resource as replayable
//! facts: the aggregate root exposes fluent, error-accumulating operations
//! and derives its observable state purely from applied events, while the
//! event set carries everything a persistence collaborator needs to store
//! and replay a stream.

pub mod aggregate;
pub mod events;

pub use aggregate::{Resource, ResourceError};
pub use events::{EventMeta, ResourceEvent};
