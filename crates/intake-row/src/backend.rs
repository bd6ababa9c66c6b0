#![forbid(unsafe_code)]

//! Remote collaborator seams: the options lookup and the record store.
//!
//! Both traits are called from worker-thread task closures, never from the
//! update loop itself, so implementations may block.

use intake_fields::{LookupResult, Payload};
use thiserror::Error;

/// Identifier assigned by the record store on first save.
pub type RecordId = String;

/// The one transport error collaborators return. The row wraps it into
/// [`RowError`](crate::RowError) before reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    /// Create an error from any displayable cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Resolves a person's eligible services and engagements.
pub trait OptionsSource: Send + Sync + 'static {
    /// Fetch the eligible options for `person_id`. May block; may fail.
    fn lookup_options(&self, person_id: &str) -> Result<LookupResult, BackendError>;
}

/// Creates, updates, and deletes the underlying records.
pub trait RecordStore: Send + Sync + 'static {
    /// Persist `payload`. When the payload carries the record-identifier
    /// entry the store updates that record; otherwise it creates one.
    /// Returns the record's identifier either way.
    fn save(&self, payload: &Payload) -> Result<RecordId, BackendError>;

    /// Delete the record named by `id`.
    fn delete_by_id(&self, id: &RecordId) -> Result<(), BackendError>;
}
