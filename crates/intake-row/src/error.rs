#![forbid(unsafe_code)]

//! The row failure taxonomy.
//!
//! Every failure is recoverable and none is fatal to the row: the user
//! re-triggers the failed action (re-select, re-edit, re-confirm). There
//! is no automatic retry.

use thiserror::Error;

use crate::backend::BackendError;

/// A failed collaborator call, routed to the error sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The eligible-options lookup failed. The cascade is left exactly as
    /// it was before the attempt; nothing is partially populated.
    #[error("eligible-options lookup failed: {0}")]
    Lookup(#[source] BackendError),
    /// The save failed. The session does not advance and the identity
    /// field stays unlocked; the row remains editable and resubmittable.
    #[error("record save failed: {0}")]
    Save(#[source] BackendError),
    /// The delete failed. The stored identifier is kept and the row stays
    /// intact.
    #[error("record delete failed: {0}")]
    Delete(#[source] BackendError),
}
