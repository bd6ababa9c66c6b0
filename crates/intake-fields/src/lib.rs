#![forbid(unsafe_code)]

//! Field collection model for intake data-entry rows.
//!
//! A row edits an ordered collection of [`FieldDescriptor`]s, one per
//! persisted attribute. Three descriptors play special roles in the
//! dependent-selection cascade:
//!
//! - the **identity** field, whose value names the person driving the
//!   eligible-options lookup,
//! - the **engagement** field, whose selection narrows the service options
//!   to one program,
//! - the **service** field, whose selection unlocks the rest of the form
//!   and triggers the first autosave.
//!
//! [`FieldSet`] owns the collection and exposes the semantic mutations the
//! cascade needs; [`LookupResult`] carries a person's eligible options;
//! [`PendingEdits`] accumulates user-entered values between lookups and is
//! flushed wholesale into a submit payload.
//!
//! This crate is data only: no timers, no I/O, no collaborator calls.

pub mod descriptor;
pub mod field_set;
pub mod lookup;
pub mod pending;

pub use descriptor::{FieldDescriptor, FieldRole, OptionItem};
pub use field_set::{FieldSet, FieldSetError};
pub use lookup::LookupResult;
pub use pending::{Payload, PendingEdits};
