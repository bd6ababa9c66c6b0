#![forbid(unsafe_code)]

//! Dependent-selection data-entry row with debounced autosave.
//!
//! One [`DeliveryRow`] links a person to a service offering under an
//! engagement program. Choosing the person fetches their eligible options;
//! choosing an engagement narrows the service options to that program;
//! choosing a service unlocks the rest of the form and starts the
//! autosave cycle. Deletion is gated behind an embedding-owned
//! confirmation modal, and a successful first save locks the identity
//! field for the life of the record.
//!
//! The row is headless: it implements [`intake_runtime::Model`], reaches
//! its collaborators ([`OptionsSource`], [`RecordStore`], the sinks and
//! the modal) through `Arc<dyn Trait>` seams, and reports back to the
//! embedding context through queued [`RowSignal`]s.
//!
//! # Wiring
//!
//! ```ignore
//! let mut program = Program::new(DeliveryRow::new(index, fields, ctx, config));
//!
//! // The embedding renders picklists from the row's field set and feeds
//! // accepted selections back as messages.
//! let mut engagements = Picklist::new(
//!     program.model().fields().engagement().unwrap().options.clone(),
//!     SelectMode::Single,
//! );
//! if let Some(event) = engagements.select(&clicked_value) {
//!     for value in event.values {
//!         program.dispatch(RowMsg::ComboSelected {
//!             api_name: "Engagement".into(),
//!             value,
//!         });
//!     }
//! }
//! program.drain();
//! for signal in program.model_mut().take_signals() {
//!     // SaveStart / SaveEnd / RowRemoved(index) → list bookkeeping.
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod modal;
pub mod picklist;
pub mod row;
pub mod sink;

pub use backend::{BackendError, OptionsSource, RecordId, RecordStore};
pub use config::{RowConfig, RowLabels};
pub use error::RowError;
pub use modal::ConfirmModal;
pub use picklist::{Picklist, SelectMode, SelectionEvent};
pub use row::{CascadeState, DeliveryRow, RowContext, RowMsg, RowSession, RowSignal};
pub use sink::{ErrorSink, NotificationSink, Severity};
