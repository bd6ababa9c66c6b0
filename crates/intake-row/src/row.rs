#![forbid(unsafe_code)]

//! The delivery row: cascade state machine and record lifecycle.
//!
//! A row is one independent instance of the form, embedded in a list
//! managed by an external context. It owns its field set, its pending
//! edits, and its session state exclusively; collaborators are reached
//! through `Arc<dyn Trait>` seams and every blocking call runs as a
//! [`Cmd::task`] whose completion re-enters [`DeliveryRow::update`].
//!
//! Cascade order: identity → engagement → service. Each step reshapes the
//! field set (options, enablement, visibility) for the next; any edit to
//! an enabled plain field schedules a debounced autosave.

use std::collections::VecDeque;
use std::sync::Arc;

use serde_json::Value;

use intake_fields::{FieldRole, FieldSet, LookupResult, Payload, PendingEdits};
use intake_runtime::{Cmd, Model};

use crate::backend::{BackendError, OptionsSource, RecordId, RecordStore};
use crate::config::RowConfig;
use crate::error::RowError;
use crate::modal::ConfirmModal;
use crate::sink::{ErrorSink, NotificationSink, Severity};

/// Where the row stands in the dependent-selection cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CascadeState {
    /// No person chosen; the form is in its pre-lookup shape.
    #[default]
    NoContact,
    /// A lookup is in flight for the chosen person.
    LoadingOptions,
    /// The person has eligible programs; an engagement can be chosen.
    ContactResolved,
    /// The person has no eligible programs; the cascade is parked.
    NoEligiblePrograms,
    /// An engagement is chosen; the service options are narrowed to its
    /// program.
    EngagementChosen,
    /// A service is chosen; every field is open and autosave is armed.
    ServiceChosen,
}

/// The row's record lifecycle. The identifier is absent until the first
/// successful save and immutable from then until deletion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RowSession {
    /// No record exists yet.
    #[default]
    Unsaved,
    /// A record exists under this identifier.
    Saved(RecordId),
    /// The record (or the never-saved row) has been discarded.
    Deleted,
}

/// Messages driving the row.
#[derive(Debug)]
pub enum RowMsg {
    /// The identity field's selection changed. An empty sequence resets
    /// the cascade.
    IdentityChanged(Vec<String>),
    /// The eligible-options lookup finished.
    OptionsLoaded(Result<LookupResult, BackendError>),
    /// A narrowed (combo) selection was made.
    ComboSelected {
        /// The field the selection belongs to.
        api_name: String,
        /// The chosen value.
        value: String,
    },
    /// A plain field was edited.
    FieldEdited {
        /// The field the edit belongs to.
        api_name: String,
        /// The entered value.
        value: Value,
    },
    /// The debounce timer fired; submit the accumulated edits.
    AutosaveDue,
    /// The save call finished.
    SaveFinished(Result<RecordId, BackendError>),
    /// The user asked to delete the row.
    DeleteRequested,
    /// The user dismissed the confirmation dialog.
    DeleteCancelled,
    /// The user accepted the confirmation dialog.
    DeleteConfirmed,
    /// The delete call finished.
    DeleteFinished(Result<(), BackendError>),
}

/// Outbound events to the embedding context, drained via
/// [`DeliveryRow::take_signals`]. List re-rendering, focus management,
/// and aggregate error display happen out there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowSignal {
    /// A combo selection was accepted, normalized to a sequence.
    Select(Vec<String>),
    /// A submit is about to reach the record store.
    SaveStart,
    /// The submit finished, successfully or not.
    SaveEnd,
    /// The row should be removed from the list; carries the row's
    /// position.
    RowRemoved(usize),
}

/// The row's collaborators, grouped for construction.
pub struct RowContext {
    /// Resolves eligible options for a person.
    pub options: Arc<dyn OptionsSource>,
    /// Creates, updates, and deletes records.
    pub store: Arc<dyn RecordStore>,
    /// Receives user-facing toasts.
    pub notifier: Arc<dyn NotificationSink>,
    /// Receives every row failure.
    pub errors: Arc<dyn ErrorSink>,
    /// The embedding-owned confirmation dialog.
    pub modal: Arc<dyn ConfirmModal>,
}

/// One data-entry row.
pub struct DeliveryRow {
    index: usize,
    config: RowConfig,
    fields: FieldSet,
    cascade: CascadeState,
    /// Cascade state before the in-flight lookup, restored on failure.
    cascade_before_lookup: CascadeState,
    session: RowSession,
    pending: PendingEdits,
    lookup: Option<LookupResult>,
    no_programs: bool,
    target_program: Option<String>,
    signals: VecDeque<RowSignal>,
    ctx: RowContext,
}

impl DeliveryRow {
    /// Create a row at `index` over its own field set.
    pub fn new(index: usize, fields: FieldSet, ctx: RowContext, config: RowConfig) -> Self {
        Self {
            index,
            config,
            fields,
            cascade: CascadeState::NoContact,
            cascade_before_lookup: CascadeState::NoContact,
            session: RowSession::Unsaved,
            pending: PendingEdits::new(),
            lookup: None,
            no_programs: false,
            target_program: None,
            signals: VecDeque::new(),
            ctx,
        }
    }

    /// The row's position in the embedding list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current cascade state.
    pub fn cascade(&self) -> CascadeState {
        self.cascade
    }

    /// Current session state.
    pub fn session(&self) -> &RowSession {
        &self.session
    }

    /// The field collection, for rendering.
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Edits accumulated since the last engagement change.
    pub fn pending_edits(&self) -> &PendingEdits {
        &self.pending
    }

    /// Drain the queued outbound signals, oldest first.
    pub fn take_signals(&mut self) -> Vec<RowSignal> {
        self.signals.drain(..).collect()
    }

    fn start_lookup(&mut self, person_id: String) -> Cmd<RowMsg> {
        // A re-selection during an in-flight lookup keeps the original
        // pre-attempt state for failure recovery.
        if self.cascade != CascadeState::LoadingOptions {
            self.cascade_before_lookup = self.cascade;
        }
        self.cascade = CascadeState::LoadingOptions;
        tracing::debug!(target: "intake.row", index = self.index, %person_id, "options lookup started");
        let source = Arc::clone(&self.ctx.options);
        Cmd::task(move || Some(RowMsg::OptionsLoaded(source.lookup_options(&person_id))))
    }

    fn apply_lookup(&mut self, result: LookupResult) {
        self.no_programs = !result.has_eligible_programs();
        self.fields.populate_cascade(
            &result,
            self.no_programs,
            &self.config.labels.select_service,
            &self.config.labels.select_engagement,
        );
        self.lookup = Some(result);
        self.cascade = if self.no_programs {
            CascadeState::NoEligiblePrograms
        } else {
            CascadeState::ContactResolved
        };
        tracing::debug!(
            target: "intake.row",
            index = self.index,
            state = ?self.cascade,
            "options lookup applied"
        );
    }

    fn reset_contact(&mut self) {
        self.fields.clear_filtered();
        self.pending.clear();
        self.lookup = None;
        self.no_programs = false;
        self.target_program = None;
        self.cascade = CascadeState::NoContact;
        self.cascade_before_lookup = CascadeState::NoContact;
        tracing::debug!(target: "intake.row", index = self.index, "contact cleared");
    }

    fn choose_engagement(&mut self, value: &str) {
        // Stale-program guard: offerings chosen under the previous
        // program must not be resubmitted under the new one.
        self.pending.clear();
        self.target_program = self
            .lookup
            .as_ref()
            .and_then(|l| l.program_for_engagement(value))
            .map(str::to_string);
        let narrowed = self
            .lookup
            .as_ref()
            .map(|l| l.services_for_program(self.target_program.as_deref()))
            .unwrap_or_default();
        self.fields.narrow_services(narrowed);
        self.cascade = CascadeState::EngagementChosen;
        tracing::debug!(
            target: "intake.row",
            index = self.index,
            program = self.target_program.as_deref().unwrap_or(""),
            "engagement chosen"
        );
    }

    fn submit(&mut self) -> Cmd<RowMsg> {
        let mut payload = Payload::new();
        if let RowSession::Saved(id) = &self.session {
            payload.insert(self.config.record_id_key.clone(), Value::String(id.clone()));
        }
        self.pending.merge_into(&mut payload);
        self.signals.push_back(RowSignal::SaveStart);
        tracing::debug!(
            target: "intake.row",
            index = self.index,
            fields = payload.len(),
            "submit started"
        );
        let store = Arc::clone(&self.ctx.store);
        Cmd::task(move || Some(RowMsg::SaveFinished(store.save(&payload))))
    }

    fn schedule_autosave(&self) -> Cmd<RowMsg> {
        Cmd::debounce(self.config.autosave_delay, RowMsg::AutosaveDue)
    }

    fn report(&self, error: RowError) {
        tracing::warn!(target: "intake.row", index = self.index, %error, "row operation failed");
        self.ctx.errors.report(&error);
    }
}

impl Model for DeliveryRow {
    type Message = RowMsg;

    fn update(&mut self, msg: RowMsg) -> Cmd<RowMsg> {
        match msg {
            RowMsg::IdentityChanged(values) => match values.into_iter().next() {
                Some(person_id) => self.start_lookup(person_id),
                None => {
                    self.reset_contact();
                    Cmd::none()
                }
            },

            RowMsg::OptionsLoaded(Ok(result)) => {
                // Overlapping lookups are not cancelled; the last
                // completion to be processed wins.
                self.apply_lookup(result);
                Cmd::none()
            }
            RowMsg::OptionsLoaded(Err(cause)) => {
                self.cascade = self.cascade_before_lookup;
                self.report(RowError::Lookup(cause));
                Cmd::none()
            }

            RowMsg::ComboSelected { api_name, value } => {
                let role = match self.fields.get(&api_name) {
                    Some(field) => field.role,
                    // A selection for a field the form does not carry is a
                    // wiring problem, not a data error.
                    None => return Cmd::none(),
                };
                self.signals.push_back(RowSignal::Select(vec![value.clone()]));
                if role == FieldRole::Engagement {
                    self.choose_engagement(&value);
                }
                self.pending.insert(api_name, Value::String(value));
                if role == FieldRole::Service {
                    self.fields.enable_editable();
                    self.cascade = CascadeState::ServiceChosen;
                    return self.schedule_autosave();
                }
                Cmd::none()
            }

            RowMsg::FieldEdited { api_name, value } => {
                match self.fields.get(&api_name) {
                    Some(field) if field.role != FieldRole::Identity && !field.disabled => {
                        self.pending.insert(api_name, value);
                        self.schedule_autosave()
                    }
                    // Disabled, identity-roled, or unknown: ignored.
                    _ => Cmd::none(),
                }
            }

            RowMsg::AutosaveDue => {
                if self.session == RowSession::Deleted {
                    return Cmd::none();
                }
                self.submit()
            }

            RowMsg::SaveFinished(Ok(id)) => {
                tracing::debug!(target: "intake.row", index = self.index, record_id = %id, "save succeeded");
                self.session = RowSession::Saved(id);
                self.signals.push_back(RowSignal::SaveEnd);
                self.fields.lock_identity();
                Cmd::none()
            }
            RowMsg::SaveFinished(Err(cause)) => {
                self.signals.push_back(RowSignal::SaveEnd);
                self.report(RowError::Save(cause));
                Cmd::none()
            }

            RowMsg::DeleteRequested => {
                self.ctx.modal.show();
                Cmd::none()
            }
            RowMsg::DeleteCancelled => {
                self.ctx.modal.hide();
                Cmd::none()
            }
            RowMsg::DeleteConfirmed => {
                self.ctx.modal.hide();
                match &self.session {
                    RowSession::Saved(id) => {
                        let id = id.clone();
                        let store = Arc::clone(&self.ctx.store);
                        Cmd::task(move || Some(RowMsg::DeleteFinished(store.delete_by_id(&id))))
                    }
                    RowSession::Unsaved => {
                        // Never saved: a purely local discard, no backend
                        // call, removal signalled synchronously.
                        self.session = RowSession::Deleted;
                        self.signals.push_back(RowSignal::RowRemoved(self.index));
                        Cmd::none()
                    }
                    RowSession::Deleted => Cmd::none(),
                }
            }
            RowMsg::DeleteFinished(Ok(())) => {
                tracing::debug!(target: "intake.row", index = self.index, "delete succeeded");
                self.session = RowSession::Deleted;
                self.ctx.notifier.notify(
                    &self.config.labels.success,
                    &self.config.labels.record_deleted,
                    Severity::Success,
                );
                self.signals.push_back(RowSignal::RowRemoved(self.index));
                Cmd::none()
            }
            RowMsg::DeleteFinished(Err(cause)) => {
                self.report(RowError::Delete(cause));
                Cmd::none()
            }
        }
    }
}
