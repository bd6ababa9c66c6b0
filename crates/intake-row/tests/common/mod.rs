#![allow(dead_code)]

//! Mock collaborators and a deterministic harness shared by the row
//! scenario tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use intake_fields::{
    FieldDescriptor, FieldRole, FieldSet, LookupResult, OptionItem, Payload, PendingEdits,
};
use intake_row::{
    BackendError, ConfirmModal, DeliveryRow, ErrorSink, NotificationSink, OptionsSource, RecordId,
    RecordStore, RowConfig, RowContext, RowError, RowMsg, Severity,
};
use intake_runtime::{Cmd, Model};

/// Options source fed from a queue; falls back to an empty result.
#[derive(Default)]
pub struct MockOptionsSource {
    pub results: Mutex<VecDeque<Result<LookupResult, BackendError>>>,
    pub calls: AtomicUsize,
}

impl MockOptionsSource {
    pub fn with(result: Result<LookupResult, BackendError>) -> Self {
        let source = Self::default();
        source.results.lock().unwrap().push_back(result);
        source
    }

    pub fn push(&self, result: Result<LookupResult, BackendError>) {
        self.results.lock().unwrap().push_back(result);
    }
}

impl OptionsSource for MockOptionsSource {
    fn lookup_options(&self, _person_id: &str) -> Result<LookupResult, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(LookupResult::default()))
    }
}

/// Record store that captures every payload and deletion.
#[derive(Default)]
pub struct MockRecordStore {
    pub save_results: Mutex<VecDeque<Result<RecordId, BackendError>>>,
    pub delete_results: Mutex<VecDeque<Result<(), BackendError>>>,
    pub saves: Mutex<Vec<Payload>>,
    pub deletes: Mutex<Vec<RecordId>>,
}

impl MockRecordStore {
    pub fn save_count(&self) -> usize {
        self.saves.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> Payload {
        self.saves.lock().unwrap().last().cloned().expect("a save")
    }

    pub fn queue_save(&self, result: Result<RecordId, BackendError>) {
        self.save_results.lock().unwrap().push_back(result);
    }

    pub fn queue_delete(&self, result: Result<(), BackendError>) {
        self.delete_results.lock().unwrap().push_back(result);
    }
}

impl RecordStore for MockRecordStore {
    fn save(&self, payload: &Payload) -> Result<RecordId, BackendError> {
        let mut saves = self.saves.lock().unwrap();
        saves.push(payload.clone());
        let fallback = Ok(format!("rec-{}", saves.len()));
        self.save_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(fallback)
    }

    fn delete_by_id(&self, id: &RecordId) -> Result<(), BackendError> {
        self.deletes.lock().unwrap().push(id.clone());
        self.delete_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

/// Notification sink that records every toast.
#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<(String, String, Severity)>>,
}

impl NotificationSink for RecordingNotifier {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        self.toasts
            .lock()
            .unwrap()
            .push((title.into(), message.into(), severity));
    }
}

/// Error sink that records every failure.
#[derive(Default)]
pub struct RecordingErrors {
    pub reported: Mutex<Vec<RowError>>,
}

impl RecordingErrors {
    pub fn count(&self) -> usize {
        self.reported.lock().unwrap().len()
    }
}

impl ErrorSink for RecordingErrors {
    fn report(&self, error: &RowError) {
        self.reported.lock().unwrap().push(error.clone());
    }
}

/// Modal that tracks visibility and call counts.
#[derive(Default)]
pub struct FlagModal {
    pub visible: AtomicBool,
    pub shows: AtomicUsize,
    pub hides: AtomicUsize,
}

impl ConfirmModal for FlagModal {
    fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
        self.shows.fetch_add(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
        self.hides.fetch_add(1, Ordering::SeqCst);
    }
}

/// Every collaborator, plus a context() view for row construction.
pub struct TestBed {
    pub options: Arc<MockOptionsSource>,
    pub store: Arc<MockRecordStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub errors: Arc<RecordingErrors>,
    pub modal: Arc<FlagModal>,
}

impl Default for TestBed {
    fn default() -> Self {
        Self {
            options: Arc::new(MockOptionsSource::default()),
            store: Arc::new(MockRecordStore::default()),
            notifier: Arc::new(RecordingNotifier::default()),
            errors: Arc::new(RecordingErrors::default()),
            modal: Arc::new(FlagModal::default()),
        }
    }
}

impl TestBed {
    pub fn context(&self) -> RowContext {
        RowContext {
            options: self.options.clone(),
            store: self.store.clone(),
            notifier: self.notifier.clone(),
            errors: self.errors.clone(),
            modal: self.modal.clone(),
        }
    }

    pub fn row(&self, index: usize) -> DeliveryRow {
        DeliveryRow::new(index, standard_fields(), self.context(), RowConfig::default())
    }
}

/// The field set the scenarios share: identity + cascade pair + two plain
/// fields.
pub fn standard_fields() -> FieldSet {
    FieldSet::new(vec![
        FieldDescriptor::new("Contact", "Contact", FieldRole::Identity),
        FieldDescriptor::new("Engagement", "Engagement", FieldRole::Engagement),
        FieldDescriptor::new("Service", "Service", FieldRole::Service),
        FieldDescriptor::new("Quantity", "Quantity", FieldRole::Plain),
        FieldDescriptor::new("Date", "Date", FieldRole::Plain),
    ])
    .unwrap()
}

/// Two programs, two services, two engagements.
pub fn standard_lookup() -> LookupResult {
    LookupResult::new(
        vec![
            OptionItem::new("S1", "Tutoring").program("P1"),
            OptionItem::new("S2", "Meals").program("P2"),
        ],
        vec![
            OptionItem::new("E1", "Eng 1").program("P1"),
            OptionItem::new("E2", "Eng 2").program("P2"),
        ],
    )
}

/// Drives a row deterministically on the test thread.
///
/// Tasks run inline; debounce commands park their message in a single
/// slot (a newer command supersedes the older one, mirroring the real
/// timer) until the test fires it explicitly with
/// [`fire_autosave`](Harness::fire_autosave).
pub struct Harness {
    pub row: DeliveryRow,
    pub pending_autosave: Option<RowMsg>,
}

impl Harness {
    pub fn new(row: DeliveryRow) -> Self {
        Self {
            row,
            pending_autosave: None,
        }
    }

    pub fn dispatch(&mut self, msg: RowMsg) {
        let cmd = self.row.update(msg);
        self.exec(cmd);
    }

    fn exec(&mut self, cmd: Cmd<RowMsg>) {
        match cmd {
            Cmd::None => {}
            Cmd::Msg(msg) => self.dispatch(msg),
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.exec(cmd);
                }
            }
            Cmd::Task(task) => {
                if let Some(msg) = task() {
                    self.dispatch(msg);
                }
            }
            Cmd::Debounce { msg, .. } => self.pending_autosave = Some(msg),
        }
    }

    /// Deliver the parked autosave message, as the timer would after a
    /// quiescent delay.
    pub fn fire_autosave(&mut self) {
        if let Some(msg) = self.pending_autosave.take() {
            self.dispatch(msg);
        }
    }

    /// Select a contact and run the lookup to completion.
    pub fn resolve_contact(&mut self, person_id: &str) {
        self.dispatch(RowMsg::IdentityChanged(vec![person_id.into()]));
    }

    pub fn select_combo(&mut self, api_name: &str, value: &str) {
        self.dispatch(RowMsg::ComboSelected {
            api_name: api_name.into(),
            value: value.into(),
        });
    }

    pub fn edit(&mut self, api_name: &str, value: serde_json::Value) {
        self.dispatch(RowMsg::FieldEdited {
            api_name: api_name.into(),
            value,
        });
    }

    pub fn pending(&self) -> &PendingEdits {
        self.row.pending_edits()
    }
}
