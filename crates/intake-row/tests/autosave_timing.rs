//! End-to-end: a row driven through the runtime, with real worker
//! threads and a real debounce timer.

mod common;

use std::time::{Duration, Instant};

use common::{TestBed, standard_fields, standard_lookup};
use intake_row::{CascadeState, DeliveryRow, RowConfig, RowMsg, RowSession};
use intake_runtime::Program;
use serde_json::json;

const DELAY: Duration = Duration::from_millis(40);

fn program(bed: &TestBed) -> Program<DeliveryRow> {
    let config = RowConfig::new().autosave_delay(DELAY);
    Program::new(DeliveryRow::new(0, standard_fields(), bed.context(), config))
}

#[test]
fn a_burst_of_edits_produces_exactly_one_save_after_the_delay() {
    let bed = TestBed::default();
    bed.options.push(Ok(standard_lookup()));
    let mut program = program(&bed);

    program.dispatch(RowMsg::IdentityChanged(vec!["003A".into()]));
    program.settle();
    assert_eq!(program.model().cascade(), CascadeState::ContactResolved);

    program.dispatch(RowMsg::ComboSelected {
        api_name: "Engagement".into(),
        value: "E1".into(),
    });
    program.dispatch(RowMsg::ComboSelected {
        api_name: "Service".into(),
        value: "S1".into(),
    });
    program.dispatch(RowMsg::FieldEdited {
        api_name: "Quantity".into(),
        value: json!(1),
    });
    program.dispatch(RowMsg::FieldEdited {
        api_name: "Quantity".into(),
        value: json!(2),
    });
    let last_edit = Instant::now();

    // Nothing may reach the store before the quiet period ends.
    program.drain();
    assert_eq!(bed.store.save_count(), 0);

    program.settle();
    assert!(last_edit.elapsed() >= DELAY);
    assert_eq!(bed.store.save_count(), 1);
    assert_eq!(
        bed.store.last_payload().get("Quantity"),
        Some(&json!(2))
    );
    assert_eq!(*program.model().session(), RowSession::Saved("rec-1".into()));
    assert!(program.model().fields().identity().disabled);
}

#[test]
fn teardown_with_a_pending_autosave_never_reaches_the_store() {
    let bed = TestBed::default();
    let mut program = program(&bed);

    program.dispatch(RowMsg::FieldEdited {
        api_name: "Quantity".into(),
        value: json!(7),
    });
    drop(program);

    std::thread::sleep(DELAY + Duration::from_millis(30));
    assert_eq!(bed.store.save_count(), 0);
}
