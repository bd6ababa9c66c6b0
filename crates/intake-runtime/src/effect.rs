#![forbid(unsafe_code)]

//! Effect counters and instrumentation.
//!
//! Monotonic counters for the runtime's side-effect traffic, plus
//! `tracing` debug events under the `intake.effect` target. Counters are
//! process-wide; they exist for dashboards and tests, not for control
//! flow.

use std::sync::atomic::{AtomicU64, Ordering};

static TASKS_SPAWNED: AtomicU64 = AtomicU64::new(0);
static TASKS_COMPLETED: AtomicU64 = AtomicU64::new(0);
static DEBOUNCE_FIRED: AtomicU64 = AtomicU64::new(0);
static DEBOUNCE_SUPERSEDED: AtomicU64 = AtomicU64::new(0);

/// Total task effects spawned (monotonic counter).
#[must_use]
pub fn tasks_spawned_total() -> u64 {
    TASKS_SPAWNED.load(Ordering::Relaxed)
}

/// Total task effects that ran to completion (monotonic counter).
#[must_use]
pub fn tasks_completed_total() -> u64 {
    TASKS_COMPLETED.load(Ordering::Relaxed)
}

/// Total debounce timers that fired (monotonic counter).
#[must_use]
pub fn debounce_fired_total() -> u64 {
    DEBOUNCE_FIRED.load(Ordering::Relaxed)
}

/// Total debounce timers cancelled by a newer trigger or teardown
/// (monotonic counter).
#[must_use]
pub fn debounce_superseded_total() -> u64 {
    DEBOUNCE_SUPERSEDED.load(Ordering::Relaxed)
}

/// Record a task effect being handed to a worker thread.
pub fn record_task_spawned() {
    TASKS_SPAWNED.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(target: "intake.effect", "task effect spawned");
}

/// Record a task effect finishing (whether or not it produced a message).
pub fn record_task_completed() {
    TASKS_COMPLETED.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(target: "intake.effect", "task effect completed");
}

/// Record a debounce timer firing after a full quiescent delay.
pub fn record_debounce_fired() {
    DEBOUNCE_FIRED.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(target: "intake.effect", "debounce timer fired");
}

/// Record a debounce timer being cancelled before it fired.
pub fn record_debounce_superseded() {
    DEBOUNCE_SUPERSEDED.fetch_add(1, Ordering::Relaxed);
    tracing::debug!(target: "intake.effect", "debounce timer superseded");
}
