#![forbid(unsafe_code)]

//! Coalescing delay timers.
//!
//! A debounce slot holds at most one pending timer. Arming it again
//! cancels the previous timer and restarts the delay, so a burst of
//! triggers collapses into a single delivery `delay` after the last one.
//! Cancelling (or dropping the owner) wakes the timer thread immediately
//! and nothing is delivered.

use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::effect;

/// Signal a timer thread polls while it waits out the delay.
#[derive(Clone)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

/// Control handle that cancels the paired [`StopSignal`].
pub struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    /// Create a signal/trigger pair.
    pub fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        (
            Self {
                inner: Arc::clone(&inner),
            },
            StopTrigger { inner },
        )
    }

    /// Whether the trigger has fired.
    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        *lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until either the trigger fires or `duration` elapses.
    ///
    /// Returns `true` if stopped, `false` if the full delay ran out.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        if *stopped {
            return true;
        }
        let (guard, _result) = cvar
            .wait_timeout(stopped, duration)
            .unwrap_or_else(|e| e.into_inner());
        stopped = guard;
        *stopped
    }
}

impl StopTrigger {
    /// Fire the signal, waking any pending `wait_timeout`.
    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        cvar.notify_all();
    }
}

/// One pending-timer slot.
///
/// Owned by a [`Program`](crate::Program) (one per row) or wrapped by a
/// [`Debouncer`]. At most one timer is pending at a time; scheduling
/// supersedes the previous timer rather than queueing behind it.
#[derive(Default)]
pub(crate) struct DebounceSlot {
    pending: Option<StopTrigger>,
}

impl DebounceSlot {
    /// Cancel any pending timer and arm a new one that sends `msg` through
    /// `sender` after `delay`.
    ///
    /// Returns the timer thread's handle so callers can join it when
    /// settling.
    pub(crate) fn schedule<M: Send + 'static>(
        &mut self,
        delay: Duration,
        msg: M,
        sender: mpsc::Sender<M>,
    ) -> JoinHandle<()> {
        self.cancel();
        let (signal, trigger) = StopSignal::new();
        self.pending = Some(trigger);
        thread::spawn(move || {
            if signal.wait_timeout(delay) {
                effect::record_debounce_superseded();
            } else {
                effect::record_debounce_fired();
                let _ = sender.send(msg);
            }
        })
    }

    /// Cancel the pending timer, if any. The timer thread wakes and exits
    /// without delivering.
    pub(crate) fn cancel(&mut self) {
        if let Some(trigger) = self.pending.take() {
            trigger.stop();
        }
    }
}

impl Drop for DebounceSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A standalone coalescing delay wrapper.
///
/// Wraps a message factory and a channel: every [`trigger`](Self::trigger)
/// cancels the previously scheduled delivery and schedules a new one
/// `delay` after the latest call. At most one delivery per quiescent
/// period; nothing is delivered before `delay` elapses with no further
/// triggers. Dropping the debouncer cancels the pending timer, so no
/// delivery can outlive its owner.
pub struct Debouncer<M: Send + 'static> {
    delay: Duration,
    sender: mpsc::Sender<M>,
    make_msg: Box<dyn Fn() -> M + Send + Sync>,
    slot: DebounceSlot,
}

impl<M: Send + 'static> Debouncer<M> {
    /// Wrap `make_msg` with a coalescing `delay`, delivering into `sender`.
    pub fn new(
        delay: Duration,
        sender: mpsc::Sender<M>,
        make_msg: impl Fn() -> M + Send + Sync + 'static,
    ) -> Self {
        Self {
            delay,
            sender,
            make_msg: Box::new(make_msg),
            slot: DebounceSlot::default(),
        }
    }

    /// Restart the delay; the wrapped message is delivered `delay` after
    /// the most recent trigger.
    pub fn trigger(&mut self) {
        let msg = (self.make_msg)();
        let _ = self.slot.schedule(self.delay, msg, self.sender.clone());
    }

    /// Cancel the pending delivery, if any.
    pub fn cancel(&mut self) {
        self.slot.cancel();
    }
}
