#![forbid(unsafe_code)]

//! Notification and error sinks.
//!
//! Fire-and-forget surfaces owned by the embedding context; the row never
//! relies on a return value from either.

use crate::error::RowError;

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Receives user-facing toast notifications.
pub trait NotificationSink: Send + Sync + 'static {
    /// Show a notification. Fire-and-forget.
    fn notify(&self, title: &str, message: &str, severity: Severity);
}

/// Receives every row failure. One typed channel: all lookup, save, and
/// delete failures pass through here and nowhere else.
pub trait ErrorSink: Send + Sync + 'static {
    /// Report a failure. Fire-and-forget.
    fn report(&self, error: &RowError);
}
