#![forbid(unsafe_code)]

//! Row configuration.

use std::time::Duration;

/// User-facing strings the row hands to placeholders and notifications.
///
/// Label resource loading is the embedding context's concern; this struct
/// only carries the resolved strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowLabels {
    /// Placeholder for the narrowed service input.
    pub select_service: String,
    /// Placeholder for the narrowed engagement input.
    pub select_engagement: String,
    /// Toast title after a successful delete.
    pub success: String,
    /// Toast message after a successful delete.
    pub record_deleted: String,
}

impl Default for RowLabels {
    fn default() -> Self {
        Self {
            select_service: "Select service".into(),
            select_engagement: "Select engagement".into(),
            success: "Success".into(),
            record_deleted: "Record deleted".into(),
        }
    }
}

/// Configuration for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowConfig {
    /// Quiet period required before a pending autosave fires.
    pub autosave_delay: Duration,
    /// Payload key carrying the record identifier on updates.
    pub record_id_key: String,
    /// User-facing strings.
    pub labels: RowLabels,
}

impl Default for RowConfig {
    fn default() -> Self {
        Self {
            autosave_delay: Duration::from_millis(1000),
            record_id_key: "Id".into(),
            labels: RowLabels::default(),
        }
    }
}

impl RowConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the autosave delay (builder).
    pub fn autosave_delay(mut self, delay: Duration) -> Self {
        self.autosave_delay = delay;
        self
    }

    /// Set the record-identifier payload key (builder).
    pub fn record_id_key(mut self, key: impl Into<String>) -> Self {
        self.record_id_key = key.into();
        self
    }

    /// Set the label strings (builder).
    pub fn labels(mut self, labels: RowLabels) -> Self {
        self.labels = labels;
        self
    }
}
