#![forbid(unsafe_code)]

//! Unsaved edits awaiting the next submit.

use serde_json::Value;

/// The submit payload shape: attribute name to value.
pub type Payload = serde_json::Map<String, Value>;

/// User-entered values accumulated between lookups.
///
/// Edits are keyed by the field's `api_name` and flushed wholesale into a
/// submit payload. The whole map is cleared whenever the engagement
/// selection changes, so offerings chosen under one program are never
/// resubmitted under another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingEdits {
    values: Payload,
}

impl PendingEdits {
    /// Create an empty edit set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value for `api_name`, replacing any earlier edit.
    pub fn insert(&mut self, api_name: impl Into<String>, value: Value) {
        self.values.insert(api_name.into(), value);
    }

    /// The recorded value for `api_name`, if any.
    pub fn get(&self, api_name: &str) -> Option<&Value> {
        self.values.get(api_name)
    }

    /// Drop every recorded edit.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Copy every edit into `payload`, overwriting colliding keys.
    pub fn merge_into(&self, payload: &mut Payload) {
        for (key, value) in &self.values {
            payload.insert(key.clone(), value.clone());
        }
    }
}
