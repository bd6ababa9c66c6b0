#![forbid(unsafe_code)]

//! Field descriptors and selectable options.

use serde::{Deserialize, Serialize};

/// The role a field plays in the dependent-selection cascade.
///
/// Assigned once at construction. At most one `Engagement` and one
/// `Service` descriptor may exist per [`FieldSet`](crate::FieldSet), and
/// exactly one `Identity` descriptor must.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    /// Names the person whose eligible options drive the cascade.
    Identity,
    /// Selecting an engagement narrows the service options to one program.
    Engagement,
    /// Selecting a service unlocks the remaining fields and autosaves.
    Service,
    /// An ordinary editable attribute (default).
    #[default]
    Plain,
}

/// One selectable entry in a role-tagged descriptor's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    /// Stable value submitted when this entry is chosen.
    pub value: String,
    /// Human-readable label.
    pub label: String,
    /// Program this entry belongs to. Lookup-scoped entries always carry
    /// one; plain picklist entries may not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
}

impl OptionItem {
    /// Create an option with no program association.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            program: None,
        }
    }

    /// Set the owning program (builder).
    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }
}

/// One row per persisted attribute the form edits.
///
/// Insertion order within a [`FieldSet`](crate::FieldSet) is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Stable attribute identifier, unique within the field set.
    pub api_name: String,
    /// Human-readable label.
    pub label: String,
    /// Cascade role. See [`FieldRole`].
    pub role: FieldRole,
    /// Whether the field currently rejects input.
    pub disabled: bool,
    /// Whether the narrowed (lookup-backed) input is shown in place of the
    /// plain one.
    pub show_filtered_input: bool,
    /// Options for role-tagged descriptors; empty for plain fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionItem>,
    /// Placeholder text for the narrowed input.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,
}

impl FieldDescriptor {
    /// Create an enabled descriptor with no options.
    pub fn new(api_name: impl Into<String>, label: impl Into<String>, role: FieldRole) -> Self {
        Self {
            api_name: api_name.into(),
            label: label.into(),
            role,
            disabled: false,
            show_filtered_input: false,
            options: Vec::new(),
            placeholder: String::new(),
        }
    }

    /// Set the disabled flag (builder).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the placeholder text (builder).
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the option list (builder).
    pub fn options(mut self, options: Vec<OptionItem>) -> Self {
        self.options = options;
        self
    }

    /// Whether this descriptor carries a cascade role (engagement or
    /// service).
    pub fn is_cascading(&self) -> bool {
        matches!(self.role, FieldRole::Engagement | FieldRole::Service)
    }
}
