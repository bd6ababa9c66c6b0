#![forbid(unsafe_code)]

//! Single/multi select leaf widget state.
//!
//! The picklist owns a snapshot of its options and emits a normalized
//! [`SelectionEvent`] on every accepted selection: the current selection
//! as a sequence, even in single mode (a sequence of one or empty).

use intake_fields::OptionItem;

/// Selection semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// Radio semantics: the clicked entry becomes the selection, all
    /// others are deselected.
    #[default]
    Single,
    /// Toggle semantics: the clicked entry flips, others keep their state.
    Multi,
}

/// The normalized selection emitted after every accepted click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    /// Selected values in option order. Empty when nothing is selected.
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
struct Entry {
    option: OptionItem,
    selected: bool,
}

/// A single- or multi-select picklist.
#[derive(Debug, Clone, Default)]
pub struct Picklist {
    entries: Vec<Entry>,
    mode: SelectMode,
}

impl Picklist {
    /// Snapshot `options` into owned state with nothing selected.
    pub fn new(options: Vec<OptionItem>, mode: SelectMode) -> Self {
        Self {
            entries: options
                .into_iter()
                .map(|option| Entry {
                    option,
                    selected: false,
                })
                .collect(),
            mode,
        }
    }

    /// Replace the option snapshot. All selection state is cleared; the
    /// old entries' identities do not survive a source change.
    pub fn set_options(&mut self, options: Vec<OptionItem>) {
        *self = Self::new(options, self.mode);
    }

    /// The options in display order.
    pub fn options(&self) -> impl Iterator<Item = &OptionItem> {
        self.entries.iter().map(|e| &e.option)
    }

    /// The current selection as values, in option order.
    pub fn selection(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.option.value.clone())
            .collect()
    }

    /// Apply a click on `value`.
    ///
    /// Returns the selection event to emit, or `None` when `value` names
    /// no entry. Such a click indicates a wiring problem upstream and is
    /// ignored without a state change.
    pub fn select(&mut self, value: &str) -> Option<SelectionEvent> {
        if !self.entries.iter().any(|e| e.option.value == value) {
            return None;
        }
        match self.mode {
            SelectMode::Single => {
                for entry in &mut self.entries {
                    entry.selected = entry.option.value == value;
                }
            }
            SelectMode::Multi => {
                for entry in &mut self.entries {
                    if entry.option.value == value {
                        entry.selected = !entry.selected;
                    }
                }
            }
        }
        Some(SelectionEvent {
            values: self.selection(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<OptionItem> {
        vec![
            OptionItem::new("A", "Alpha"),
            OptionItem::new("B", "Beta"),
            OptionItem::new("C", "Gamma"),
        ]
    }

    #[test]
    fn single_mode_has_radio_semantics() {
        let mut list = Picklist::new(options(), SelectMode::Single);
        let event = list.select("A").unwrap();
        assert_eq!(event.values, ["A"]);
        let event = list.select("B").unwrap();
        assert_eq!(event.values, ["B"]);
        assert_eq!(list.selection(), ["B"]);
    }

    #[test]
    fn single_mode_always_emits_a_sequence() {
        let mut list = Picklist::new(options(), SelectMode::Single);
        let event = list.select("C").unwrap();
        assert_eq!(event.values.len(), 1);
    }

    #[test]
    fn multi_mode_toggles_only_the_target() {
        let mut list = Picklist::new(options(), SelectMode::Multi);
        list.select("A");
        let event = list.select("B").unwrap();
        assert_eq!(event.values, ["A", "B"]);

        // A second click on an already-selected entry deselects it.
        let event = list.select("A").unwrap();
        assert_eq!(event.values, ["B"]);
    }

    #[test]
    fn multi_mode_can_empty_the_selection() {
        let mut list = Picklist::new(options(), SelectMode::Multi);
        list.select("A");
        let event = list.select("A").unwrap();
        assert!(event.values.is_empty());
    }

    #[test]
    fn unknown_target_is_ignored() {
        let mut list = Picklist::new(options(), SelectMode::Single);
        list.select("A");
        assert!(list.select("Z").is_none());
        assert_eq!(list.selection(), ["A"]);
    }

    #[test]
    fn replacing_options_clears_the_selection() {
        let mut list = Picklist::new(options(), SelectMode::Single);
        list.select("A");
        list.set_options(vec![OptionItem::new("D", "Delta")]);
        assert!(list.selection().is_empty());
        assert_eq!(list.options().count(), 1);
    }

    #[test]
    fn empty_picklist_accepts_nothing() {
        let mut list = Picklist::new(Vec::new(), SelectMode::Multi);
        assert!(list.select("A").is_none());
    }
}
