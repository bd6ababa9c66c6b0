#![forbid(unsafe_code)]

//! Eligible-options lookup results.

use serde::{Deserialize, Serialize};

use crate::descriptor::OptionItem;

/// The eligible services and engagements returned by the remote lookup for
/// one person.
///
/// Every service's `program` is expected to correspond to some engagement's
/// program; an empty `services` or `engagements` collection means the person
/// has no eligible programs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    /// Services the person may receive, across all of their programs.
    pub services: Vec<OptionItem>,
    /// Engagements (program enrollments) the person holds.
    pub engagements: Vec<OptionItem>,
}

impl LookupResult {
    /// Create a lookup result from the two collections.
    pub fn new(services: Vec<OptionItem>, engagements: Vec<OptionItem>) -> Self {
        Self {
            services,
            engagements,
        }
    }

    /// Whether the person has any eligible programs at all.
    pub fn has_eligible_programs(&self) -> bool {
        !self.services.is_empty() && !self.engagements.is_empty()
    }

    /// Resolve the program an engagement value belongs to.
    ///
    /// When duplicate engagement entries share a value, the *first* match
    /// wins. This is a documented policy, not an accident of iteration.
    pub fn program_for_engagement(&self, value: &str) -> Option<&str> {
        self.engagements
            .iter()
            .find(|e| e.value == value)
            .and_then(|e| e.program.as_deref())
    }

    /// The services belonging to `program`, in their original order.
    pub fn services_for_program(&self, program: Option<&str>) -> Vec<OptionItem> {
        self.services
            .iter()
            .filter(|s| s.program.as_deref() == program)
            .cloned()
            .collect()
    }
}
