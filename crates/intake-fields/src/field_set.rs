#![forbid(unsafe_code)]

//! The row's owned, ordered collection of field descriptors.

use thiserror::Error;

use crate::descriptor::{FieldDescriptor, FieldRole, OptionItem};
use crate::lookup::LookupResult;

/// Construction-time invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldSetError {
    /// No descriptor carries the identity role.
    #[error("field set has no identity descriptor")]
    MissingIdentity,
    /// More than one descriptor carries the same role-tagged role.
    #[error("field set has more than one {0:?} descriptor")]
    DuplicateRole(FieldRole),
    /// Two descriptors share an `api_name`.
    #[error("duplicate field `{0}` in field set")]
    DuplicateField(String),
    /// Exactly one of the engagement/service pair is present.
    #[error("engagement and service descriptors must be configured together")]
    HalfCascade,
}

/// An ordered field collection with the semantic mutations the cascade
/// needs.
///
/// The set owns an independently-allocated copy of its descriptors from
/// construction; callers hand descriptors over by value and nothing
/// upstream can alias them afterwards.
///
/// Invariants, checked by [`FieldSet::new`]:
/// - exactly one [`FieldRole::Identity`] descriptor,
/// - at most one [`FieldRole::Engagement`] and one [`FieldRole::Service`]
///   descriptor, present together or absent together,
/// - `api_name` unique across the set.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSet {
    fields: Vec<FieldDescriptor>,
}

impl FieldSet {
    /// Validate and take ownership of `fields`.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, FieldSetError> {
        let mut identities = 0usize;
        let mut engagements = 0usize;
        let mut services = 0usize;
        for (i, field) in fields.iter().enumerate() {
            if fields[..i].iter().any(|f| f.api_name == field.api_name) {
                return Err(FieldSetError::DuplicateField(field.api_name.clone()));
            }
            match field.role {
                FieldRole::Identity => identities += 1,
                FieldRole::Engagement => engagements += 1,
                FieldRole::Service => services += 1,
                FieldRole::Plain => {}
            }
        }
        if identities == 0 {
            return Err(FieldSetError::MissingIdentity);
        }
        if identities > 1 {
            return Err(FieldSetError::DuplicateRole(FieldRole::Identity));
        }
        if engagements > 1 {
            return Err(FieldSetError::DuplicateRole(FieldRole::Engagement));
        }
        if services > 1 {
            return Err(FieldSetError::DuplicateRole(FieldRole::Service));
        }
        if (engagements == 1) != (services == 1) {
            return Err(FieldSetError::HalfCascade);
        }
        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Descriptors in display order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// The descriptor named `api_name`, if present.
    pub fn get(&self, api_name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.api_name == api_name)
    }

    /// The identity descriptor (guaranteed by construction).
    pub fn identity(&self) -> &FieldDescriptor {
        self.role(FieldRole::Identity)
            .expect("validated at construction")
    }

    /// The engagement descriptor, if the form cascades.
    pub fn engagement(&self) -> Option<&FieldDescriptor> {
        self.role(FieldRole::Engagement)
    }

    /// The service descriptor, if the form cascades.
    pub fn service(&self) -> Option<&FieldDescriptor> {
        self.role(FieldRole::Service)
    }

    fn role(&self, role: FieldRole) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.role == role)
    }

    fn role_mut(&mut self, role: FieldRole) -> Option<&mut FieldDescriptor> {
        self.fields.iter_mut().find(|f| f.role == role)
    }

    /// Repopulate the cascade after a successful lookup.
    ///
    /// The service descriptor receives the full services list but stays
    /// disabled until an engagement narrows it; the engagement descriptor
    /// receives the engagements list and is enabled unless the person has
    /// no eligible programs; every plain descriptor is disabled until a
    /// service is chosen. The identity descriptor is untouched.
    pub fn populate_cascade(
        &mut self,
        lookup: &LookupResult,
        no_programs: bool,
        service_placeholder: &str,
        engagement_placeholder: &str,
    ) {
        for field in &mut self.fields {
            match field.role {
                FieldRole::Service => {
                    field.show_filtered_input = true;
                    field.options = lookup.services.clone();
                    field.placeholder = service_placeholder.to_string();
                    field.disabled = true;
                }
                FieldRole::Engagement => {
                    field.show_filtered_input = true;
                    field.options = lookup.engagements.clone();
                    field.placeholder = engagement_placeholder.to_string();
                    field.disabled = no_programs;
                }
                FieldRole::Plain => field.disabled = true,
                FieldRole::Identity => {}
            }
        }
    }

    /// Narrow the service options to one program's subset and open the
    /// service field for selection; plain fields stay locked until a
    /// service is chosen.
    pub fn narrow_services(&mut self, options: Vec<OptionItem>) {
        for field in &mut self.fields {
            match field.role {
                FieldRole::Service => {
                    field.disabled = false;
                    field.options = options.clone();
                }
                FieldRole::Plain => field.disabled = true,
                FieldRole::Identity | FieldRole::Engagement => {}
            }
        }
    }

    /// Open every non-identity field for direct edit.
    ///
    /// Identity enablement is governed solely by
    /// [`lock_identity`](FieldSet::lock_identity), so a cascade can never
    /// undo the post-save lock.
    pub fn enable_editable(&mut self) {
        for field in &mut self.fields {
            if field.role != FieldRole::Identity {
                field.disabled = false;
            }
        }
    }

    /// Permanently disable the identity field (until the record is
    /// deleted).
    pub fn lock_identity(&mut self) {
        if let Some(identity) = self.role_mut(FieldRole::Identity) {
            identity.disabled = true;
        }
    }

    /// Hide every narrowed input, returning the form to its pre-lookup
    /// shape.
    pub fn clear_filtered(&mut self) {
        for field in &mut self.fields {
            field.show_filtered_input = false;
        }
    }
}
