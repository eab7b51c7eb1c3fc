use super::{FieldSpec, FormKind, InputKind, StepForm};
use crate::signup::role::RegistrationRole;
use crate::signup::step::StepPayload;
use crate::signup::validation::{FieldError, ValidationReport};

pub const ROLE_FIELD: &str = "role";

const ROLE_OPTIONS: &[&str] = &["customer", "organizer", "shop"];

pub(super) const FIELDS: &[FieldSpec] =
    &[FieldSpec::new(ROLE_FIELD, InputKind::Choice(ROLE_OPTIONS))];

/// Step 1: valid as soon as a known role is chosen.
pub struct RoleSelectionForm;

impl RoleSelectionForm {
    pub fn payload_for(role: RegistrationRole) -> StepPayload {
        StepPayload::new().with(ROLE_FIELD, role.as_str())
    }

    pub fn selected_role(payload: &StepPayload) -> Option<RegistrationRole> {
        payload.get(ROLE_FIELD).and_then(|value| value.parse().ok())
    }
}

impl StepForm for RoleSelectionForm {
    fn kind(&self) -> FormKind {
        FormKind::RoleSelection
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self, payload: &StepPayload) -> ValidationReport {
        let mut report = ValidationReport::new();
        let value = payload.value(ROLE_FIELD);
        let result = if value.trim().is_empty() {
            Err(FieldError::Required)
        } else if value.parse::<RegistrationRole>().is_err() {
            Err(FieldError::InvalidOption)
        } else {
            Ok(())
        };
        report.check(ROLE_FIELD, result);
        report
    }
}
