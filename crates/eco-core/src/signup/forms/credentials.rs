use super::{FieldSpec, FormKind, InputKind, StepForm};
use crate::signup::step::StepPayload;
use crate::signup::validation::{self, FieldError, ValidationReport};

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("email", InputKind::Email),
    FieldSpec::new("password", InputKind::Password),
    FieldSpec::new("confirmPassword", InputKind::Password),
];

/// Final step: email, password policy and confirmation.
pub struct CredentialsForm;

impl StepForm for CredentialsForm {
    fn kind(&self) -> FormKind {
        FormKind::Credentials
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self, payload: &StepPayload) -> ValidationReport {
        let mut report = ValidationReport::new();
        let password = payload.value("password");
        let confirm = payload.value("confirmPassword");

        report.check("email", validation::email(payload.value("email")));
        report.check("password", validation::password_policy(password));

        let confirm_result = if confirm.is_empty() {
            Err(FieldError::Required)
        } else if confirm != password {
            Err(FieldError::Mismatch)
        } else {
            Ok(())
        };
        report.check("confirmPassword", confirm_result);
        report
    }
}
