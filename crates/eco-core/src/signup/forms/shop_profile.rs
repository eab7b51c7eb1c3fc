use super::{FieldSpec, FormKind, InputKind, StepForm};
use crate::signup::step::StepPayload;
use crate::signup::validation::{self, ValidationReport};

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", InputKind::Text),
    FieldSpec::new("description", InputKind::TextArea),
    FieldSpec::new("phoneNumber", InputKind::Phone),
    FieldSpec::new("hotline", InputKind::Phone),
];

/// Step 2 for shops and restaurants.
pub struct ShopProfileForm;

impl StepForm for ShopProfileForm {
    fn kind(&self) -> FormKind {
        FormKind::ShopProfile
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self, payload: &StepPayload) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(
            "name",
            validation::required_length(payload.value("name"), 3, 50),
        );
        report.check(
            "description",
            validation::required_length(payload.value("description"), 10, 500),
        );
        report.check(
            "phoneNumber",
            validation::phone_number(payload.value("phoneNumber")),
        );
        report.check("hotline", validation::digits(payload.value("hotline"), 3, 11));
        report
    }
}
