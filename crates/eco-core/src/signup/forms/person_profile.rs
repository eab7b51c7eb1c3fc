use chrono::NaiveDate;

use super::{FieldSpec, FormKind, InputKind, StepForm};
use crate::signup::step::StepPayload;
use crate::signup::validation::{self, ValidationReport};

pub const GENDERS: &[&str] = &["male", "female"];

pub const MIN_AGE: u32 = 13;

pub(super) const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("firstName", InputKind::Text),
    FieldSpec::new("lastName", InputKind::Text),
    FieldSpec::new("birthDate", InputKind::Date),
    FieldSpec::new("phoneNumber", InputKind::Phone),
    FieldSpec::new("gender", InputKind::Choice(GENDERS)),
    FieldSpec::new("address", InputKind::TextArea),
];

/// Step 2 for customers and organizers.
pub struct PersonProfileForm {
    today: NaiveDate,
}

impl PersonProfileForm {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl StepForm for PersonProfileForm {
    fn kind(&self) -> FormKind {
        FormKind::PersonProfile
    }

    fn fields(&self) -> &'static [FieldSpec] {
        FIELDS
    }

    fn validate(&self, payload: &StepPayload) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(
            "firstName",
            validation::person_name(payload.value("firstName"), 2, 30),
        );
        report.check(
            "lastName",
            validation::person_name(payload.value("lastName"), 2, 30),
        );
        report.check(
            "birthDate",
            validation::birth_date(payload.value("birthDate"), self.today, MIN_AGE),
        );
        report.check(
            "phoneNumber",
            validation::phone_number(payload.value("phoneNumber")),
        );
        report.check("gender", validation::one_of(payload.value("gender"), GENDERS));
        report.check(
            "address",
            validation::required_length(payload.value("address"), 5, 100),
        );
        report
    }
}
