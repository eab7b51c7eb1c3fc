//! Per-step form modules.
//!
//! Every step is backed by a [`StepForm`]: it describes its fields, validates
//! a whole payload, and applies single field edits through the pure
//! [`StepForm::on_field_change`].

mod credentials;
mod person_profile;
mod role_selection;
mod shop_category;
mod shop_profile;

pub use credentials::CredentialsForm;
pub use person_profile::{PersonProfileForm, GENDERS};
pub use role_selection::{RoleSelectionForm, ROLE_FIELD};
pub use shop_category::{ShopCategoryForm, SHOP_CATEGORIES};
pub use shop_profile::ShopProfileForm;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::role::RegistrationRole;
use super::step::{StepKey, StepPayload};
use super::validation::ValidationReport;

/// How a field is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InputKind {
    Text,
    TextArea,
    Date,
    Phone,
    Email,
    Password,
    /// Native single choice (radio group).
    Choice(&'static [&'static str]),
    /// Custom dropdown list, not a native select.
    Dropdown(&'static [&'static str]),
}

/// Static description of one form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub input: InputKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, input: InputKind) -> Self {
        Self { name, input }
    }

    pub fn label_key(&self, namespace: &str) -> String {
        format!("signup.{namespace}.{}.label", self.name)
    }

    pub fn placeholder_key(&self, namespace: &str) -> String {
        format!("signup.{namespace}.{}.placeholder", self.name)
    }

    /// Translation key for one option of a choice or dropdown field.
    pub fn option_key(&self, namespace: &str, option: &str) -> String {
        format!("signup.{namespace}.{}.options.{option}", self.name)
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self.input {
            InputKind::Choice(options) | InputKind::Dropdown(options) => options,
            _ => &[],
        }
    }
}

/// Outcome of one field edit: the updated payload and its fresh validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub payload: StepPayload,
    pub report: ValidationReport,
}

impl FieldChange {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

/// Facts the forms need from outside the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormContext {
    pub today: NaiveDate,
}

impl FormContext {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

/// Common capability set of the step forms.
pub trait StepForm: Send + Sync {
    fn kind(&self) -> FormKind;

    fn fields(&self) -> &'static [FieldSpec];

    fn validate(&self, payload: &StepPayload) -> ValidationReport;

    /// Applies one edit and re-validates the whole step.
    ///
    /// Unknown field names are ignored: the payload is returned unchanged
    /// (but still validated).
    fn on_field_change(&self, payload: &StepPayload, field: &str, value: &str) -> FieldChange {
        let mut payload = payload.clone();
        if self.fields().iter().any(|spec| spec.name == field) {
            payload.set(field, value);
        }
        let report = self.validate(&payload);
        FieldChange { payload, report }
    }

    fn namespace(&self) -> &'static str {
        self.kind().namespace()
    }
}

/// Which concrete form backs a step for a given role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    RoleSelection,
    PersonProfile,
    ShopProfile,
    ShopCategory,
    Credentials,
}

impl FormKind {
    /// Form of `step` under `role`, `None` when the step does not exist for it.
    ///
    /// Without a role the non-shop layout applies.
    pub fn for_step(step: StepKey, role: Option<RegistrationRole>) -> Option<FormKind> {
        let shop = role.map(|r| r.is_shop()).unwrap_or(false);
        match step {
            StepKey::Step1 => Some(FormKind::RoleSelection),
            StepKey::Step2 if shop => Some(FormKind::ShopProfile),
            StepKey::Step2 => Some(FormKind::PersonProfile),
            StepKey::Step3 if shop => Some(FormKind::ShopCategory),
            StepKey::Step3 => None,
            StepKey::Step4 => Some(FormKind::Credentials),
        }
    }

    /// Translation namespace, keyed by step name.
    pub fn namespace(&self) -> &'static str {
        match self {
            FormKind::RoleSelection => "roleSelection",
            FormKind::PersonProfile => "personProfile",
            FormKind::ShopProfile => "shopProfile",
            FormKind::ShopCategory => "shopCategory",
            FormKind::Credentials => "credentials",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            FormKind::RoleSelection => role_selection::FIELDS,
            FormKind::PersonProfile => person_profile::FIELDS,
            FormKind::ShopProfile => shop_profile::FIELDS,
            FormKind::ShopCategory => shop_category::FIELDS,
            FormKind::Credentials => credentials::FIELDS,
        }
    }

    pub fn form(&self, ctx: &FormContext) -> Box<dyn StepForm> {
        match self {
            FormKind::RoleSelection => Box::new(RoleSelectionForm),
            FormKind::PersonProfile => Box::new(PersonProfileForm::new(ctx.today)),
            FormKind::ShopProfile => Box::new(ShopProfileForm),
            FormKind::ShopCategory => Box::new(ShopCategoryForm),
            FormKind::Credentials => Box::new(CredentialsForm),
        }
    }
}
