//! Field rules shared by the step forms.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Exactly 11 ASCII digits.
    static ref PHONE_REGEX: Regex = Regex::new(r"^[0-9]{11}$").unwrap();

    static ref DIGITS_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();

    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Letters (any script), spaces, hyphens and apostrophes.
    static ref PERSON_NAME_REGEX: Regex = Regex::new(r"^[\p{L}][\p{L} '\-]*$").unwrap();

    static ref LOWERCASE_REGEX: Regex = Regex::new(r"[a-z]").unwrap();
    static ref UPPERCASE_REGEX: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref DIGIT_REGEX: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SPECIAL_REGEX: Regex = Regex::new(r"[^A-Za-z0-9\s]").unwrap();
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Why a single field was rejected.
///
/// Each variant maps to a translation key via [`FieldError::code`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "camelCase")]
pub enum FieldError {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidFormat,
    InvalidOption,
    InvalidDate,
    FutureDate,
    TooYoung { min_age: u32 },
    WeakPassword,
    Mismatch,
}

impl FieldError {
    pub fn code(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::TooShort { .. } => "tooShort",
            FieldError::TooLong { .. } => "tooLong",
            FieldError::InvalidFormat => "invalidFormat",
            FieldError::InvalidOption => "invalidOption",
            FieldError::InvalidDate => "invalidDate",
            FieldError::FutureDate => "futureDate",
            FieldError::TooYoung { .. } => "tooYoung",
            FieldError::WeakPassword => "weakPassword",
            FieldError::Mismatch => "mismatch",
        }
    }

    /// Translation key, e.g. `signup.credentials.errors.confirmPassword.mismatch`.
    pub fn message_key(&self, namespace: &str, field: &str) -> String {
        format!("signup.{namespace}.errors.{field}.{}", self.code())
    }

    /// Fills `{min}`, `{max}` and `{minAge}` placeholders in a translated template.
    pub fn interpolate(&self, template: &str) -> String {
        match self {
            FieldError::TooShort { min } => template.replace("{min}", &min.to_string()),
            FieldError::TooLong { max } => template.replace("{max}", &max.to_string()),
            FieldError::TooYoung { min_age } => {
                template.replace("{minAge}", &min_age.to_string())
            }
            _ => template.to_string(),
        }
    }
}

/// Result of validating one step payload: errors keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    errors: BTreeMap<String, FieldError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.errors.get(field)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Records the first failure of `field`; later rules for the same field are ignored.
    pub fn check(&mut self, field: &str, result: Result<(), FieldError>) {
        if let Err(err) = result {
            self.errors.entry(field.to_string()).or_insert(err);
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Non-empty after trimming, with a character count within `min..=max`.
pub fn required_length(value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    let len = value.chars().count();
    if len < min {
        return Err(FieldError::TooShort { min });
    }
    if len > max {
        return Err(FieldError::TooLong { max });
    }
    Ok(())
}

pub fn person_name(value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    required_length(value, min, max)?;
    if !PERSON_NAME_REGEX.is_match(value.trim()) {
        return Err(FieldError::InvalidFormat);
    }
    Ok(())
}

pub fn phone_number(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !PHONE_REGEX.is_match(value) {
        return Err(FieldError::InvalidFormat);
    }
    Ok(())
}

/// Digits only, `min..=max` of them.
pub fn digits(value: &str, min: usize, max: usize) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !DIGITS_REGEX.is_match(value) {
        return Err(FieldError::InvalidFormat);
    }
    if value.len() < min {
        return Err(FieldError::TooShort { min });
    }
    if value.len() > max {
        return Err(FieldError::TooLong { max });
    }
    Ok(())
}

pub fn one_of(value: &str, options: &[&str]) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !options.contains(&value) {
        return Err(FieldError::InvalidOption);
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !EMAIL_REGEX.is_match(value) {
        return Err(FieldError::InvalidFormat);
    }
    Ok(())
}

/// At least [`MIN_PASSWORD_LEN`] characters with a lowercase letter, an
/// uppercase letter, a digit and a special character.
pub fn password_policy(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::TooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    let strong = LOWERCASE_REGEX.is_match(value)
        && UPPERCASE_REGEX.is_match(value)
        && DIGIT_REGEX.is_match(value)
        && SPECIAL_REGEX.is_match(value);
    if !strong {
        return Err(FieldError::WeakPassword);
    }
    Ok(())
}

/// ISO `YYYY-MM-DD`, not after `today`, and at least `min_age` full years before it.
pub fn birth_date(value: &str, today: NaiveDate, min_age: u32) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FieldError::InvalidDate)?;
    if date > today {
        return Err(FieldError::FutureDate);
    }
    if age_on(date, today) < min_age {
        return Err(FieldError::TooYoung { min_age });
    }
    Ok(())
}

fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
