use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one signup step.
///
/// 注册步骤标识。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKey {
    /// Role selection.
    Step1,
    /// Role-specific profile (person or shop).
    Step2,
    /// Shop category, shop only.
    Step3,
    /// Credentials, always the final step.
    Step4,
}

impl StepKey {
    pub const FINAL: StepKey = StepKey::Step4;

    pub fn as_str(&self) -> &'static str {
        match self {
            StepKey::Step1 => "step1",
            StepKey::Step2 => "step2",
            StepKey::Step3 => "step3",
            StepKey::Step4 => "step4",
        }
    }

    pub fn parse(value: &str) -> Option<StepKey> {
        match value {
            "step1" => Some(StepKey::Step1),
            "step2" => Some(StepKey::Step2),
            "step3" => Some(StepKey::Step3),
            "step4" => Some(StepKey::Step4),
            _ => None,
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field values captured by one step, keyed by the form's field names.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepPayload(BTreeMap<String, String>);

/// Field names whose values never appear in `Debug` output or drafts.
pub const SENSITIVE_FIELDS: [&str; 2] = ["password", "confirmPassword"];

impl StepPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Value of `field`, or `""` when it was never set.
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy of the payload without password fields.
    pub fn without_secrets(&self) -> StepPayload {
        let mut copy = self.clone();
        for field in SENSITIVE_FIELDS {
            copy.remove(field);
        }
        copy
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StepPayload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        StepPayload(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl fmt::Debug for StepPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in &self.0 {
            if SENSITIVE_FIELDS.contains(&field.as_str()) {
                map.entry(field, &"[REDACTED]");
            } else {
                map.entry(field, value);
            }
        }
        map.finish()
    }
}
