//! Answers file consumed by `run` and `validate`.
//!
//! ```json
//! { "role": "shop", "fields": { "name": "Green Basket", "hotline": "19999" } }
//! ```
//!
//! Field names are shared across steps; each step picks the fields its form
//! declares.

use std::path::Path;

use anyhow::Context;
use eco_core::signup::forms::ROLE_FIELD;
use eco_core::signup::{FormKind, StepPayload};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answers {
    pub role: String,
    #[serde(default)]
    pub fields: StepPayload,
}

impl Answers {
    pub fn from_json(source: &str) -> anyhow::Result<Self> {
        serde_json::from_str(source).context("Failed to parse answers as JSON")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read answers file: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Answer for one field of `kind`, if present.
    pub fn value_for(&self, kind: FormKind, field: &str) -> Option<&str> {
        if kind == FormKind::RoleSelection && field == ROLE_FIELD {
            return Some(self.role.as_str());
        }
        self.fields.get(field)
    }

    /// Payload holding every answered field declared by `kind`.
    pub fn payload_for(&self, kind: FormKind) -> StepPayload {
        kind.fields()
            .iter()
            .filter_map(|spec| {
                self.value_for(kind, spec.name)
                    .map(|value| (spec.name, value.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r#"{
        "role": "shop",
        "fields": {
            "name": "Green Basket",
            "phoneNumber": "01098765432",
            "category": "cafe",
            "password": "Passw0rd!"
        }
    }"#;

    #[test]
    fn payload_only_takes_declared_fields() {
        let answers = Answers::from_json(SHOP).unwrap();

        let profile = answers.payload_for(FormKind::ShopProfile);
        assert_eq!(profile.get("name"), Some("Green Basket"));
        assert_eq!(profile.get("phoneNumber"), Some("01098765432"));
        assert_eq!(profile.get("category"), None);

        let role = answers.payload_for(FormKind::RoleSelection);
        assert_eq!(role.get(ROLE_FIELD), Some("shop"));
    }

    #[test]
    fn debug_output_hides_passwords() {
        let answers = Answers::from_json(SHOP).unwrap();
        assert!(!format!("{answers:?}").contains("Passw0rd!"));
    }

    #[test]
    fn missing_role_is_a_parse_error() {
        assert!(Answers::from_json(r#"{"fields": {}}"#).is_err());
    }
}
