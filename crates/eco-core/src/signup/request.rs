use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::forms::FormKind;
use super::role::RegistrationRole;
use super::sequencer::StepSequencer;
use super::state::RegistrationState;
use super::step::{StepKey, SENSITIVE_FIELDS};
use crate::secret::SecretString;

/// Body sent to the registration endpoint: `{role, ...merged step fields}`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    pub role: String,
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl RegistrationRequest {
    /// Merges the payloads of the steps in the current order.
    ///
    /// Only fields declared by each step's form are taken, so data left over
    /// from another role never leaks into the request. The raw role field is
    /// replaced by the wire role and `confirmPassword` is not sent.
    pub fn from_state(state: &RegistrationState) -> Self {
        let mut fields = BTreeMap::new();
        for step in StepSequencer::step_order(state.selected_role) {
            if *step == StepKey::Step1 {
                continue;
            }
            let (Some(kind), Some(payload)) = (
                FormKind::for_step(*step, state.selected_role),
                state.payload(*step),
            ) else {
                continue;
            };
            for spec in kind.fields() {
                if spec.name == "confirmPassword" {
                    continue;
                }
                if let Some(value) = payload.get(spec.name) {
                    let value = if SENSITIVE_FIELDS.contains(&spec.name) {
                        value.to_string()
                    } else {
                        value.trim().to_string()
                    };
                    fields.insert(spec.name.to_string(), value);
                }
            }
        }
        Self {
            role: RegistrationRole::wire_value(state.selected_role).to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted: BTreeMap<&str, &str> = self
            .fields
            .iter()
            .map(|(k, v)| {
                let shown = if SENSITIVE_FIELDS.contains(&k.as_str()) {
                    "[REDACTED]"
                } else {
                    v.as_str()
                };
                (k.as_str(), shown)
            })
            .collect();
        f.debug_struct("RegistrationRequest")
            .field("role", &self.role)
            .field("fields", &redacted)
            .finish()
    }
}

/// Email/password pair used for the sign-in right after registration.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password.into()),
        }
    }

    /// Credentials entered in the final step.
    pub fn from_state(state: &RegistrationState) -> Self {
        let payload = state.payload(StepKey::FINAL);
        let email = payload.map(|p| p.value("email").trim()).unwrap_or("");
        let password = payload.map(|p| p.value("password")).unwrap_or("");
        Self::new(email, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::step::StepPayload;

    fn customer_state() -> RegistrationState {
        let mut state = RegistrationState::new();
        state.selected_role = Some(RegistrationRole::Customer);
        state
            .set_step_payload(
                StepKey::Step1,
                StepPayload::new().with("role", "customer"),
            )
            .set_step_payload(
                StepKey::Step2,
                StepPayload::new()
                    .with("firstName", " Mona ")
                    .with("phoneNumber", "01012345678"),
            )
            // stale shop data from an earlier role choice
            .set_step_payload(StepKey::Step3, StepPayload::new().with("category", "cafe"))
            .set_step_payload(
                StepKey::Step4,
                StepPayload::new()
                    .with("email", "mona@eco.example")
                    .with("password", " Passw0rd! ")
                    .with("confirmPassword", " Passw0rd! "),
            )
    }

    #[test]
    fn merges_current_steps_with_wire_role() {
        let request = RegistrationRequest::from_state(&customer_state());
        assert_eq!(request.role, "customer");
        assert_eq!(request.field("firstName"), Some("Mona"));
        assert_eq!(request.field("email"), Some("mona@eco.example"));
        assert_eq!(request.field("password"), Some(" Passw0rd! "));
        assert_eq!(request.field("confirmPassword"), None);
        assert_eq!(request.field("category"), None);
        assert_eq!(request.field("role"), None);
    }

    #[test]
    fn serializes_flat_json_body() {
        let request = RegistrationRequest::from_state(&customer_state());
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["role"], "customer");
        assert_eq!(json["phoneNumber"], "01012345678");
    }

    #[test]
    fn debug_hides_password() {
        let request = RegistrationRequest::from_state(&customer_state());
        assert!(!format!("{request:?}").contains("Passw0rd!"));
    }

    #[test]
    fn credentials_come_from_final_step() {
        let credentials = Credentials::from_state(&customer_state());
        assert_eq!(credentials.email, "mona@eco.example");
        assert_eq!(credentials.password.expose(), " Passw0rd! ");
    }
}
