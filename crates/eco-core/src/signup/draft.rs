use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::forms::FormContext;
use super::role::RegistrationRole;
use super::sequencer::StepSequencer;
use super::state::{RegistrationState, SubmissionStatus};
use super::step::{StepKey, StepPayload};
use crate::ids::SignupSessionId;

/// Persisted snapshot of an unfinished signup. Never contains passwords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupDraft {
    pub session_id: SignupSessionId,
    pub selected_role: Option<RegistrationRole>,
    pub current_step_index: usize,
    pub step_payloads: BTreeMap<StepKey, StepPayload>,
}

impl SignupDraft {
    /// Only states with a chosen role and no submission in flight or done are saved.
    pub fn should_save(state: &RegistrationState) -> bool {
        state.selected_role.is_some()
            && matches!(
                state.submission_status,
                SubmissionStatus::Idle | SubmissionStatus::Failed
            )
    }

    pub fn from_state(session_id: SignupSessionId, state: &RegistrationState) -> Self {
        Self {
            session_id,
            selected_role: state.selected_role,
            current_step_index: state.current_step_index,
            step_payloads: state
                .step_payloads
                .iter()
                .map(|(step, payload)| (*step, payload.without_secrets()))
                .collect(),
        }
    }

    /// Rebuilds a state, re-validating every restored step.
    pub fn into_state(self, ctx: &FormContext) -> RegistrationState {
        let state = RegistrationState {
            selected_role: self.selected_role,
            step_payloads: self.step_payloads,
            current_step_index: StepSequencer::clamp_index(
                self.selected_role,
                self.current_step_index,
            ),
            ..RegistrationState::default()
        };
        state.revalidate(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleChangePolicy;
    use chrono::NaiveDate;

    fn ctx() -> FormContext {
        FormContext::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    #[test]
    fn draft_round_trip_drops_passwords_and_revalidates() {
        let mut state = RegistrationState::new()
            .set_role(RegistrationRole::Customer, RoleChangePolicy::Purge, &ctx())
            .set_step_payload(
                StepKey::Step4,
                StepPayload::new()
                    .with("email", "mona@eco.example")
                    .with("password", "Passw0rd!")
                    .with("confirmPassword", "Passw0rd!"),
            )
            .set_step_validity(StepKey::Step4, true);
        state.current_step_index = 2;

        let draft = SignupDraft::from_state(SignupSessionId::new(), &state);
        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("Passw0rd!"));

        let restored = draft.into_state(&ctx());
        assert_eq!(restored.selected_role, Some(RegistrationRole::Customer));
        assert_eq!(restored.current_step_index, 2);
        assert!(restored.is_step_valid(StepKey::Step1));
        assert!(!restored.is_step_valid(StepKey::Step4));
        assert_eq!(
            restored.payload(StepKey::Step4).and_then(|p| p.get("email")),
            Some("mona@eco.example")
        );
    }

    #[test]
    fn submitting_state_is_not_saved() {
        let state = RegistrationState::new()
            .set_role(RegistrationRole::Shop, RoleChangePolicy::Purge, &ctx())
            .with_status(SubmissionStatus::Submitting);
        assert!(!SignupDraft::should_save(&state));
        assert!(!SignupDraft::should_save(&RegistrationState::new()));
    }
}
