//! Step order and navigation gating.

use super::role::RegistrationRole;
use super::state::{RegistrationState, SubmissionStatus};
use super::step::StepKey;

const SHOP_ORDER: [StepKey; 4] = [StepKey::Step1, StepKey::Step2, StepKey::Step3, StepKey::Step4];
const DEFAULT_ORDER: [StepKey; 3] = [StepKey::Step1, StepKey::Step2, StepKey::Step4];

/// Computes the ordered step list for a role and answers navigation questions
/// about a [`RegistrationState`].
pub struct StepSequencer;

impl StepSequencer {
    /// `shop` gets the shop-category step; every other role (and no role yet) does not.
    pub fn step_order(role: Option<RegistrationRole>) -> &'static [StepKey] {
        match role {
            Some(RegistrationRole::Shop) => &SHOP_ORDER,
            _ => &DEFAULT_ORDER,
        }
    }

    pub fn last_index(role: Option<RegistrationRole>) -> usize {
        Self::step_order(role).len() - 1
    }

    pub fn clamp_index(role: Option<RegistrationRole>, index: usize) -> usize {
        index.min(Self::last_index(role))
    }

    /// `order[index] ?? final step`.
    pub fn step_at(role: Option<RegistrationRole>, index: usize) -> StepKey {
        Self::step_order(role)
            .get(index)
            .copied()
            .unwrap_or(StepKey::FINAL)
    }

    pub fn current_step(state: &RegistrationState) -> StepKey {
        Self::step_at(state.selected_role, state.current_step_index)
    }

    pub fn is_final_step(state: &RegistrationState) -> bool {
        state.current_step_index >= Self::last_index(state.selected_role)
    }

    /// "Next" is enabled only when the current step is valid and nothing is in flight.
    pub fn can_advance(state: &RegistrationState) -> bool {
        let idle = matches!(
            state.submission_status,
            SubmissionStatus::Idle | SubmissionStatus::Failed
        );
        idle && state.is_step_valid(Self::current_step(state))
    }

    pub fn can_retreat(state: &RegistrationState) -> bool {
        let idle = matches!(
            state.submission_status,
            SubmissionStatus::Idle | SubmissionStatus::Failed
        );
        idle && state.current_step_index > 0
    }

    /// One-based position of the current step and the total number of steps.
    pub fn progress(state: &RegistrationState) -> (usize, usize) {
        let total = Self::step_order(state.selected_role).len();
        let index = Self::clamp_index(state.selected_role, state.current_step_index);
        (index + 1, total)
    }
}
