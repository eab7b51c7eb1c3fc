//! Shared registration state and its reducers.
//!
//! Every reducer consumes the state and returns the next one; none of them
//! performs I/O.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::forms::{FieldChange, FormContext, FormKind, RoleSelectionForm};
use super::role::RegistrationRole;
use super::sequencer::StepSequencer;
use super::step::{StepKey, StepPayload};
use super::validation::ValidationReport;
use crate::config::RoleChangePolicy;

/// Progress of the final submission.
///
/// 最终提交状态。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of [`RegistrationState::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next step.
    Moved,
    /// Already on the final step: the caller must submit.
    Completed,
    /// Current step invalid or a submission is in flight.
    Blocked,
}

/// State of one in-progress signup.
///
/// 一次注册流程的共享状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationState {
    pub selected_role: Option<RegistrationRole>,
    pub step_payloads: BTreeMap<StepKey, StepPayload>,
    pub step_validation: BTreeMap<StepKey, bool>,
    /// Field-level errors from the last validation of each step.
    pub field_errors: BTreeMap<StepKey, ValidationReport>,
    pub current_step_index: usize,
    pub submission_status: SubmissionStatus,
}

impl RegistrationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty state left behind once a signup finished.
    pub fn completed() -> Self {
        Self {
            submission_status: SubmissionStatus::Succeeded,
            ..Self::default()
        }
    }

    pub fn is_step_valid(&self, step: StepKey) -> bool {
        self.step_validation.get(&step).copied().unwrap_or(false)
    }

    pub fn payload(&self, step: StepKey) -> Option<&StepPayload> {
        self.step_payloads.get(&step)
    }

    pub fn errors(&self, step: StepKey) -> Option<&ValidationReport> {
        self.field_errors.get(&step)
    }

    pub fn current_step(&self) -> StepKey {
        StepSequencer::current_step(self)
    }

    /// Selects `role` and marks the role step valid.
    ///
    /// Re-selecting the current role leaves every other step untouched. Otherwise
    /// steps whose form differs under the new role are purged or
    /// re-validated according to `policy`, and the step index is clamped to
    /// the new order.
    pub fn set_role(
        mut self,
        role: RegistrationRole,
        policy: RoleChangePolicy,
        ctx: &FormContext,
    ) -> Self {
        if self.selected_role == Some(role) {
            self.step_validation.insert(StepKey::Step1, true);
            self.field_errors.remove(&StepKey::Step1);
            return self;
        }
        let previous = self.selected_role;
        self.selected_role = Some(role);
        self.step_payloads
            .insert(StepKey::Step1, RoleSelectionForm::payload_for(role));
        self.step_validation.insert(StepKey::Step1, true);
        self.field_errors.remove(&StepKey::Step1);

        for step in [StepKey::Step2, StepKey::Step3] {
            let before = FormKind::for_step(step, previous);
            let after = FormKind::for_step(step, Some(role));
            if before == after {
                continue;
            }
            match (policy, after) {
                (RoleChangePolicy::Purge, _) => {
                    if self.step_payloads.contains_key(&step) {
                        trace_purge(step, role);
                    }
                    self.step_payloads.remove(&step);
                    self.step_validation.remove(&step);
                    self.field_errors.remove(&step);
                }
                (RoleChangePolicy::Preserve, Some(kind)) => {
                    if let Some(payload) = self.step_payloads.get(&step) {
                        let report = kind.form(ctx).validate(payload);
                        self.step_validation.insert(step, report.is_valid());
                        self.field_errors.insert(step, report);
                    }
                }
                // Step no longer in the order: keep it for a later switch back.
                (RoleChangePolicy::Preserve, None) => {}
            }
        }

        self.current_step_index = StepSequencer::clamp_index(Some(role), self.current_step_index);
        self
    }

    pub fn set_step_payload(mut self, step: StepKey, payload: StepPayload) -> Self {
        self.step_payloads.insert(step, payload);
        self
    }

    pub fn set_step_validity(mut self, step: StepKey, valid: bool) -> Self {
        self.step_validation.insert(step, valid);
        self
    }

    /// Commits one validated edit: payload, validity flag and field errors.
    pub fn apply_field_change(self, step: StepKey, change: FieldChange) -> Self {
        let valid = change.report.is_valid();
        let mut next = self
            .set_step_payload(step, change.payload)
            .set_step_validity(step, valid);
        next.field_errors.insert(step, change.report);
        next
    }

    pub fn advance(mut self) -> (Self, AdvanceOutcome) {
        self.current_step_index =
            StepSequencer::clamp_index(self.selected_role, self.current_step_index);
        if !StepSequencer::can_advance(&self) {
            return (self, AdvanceOutcome::Blocked);
        }
        if StepSequencer::is_final_step(&self) {
            return (self, AdvanceOutcome::Completed);
        }
        self.current_step_index += 1;
        (self, AdvanceOutcome::Moved)
    }

    /// Saturates at the first step.
    pub fn retreat(mut self) -> Self {
        self.current_step_index =
            StepSequencer::clamp_index(self.selected_role, self.current_step_index)
                .saturating_sub(1);
        self
    }

    pub fn reset(self) -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: SubmissionStatus) -> Self {
        self.submission_status = status;
        self
    }

    /// Re-validates every stored step that exists for the selected role.
    pub fn revalidate(mut self, ctx: &FormContext) -> Self {
        let steps: Vec<StepKey> = self.step_payloads.keys().copied().collect();
        for step in steps {
            let Some(kind) = FormKind::for_step(step, self.selected_role) else {
                continue;
            };
            let report = match self.step_payloads.get(&step) {
                Some(payload) => kind.form(ctx).validate(payload),
                None => continue,
            };
            self.step_validation.insert(step, report.is_valid());
            self.field_errors.insert(step, report);
        }
        self
    }
}

#[cfg(feature = "tracing")]
fn trace_purge(step: StepKey, role: RegistrationRole) {
    tracing::debug!(%step, %role, "purging step data after role change");
}

#[cfg(not(feature = "tracing"))]
fn trace_purge(_step: StepKey, _role: RegistrationRole) {}
