//! Signup state machine.
//!
//! Defines a pure state transition function for the registration flow.
//! Side effects are described as [`SignupAction`]s and executed by the
//! orchestrator, which feeds their results back as events.

use super::forms::{FormContext, FormKind, RoleSelectionForm};
use super::notice::{Notice, Route};
use super::request::{Credentials, RegistrationRequest};
use super::role::RegistrationRole;
use super::state::{AdvanceOutcome, RegistrationState, SubmissionStatus};
use super::step::StepKey;
use super::validation::{FieldError, ValidationReport};
use crate::config::{PolicyConfig, SuccessNoticePolicy};
use crate::ports::GatewayError;

/// Events that drive the signup flow.
///
/// 驱动注册流程的事件。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupEvent {
    /// User picks a role in the first step.
    ///
    /// 用户选择账户角色。
    SelectRole { role: RegistrationRole },
    /// User edits one field of the current step.
    ///
    /// 用户修改当前步骤的字段。
    ChangeField { field: String, value: String },
    /// "Next" (or "Submit" on the final step).
    ///
    /// 下一步 / 提交。
    Next,
    /// Navigate back.
    ///
    /// 返回。
    Back,
    /// Discard everything and start over.
    ///
    /// 重新开始。
    Reset,
    /// Registration endpoint accepted the request.
    ///
    /// 注册成功（网络回调）。
    RegistrationSucceeded,
    /// Registration endpoint rejected the request or was unreachable.
    ///
    /// 注册失败（网络回调）。
    RegistrationFailed { error: GatewayError },
    /// Automatic sign-in succeeded.
    ///
    /// 自动登录成功。
    SignInSucceeded,
    /// Automatic sign-in failed.
    ///
    /// 自动登录失败。
    SignInFailed { error: GatewayError },
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, PartialEq, Eq)]
pub enum SignupAction {
    /// Send the merged registration request.
    ///
    /// 提交注册请求。
    SubmitRegistration { request: RegistrationRequest },
    /// Sign in with the credentials just registered.
    ///
    /// 使用刚注册的凭据登录。
    SignIn { credentials: Credentials },
    /// Show a localized notice.
    ///
    /// 显示提示。
    Notify { notice: Notice },
    /// Navigate to a route.
    ///
    /// 页面跳转。
    Navigate { route: Route },
    /// Forget the persisted draft.
    ///
    /// 清除草稿。
    ClearDraft,
}

/// Pure signup state machine.
///
/// 纯状态机：不包含副作用。
pub struct SignupStateMachine {
    policy: PolicyConfig,
    ctx: FormContext,
}

impl SignupStateMachine {
    pub fn new(policy: PolicyConfig, ctx: FormContext) -> Self {
        Self { policy, ctx }
    }

    pub fn form_context(&self) -> &FormContext {
        &self.ctx
    }

    pub fn transition(
        &self,
        state: RegistrationState,
        event: SignupEvent,
    ) -> (RegistrationState, Vec<SignupAction>) {
        match (state.submission_status, event) {
            (SubmissionStatus::Submitting, SignupEvent::RegistrationSucceeded) => {
                let next = state.with_status(SubmissionStatus::Succeeded);
                let mut actions = Vec::new();
                if self.policy.success_notice == SuccessNoticePolicy::OnRegistration {
                    actions.push(SignupAction::Notify {
                        notice: Notice::RegistrationSucceeded,
                    });
                }
                actions.push(SignupAction::SignIn {
                    credentials: Credentials::from_state(&next),
                });
                (next, actions)
            }
            (SubmissionStatus::Submitting, SignupEvent::RegistrationFailed { error }) => (
                state.with_status(SubmissionStatus::Failed),
                vec![SignupAction::Notify {
                    notice: Notice::RegistrationFailed {
                        reason: error.user_reason(),
                    },
                }],
            ),
            (SubmissionStatus::Succeeded, SignupEvent::SignInSucceeded) => {
                let mut actions = Vec::new();
                if self.policy.success_notice == SuccessNoticePolicy::AfterSignIn {
                    actions.push(SignupAction::Notify {
                        notice: Notice::RegistrationSucceeded,
                    });
                }
                actions.push(SignupAction::ClearDraft);
                actions.push(SignupAction::Navigate { route: Route::Home });
                (RegistrationState::completed(), actions)
            }
            (SubmissionStatus::Succeeded, SignupEvent::SignInFailed { .. }) => (
                RegistrationState::completed(),
                vec![
                    SignupAction::Notify {
                        notice: Notice::SignInRequired,
                    },
                    SignupAction::ClearDraft,
                    SignupAction::Navigate {
                        route: Route::Login,
                    },
                ],
            ),
            // Nothing but remote results is accepted while a submission runs or after it.
            (SubmissionStatus::Submitting | SubmissionStatus::Succeeded, _) => {
                (state, Vec::new())
            }
            (_, SignupEvent::SelectRole { role }) => (
                state
                    .set_role(role, self.policy.role_change, &self.ctx)
                    .with_status(SubmissionStatus::Idle),
                Vec::new(),
            ),
            (_, SignupEvent::ChangeField { field, value }) => {
                (self.change_field(state, &field, &value), Vec::new())
            }
            (_, SignupEvent::Next) => match state.advance() {
                (next, AdvanceOutcome::Completed) => {
                    let request = RegistrationRequest::from_state(&next);
                    (
                        next.with_status(SubmissionStatus::Submitting),
                        vec![SignupAction::SubmitRegistration { request }],
                    )
                }
                (next, _) => (next, Vec::new()),
            },
            (_, SignupEvent::Back) => (state.retreat(), Vec::new()),
            (_, SignupEvent::Reset) => (state.reset(), vec![SignupAction::ClearDraft]),
            (_, _) => (state, Vec::new()),
        }
    }

    /// Validate-then-commit for one edit on the current step.
    fn change_field(
        &self,
        state: RegistrationState,
        field: &str,
        value: &str,
    ) -> RegistrationState {
        let step = state.current_step();
        if step == StepKey::Step1 {
            return match value.parse::<RegistrationRole>() {
                Ok(role) => state
                    .set_role(role, self.policy.role_change, &self.ctx)
                    .with_status(SubmissionStatus::Idle),
                Err(_) => {
                    let mut report = ValidationReport::new();
                    let err = if value.trim().is_empty() {
                        FieldError::Required
                    } else {
                        FieldError::InvalidOption
                    };
                    report.check(field, Err(err));
                    let mut next = state.set_step_validity(StepKey::Step1, false);
                    next.field_errors.insert(StepKey::Step1, report);
                    // The previously chosen role stays in effect for the step order.
                    if let Some(role) = next.selected_role {
                        next.step_payloads
                            .insert(StepKey::Step1, RoleSelectionForm::payload_for(role));
                    }
                    next
                }
            };
        }

        let Some(kind) = FormKind::for_step(step, state.selected_role) else {
            return state;
        };
        let form = kind.form(&self.ctx);
        let payload = state.payload(step).cloned().unwrap_or_default();
        let change = form.on_field_change(&payload, field, value);
        state
            .apply_field_change(step, change)
            .with_status(SubmissionStatus::Idle)
    }
}
