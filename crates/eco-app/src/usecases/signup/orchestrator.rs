//! Signup orchestrator.
//!
//! This module coordinates the signup state machine and its side effects:
//! remote registration and sign-in, notices, navigation and draft persistence.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, error, info, info_span, warn, Instrument};

use eco_core::{
    config::{PolicyConfig, RoutesConfig, SignupConfig},
    ports::{
        AuthPort, ClockPort, NavigationPort, NotificationPort, RegistrationPort, SignupDraftPort,
        SignupEventPort, TranslatorPort,
    },
    signup::{
        FormContext, Notice, RegistrationRole, RegistrationState, Route, SignupAction,
        SignupDraft, SignupEvent, SignupStateMachine,
    },
    SignupSessionId,
};

use crate::usecases::signup::context::SignupContext;
use crate::usecases::signup::{RetryPolicy, SignInWithCredentials, SubmitRegistration};

/// Errors produced by the signup orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("navigation to {route} failed: {source}")]
    Navigation {
        route: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Ports the orchestrator drives.
pub struct SignupOrchestratorDeps {
    pub registration: Arc<dyn RegistrationPort>,
    pub auth: Arc<dyn AuthPort>,
    pub navigation: Arc<dyn NavigationPort>,
    pub notification: Arc<dyn NotificationPort>,
    pub translator: Arc<dyn TranslatorPort>,
    pub events: Arc<dyn SignupEventPort>,
    pub clock: Arc<dyn ClockPort>,
    /// `None` disables draft persistence.
    pub drafts: Option<Arc<dyn SignupDraftPort>>,
}

/// Orchestrator that drives signup state and side effects.
///
/// 注册流程编排器：状态机 + 副作用。
pub struct SignupOrchestrator {
    context: Arc<SignupContext>,
    /// Completes once the persisted draft (if any) has been loaded.
    seeded: OnceCell<()>,
    policy: PolicyConfig,
    routes: RoutesConfig,

    submit_registration: SubmitRegistration,
    sign_in: SignInWithCredentials,
    navigation: Arc<dyn NavigationPort>,
    notification: Arc<dyn NotificationPort>,
    translator: Arc<dyn TranslatorPort>,
    events: Arc<dyn SignupEventPort>,
    clock: Arc<dyn ClockPort>,
    drafts: Option<Arc<dyn SignupDraftPort>>,
}

impl SignupOrchestrator {
    pub fn new(config: &SignupConfig, deps: SignupOrchestratorDeps) -> Self {
        let retry = RetryPolicy::from_config(&config.api);
        Self {
            context: SignupContext::default().arc(),
            seeded: OnceCell::new(),
            policy: config.policy,
            routes: config.routes.clone(),
            submit_registration: SubmitRegistration::new(deps.registration, retry),
            sign_in: SignInWithCredentials::new(deps.auth, retry),
            navigation: deps.navigation,
            notification: deps.notification,
            translator: deps.translator,
            events: deps.events,
            clock: deps.clock,
            drafts: deps.drafts,
        }
    }

    pub fn session_id(&self) -> &SignupSessionId {
        self.context.session_id()
    }

    pub async fn select_role(
        &self,
        role: RegistrationRole,
    ) -> Result<RegistrationState, SignupError> {
        self.dispatch(SignupEvent::SelectRole { role }).await
    }

    /// Edits one field of the current step.
    pub async fn change_field(
        &self,
        field: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<RegistrationState, SignupError> {
        let event = SignupEvent::ChangeField {
            field: field.into(),
            value: value.into(),
        };
        self.dispatch(event).await
    }

    /// Moves forward, or submits when the final step is valid.
    pub async fn next(&self) -> Result<RegistrationState, SignupError> {
        self.dispatch(SignupEvent::Next).await
    }

    pub async fn back(&self) -> Result<RegistrationState, SignupError> {
        self.dispatch(SignupEvent::Back).await
    }

    pub async fn reset(&self) -> Result<RegistrationState, SignupError> {
        self.dispatch(SignupEvent::Reset).await
    }

    pub async fn get_state(&self) -> RegistrationState {
        self.seed_state_from_draft().await;
        self.context.get_state().await
    }

    async fn dispatch(&self, event: SignupEvent) -> Result<RegistrationState, SignupError> {
        self.seed_state_from_draft().await;
        // Serializes dispatch so two quick "Next" presses cannot both submit.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!(
            "usecase.signup_orchestrator.dispatch",
            session_id = %self.context.session_id(),
            event = ?event
        );
        async {
            let machine = self.state_machine();
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let from_step = current.current_step();
                let from_status = current.submission_status;
                let event_name = format!("{:?}", event);
                let (next, actions) = machine.transition(current, event);
                info!(
                    from_step = %from_step,
                    to_step = %next.current_step(),
                    from_status = ?from_status,
                    to_status = ?next.submission_status,
                    event = %event_name,
                    "signup state transition"
                );
                // Published before the actions run so observers see `Submitting`
                // while the remote call is in flight.
                self.set_state_and_emit(next.clone()).await;
                current = next;
                let follow_up_events = self.execute_actions(actions).await?;
                pending_events.extend(follow_up_events);
            }

            self.save_draft(&current).await;
            Ok(current)
        }
        .instrument(span)
        .await
    }

    fn state_machine(&self) -> SignupStateMachine {
        SignupStateMachine::new(self.policy, FormContext::new(self.clock.today()))
    }

    async fn execute_actions(
        &self,
        actions: Vec<SignupAction>,
    ) -> Result<Vec<SignupEvent>, SignupError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "signup executing action");
            match action {
                SignupAction::SubmitRegistration { request } => {
                    match self.submit_registration.execute(&request).await {
                        Ok(()) => {
                            info!("registration accepted");
                            follow_up_events.push(SignupEvent::RegistrationSucceeded);
                        }
                        Err(err) => {
                            warn!(error = %err, "registration failed");
                            follow_up_events.push(SignupEvent::RegistrationFailed { error: err });
                        }
                    }
                }
                SignupAction::SignIn { credentials } => {
                    match self.sign_in.execute(&credentials).await {
                        Ok(()) => follow_up_events.push(SignupEvent::SignInSucceeded),
                        Err(err) => {
                            warn!(error = %err, "sign-in after registration failed");
                            follow_up_events.push(SignupEvent::SignInFailed { error: err });
                        }
                    }
                }
                SignupAction::Notify { notice } => {
                    self.notify(&notice).await;
                }
                SignupAction::Navigate { route } => {
                    self.navigate(route).await?;
                }
                SignupAction::ClearDraft => {
                    self.clear_draft().await;
                }
            }
        }

        Ok(follow_up_events)
    }

    async fn notify(&self, notice: &Notice) {
        let translated = self.translator.translate(notice.message_key());
        let message = notice.render(&translated);
        self.notification.notify(notice, &message).await;
    }

    async fn navigate(&self, route: Route) -> Result<(), SignupError> {
        let target = match route {
            Route::Home => &self.routes.home,
            Route::Login => &self.routes.login,
        };
        self.navigation.navigate(target).await.map_err(|source| {
            error!(route = %target, error = %source, "signup navigation failed");
            SignupError::Navigation {
                route: target.clone(),
                source,
            }
        })
    }

    async fn set_state_and_emit(&self, state: RegistrationState) {
        self.context.set_state(state.clone()).await;
        self.events.emit_state_changed(&state).await;
    }

    async fn save_draft(&self, state: &RegistrationState) {
        let Some(drafts) = &self.drafts else {
            return;
        };
        if !SignupDraft::should_save(state) {
            return;
        }
        let draft = SignupDraft::from_state(self.context.session_id().clone(), state);
        if let Err(err) = drafts.save(&draft).await {
            warn!(error = %err, "failed to save signup draft");
        }
    }

    async fn clear_draft(&self) {
        let Some(drafts) = &self.drafts else {
            return;
        };
        if let Err(err) = drafts.clear().await {
            warn!(error = %err, "failed to clear signup draft");
        }
    }

    /// Concurrent first callers all wait here until the draft load finished.
    async fn seed_state_from_draft(&self) {
        self.seeded.get_or_init(|| self.load_draft_into_context()).await;
    }

    async fn load_draft_into_context(&self) {
        let Some(drafts) = &self.drafts else {
            return;
        };

        match drafts.load().await {
            Ok(Some(draft)) => {
                info!(session_id = %draft.session_id, "resuming signup from draft");
                self.context.resume_session(draft.session_id.clone());
                let ctx = FormContext::new(self.clock.today());
                self.set_state_and_emit(draft.into_state(&ctx)).await;
            }
            Ok(None) => {}
            Err(err) => {
                error!(error = %err, "failed to load signup draft");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use eco_core::ports::GatewayError;
    use eco_core::signup::{
        Credentials, RegistrationRequest, StepKey, StepPayload, SubmissionStatus,
    };
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        registrations: StdMutex<Vec<RegistrationRequest>>,
        sign_ins: StdMutex<Vec<String>>,
        routes: StdMutex<Vec<String>>,
        notices: StdMutex<Vec<(Notice, String)>>,
        emitted: StdMutex<Vec<SubmissionStatus>>,
        drafts: StdMutex<Option<SignupDraft>>,
        draft_load_delay: StdMutex<Duration>,
        draft_clears: StdMutex<usize>,
        register_result: StdMutex<Option<GatewayError>>,
        sign_in_result: StdMutex<Option<GatewayError>>,
    }

    struct Ports(Arc<Recorder>);

    #[async_trait::async_trait]
    impl RegistrationPort for Ports {
        async fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError> {
            self.0.registrations.lock().unwrap().push(request.clone());
            match self.0.register_result.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl AuthPort for Ports {
        async fn sign_in(&self, credentials: &Credentials) -> Result<(), GatewayError> {
            self.0.sign_ins.lock().unwrap().push(credentials.email.clone());
            match self.0.sign_in_result.lock().unwrap().clone() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }
    }

    #[async_trait::async_trait]
    impl NavigationPort for Ports {
        async fn navigate(&self, route: &str) -> anyhow::Result<()> {
            self.0.routes.lock().unwrap().push(route.to_string());
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl NotificationPort for Ports {
        async fn notify(&self, notice: &Notice, message: &str) {
            self.0
                .notices
                .lock()
                .unwrap()
                .push((notice.clone(), message.to_string()));
        }
    }

    impl TranslatorPort for Ports {
        fn translate(&self, key: &str) -> String {
            match key {
                "signup.notice.registrationFailed" => "Registration failed".to_string(),
                other => other.to_string(),
            }
        }
    }

    #[async_trait::async_trait]
    impl SignupEventPort for Ports {
        async fn emit_state_changed(&self, state: &RegistrationState) {
            self.0.emitted.lock().unwrap().push(state.submission_status);
        }
    }

    impl ClockPort for Ports {
        fn today(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        }
    }

    #[async_trait::async_trait]
    impl SignupDraftPort for Ports {
        async fn load(&self) -> anyhow::Result<Option<SignupDraft>> {
            let delay = *self.0.draft_load_delay.lock().unwrap();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            Ok(self.0.drafts.lock().unwrap().clone())
        }

        async fn save(&self, draft: &SignupDraft) -> anyhow::Result<()> {
            *self.0.drafts.lock().unwrap() = Some(draft.clone());
            Ok(())
        }

        async fn clear(&self) -> anyhow::Result<()> {
            *self.0.drafts.lock().unwrap() = None;
            *self.0.draft_clears.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn build(recorder: &Arc<Recorder>, config: &SignupConfig) -> SignupOrchestrator {
        let ports = Arc::new(Ports(recorder.clone()));
        SignupOrchestrator::new(
            config,
            SignupOrchestratorDeps {
                registration: ports.clone(),
                auth: ports.clone(),
                navigation: ports.clone(),
                notification: ports.clone(),
                translator: ports.clone(),
                events: ports.clone(),
                clock: ports.clone(),
                drafts: Some(ports as Arc<dyn SignupDraftPort>),
            },
        )
    }

    async fn fill_customer(orchestrator: &SignupOrchestrator) {
        orchestrator
            .select_role(RegistrationRole::Customer)
            .await
            .unwrap();
        orchestrator.next().await.unwrap();
        for (field, value) in [
            ("firstName", "Mona"),
            ("lastName", "Saleh"),
            ("birthDate", "1995-04-12"),
            ("phoneNumber", "01012345678"),
            ("gender", "female"),
            ("address", "12 Nile Street, Cairo"),
        ] {
            orchestrator.change_field(field, value).await.unwrap();
        }
        orchestrator.next().await.unwrap();
        for (field, value) in [
            ("email", "mona@eco.example"),
            ("password", "Passw0rd!"),
            ("confirmPassword", "Passw0rd!"),
        ] {
            orchestrator.change_field(field, value).await.unwrap();
        }
    }

    #[tokio::test]
    async fn signup_orchestrator_completes_customer_flow() {
        let recorder = Arc::new(Recorder::default());
        let orchestrator = build(&recorder, &SignupConfig::default());

        fill_customer(&orchestrator).await;
        let state = orchestrator.next().await.unwrap();

        assert_eq!(state, RegistrationState::completed());
        assert_eq!(recorder.registrations.lock().unwrap().len(), 1);
        assert_eq!(
            recorder.registrations.lock().unwrap()[0].role,
            "customer".to_string()
        );
        assert_eq!(*recorder.sign_ins.lock().unwrap(), vec!["mona@eco.example"]);
        assert_eq!(*recorder.routes.lock().unwrap(), vec!["/"]);
        assert!(recorder.drafts.lock().unwrap().is_none());
        assert!(recorder
            .emitted
            .lock()
            .unwrap()
            .contains(&SubmissionStatus::Submitting));
    }

    #[tokio::test]
    async fn signup_orchestrator_keeps_data_after_rejection() {
        let recorder = Arc::new(Recorder::default());
        *recorder.register_result.lock().unwrap() = Some(GatewayError::Rejected {
            status: 409,
            message: Some("email already in use".to_string()),
        });
        let orchestrator = build(&recorder, &SignupConfig::default());

        fill_customer(&orchestrator).await;
        let state = orchestrator.next().await.unwrap();

        assert_eq!(state.submission_status, SubmissionStatus::Failed);
        assert_eq!(state.current_step(), StepKey::Step4);
        assert!(state.payload(StepKey::Step2).is_some());
        assert!(recorder.sign_ins.lock().unwrap().is_empty());
        assert!(recorder.routes.lock().unwrap().is_empty());
        let notices = recorder.notices.lock().unwrap();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].1, "Registration failed: email already in use");
    }

    #[tokio::test]
    async fn signup_orchestrator_redirects_to_login_when_sign_in_fails() {
        let recorder = Arc::new(Recorder::default());
        *recorder.sign_in_result.lock().unwrap() = Some(GatewayError::Rejected {
            status: 401,
            message: None,
        });
        let orchestrator = build(&recorder, &SignupConfig::default());

        fill_customer(&orchestrator).await;
        orchestrator.next().await.unwrap();

        assert_eq!(*recorder.routes.lock().unwrap(), vec!["/login"]);
        assert_eq!(
            recorder.notices.lock().unwrap()[0].0,
            Notice::SignInRequired
        );
    }

    #[tokio::test]
    async fn signup_orchestrator_saves_and_resumes_draft() {
        let recorder = Arc::new(Recorder::default());
        {
            let orchestrator = build(&recorder, &SignupConfig::default());
            orchestrator.select_role(RegistrationRole::Shop).await.unwrap();
            orchestrator.next().await.unwrap();
            orchestrator.change_field("name", "Green Basket").await.unwrap();
        }

        let saved = recorder.drafts.lock().unwrap().clone().unwrap();
        assert_eq!(saved.selected_role, Some(RegistrationRole::Shop));

        let resumed = build(&recorder, &SignupConfig::default());
        let state = resumed.get_state().await;
        assert_eq!(state.current_step(), StepKey::Step2);
        assert_eq!(
            state.payload(StepKey::Step2).and_then(|p| p.get("name")),
            Some("Green Basket")
        );
        assert!(!state.is_step_valid(StepKey::Step2));
    }

    #[tokio::test]
    async fn signup_orchestrator_reset_clears_draft() {
        let recorder = Arc::new(Recorder::default());
        let orchestrator = build(&recorder, &SignupConfig::default());
        orchestrator
            .select_role(RegistrationRole::Organizer)
            .await
            .unwrap();

        let state = orchestrator.reset().await.unwrap();

        assert_eq!(state, RegistrationState::default());
        assert!(recorder.drafts.lock().unwrap().is_none());
        assert_eq!(*recorder.draft_clears.lock().unwrap(), 1);
    }

    fn shop_draft() -> SignupDraft {
        SignupDraft {
            session_id: SignupSessionId::from("draft-session".to_string()),
            selected_role: Some(RegistrationRole::Shop),
            current_step_index: 1,
            step_payloads: [(
                StepKey::Step2,
                StepPayload::new().with("name", "Green Basket"),
            )]
            .into_iter()
            .collect(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn signup_orchestrator_first_edit_waits_for_draft_load() {
        let recorder = Arc::new(Recorder::default());
        *recorder.drafts.lock().unwrap() = Some(shop_draft());
        *recorder.draft_load_delay.lock().unwrap() = Duration::from_millis(50);
        let orchestrator = build(&recorder, &SignupConfig::default());

        let (_, edited) = tokio::join!(
            orchestrator.get_state(),
            orchestrator.change_field("name", "Blue Basket")
        );
        let edited = edited.unwrap();

        assert_eq!(edited.selected_role, Some(RegistrationRole::Shop));
        assert_eq!(edited.current_step(), StepKey::Step2);
        assert_eq!(
            edited.payload(StepKey::Step2).and_then(|p| p.get("name")),
            Some("Blue Basket")
        );
        assert_eq!(orchestrator.get_state().await, edited);
    }

    #[tokio::test]
    async fn signup_orchestrator_keeps_session_id_of_resumed_draft() {
        let recorder = Arc::new(Recorder::default());
        *recorder.drafts.lock().unwrap() = Some(shop_draft());
        let orchestrator = build(&recorder, &SignupConfig::default());

        orchestrator.change_field("name", "Blue Basket").await.unwrap();

        assert_eq!(orchestrator.session_id().as_str(), "draft-session");
        let saved = recorder.drafts.lock().unwrap().clone().unwrap();
        assert_eq!(saved.session_id.as_str(), "draft-session");
    }
}
