//! Command handlers behind the CLI subcommands.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use eco_app::SignupOrchestrator;
use eco_core::config::SignupConfig;
use eco_core::ports::{ClockPort, TranslatorPort};
use eco_core::signup::{
    FieldChange, FormContext, FormKind, Notice, RegistrationRequest, RegistrationRole,
    RegistrationState, StepKey, StepSequencer, SubmissionStatus, ValidationReport,
};
use eco_infra::SystemClock;
use serde_json::Value;
use tracing::{info, info_span, Instrument};

use crate::answers::Answers;
use crate::bootstrap::{build_translator, resolve_config, wire_dependencies};
use crate::cli::{Cli, Commands};
use crate::terminal::TerminalUi;

/// Upper bound on "Next" presses for one run; every role has at most four steps.
const MAX_ROUNDS: usize = 8;

/// Exit status when the account exists but the automatic sign-in failed.
pub const SIGN_IN_REQUIRED_EXIT: u8 = 2;

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Run { answers } => run_signup(&config, &answers).await,
        Commands::Steps { role } => print_steps(&config, &role),
        Commands::Validate { answers } => validate_answers(&config, &answers),
    }
}

/// Drives the orchestrator through every step, then submits.
pub async fn run_signup(config: &SignupConfig, answers_path: &Path) -> anyhow::Result<ExitCode> {
    let answers = Answers::load(answers_path)?;
    let translator = Arc::new(build_translator(&config.locale)?);
    let ui = Arc::new(TerminalUi::new());
    let deps = wire_dependencies(config, translator.clone(), ui.clone())?;
    let orchestrator = SignupOrchestrator::new(config, deps);

    // Loads any saved draft first, so the span carries the resumed session id.
    let initial = orchestrator.get_state().await;
    let span = info_span!("command.run", session_id = %orchestrator.session_id());
    async {
        let mut state = initial;
        let answered_role = answers.role.parse::<RegistrationRole>().ok();
        if state.selected_role.is_some() && state.selected_role != answered_role {
            info!("draft belongs to another role, starting over");
            state = orchestrator.reset().await?;
        }
        for _ in 0..MAX_ROUNDS {
            match state.submission_status {
                SubmissionStatus::Succeeded => {
                    let route = ui.last_route();
                    info!(route = ?route, "signup finished");
                    if ui.notices().contains(&Notice::SignInRequired) {
                        println!("login: {}", route.unwrap_or_default());
                        return Ok(ExitCode::from(SIGN_IN_REQUIRED_EXIT));
                    }
                    return Ok(ExitCode::SUCCESS);
                }
                SubmissionStatus::Failed => return Ok(ExitCode::FAILURE),
                SubmissionStatus::Idle | SubmissionStatus::Submitting => {}
            }

            let step = state.current_step();
            let Some(kind) = FormKind::for_step(step, state.selected_role) else {
                anyhow::bail!("no form for {step}");
            };
            for spec in kind.fields() {
                if let Some(value) = answers.value_for(kind, spec.name) {
                    state = orchestrator.change_field(spec.name, value).await?;
                }
            }

            if !state.is_step_valid(step) {
                let report = state.errors(step).cloned().unwrap_or_default();
                print_report(translator.as_ref(), kind, &report);
                return Ok(ExitCode::FAILURE);
            }

            let (current, total) = StepSequencer::progress(&state);
            println!(
                "{} {}",
                translator
                    .translate("signup.progress")
                    .replace("{current}", &current.to_string())
                    .replace("{total}", &total.to_string()),
                translator.translate(&format!("signup.steps.{step}"))
            );
            state = orchestrator.next().await?;
        }
        anyhow::bail!("signup did not finish within {MAX_ROUNDS} steps")
    }
    .instrument(span)
    .await
}

/// Lists the steps for `role` with their localized field labels.
pub fn print_steps(config: &SignupConfig, role: &str) -> anyhow::Result<ExitCode> {
    let role: RegistrationRole = role.parse()?;
    let translator = build_translator(&config.locale)?;

    for (index, step) in StepSequencer::step_order(Some(role)).iter().enumerate() {
        let Some(kind) = FormKind::for_step(*step, Some(role)) else {
            continue;
        };
        let namespace = kind.namespace();
        println!(
            "{}. {} ({step})",
            index + 1,
            translator.translate(&format!("signup.steps.{step}"))
        );
        for spec in kind.fields() {
            let options = spec
                .options()
                .iter()
                .map(|option| translator.translate(&spec.option_key(namespace, option)))
                .collect::<Vec<_>>();
            if options.is_empty() {
                println!("   - {}", translator.translate(&spec.label_key(namespace)));
            } else {
                println!(
                    "   - {} [{}]",
                    translator.translate(&spec.label_key(namespace)),
                    options.join(", ")
                );
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Checks every step of an answers file offline.
pub fn validate_answers(config: &SignupConfig, answers_path: &Path) -> anyhow::Result<ExitCode> {
    let answers = Answers::load(answers_path)?;
    let translator = build_translator(&config.locale)?;
    let ctx = FormContext::new(SystemClock.today());

    let state = collect_answers(config, &answers, &ctx);
    let mut valid = true;
    for step in StepSequencer::step_order(state.selected_role) {
        if state.is_step_valid(*step) {
            continue;
        }
        valid = false;
        let Some(kind) = FormKind::for_step(*step, state.selected_role) else {
            continue;
        };
        println!("{}:", translator.translate(&format!("signup.steps.{step}")));
        let report = state.errors(*step).cloned().unwrap_or_default();
        print_report(&translator, kind, &report);
    }

    if !valid {
        return Ok(ExitCode::FAILURE);
    }
    let preview = redacted_request(&RegistrationRequest::from_state(&state))?;
    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(ExitCode::SUCCESS)
}

/// Builds a state holding every step's answers and validation, without I/O.
pub fn collect_answers(
    config: &SignupConfig,
    answers: &Answers,
    ctx: &FormContext,
) -> RegistrationState {
    let mut state = match answers.role.parse::<RegistrationRole>() {
        Ok(role) => RegistrationState::new().set_role(role, config.policy.role_change, ctx),
        Err(_) => RegistrationState::new(),
    };
    for step in StepSequencer::step_order(state.selected_role) {
        let Some(kind) = FormKind::for_step(*step, state.selected_role) else {
            continue;
        };
        if *step == StepKey::Step1 && state.selected_role.is_some() {
            continue;
        }
        let payload = answers.payload_for(kind);
        let report = kind.form(ctx).validate(&payload);
        state = state.apply_field_change(*step, FieldChange { payload, report });
    }
    state
}

fn print_report(translator: &dyn TranslatorPort, kind: FormKind, report: &ValidationReport) {
    let namespace = kind.namespace();
    for (field, error) in report.errors() {
        let label = kind
            .fields()
            .iter()
            .find(|spec| spec.name == field)
            .map(|spec| translator.translate(&spec.label_key(namespace)))
            .unwrap_or_else(|| field.to_string());
        let template = translator.translate(&error.message_key(namespace, field));
        let message = error.interpolate(&template);
        eprintln!("  {label}: {message}");
    }
}

fn redacted_request(request: &RegistrationRequest) -> anyhow::Result<Value> {
    let mut value = serde_json::to_value(request)?;
    if let Some(password) = value.get_mut("password") {
        *password = Value::String("********".to_string());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> FormContext {
        FormContext::new(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())
    }

    fn organizer_answers() -> Answers {
        Answers::from_json(
            r#"{
                "role": "organizer",
                "fields": {
                    "firstName": "Omar",
                    "lastName": "Hassan",
                    "birthDate": "1988-01-30",
                    "phoneNumber": "01155555555",
                    "gender": "male",
                    "address": "5 Tahrir Square",
                    "email": "omar@eco.example",
                    "password": "Passw0rd!",
                    "confirmPassword": "Passw0rd!"
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn collect_answers_validates_every_step() {
        let state = collect_answers(&SignupConfig::default(), &organizer_answers(), &ctx());
        for step in StepSequencer::step_order(state.selected_role) {
            assert!(state.is_step_valid(*step), "{step} should be valid");
        }
        let request = RegistrationRequest::from_state(&state);
        assert_eq!(request.role, "organizer");
        assert_eq!(request.field("gender"), Some("male"));
    }

    #[test]
    fn collect_answers_reports_invalid_role() {
        let mut answers = organizer_answers();
        answers.role = "admin".to_string();
        let state = collect_answers(&SignupConfig::default(), &answers, &ctx());
        assert!(!state.is_step_valid(StepKey::Step1));
        assert!(state.errors(StepKey::Step1).is_some_and(|r| !r.is_valid()));
    }

    #[test]
    fn preview_masks_password() {
        let state = collect_answers(&SignupConfig::default(), &organizer_answers(), &ctx());
        let preview = redacted_request(&RegistrationRequest::from_state(&state)).unwrap();
        assert_eq!(preview["password"], "********");
        assert!(preview.get("confirmPassword").is_none());
    }
}
