//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `eco-infra` and `eco-app` together. It
//! assembles adapters into [`SignupOrchestratorDeps`] and makes no flow
//! decisions of its own.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eco_app::SignupOrchestratorDeps;
use eco_core::config::{LocaleConfig, SignupConfig};
use eco_core::ports::SignupDraftPort;
use eco_infra::i18n::CatalogError;
use eco_infra::{
    CatalogTranslator, FileSignupDraftRepository, HttpAuthGateway, HttpRegistrationGateway,
    SystemClock,
};
use tracing::{debug, warn};

use crate::terminal::TerminalUi;

/// English catalog compiled into the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../../locales/en.json");

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),

    #[error("Translation catalog initialization failed: {0}")]
    CatalogInit(String),
}

/// Builds the translator for `locale`: the configured catalog, backed by the
/// built-in English entries.
pub fn build_translator(locale: &LocaleConfig) -> WiringResult<CatalogTranslator> {
    let builtin = CatalogTranslator::from_json(BUILTIN_CATALOG)
        .map_err(|e| WiringError::CatalogInit(e.to_string()))?;

    if locale.catalog_dir.trim().is_empty() {
        return Ok(builtin);
    }

    match CatalogTranslator::load_language(Path::new(&locale.catalog_dir), &locale.language) {
        Ok(catalog) => Ok(catalog.with_fallback(builtin)),
        Err(CatalogError::Read { path, source }) => {
            warn!(
                path = %path.display(),
                error = %source,
                "translation catalog not readable, using built-in English"
            );
            Ok(builtin)
        }
        Err(err) => Err(WiringError::CatalogInit(err.to_string())),
    }
}

/// Assembles the orchestrator's ports from `config`.
pub fn wire_dependencies(
    config: &SignupConfig,
    translator: Arc<CatalogTranslator>,
    ui: Arc<TerminalUi>,
) -> WiringResult<SignupOrchestratorDeps> {
    let registration = HttpRegistrationGateway::from_config(&config.api)
        .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;
    let auth = HttpAuthGateway::from_config(&config.api)
        .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;

    let drafts: Option<Arc<dyn SignupDraftPort>> = if config.draft.path.trim().is_empty() {
        None
    } else {
        debug!(path = %config.draft.path, "signup drafts enabled");
        Some(Arc::new(FileSignupDraftRepository::new(PathBuf::from(
            &config.draft.path,
        ))))
    };

    Ok(SignupOrchestratorDeps {
        registration: Arc::new(registration),
        auth: Arc::new(auth),
        navigation: ui.clone(),
        notification: ui.clone(),
        translator,
        events: ui,
        clock: Arc::new(SystemClock),
        drafts,
    })
}
