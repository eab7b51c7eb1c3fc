//! Signup configuration domain model
//!
//! Pure data: the loader in `eco-infra` maps TOML onto these structs, every
//! section and field falls back to the defaults below when absent.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REGISTER_PATH: &str = "/api/auth/register";
pub const DEFAULT_SIGN_IN_PATH: &str = "/api/auth/callback/credentials";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 1;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

/// Signup configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupConfig {
    pub api: ApiConfig,
    pub routes: RoutesConfig,
    pub policy: PolicyConfig,
    pub locale: LocaleConfig,
    pub draft: DraftConfig,
}

/// Remote endpoints used by the submission coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub register_path: String,
    pub sign_in_path: String,
    /// Upper bound for a single remote call.
    pub timeout_ms: u64,
    /// Extra attempts after a transport failure (timeouts, connection errors).
    pub retry_attempts: u32,
    pub retry_backoff_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            register_path: DEFAULT_REGISTER_PATH.to_string(),
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_backoff_ms: DEFAULT_RETRY_BACKOFF_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub home: String,
    pub login: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            home: "/".to_string(),
            login: "/login".to_string(),
        }
    }
}

/// When the "registration succeeded" notice is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuccessNoticePolicy {
    /// Show it as soon as the registration endpoint accepts the request.
    OnRegistration,
    /// Show it only once the follow-up sign-in completed.
    #[default]
    AfterSignIn,
}

/// What happens to role-specific step data when the selected role changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleChangePolicy {
    /// Discard payloads of steps whose form differs under the new role.
    #[default]
    Purge,
    /// Keep payloads, re-validate them against the new role's forms.
    Preserve,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub success_notice: SuccessNoticePolicy,
    pub role_change: RoleChangePolicy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    pub language: String,
    /// Directory holding `<language>.json` catalogs. Empty means built-in only.
    pub catalog_dir: String,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            catalog_dir: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    /// Draft file path. Empty disables draft persistence.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SignupConfig = serde_json::from_str(
            r#"{"api": {"base_url": "https://eco.example"}, "policy": {"role_change": "preserve"}}"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://eco.example");
        assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
        assert_eq!(config.api.retry_attempts, 1);
        assert_eq!(config.policy.role_change, RoleChangePolicy::Preserve);
        assert_eq!(config.policy.success_notice, SuccessNoticePolicy::AfterSignIn);
        assert_eq!(config.routes.home, "/");
    }
}
