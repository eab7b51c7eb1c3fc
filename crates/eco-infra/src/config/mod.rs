//! # Configuration Loader / 配置加载器
//!
//! Reads a TOML file into the [`SignupConfig`] DTO. Missing sections and keys
//! take the defaults declared in `eco-core`; no further validation happens
//! here.

use std::path::Path;

use anyhow::Context;
use eco_core::config::SignupConfig;
use tracing::debug;

/// Overrides `api.base_url` when set and non-empty.
pub const API_BASE_URL_ENV: &str = "ECOSPHERE_API_BASE_URL";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`SignupConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<SignupConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> anyhow::Result<SignupConfig> {
    toml::from_str(content).context("Failed to parse config as TOML")
}

/// Applies environment overrides from the process environment.
pub fn apply_env_overrides(config: SignupConfig) -> SignupConfig {
    apply_overrides_from(config, |key| std::env::var(key).ok())
}

/// Applies overrides using `lookup` as the environment.
pub fn apply_overrides_from<F>(mut config: SignupConfig, lookup: F) -> SignupConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(API_BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        debug!(base_url = %base_url, "api base url overridden from environment");
        config.api.base_url = base_url.trim().to_string();
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use eco_core::config::{RoleChangePolicy, SuccessNoticePolicy, DEFAULT_TIMEOUT_MS};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let toml_content = r#"
            [api]
            base_url = "https://eco.example"
            timeout_ms = 2500

            [routes]
            login = "/auth/login"

            [policy]
            success_notice = "on_registration"
            role_change = "preserve"

            [draft]
            path = "/tmp/eco/draft.json"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = load_config(temp_file.path()).unwrap();

        assert_eq!(config.api.base_url, "https://eco.example");
        assert_eq!(config.api.timeout_ms, 2500);
        assert_eq!(config.api.register_path, "/api/auth/register");
        assert_eq!(config.routes.login, "/auth/login");
        assert_eq!(config.routes.home, "/");
        assert_eq!(config.policy.success_notice, SuccessNoticePolicy::OnRegistration);
        assert_eq!(config.policy.role_change, RoleChangePolicy::Preserve);
        assert_eq!(config.draft.path, "/tmp/eco/draft.json");
        assert_eq!(config.locale.language, "en");
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, SignupConfig::default());
        assert_eq!(config.api.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_config(Path::new("/nonexistent/eco/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/eco/config.toml"));
    }

    #[test]
    fn test_unknown_policy_value_is_rejected() {
        let err = parse_config("[policy]\nrole_change = \"sometimes\"\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let config = apply_overrides_from(SignupConfig::default(), |key| {
            (key == API_BASE_URL_ENV).then(|| " https://staging.eco.example ".to_string())
        });
        assert_eq!(config.api.base_url, "https://staging.eco.example");

        let untouched = apply_overrides_from(SignupConfig::default(), |_| Some(String::new()));
        assert_eq!(untouched, SignupConfig::default());
    }
}
