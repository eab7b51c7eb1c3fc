//! # Configuration Resolution / 配置解析
//!
//! Picks the configuration source for a command: an explicit TOML file, or
//! the built-in defaults, then applies environment overrides.

use std::path::Path;

use eco_core::config::SignupConfig;
use eco_infra::config::{apply_env_overrides, load_config};
use tracing::info;

pub fn resolve_config(path: Option<&Path>) -> anyhow::Result<SignupConfig> {
    let config = match path {
        Some(path) => {
            info!(path = %path.display(), "loading signup config");
            load_config(path)?
        }
        None => SignupConfig::default(),
    };
    Ok(apply_env_overrides(config))
}
