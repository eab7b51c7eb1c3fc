//! Tracing configuration for the signup CLI
//!
//! Log lines go to stderr so stdout stays reserved for command output.

use std::io;

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
///
/// ## Behavior / 行为
/// - **Development**: debug for the signup crates, warn for the HTTP stack
/// - **Production**: info for the signup crates, warn for the HTTP stack
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    let mut directives = vec!["warn".to_string()];
    for target in ["ecosphere_signup", "eco_core", "eco_app", "eco_infra"] {
        directives.push(format!("{target}={level}"));
    }
    directives.push("hyper=warn".to_string());
    directives.push("reqwest=warn".to_string());
    directives
}

/// Initialize the tracing subscriber
///
/// Respects `RUST_LOG`; falls back to [`build_filter_directives`].
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(build_filter_directives(is_development()).join(",")));

    // "2025-01-15 10:30:45.123 INFO [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(io::stderr);

    registry().with(env_filter).with(stderr_layer).try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_directives() {
        let dev_directives = build_filter_directives(true);
        assert!(dev_directives.contains(&"eco_app=debug".to_string()));
        assert!(dev_directives.contains(&"reqwest=warn".to_string()));

        let prod_directives = build_filter_directives(false);
        assert!(prod_directives.contains(&"eco_infra=info".to_string()));
        assert!(!prod_directives.iter().any(|d| d.ends_with("=debug")));
    }
}
