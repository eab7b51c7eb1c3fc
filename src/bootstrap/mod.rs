//! Process bootstrap: configuration, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::resolve_config;
pub use wiring::{build_translator, wire_dependencies, WiringError, WiringResult};
