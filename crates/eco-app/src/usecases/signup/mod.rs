//! Signup use cases.
//!
//! This module exposes the signup orchestrator and the remote-call use cases
//! it drives.

mod context;
pub mod orchestrator;
mod retry;
mod sign_in;
mod submit_registration;

pub use context::SignupContext;
pub use orchestrator::{SignupError, SignupOrchestrator, SignupOrchestratorDeps};
pub use retry::RetryPolicy;
pub use sign_in::SignInWithCredentials;
pub use submit_registration::SubmitRegistration;
