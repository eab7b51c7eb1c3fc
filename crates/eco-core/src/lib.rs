//! # eco-core
//!
//! Core domain models and business logic for the EcoSphere signup flow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod ids;
pub mod ports;
pub mod secret;
pub mod signup;

// Re-export commonly used types at the crate root
pub use config::SignupConfig;
pub use ids::SignupSessionId;
pub use secret::SecretString;
pub use signup::{
    RegistrationRole, RegistrationState, SignupAction, SignupEvent, SignupStateMachine, StepKey,
    StepPayload, SubmissionStatus,
};
