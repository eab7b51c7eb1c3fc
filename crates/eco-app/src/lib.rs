//! EcoSphere Signup Application Orchestration Layer
//!
//! This crate contains the signup use cases and the orchestrator that runs
//! the signup state machine against its ports.

pub mod usecases;

pub use usecases::signup::{SignupOrchestrator, SignupOrchestratorDeps};
