//! Signup domain module.
//!
//! This module defines the role-based multi-step registration flow: roles and
//! steps, per-step forms, the shared registration state, the step sequencer
//! and the pure signup state machine.

pub mod draft;
pub mod forms;
pub mod notice;
pub mod request;
pub mod role;
pub mod sequencer;
pub mod state;
pub mod state_machine;
pub mod step;
pub mod validation;

pub use draft::SignupDraft;
pub use forms::{FieldChange, FormContext, FormKind, StepForm};
pub use notice::{Notice, Route};
pub use request::{Credentials, RegistrationRequest};
pub use role::RegistrationRole;
pub use sequencer::StepSequencer;
pub use state::{AdvanceOutcome, RegistrationState, SubmissionStatus};
pub use state_machine::{SignupAction, SignupEvent, SignupStateMachine};
pub use step::{StepKey, StepPayload};
pub use validation::{FieldError, ValidationReport};
