pub mod signup;

pub use signup::{
    RetryPolicy, SignInWithCredentials, SignupContext, SignupError, SignupOrchestrator,
    SignupOrchestratorDeps, SubmitRegistration,
};
