use std::sync::Arc;

use eco_core::ports::{GatewayError, RegistrationPort};
use eco_core::signup::RegistrationRequest;
use tracing::info;

use super::retry::RetryPolicy;

/// Use case for sending the merged registration request.
pub struct SubmitRegistration {
    registration: Arc<dyn RegistrationPort>,
    retry: RetryPolicy,
}

impl SubmitRegistration {
    pub fn new(registration: Arc<dyn RegistrationPort>, retry: RetryPolicy) -> Self {
        Self {
            registration,
            retry,
        }
    }

    pub async fn execute(&self, request: &RegistrationRequest) -> Result<(), GatewayError> {
        info!(role = %request.role, "submitting registration");
        self.retry
            .run("register", || self.registration.register(request))
            .await
    }
}
