use std::sync::Arc;

use eco_core::ports::{AuthPort, GatewayError};
use eco_core::signup::Credentials;
use tracing::info;

use super::retry::RetryPolicy;

/// Use case for the credential sign-in that follows a successful registration.
pub struct SignInWithCredentials {
    auth: Arc<dyn AuthPort>,
    retry: RetryPolicy,
}

impl SignInWithCredentials {
    pub fn new(auth: Arc<dyn AuthPort>, retry: RetryPolicy) -> Self {
        Self { auth, retry }
    }

    pub async fn execute(&self, credentials: &Credentials) -> Result<(), GatewayError> {
        info!(email = %credentials.email, "signing in after registration");
        self.retry
            .run("sign_in", || self.auth.sign_in(credentials))
            .await
    }
}
