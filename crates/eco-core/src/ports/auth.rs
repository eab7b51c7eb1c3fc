use async_trait::async_trait;

use super::errors::GatewayError;
use crate::signup::Credentials;

#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Establishes a session for freshly registered credentials.
    async fn sign_in(&self, credentials: &Credentials) -> Result<(), GatewayError>;
}
