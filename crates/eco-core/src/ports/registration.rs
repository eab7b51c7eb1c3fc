use async_trait::async_trait;

use super::errors::GatewayError;
use crate::signup::RegistrationRequest;

#[async_trait]
pub trait RegistrationPort: Send + Sync {
    /// Creates the account described by `request`.
    async fn register(&self, request: &RegistrationRequest) -> Result<(), GatewayError>;
}
