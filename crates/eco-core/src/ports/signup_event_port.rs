use crate::signup::RegistrationState;

#[async_trait::async_trait]
pub trait SignupEventPort: Send + Sync {
    async fn emit_state_changed(&self, state: &RegistrationState);
}
