//! Signup draft port
//!
//! Persists an unfinished signup so it can be resumed. Implementations are
//! provided by the infrastructure layer (e.g. file-based storage).

use async_trait::async_trait;

use crate::signup::SignupDraft;

#[async_trait]
pub trait SignupDraftPort: Send + Sync {
    async fn load(&self) -> anyhow::Result<Option<SignupDraft>>;

    async fn save(&self, draft: &SignupDraft) -> anyhow::Result<()>;

    async fn clear(&self) -> anyhow::Result<()>;
}
