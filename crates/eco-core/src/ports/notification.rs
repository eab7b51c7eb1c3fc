use async_trait::async_trait;

use crate::signup::Notice;

#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Shows `message` (already localized) for `notice`.
    async fn notify(&self, notice: &Notice, message: &str);
}
