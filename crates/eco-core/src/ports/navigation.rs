use async_trait::async_trait;

#[async_trait]
pub trait NavigationPort: Send + Sync {
    async fn navigate(&self, route: &str) -> anyhow::Result<()>;
}
