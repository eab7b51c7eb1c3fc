//! File-based signup draft repository
//!
//! Persists the unfinished signup as a JSON file so an interrupted session
//! can resume. Drafts never contain passwords.

use std::path::PathBuf;

use async_trait::async_trait;
use eco_core::ports::SignupDraftPort;
use eco_core::signup::SignupDraft;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

pub const DEFAULT_DRAFT_FILE: &str = "signup_draft.json";

pub struct FileSignupDraftRepository {
    draft_file_path: PathBuf,
}

impl FileSignupDraftRepository {
    /// Create repository with custom file path
    pub fn new(draft_file_path: PathBuf) -> Self {
        Self { draft_file_path }
    }

    /// Create repository with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            draft_file_path: base_dir.join(DEFAULT_DRAFT_FILE),
        }
    }

    async fn ensure_parent_dir(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.draft_file_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl SignupDraftPort for FileSignupDraftRepository {
    async fn load(&self) -> anyhow::Result<Option<SignupDraft>> {
        if !fs::try_exists(&self.draft_file_path).await? {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.draft_file_path).await?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let draft: SignupDraft = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse signup draft: {e}"))?;

        Ok(Some(draft))
    }

    async fn save(&self, draft: &SignupDraft) -> anyhow::Result<()> {
        self.ensure_parent_dir().await?;

        let json = serde_json::to_string_pretty(draft)
            .map_err(|e| anyhow::anyhow!("Failed to serialize signup draft: {e}"))?;

        let mut file = fs::File::create(&self.draft_file_path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create draft file: {e}"))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to write draft file: {e}"))?;

        file.sync_all()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to sync draft file: {e}"))?;

        debug!(path = %self.draft_file_path.display(), "signup draft saved");
        Ok(())
    }

    async fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.draft_file_path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(anyhow::anyhow!("Failed to remove draft file: {err}")),
        }
    }
}
