use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Identifies one in-progress signup session (used for drafts and log correlation).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignupSessionId(String);

impl SignupSessionId {
    pub fn new() -> Self {
        SignupSessionId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Default for SignupSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for SignupSessionId {
    fn from(value: String) -> Self {
        SignupSessionId(value)
    }
}

impl Display for SignupSessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
