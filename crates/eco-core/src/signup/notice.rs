use serde::{Deserialize, Serialize};

/// User-facing notices raised by the submission flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Account created (and, depending on policy, signed in).
    RegistrationSucceeded,
    /// Registration rejected or unreachable; entered data is kept.
    RegistrationFailed { reason: Option<String> },
    /// Account created but the automatic sign-in failed.
    SignInRequired,
}

impl Notice {
    pub fn message_key(&self) -> &'static str {
        match self {
            Notice::RegistrationSucceeded => "signup.notice.registered",
            Notice::RegistrationFailed { .. } => "signup.notice.registrationFailed",
            Notice::SignInRequired => "signup.notice.signInRequired",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::RegistrationFailed { .. })
    }

    /// Joins the translated message with the server-provided reason, if any.
    pub fn render(&self, translated: &str) -> String {
        match self {
            Notice::RegistrationFailed {
                reason: Some(reason),
            } if !reason.is_empty() => format!("{translated}: {reason}"),
            _ => translated.to_string(),
        }
    }
}

/// Named navigation targets; the route strings come from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
}
