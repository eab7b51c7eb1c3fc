use thiserror::Error;

/// Failure of a call to the registration or authentication endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("rejected with status {status}")]
    Rejected {
        status: u16,
        /// Server-provided message, if the body carried one.
        message: Option<String>,
    },
}

impl GatewayError {
    /// Timeouts and connection failures may succeed on a second attempt;
    /// server rejections never do.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Timeout | GatewayError::Transport(_))
    }

    /// Text that can be shown to the user next to the localized notice.
    pub fn user_reason(&self) -> Option<String> {
        match self {
            GatewayError::Rejected { message, .. } => message.clone(),
            _ => None,
        }
    }
}
