use thiserror::Error;

/// Why an exchange with the chat endpoint failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    #[error("chat endpoint is rate limiting requests (HTTP 429)")]
    RateLimited,

    #[error("chat endpoint returned HTTP {0}")]
    Status(u16),

    #[error("could not reach chat endpoint: {0}")]
    Transport(String),

    #[error("malformed response from chat endpoint: {0}")]
    Malformed(String),
}

/// The two failure kinds a user ever sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    ConnectivityFailure,
}

impl ChatError {
    /// 429 is the only status treated specially; everything else is a
    /// connectivity failure.
    pub fn kind(&self) -> FailureKind {
        match self {
            ChatError::RateLimited => FailureKind::RateLimited,
            ChatError::Status(_) | ChatError::Transport(_) | ChatError::Malformed(_) => {
                FailureKind::ConnectivityFailure
            }
        }
    }
}
