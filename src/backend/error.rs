use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Backend responded with {status}{}", suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("Backend rejected the request{}", suffix(.message))]
    Rejected { message: Option<String> },

    #[error("Unexpected response from backend: {0}")]
    Decode(String),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

impl BackendError {
    /// Message the backend attached to a failed response, if any.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            BackendError::Status { message, .. } | BackendError::Rejected { message } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            BackendError::Status { status, .. } => Some(*status),
            BackendError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, BackendError>;
