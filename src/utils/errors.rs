use thiserror::Error;

#[derive(Error, Debug)]
pub enum CredHubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CredHub API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CredHubError>;

impl CredHubError {
    /// Whether the caller may reasonably retry the same call.
    pub fn is_retryable(&self) -> bool {
        match self {
            CredHubError::Transport(_) => true,
            CredHubError::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Fatal setup problems that no retry will fix.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CredHubError::Config(_))
    }

    /// HTTP status of a remote API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            CredHubError::Api { status, .. } => Some(*status),
            CredHubError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
