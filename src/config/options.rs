use crate::utils::errors::{CredHubError, Result};
use std::time::Duration;

const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(15);

/// Per-request timeouts applied by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    connection_timeout: Duration,
    read_timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl ClientOptions {
    pub fn new(connection_timeout: Duration, read_timeout: Duration) -> Self {
        Self {
            connection_timeout,
            read_timeout,
        }
    }

    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn connection_timeout(&self) -> Duration {
        self.connection_timeout
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    /// Reject timeouts that would make every request fail immediately
    pub fn validate(&self) -> Result<()> {
        if self.connection_timeout.is_zero() {
            return Err(CredHubError::Config(
                "Connection timeout must be greater than zero".to_string(),
            ));
        }
        if self.read_timeout.is_zero() {
            return Err(CredHubError::Config(
                "Read timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
