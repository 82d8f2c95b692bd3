use std::time::Duration;

/// Upper bound on a single remote call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

/// Endpoint, credentials, and time budget for one remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub token: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// `endpoint` is the full URL of the function to POST to; a trailing
    /// slash is dropped.
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
