//! Configuration options for the Saveurs client

use std::time::Duration;

/// Configuration options for the Saveurs client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// The request timeout applied to every HTTP call.
    ///
    /// The upstream API does not specify one; without it a stalled
    /// request would suspend the calling action indefinitely.
    pub request_timeout: Option<Duration>,

    /// Whether to persist the session to the configured session store
    pub persist_session: bool,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            persist_session: true,
        }
    }
}

impl ClientOptions {
    /// Set the request timeout
    pub fn with_request_timeout(mut self, value: Option<Duration>) -> Self {
        self.request_timeout = value;
        self
    }

    /// Set whether to persist the session
    pub fn with_persist_session(mut self, value: bool) -> Self {
        self.persist_session = value;
        self
    }
}
