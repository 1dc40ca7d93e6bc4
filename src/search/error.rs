use thiserror::Error;

/// Failure classes for a single remote search call.
///
/// The orchestrator keys its continue/stop/skip decisions off these variants,
/// so the client must classify carefully: redirect loops and HTTP 429 are the
/// service pushing back, not a broken page.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("too many redirects: {0}")]
    RedirectLoop(String),

    #[error("rate limited (HTTP 429)")]
    RateLimited,

    #[error("request failed with status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl SearchError {
    /// True when the service is telling us to back off entirely: pagination
    /// for the current unit should stop cleanly, keeping what was collected.
    pub fn is_throttle_signal(&self) -> bool {
        matches!(self, SearchError::RedirectLoop(_) | SearchError::RateLimited)
    }
}
