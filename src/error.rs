use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum SearchError {
    /// Caller supplied a missing or malformed argument (empty query)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream credential or another required setting is absent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Timeout or transport failure talking to the recipe provider
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] reqwest::Error),

    /// The recipe provider answered with a non-success status
    #[error("upstream returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    /// Failed to load configuration from file or environment
    #[error("configuration error: {0}")]
    ConfigLoad(#[from] config::ConfigError),
}

impl SearchError {
    /// True for provider-side failures (transient, 500-class at the boundary).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            SearchError::UpstreamUnavailable(_) | SearchError::UpstreamStatus(_)
        )
    }
}
