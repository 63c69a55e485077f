//! Error types for market data and brief generation

use thiserror::Error;

/// Market-brief specific errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// A provider could not supply data for one instrument
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// No instrument had a positive market capitalisation
    #[error("No instrument with a positive market capitalisation")]
    EmptyPopulation,

    /// Sentiment could not be assessed
    #[error("Sentiment assessment failed: {0}")]
    SentimentAssessment(String),

    /// A required credential or setting is missing
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    /// A pipeline stage failed
    #[error("Stage {stage} failed: {reason}")]
    StageFailure { stage: String, reason: String },

    /// Upstream API rejected the request
    #[error("API error: {0}")]
    ApiError(String),

    /// Rate limit exceeded for API
    #[error("Rate limit exceeded for {provider}")]
    RateLimitExceeded { provider: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl MarketError {
    /// Shorthand for a per-instrument data failure
    pub fn unavailable(symbol: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::DataUnavailable {
            symbol: symbol.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for market operations
pub type Result<T> = std::result::Result<T, MarketError>;

impl From<MarketError> for agent_core::Error {
    fn from(err: MarketError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

impl From<agent_core::Error> for MarketError {
    fn from(err: agent_core::Error) -> Self {
        MarketError::StageFailure {
            stage: "agent".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<agent_workflow::WorkflowError> for MarketError {
    fn from(err: agent_workflow::WorkflowError) -> Self {
        use agent_workflow::WorkflowError;
        match err {
            WorkflowError::NotConfigured => MarketError::ConfigurationMissing(
                "language model API key not found".to_string(),
            ),
            WorkflowError::StageFailed { role, reason, .. } => MarketError::StageFailure {
                stage: role,
                reason,
            },
            WorkflowError::RoleAssignment { role, reason } => MarketError::StageFailure {
                stage: role,
                reason,
            },
            other => MarketError::StageFailure {
                stage: "pipeline".to_string(),
                reason: other.to_string(),
            },
        }
    }
}
