//! Configuration for market data access and brief generation

use crate::analysis::{SentimentScorer, SentimentThresholds};
use crate::error::{MarketError, Result};
use agent_runtime::RuntimeConfig;
use agent_runtime::executor::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Configuration for market data access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Alpha Vantage API key (market caps and earnings); optional
    pub alpha_vantage_api_key: Option<String>,

    /// Alpha Vantage requests per minute (free tier: 5)
    pub alpha_vantage_rate_limit: u32,

    /// Calendar days of daily history requested from Yahoo
    pub history_days: i64,

    /// Trading periods the sentiment scorer compares (first vs last)
    pub sentiment_periods: usize,

    /// Request timeout duration
    pub request_timeout: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            alpha_vantage_rate_limit: 5,
            history_days: 10,
            sentiment_periods: 5,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl MarketConfig {
    /// Create a new configuration builder
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Build from environment variables
    ///
    /// Reads `ALPHA_VANTAGE_API_KEY`, `MARKET_HISTORY_DAYS`,
    /// `MARKET_SENTIMENT_PERIODS` and `MARKET_REQUEST_TIMEOUT_SECS`; unset
    /// variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder().with_env_api_key();
        if let Some(days) = env_parse::<i64>("MARKET_HISTORY_DAYS")? {
            builder = builder.history_days(days);
        }
        if let Some(periods) = env_parse::<usize>("MARKET_SENTIMENT_PERIODS")? {
            builder = builder.sentiment_periods(periods);
        }
        if let Some(secs) = env_parse::<u64>("MARKET_REQUEST_TIMEOUT_SECS")? {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Sentiment scorer over the configured window
    pub fn sentiment_scorer(&self) -> SentimentScorer {
        SentimentScorer::new(self.sentiment_periods, SentimentThresholds::default())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.history_days <= 0 {
            return Err(MarketError::ConfigError(
                "history_days must be greater than 0".to_string(),
            ));
        }

        if self.sentiment_periods < 2 {
            return Err(MarketError::ConfigError(
                "sentiment_periods must be at least 2".to_string(),
            ));
        }

        if self.alpha_vantage_rate_limit == 0 {
            return Err(MarketError::ConfigError(
                "alpha_vantage_rate_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for MarketConfig
#[derive(Debug, Default)]
pub struct MarketConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    alpha_vantage_rate_limit: Option<u32>,
    history_days: Option<i64>,
    sentiment_periods: Option<usize>,
    request_timeout: Option<Duration>,
}

impl MarketConfigBuilder {
    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Load Alpha Vantage API key from environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Ok(key) = std::env::var("ALPHA_VANTAGE_API_KEY") {
            if !key.trim().is_empty() {
                self.alpha_vantage_api_key = Some(key);
            }
        }
        self
    }

    /// Set the Alpha Vantage rate limit (requests per minute)
    pub fn alpha_vantage_rate_limit(mut self, per_minute: u32) -> Self {
        self.alpha_vantage_rate_limit = Some(per_minute);
        self
    }

    /// Set the history window in calendar days
    pub fn history_days(mut self, days: i64) -> Self {
        self.history_days = Some(days);
        self
    }

    /// Set the number of periods compared by the sentiment scorer
    pub fn sentiment_periods(mut self, periods: usize) -> Self {
        self.sentiment_periods = Some(periods);
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<MarketConfig> {
        let defaults = MarketConfig::default();

        let config = MarketConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            alpha_vantage_rate_limit: self
                .alpha_vantage_rate_limit
                .unwrap_or(defaults.alpha_vantage_rate_limit),
            history_days: self.history_days.unwrap_or(defaults.history_days),
            sentiment_periods: self.sentiment_periods.unwrap_or(defaults.sentiment_periods),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Settings for the language-model side of brief generation
#[derive(Debug, Clone)]
pub struct BriefConfig {
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    /// Tool-loop iterations allowed to the analyst
    pub analyst_max_iterations: usize,
    /// Upper bound on one whole brief; `None` waits indefinitely
    pub run_timeout: Option<Duration>,
}

impl Default for BriefConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2048,
            temperature: 0.3,
            analyst_max_iterations: 8,
            run_timeout: None,
        }
    }
}

impl BriefConfig {
    /// Defaults with the model taken from `OPENAI_MODEL` when set
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        config
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_run_timeout(mut self, timeout: Duration) -> Self {
        self.run_timeout = Some(timeout);
        self
    }

    /// Runtime defaults for the agents playing each role
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            default_max_iterations: self.analyst_max_iterations,
            default_model: self.model.clone(),
            default_max_tokens: self.max_tokens,
            default_temperature: self.temperature,
        }
    }
}

fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| MarketError::ConfigError(format!("{key}: {e}"))),
        Err(_) => Ok(None),
    }
}
