//! Alpha Vantage API client
//!
//! Supplies market capitalisation (`OVERVIEW`) and reported-vs-estimated
//! quarterly earnings (`EARNINGS`).

use crate::error::{MarketError, Result};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER: &str = "Alpha Vantage";

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: String,
    rate_limiter: SharedRateLimiter,
}

/// Company overview fields used for exposure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CompanyOverview {
    pub symbol: String,
    pub name: Option<String>,
    #[serde(rename = "MarketCapitalization")]
    pub market_cap: Option<String>,
}

impl CompanyOverview {
    /// Market capitalisation, when reported and numeric
    pub fn market_cap_value(&self) -> Option<f64> {
        parse_number(self.market_cap.as_deref())
    }
}

/// One quarter of reported earnings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterlyEarnings {
    pub fiscal_date_ending: String,
    pub reported_date: Option<String>,
    #[serde(rename = "reportedEPS")]
    pub reported_eps: Option<String>,
    #[serde(rename = "estimatedEPS")]
    pub estimated_eps: Option<String>,
    pub surprise_percentage: Option<String>,
}

impl QuarterlyEarnings {
    /// Surprise percentage, when reported and numeric
    pub fn surprise_percent(&self) -> Option<f64> {
        parse_number(self.surprise_percentage.as_deref())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EarningsResponse {
    #[serde(default)]
    quarterly_earnings: Vec<QuarterlyEarnings>,
}

/// Alpha Vantage reports missing numbers as "None" or "-"
fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

impl AlphaVantageClient {
    /// Create a client with an API key, a per-minute rate limit and a
    /// request timeout
    pub fn new(api_key: impl Into<String>, rate_limit: u32, timeout: Duration) -> Result<Self> {
        let per_minute = NonZeroU32::new(rate_limit).ok_or_else(|| {
            MarketError::ConfigError("Alpha Vantage rate limit must be positive".to_string())
        })?;
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(per_minute)));
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            rate_limiter,
        })
    }

    /// Company overview, including market capitalisation
    pub async fn company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        let data = self.query("OVERVIEW", symbol).await?;

        // An empty object means the symbol is unknown to Alpha Vantage
        if data.as_object().is_none_or(serde_json::Map::is_empty) {
            return Err(MarketError::unavailable(symbol, "no overview data"));
        }

        Ok(serde_json::from_value(data)?)
    }

    /// Quarterly earnings, most recent first
    pub async fn quarterly_earnings(&self, symbol: &str) -> Result<Vec<QuarterlyEarnings>> {
        let data = self.query("EARNINGS", symbol).await?;
        let response: EarningsResponse = serde_json::from_value(data)?;
        Ok(response.quarterly_earnings)
    }

    async fn query(&self, function: &str, symbol: &str) -> Result<serde_json::Value> {
        // Wait for rate limiter
        self.rate_limiter.until_ready().await;
        debug!(function, symbol, "Alpha Vantage request");

        let response = self
            .client
            .get(BASE_URL)
            .query(&[
                ("function", function),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MarketError::AlphaVantageError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: serde_json::Value = response.json().await?;
        check_api_errors(&data)?;
        Ok(data)
    }
}

/// Alpha Vantage returns 200 with an error key instead of an HTTP status
fn check_api_errors(data: &serde_json::Value) -> Result<()> {
    if let Some(error) = data.get("Error Message") {
        return Err(MarketError::AlphaVantageError(error.to_string()));
    }

    if data.get("Note").is_some() || data.get("Information").is_some() {
        return Err(MarketError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = AlphaVantageClient::new("test_key", 5, Duration::from_secs(5)).unwrap();
        assert_eq!(client.api_key, "test_key");
        assert!(AlphaVantageClient::new("k", 0, Duration::from_secs(5)).is_err());
    }

    #[test]
    fn test_overview_market_cap() {
        let overview: CompanyOverview = serde_json::from_value(json!({
            "Symbol": "TSM",
            "Name": "Taiwan Semiconductor",
            "MarketCapitalization": "912000000000"
        }))
        .unwrap();
        assert_eq!(overview.market_cap_value(), Some(912_000_000_000.0));

        let missing: CompanyOverview = serde_json::from_value(json!({
            "Symbol": "X",
            "MarketCapitalization": "None"
        }))
        .unwrap();
        assert_eq!(missing.market_cap_value(), None);
    }

    #[test]
    fn test_earnings_surprise_parsing() {
        let response: EarningsResponse = serde_json::from_value(json!({
            "symbol": "TSM",
            "quarterlyEarnings": [
                {
                    "fiscalDateEnding": "2025-06-30",
                    "reportedDate": "2025-07-17",
                    "reportedEPS": "2.47",
                    "estimatedEPS": "2.35",
                    "surprise": "0.12",
                    "surprisePercentage": "5.1064"
                },
                {
                    "fiscalDateEnding": "2025-03-31",
                    "surprisePercentage": "None"
                }
            ]
        }))
        .unwrap();

        assert_eq!(response.quarterly_earnings.len(), 2);
        assert_eq!(response.quarterly_earnings[0].surprise_percent(), Some(5.1064));
        assert_eq!(response.quarterly_earnings[1].surprise_percent(), None);
    }

    #[test]
    fn test_api_error_keys() {
        assert!(check_api_errors(&json!({"Symbol": "TSM"})).is_ok());
        assert!(matches!(
            check_api_errors(&json!({"Error Message": "Invalid API call"})),
            Err(MarketError::AlphaVantageError(_))
        ));
        assert!(matches!(
            check_api_errors(&json!({"Note": "Thank you for using Alpha Vantage"})),
            Err(MarketError::RateLimitExceeded { .. })
        ));
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_company_overview_live() {
        let key = std::env::var("ALPHA_VANTAGE_API_KEY").unwrap();
        let client = AlphaVantageClient::new(key, 5, Duration::from_secs(30)).unwrap();
        let overview = client.company_overview("TSM").await.unwrap();
        assert!(overview.market_cap_value().is_some());
    }
}
