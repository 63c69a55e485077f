//! Market data access
//!
//! Every call goes to the provider; nothing is cached between calls. A
//! failure for one instrument is reported for that instrument only.

use crate::api::{AlphaVantageClient, YahooFinanceClient};
use crate::config::MarketConfig;
use crate::error::{MarketError, Result};
use crate::instruments::Instrument;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

/// One daily close
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub close: f64,
}

/// Snapshot of one instrument
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub symbol: String,
    /// Absent when the provider does not report it
    pub market_cap: Option<f64>,
    pub recent_closes: Vec<PricePoint>,
}

impl Quote {
    /// Market cap usable for weighting: present, finite and positive
    pub fn positive_market_cap(&self) -> Option<f64> {
        self.market_cap.filter(|cap| cap.is_finite() && *cap > 0.0)
    }
}

/// Source of quotes, close history and earnings surprises
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Current snapshot of an instrument
    async fn quote(&self, instrument: &Instrument) -> Result<Quote>;

    /// The last `periods` daily closes, oldest first; may be shorter or empty
    async fn history(&self, instrument: &Instrument, periods: usize) -> Result<Vec<PricePoint>>;

    /// Surprise percentage of the most recent reported quarter
    ///
    /// `Ok(None)` means the instrument has no reported record.
    async fn latest_earnings_surprise(&self, instrument: &Instrument) -> Result<Option<f64>>;
}

/// Keep only the trailing `periods` closes of an oldest-first series
pub(crate) fn last_periods(mut closes: Vec<PricePoint>, periods: usize) -> Vec<PricePoint> {
    let excess = closes.len().saturating_sub(periods);
    closes.drain(..excess);
    closes
}

/// Production data source
///
/// Yahoo supplies prices, market caps and earnings without a key. When an
/// Alpha Vantage key is configured it is consulted for market caps and
/// surprises Yahoo could not provide.
pub struct LiveMarketData {
    yahoo: YahooFinanceClient,
    alpha_vantage: Option<AlphaVantageClient>,
    history_days: i64,
}

impl LiveMarketData {
    pub fn new(config: &MarketConfig) -> Result<Self> {
        config.validate()?;

        let alpha_vantage = config
            .alpha_vantage_api_key
            .as_ref()
            .map(|key| {
                AlphaVantageClient::new(
                    key.clone(),
                    config.alpha_vantage_rate_limit,
                    config.request_timeout,
                )
            })
            .transpose()?;

        if alpha_vantage.is_none() {
            debug!("No Alpha Vantage key; Yahoo is the only fundamentals source");
        }

        Ok(Self {
            yahoo: YahooFinanceClient::new(),
            alpha_vantage,
            history_days: config.history_days,
        })
    }

    async fn market_cap(&self, instrument: &Instrument) -> Result<Option<f64>> {
        let yahoo_error = match self.yahoo.market_cap(instrument.symbol).await {
            Ok(Some(cap)) => return Ok(Some(cap)),
            Ok(None) => None,
            Err(e) => Some(e),
        };

        match (&self.alpha_vantage, yahoo_error) {
            (Some(client), _) => {
                debug!(symbol = instrument.symbol, "Market cap from Alpha Vantage");
                let overview = client
                    .company_overview(instrument.symbol)
                    .await
                    .map_err(|e| MarketError::unavailable(instrument.symbol, e))?;
                Ok(overview.market_cap_value())
            }
            (None, Some(e)) => Err(MarketError::unavailable(instrument.symbol, e)),
            (None, None) => Ok(None),
        }
    }
}

#[async_trait]
impl MarketDataSource for LiveMarketData {
    async fn quote(&self, instrument: &Instrument) -> Result<Quote> {
        let (market_cap, closes) = tokio::join!(
            self.market_cap(instrument),
            self.yahoo.recent_closes(instrument.symbol, self.history_days),
        );

        // Closes are informational here; a missing history does not void the quote
        let recent_closes = closes.unwrap_or_else(|e| {
            debug!(symbol = instrument.symbol, error = %e, "No recent closes for quote");
            Vec::new()
        });

        Ok(Quote {
            symbol: instrument.symbol.to_string(),
            market_cap: market_cap?,
            recent_closes,
        })
    }

    async fn history(&self, instrument: &Instrument, periods: usize) -> Result<Vec<PricePoint>> {
        let closes = self
            .yahoo
            .recent_closes(instrument.symbol, self.history_days)
            .await
            .map_err(|e| MarketError::unavailable(instrument.symbol, e))?;

        Ok(last_periods(closes, periods))
    }

    async fn latest_earnings_surprise(&self, instrument: &Instrument) -> Result<Option<f64>> {
        let yahoo_error = match self.yahoo.latest_earnings_surprise(instrument.symbol).await {
            Ok(Some(surprise)) => return Ok(Some(surprise)),
            Ok(None) => None,
            Err(e) => Some(e),
        };

        match (&self.alpha_vantage, yahoo_error) {
            (Some(client), _) => {
                let quarters = client
                    .quarterly_earnings(instrument.symbol)
                    .await
                    .map_err(|e| MarketError::unavailable(instrument.symbol, e))?;
                Ok(quarters.first().and_then(|q| q.surprise_percent()))
            }
            (None, Some(e)) => Err(MarketError::unavailable(instrument.symbol, e)),
            (None, None) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::ASIA_TECH;

    #[test]
    fn test_positive_market_cap() {
        let mut quote = Quote {
            symbol: "2330.TW".to_string(),
            market_cap: Some(10.0),
            recent_closes: Vec::new(),
        };
        assert_eq!(quote.positive_market_cap(), Some(10.0));

        quote.market_cap = Some(0.0);
        assert_eq!(quote.positive_market_cap(), None);
        quote.market_cap = Some(-1.0);
        assert_eq!(quote.positive_market_cap(), None);
        quote.market_cap = Some(f64::NAN);
        assert_eq!(quote.positive_market_cap(), None);
        quote.market_cap = None;
        assert_eq!(quote.positive_market_cap(), None);
    }

    fn closes(values: &[f64]) -> Vec<PricePoint> {
        values
            .iter()
            .enumerate()
            .map(|(day, &close)| PricePoint {
                timestamp: DateTime::from_timestamp(1_700_000_000 + day as i64 * 86_400, 0)
                    .unwrap(),
                close,
            })
            .collect()
    }

    fn close_values(points: &[PricePoint]) -> Vec<f64> {
        points.iter().map(|p| p.close).collect()
    }

    #[test]
    fn test_last_periods_exact() {
        let trimmed = last_periods(closes(&[1.0, 2.0, 3.0]), 3);
        assert_eq!(close_values(&trimmed), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_last_periods_keeps_most_recent() {
        let series = closes(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let last_day = series[6].timestamp;

        let trimmed = last_periods(series, 5);
        assert_eq!(close_values(&trimmed), vec![3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(trimmed[4].timestamp, last_day);
    }

    #[test]
    fn test_last_periods_short_or_empty() {
        let trimmed = last_periods(closes(&[1.0, 2.0]), 5);
        assert_eq!(close_values(&trimmed), vec![1.0, 2.0]);

        assert!(last_periods(Vec::new(), 5).is_empty());
        assert!(last_periods(closes(&[1.0]), 0).is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_quote_without_alpha_vantage_key() {
        let source = LiveMarketData::new(&MarketConfig::default()).unwrap();
        let quote = source.quote(&ASIA_TECH[0]).await.unwrap();
        assert!(quote.positive_market_cap().is_some());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_live_history() {
        let source = LiveMarketData::new(&MarketConfig::default()).unwrap();
        let history = source
            .history(&crate::instruments::US_10Y_YIELD, 5)
            .await
            .unwrap();
        assert!(history.len() <= 5);
    }
}
