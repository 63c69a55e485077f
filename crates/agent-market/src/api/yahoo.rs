//! Yahoo Finance API client

use crate::data::PricePoint;
use crate::error::{MarketError, Result};
use chrono::{DateTime, Duration, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Earnings events requested per lookup; covers a year of quarters plus
/// the next scheduled report
const EARNINGS_EVENT_LIMIT: u32 = 6;

/// Yahoo Finance API client
///
/// Daily closes, market capitalisation and earnings events. Yahoo needs no
/// API key.
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient;

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self
    }

    /// Daily closes between `start` and `end`, oldest first
    pub async fn daily_closes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PricePoint>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp()).map_err(|e| {
            MarketError::YahooFinanceError(format!("Invalid start timestamp: {e}"))
        })?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let mut points: Vec<PricePoint> = quotes
            .iter()
            .filter(|q| q.close.is_finite())
            .filter_map(|q| {
                DateTime::from_timestamp(q.timestamp as i64, 0).map(|timestamp| PricePoint {
                    timestamp,
                    close: q.close,
                })
            })
            .collect();
        points.sort_by_key(|p| p.timestamp);
        Ok(points)
    }

    /// Market capitalisation from the quote summary, when reported
    pub async fn market_cap(&self, symbol: &str) -> Result<Option<f64>> {
        let mut provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let summary = provider
            .get_ticker_info(symbol)
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        Ok(market_cap_from_summary(&summary))
    }

    /// Surprise percentage of the most recent already-reported quarter
    pub async fn latest_earnings_surprise(&self, symbol: &str) -> Result<Option<f64>> {
        let mut provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        let events = provider
            .get_earnings_only(symbol, EARNINGS_EVENT_LIMIT)
            .await
            .map_err(|e| MarketError::YahooFinanceError(e.to_string()))?;

        Ok(latest_reported_surprise(&events, OffsetDateTime::now_utc()))
    }

    /// Daily closes over the last `days` calendar days
    pub async fn recent_closes(&self, symbol: &str, days: i64) -> Result<Vec<PricePoint>> {
        let end = Utc::now();
        self.daily_closes(symbol, end - Duration::days(days), end).await
    }
}

fn market_cap_from_summary(summary: &yahoo::YQuoteSummary) -> Option<f64> {
    summary
        .quote_summary
        .as_ref()?
        .result
        .as_ref()?
        .iter()
        .find_map(|data| data.summary_detail.as_ref()?.market_cap)
        .map(|cap| cap as f64)
}

/// Upcoming reports carry no surprise yet, so only events dated at or
/// before `now` count
fn latest_reported_surprise(
    events: &[yahoo::FinancialEvent],
    now: OffsetDateTime,
) -> Option<f64> {
    events
        .iter()
        .filter(|event| event.earnings_date <= now)
        .max_by_key(|event| event.earnings_date)
        .and_then(|event| event.surprise_percent)
        .filter(|surprise| surprise.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(unix: i64, surprise: Option<f64>) -> yahoo::FinancialEvent {
        yahoo::FinancialEvent {
            earnings_date: OffsetDateTime::from_unix_timestamp(unix).unwrap(),
            event_type: "Earnings".to_string(),
            eps_estimate: Some(1.0),
            reported_eps: surprise.map(|s| 1.0 + s / 100.0),
            surprise_percent: surprise,
            timezone: None,
        }
    }

    #[test]
    fn test_market_cap_from_summary() {
        let summary: yahoo::YQuoteSummary = serde_json::from_value(json!({
            "quoteSummary": {
                "result": [{ "summaryDetail": { "marketCap": 850_000_000_000_u64 } }],
                "error": null
            }
        }))
        .unwrap();
        assert_eq!(market_cap_from_summary(&summary), Some(850_000_000_000.0));

        let empty: yahoo::YQuoteSummary = serde_json::from_value(json!({
            "quoteSummary": { "result": [{ "summaryDetail": {} }] }
        }))
        .unwrap();
        assert_eq!(market_cap_from_summary(&empty), None);

        let missing: yahoo::YQuoteSummary = serde_json::from_value(json!({})).unwrap();
        assert_eq!(market_cap_from_summary(&missing), None);
    }

    #[test]
    fn test_latest_reported_surprise_skips_upcoming() {
        let now = OffsetDateTime::from_unix_timestamp(1_750_000_000).unwrap();
        let events = vec![
            event(1_760_000_000, None),
            event(1_745_000_000, Some(4.2)),
            event(1_737_000_000, Some(-1.5)),
        ];
        assert_eq!(latest_reported_surprise(&events, now), Some(4.2));
    }

    #[test]
    fn test_latest_reported_surprise_absent() {
        let now = OffsetDateTime::from_unix_timestamp(1_750_000_000).unwrap();
        assert_eq!(latest_reported_surprise(&[], now), None);
        assert_eq!(
            latest_reported_surprise(&[event(1_760_000_000, None)], now),
            None
        );
        assert_eq!(
            latest_reported_surprise(&[event(1_745_000_000, Some(f64::NAN))], now),
            None
        );
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_recent_closes() {
        let client = YahooFinanceClient::new();
        let closes = client.recent_closes("^N225", 10).await.unwrap();
        assert!(!closes.is_empty());
        assert!(closes.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_market_cap() {
        let cap = YahooFinanceClient::new().market_cap("2330.TW").await.unwrap();
        assert!(cap.is_some_and(|c| c > 0.0));
    }
}
