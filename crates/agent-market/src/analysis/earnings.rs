//! Latest earnings surprises

use crate::data::MarketDataSource;
use crate::instruments::Instrument;
use futures::future::join_all;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Display name → surprise percentage of the latest reported quarter
pub type SurpriseTable = BTreeMap<String, f64>;

/// Look up every instrument's latest surprise concurrently
///
/// Instruments without a reported record, or whose lookup fails, are
/// absent from the result.
pub async fn collect_surprises(
    source: &dyn MarketDataSource,
    instruments: &[Instrument],
) -> SurpriseTable {
    let results = join_all(instruments.iter().map(|instrument| async move {
        (instrument, source.latest_earnings_surprise(instrument).await)
    }))
    .await;

    let mut surprises = SurpriseTable::new();
    for (instrument, result) in results {
        match result {
            Ok(Some(surprise)) if surprise.is_finite() => {
                surprises.insert(instrument.name.to_string(), surprise);
            }
            Ok(_) => debug!(symbol = instrument.symbol, "No reported earnings surprise"),
            Err(e) => warn!(symbol = instrument.symbol, error = %e, "Earnings lookup failed"),
        }
    }
    surprises
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MockMarketDataSource;
    use crate::error::MarketError;

    #[tokio::test]
    async fn test_only_reported_records_included() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_latest_earnings_surprise()
            .returning(|instrument| match instrument.symbol {
                "A.X" => Ok(Some(4.2)),
                "B.X" => Ok(None),
                "C.X" => Ok(Some(f64::NAN)),
                other => Err(MarketError::unavailable(other, "timeout")),
            });

        let instruments = [
            Instrument::new("A.X", "A"),
            Instrument::new("B.X", "B"),
            Instrument::new("C.X", "C"),
            Instrument::new("D.X", "D"),
        ];
        let surprises = collect_surprises(&source, &instruments).await;

        assert_eq!(surprises.len(), 1);
        assert_eq!(surprises["A"], 4.2);
        assert!(surprises.len() <= instruments.len());
    }

    #[tokio::test]
    async fn test_negative_surprise_kept() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_latest_earnings_surprise()
            .returning(|_| Ok(Some(-12.5)));

        let surprises = collect_surprises(&source, &[Instrument::new("K.X", "Kakao")]).await;
        assert_eq!(surprises["Kakao"], -12.5);
    }
}
