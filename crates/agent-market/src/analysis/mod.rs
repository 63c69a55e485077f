//! Aggregation and scoring over market data

pub mod earnings;
pub mod exposure;
pub mod sentiment;

pub use earnings::{SurpriseTable, collect_surprises};
pub use exposure::{ExposureReport, ExposureTable, allocate, compute_exposure};
pub use sentiment::{
    Impact, Outlook, SentimentFactor, SentimentScorer, SentimentThresholds, SentimentVerdict,
    Trend,
};

use crate::data::MarketDataSource;
use crate::instruments::Universe;
use serde::Serialize;

/// All three analyses for one universe, computed without a language model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSnapshot {
    pub exposure: ExposureReport,
    pub earnings_surprises: SurpriseTable,
    pub sentiment: SentimentVerdict,
}

impl MarketSnapshot {
    /// Run the analyses concurrently
    pub async fn collect(
        source: &dyn MarketDataSource,
        universe: &Universe,
        scorer: &SentimentScorer,
    ) -> Self {
        let (exposure, earnings_surprises, sentiment) = futures::join!(
            compute_exposure(source, &universe.equities),
            collect_surprises(source, &universe.equities),
            scorer.assess(source, &universe.indices, &universe.yield_instrument),
        );
        Self {
            exposure,
            earnings_surprises,
            sentiment,
        }
    }
}
