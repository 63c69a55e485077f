//! Qualitative market sentiment from regional indices and the US 10Y yield

use crate::data::{MarketDataSource, PricePoint};
use crate::error::{MarketError, Result};
use crate::instruments::Instrument;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

/// Direction of an index over the lookback window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// How a yield move bears on equities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Cautionary,
    Supportive,
}

/// Overall reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Positive,
    Neutral,
    Negative,
}

/// One signal feeding the verdict
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SentimentFactor {
    IndexMove {
        label: String,
        percent_change: f64,
        trend: Trend,
    },
    YieldMove {
        label: String,
        change: f64,
        impact: Impact,
    },
}

impl SentimentFactor {
    /// Rising indices and falling yields count in favour
    pub fn is_favourable(&self) -> bool {
        match self {
            Self::IndexMove { trend, .. } => *trend == Trend::Up,
            Self::YieldMove { impact, .. } => *impact == Impact::Supportive,
        }
    }
}

/// Overall outlook, the factors behind it, and any failure message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentVerdict {
    pub overall: Outlook,
    pub factors: Vec<SentimentFactor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SentimentVerdict {
    fn failed(message: String) -> Self {
        Self {
            overall: Outlook::Neutral,
            factors: Vec::new(),
            error: Some(message),
        }
    }
}

/// Cut-offs on the share of favourable factors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentimentThresholds {
    /// Strictly above this share reads positive
    pub positive_above: f64,
    /// Strictly below this share reads negative
    pub negative_below: f64,
}

impl Default for SentimentThresholds {
    fn default() -> Self {
        Self {
            positive_above: 0.6,
            negative_below: 0.4,
        }
    }
}

impl SentimentThresholds {
    pub fn classify(&self, favourable: usize, total: usize) -> Outlook {
        if total == 0 {
            return Outlook::Neutral;
        }
        let ratio = favourable as f64 / total as f64;
        if ratio > self.positive_above {
            Outlook::Positive
        } else if ratio < self.negative_below {
            Outlook::Negative
        } else {
            Outlook::Neutral
        }
    }
}

/// Scores sentiment from first-vs-last closes over a short window
#[derive(Debug, Clone)]
pub struct SentimentScorer {
    periods: usize,
    thresholds: SentimentThresholds,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(5, SentimentThresholds::default())
    }
}

impl SentimentScorer {
    pub fn new(periods: usize, thresholds: SentimentThresholds) -> Self {
        Self {
            periods,
            thresholds,
        }
    }

    /// Closes compared per instrument
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Assess sentiment; never fails
    ///
    /// Any fetch error, or a zero opening close, discards every factor and
    /// yields a neutral verdict carrying the error message.
    pub async fn assess(
        &self,
        source: &dyn MarketDataSource,
        indices: &[Instrument],
        yield_instrument: &Instrument,
    ) -> SentimentVerdict {
        match self.collect_factors(source, indices, yield_instrument).await {
            Ok(factors) => {
                let favourable = factors.iter().filter(|f| f.is_favourable()).count();
                let overall = self.thresholds.classify(favourable, factors.len());
                info!(
                    overall = ?overall,
                    favourable,
                    total = factors.len(),
                    "Sentiment assessed"
                );
                SentimentVerdict {
                    overall,
                    factors,
                    error: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Sentiment assessment failed");
                SentimentVerdict::failed(e.to_string())
            }
        }
    }

    async fn collect_factors(
        &self,
        source: &dyn MarketDataSource,
        indices: &[Instrument],
        yield_instrument: &Instrument,
    ) -> Result<Vec<SentimentFactor>> {
        let periods = self.periods;
        let (index_histories, yield_history) = futures::join!(
            join_all(indices.iter().map(|index| source.history(index, periods))),
            source.history(yield_instrument, periods),
        );

        let mut factors = Vec::with_capacity(indices.len() + 1);

        // join_all keeps input order, so factors follow the registry order
        for (index, history) in indices.iter().zip(index_histories) {
            let history = history?;
            let Some((first, last)) = endpoints(&history) else {
                continue;
            };
            if first == 0.0 {
                return Err(MarketError::SentimentAssessment(format!(
                    "{} opened the window at zero",
                    index.name
                )));
            }
            let percent_change = (last - first) / first * 100.0;
            factors.push(SentimentFactor::IndexMove {
                label: index.name.to_string(),
                percent_change,
                trend: if percent_change > 0.0 {
                    Trend::Up
                } else {
                    Trend::Down
                },
            });
        }

        if let Some((first, last)) = endpoints(&yield_history?) {
            let change = last - first;
            factors.push(SentimentFactor::YieldMove {
                label: yield_instrument.name.to_string(),
                change,
                impact: if change > 0.0 {
                    Impact::Cautionary
                } else {
                    Impact::Supportive
                },
            });
        }

        Ok(factors)
    }
}

fn endpoints(history: &[PricePoint]) -> Option<(f64, f64)> {
    Some((history.first()?.close, history.last()?.close))
}
