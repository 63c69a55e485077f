//! Portfolio exposure by market capitalisation

use crate::data::MarketDataSource;
use crate::error::{MarketError, Result};
use crate::instruments::Instrument;
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Display name → share of tracked market capitalisation, in percent
pub type ExposureTable = BTreeMap<String, f64>;

/// Exposure table plus the sum of its percentages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExposureReport {
    /// 100 (within float error) when any instrument contributed, else 0
    pub total_percent: f64,
    pub exposure: ExposureTable,
}

impl ExposureReport {
    pub fn empty() -> Self {
        Self {
            total_percent: 0.0,
            exposure: ExposureTable::new(),
        }
    }
}

/// Split 100% across instruments in proportion to their market caps
///
/// Caps must already be positive. Repeated names are summed.
pub fn allocate<'a, I>(caps: I) -> Result<ExposureTable>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut by_name: BTreeMap<String, f64> = BTreeMap::new();
    for (name, cap) in caps {
        *by_name.entry(name.to_string()).or_default() += cap;
    }

    let total: f64 = by_name.values().sum();
    if total <= 0.0 {
        return Err(MarketError::EmptyPopulation);
    }

    Ok(by_name
        .into_iter()
        .map(|(name, cap)| (name, cap / total * 100.0))
        .collect())
}

/// Fetch every instrument's quote concurrently and compute exposure
///
/// Instruments whose quote fails, or whose market cap is absent or not
/// positive, are left out of both the numerator and the denominator.
pub async fn compute_exposure(
    source: &dyn MarketDataSource,
    instruments: &[Instrument],
) -> ExposureReport {
    let quotes = join_all(
        instruments
            .iter()
            .map(|instrument| async move { (instrument, source.quote(instrument).await) }),
    )
    .await;

    let mut caps = Vec::with_capacity(quotes.len());
    for (instrument, result) in quotes {
        match result {
            Ok(quote) => match quote.positive_market_cap() {
                Some(cap) => caps.push((instrument.name, cap)),
                None => debug!(
                    symbol = instrument.symbol,
                    market_cap = ?quote.market_cap,
                    "Excluding instrument without positive market cap"
                ),
            },
            Err(e) => warn!(symbol = instrument.symbol, error = %e, "Quote fetch failed"),
        }
    }

    match allocate(caps) {
        Ok(exposure) => ExposureReport {
            total_percent: exposure.values().sum(),
            exposure,
        },
        Err(e) => {
            debug!(error = %e, "Exposure empty");
            ExposureReport::empty()
        }
    }
}
