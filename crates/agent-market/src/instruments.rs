//! Static instrument registries
//!
//! The registries are fixed for the process lifetime and shared read-only
//! by every tool and analysis.

use serde::Serialize;

/// A tradable instrument: exchange ticker plus display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Instrument {
    pub symbol: &'static str,
    pub name: &'static str,
}

impl Instrument {
    pub const fn new(symbol: &'static str, name: &'static str) -> Self {
        Self { symbol, name }
    }
}

/// Asian technology equities tracked for exposure and earnings
pub const ASIA_TECH: &[Instrument] = &[
    Instrument::new("2330.TW", "TSMC"),
    Instrument::new("005930.KS", "Samsung"),
    Instrument::new("9984.T", "SoftBank"),
    Instrument::new("0700.HK", "Tencent"),
    Instrument::new("9988.HK", "Alibaba"),
    Instrument::new("3690.HK", "Meituan"),
    Instrument::new("035420.KS", "NAVER"),
    Instrument::new("035720.KS", "Kakao"),
];

/// Regional indices, in the order their sentiment factors are reported
pub const REGIONAL_INDICES: &[Instrument] = &[
    Instrument::new("^HSI", "Hang Seng Tech"),
    Instrument::new("^AXJO", "ASX 200"),
    Instrument::new("^N225", "Nikkei 225"),
];

/// Rate instrument whose move is read as a macro headwind or tailwind
pub const US_10Y_YIELD: Instrument = Instrument::new("^TNX", "US 10Y Yield");

/// The instrument sets one brief works over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Universe {
    pub equities: Vec<Instrument>,
    pub indices: Vec<Instrument>,
    pub yield_instrument: Instrument,
}

impl Default for Universe {
    fn default() -> Self {
        Self {
            equities: ASIA_TECH.to_vec(),
            indices: REGIONAL_INDICES.to_vec(),
            yield_instrument: US_10Y_YIELD,
        }
    }
}

impl Universe {
    /// Equities restricted to the given tickers
    ///
    /// Matching is case-insensitive; unknown tickers are ignored. `None`
    /// or an empty filter keeps the whole universe.
    pub fn select_equities(&self, symbols: Option<&[String]>) -> Vec<Instrument> {
        match symbols {
            Some(symbols) if !symbols.is_empty() => self
                .equities
                .iter()
                .filter(|i| symbols.iter().any(|s| s.eq_ignore_ascii_case(i.symbol)))
                .copied()
                .collect(),
            _ => self.equities.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_universe() {
        let universe = Universe::default();
        assert_eq!(universe.equities.len(), 8);
        assert_eq!(universe.indices[0].name, "Hang Seng Tech");
        assert_eq!(universe.yield_instrument.symbol, "^TNX");
    }

    #[test]
    fn test_select_equities() {
        let universe = Universe::default();
        let picked = universe.select_equities(Some(&["2330.tw".to_string(), "NOPE".to_string()]));
        assert_eq!(picked, vec![Instrument::new("2330.TW", "TSMC")]);

        assert_eq!(universe.select_equities(None).len(), 8);
        assert_eq!(universe.select_equities(Some(&[])).len(), 8);
    }
}
