//! Tool for portfolio exposure

use super::{UniverseParams, parse_params, symbols_schema};
use crate::analysis::compute_exposure;
use crate::data::MarketDataSource;
use crate::instruments::Universe;
use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

const NAME: &str = "portfolio_exposure";

/// Share of tracked market capitalisation held by each instrument
pub struct PortfolioExposureTool {
    source: Arc<dyn MarketDataSource>,
    universe: Arc<Universe>,
}

impl PortfolioExposureTool {
    pub fn new(source: Arc<dyn MarketDataSource>, universe: Arc<Universe>) -> Self {
        Self { source, universe }
    }
}

#[async_trait]
impl Tool for PortfolioExposureTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: UniverseParams = parse_params(NAME, params)?;
        let instruments = self.universe.select_equities(params.symbols.as_deref());

        let report = compute_exposure(self.source.as_ref(), &instruments).await;
        serde_json::to_value(report).map_err(|e| agent_core::Error::tool(NAME, e))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Portfolio exposure to Asian tech stocks by market capitalisation. \
         Returns total_percent (100 when any data is available, 0 otherwise) and \
         an exposure map of company name to percentage. Companies without market \
         cap data are left out."
    }

    fn input_schema(&self) -> Value {
        symbols_schema()
    }
}
