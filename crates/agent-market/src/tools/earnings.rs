//! Tool for earnings surprises

use super::{UniverseParams, parse_params, symbols_schema};
use crate::analysis::collect_surprises;
use crate::data::MarketDataSource;
use crate::instruments::Universe;
use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

const NAME: &str = "earnings_surprises";

/// Latest quarterly earnings surprise per instrument
pub struct EarningsSurpriseTool {
    source: Arc<dyn MarketDataSource>,
    universe: Arc<Universe>,
}

impl EarningsSurpriseTool {
    pub fn new(source: Arc<dyn MarketDataSource>, universe: Arc<Universe>) -> Self {
        Self { source, universe }
    }
}

#[async_trait]
impl Tool for EarningsSurpriseTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: UniverseParams = parse_params(NAME, params)?;
        let instruments = self.universe.select_equities(params.symbols.as_deref());

        let surprises = collect_surprises(self.source.as_ref(), &instruments).await;
        Ok(json!({ "surprises": surprises }))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Most recent quarterly earnings surprise (percent above or below the consensus \
         estimate) for Asian tech stocks. Companies with no reported record are omitted."
    }

    fn input_schema(&self) -> Value {
        symbols_schema()
    }
}
