//! Tool for market sentiment

use crate::analysis::SentimentScorer;
use crate::data::MarketDataSource;
use crate::instruments::Universe;
use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::Arc;

const NAME: &str = "market_sentiment";

/// Sentiment verdict from regional indices and the US 10Y yield
pub struct MarketSentimentTool {
    source: Arc<dyn MarketDataSource>,
    universe: Arc<Universe>,
    scorer: SentimentScorer,
}

impl MarketSentimentTool {
    pub fn new(
        source: Arc<dyn MarketDataSource>,
        universe: Arc<Universe>,
        scorer: SentimentScorer,
    ) -> Self {
        Self {
            source,
            universe,
            scorer,
        }
    }
}

#[async_trait]
impl Tool for MarketSentimentTool {
    async fn execute(&self, _params: Value) -> AgentResult<Value> {
        let verdict = self
            .scorer
            .assess(
                self.source.as_ref(),
                &self.universe.indices,
                &self.universe.yield_instrument,
            )
            .await;
        serde_json::to_value(verdict).map_err(|e| agent_core::Error::tool(NAME, e))
    }

    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Overall Asia tech market sentiment (positive, neutral or negative) from the \
         five-day moves of the Hang Seng Tech, ASX 200 and Nikkei 225 indices and the \
         US 10Y Treasury yield. Lists each factor; includes an error field if data \
         could not be fetched."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {}, "required": [] })
    }
}
