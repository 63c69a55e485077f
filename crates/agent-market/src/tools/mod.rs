//! Analyses exposed as tools the analyst role may call

pub mod earnings;
pub mod exposure;
pub mod sentiment;

pub use earnings::EarningsSurpriseTool;
pub use exposure::PortfolioExposureTool;
pub use sentiment::MarketSentimentTool;

use crate::analysis::SentimentScorer;
use crate::data::MarketDataSource;
use crate::instruments::Universe;
use agent_tools::Tool;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::sync::Arc;

/// Optional restriction of the equity universe
#[derive(Debug, Default, Deserialize)]
struct UniverseParams {
    #[serde(default)]
    symbols: Option<Vec<String>>,
}

/// LLMs send `null`, `{}` or omit arguments for parameterless calls
fn parse_params<T: DeserializeOwned + Default>(tool: &str, params: Value) -> agent_core::Result<T> {
    if params.is_null() {
        return Ok(T::default());
    }
    serde_json::from_value(params)
        .map_err(|e| agent_core::Error::tool(tool, format!("Invalid parameters: {e}")))
}

fn symbols_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "symbols": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Tickers to restrict the universe to (optional, defaults to all tracked Asian tech stocks)"
            }
        },
        "required": []
    })
}

/// The three analysis tools, sharing one data source and universe
pub fn analysis_tools(
    source: Arc<dyn MarketDataSource>,
    universe: Arc<Universe>,
    scorer: SentimentScorer,
) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(PortfolioExposureTool::new(source.clone(), universe.clone())) as Arc<dyn Tool>,
        Arc::new(EarningsSurpriseTool::new(source.clone(), universe.clone())),
        Arc::new(MarketSentimentTool::new(source, universe, scorer)),
    ]
}
