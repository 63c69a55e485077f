//! End-to-end brief generation over fixture data and a stub language model

use agent_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMProvider, Message, MessageContent,
    StopReason, TokenUsage,
};
use agent_market::{
    BriefConfig, BriefService, Instrument, MISSING_KEY_DIAGNOSTIC, MarketDataSource, MarketError,
    PricePoint, Quote, Universe,
};
use agent_runtime::AgentRuntime;
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Fixed market caps, no price history, no earnings
struct FixtureSource;

#[async_trait]
impl MarketDataSource for FixtureSource {
    async fn quote(&self, instrument: &Instrument) -> agent_market::Result<Quote> {
        let market_cap = match instrument.symbol {
            "AAA" => 100.0,
            "BBB" => 300.0,
            other => return Err(MarketError::unavailable(other, "not in fixture")),
        };
        Ok(Quote {
            symbol: instrument.symbol.to_string(),
            market_cap: Some(market_cap),
            recent_closes: Vec::new(),
        })
    }

    async fn history(
        &self,
        _instrument: &Instrument,
        _periods: usize,
    ) -> agent_market::Result<Vec<PricePoint>> {
        Ok(Vec::new())
    }

    async fn latest_earnings_surprise(
        &self,
        _instrument: &Instrument,
    ) -> agent_market::Result<Option<f64>> {
        Ok(None)
    }
}

/// Fails the test on any fetch
struct UnreachableSource;

#[async_trait]
impl MarketDataSource for UnreachableSource {
    async fn quote(&self, _instrument: &Instrument) -> agent_market::Result<Quote> {
        panic!("quote fetched")
    }

    async fn history(
        &self,
        _instrument: &Instrument,
        _periods: usize,
    ) -> agent_market::Result<Vec<PricePoint>> {
        panic!("history fetched")
    }

    async fn latest_earnings_surprise(
        &self,
        _instrument: &Instrument,
    ) -> agent_market::Result<Option<f64>> {
        panic!("earnings fetched")
    }
}

/// Analyst requests exposure then repeats the tool output; writer repeats its input
struct StubModel {
    configured: bool,
    calls: AtomicUsize,
}

impl StubModel {
    fn new(configured: bool) -> Self {
        Self {
            configured,
            calls: AtomicUsize::new(0),
        }
    }
}

fn last_tool_result(request: &CompletionRequest) -> Option<String> {
    let last = request.messages.last()?;
    match &last.content {
        Some(MessageContent::Blocks(blocks)) => blocks.iter().find_map(|b| match b {
            ContentBlock::ToolResult { content, .. } => Some(content.clone()),
            _ => None,
        }),
        _ => None,
    }
}

fn reply(message: Message, stop_reason: StopReason) -> CompletionResponse {
    CompletionResponse {
        message,
        stop_reason,
        usage: TokenUsage::default(),
    }
}

#[async_trait]
impl LLMProvider for StubModel {
    async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if request.tool_names().contains(&"portfolio_exposure") {
            return Ok(match last_tool_result(&request) {
                Some(result) => reply(
                    Message::assistant(format!("Exposure data: {result}")),
                    StopReason::EndTurn,
                ),
                None => reply(
                    Message::assistant_blocks(vec![ContentBlock::ToolUse {
                        id: "call_1".to_string(),
                        name: "portfolio_exposure".to_string(),
                        input: serde_json::json!({}),
                    }]),
                    StopReason::ToolUse,
                ),
            });
        }

        let input = request
            .messages
            .last()
            .and_then(Message::text)
            .unwrap_or_default();
        Ok(reply(
            Message::assistant(format!("BRIEF\n{input}")),
            StopReason::EndTurn,
        ))
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

fn fixture_universe() -> Universe {
    Universe {
        equities: vec![
            Instrument::new("AAA", "Alpha Semiconductor"),
            Instrument::new("BBB", "Beta Internet"),
        ],
        indices: Vec::new(),
        yield_instrument: Instrument::new("^TNX", "US 10Y Yield"),
    }
}

fn runtime(model: Arc<StubModel>) -> Arc<AgentRuntime> {
    Arc::new(AgentRuntime::new(
        model,
        BriefConfig::default().runtime_config(),
    ))
}

#[tokio::test]
async fn brief_carries_exposure_figures_through_both_roles() {
    let model = Arc::new(StubModel::new(true));
    let service = BriefService::builder(runtime(model.clone()), Arc::new(FixtureSource))
        .universe(fixture_universe())
        .build()
        .unwrap();

    let brief = service.run_brief("How exposed are we?").await;

    assert!(brief.starts_with("BRIEF"), "unexpected brief: {brief}");
    assert!(brief.contains("Alpha Semiconductor"));
    assert!(brief.contains("25"));
    assert!(brief.contains("75"));
    // analyst: tool request + final answer; writer: one completion
    assert_eq!(model.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn unconfigured_model_short_circuits_before_any_fetch() {
    let model = Arc::new(StubModel::new(false));
    let service = BriefService::builder(runtime(model.clone()), Arc::new(UnreachableSource))
        .build()
        .unwrap();

    assert_eq!(service.run_brief("anything").await, MISSING_KEY_DIAGNOSTIC);
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn data_only_snapshot_needs_no_model() {
    let model = Arc::new(StubModel::new(false));
    let service = BriefService::builder(runtime(model.clone()), Arc::new(FixtureSource))
        .universe(fixture_universe())
        .build()
        .unwrap();

    let snapshot = service.snapshot().await;
    assert_eq!(snapshot.exposure.exposure["Alpha Semiconductor"], 25.0);
    assert_eq!(snapshot.exposure.exposure["Beta Internet"], 75.0);
    assert!(snapshot.earnings_surprises.is_empty());
    assert_eq!(model.calls.load(Ordering::SeqCst), 0);
}
