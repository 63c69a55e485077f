//! Brief generation entry points
//!
//! [`BriefService::run_brief`] never fails: every error is turned into a
//! one-line diagnostic so a voice or chat front end can read it out as-is.

use crate::analysis::{MarketSnapshot, SentimentScorer};
use crate::crew::FinancialCrew;
use crate::data::MarketDataSource;
use crate::error::{MarketError, Result};
use crate::instruments::Universe;
use crate::tools::analysis_tools;
use agent_workflow::TextGenerationService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Query used when the caller supplies none
pub const DEFAULT_QUERY: &str = "Give me today's Asia tech market brief";

/// Returned when no language model credential is available
pub const MISSING_KEY_DIAGNOSTIC: &str = "Error: language model API key not found. Please set the OPENAI_API_KEY environment variable.";

/// Render a pipeline error as the text returned to the caller
pub fn diagnostic(err: &MarketError) -> String {
    match err {
        MarketError::ConfigurationMissing(_) => MISSING_KEY_DIAGNOSTIC.to_string(),
        MarketError::StageFailure { stage, reason } => {
            format!("Error: brief generation failed during {stage}: {reason}")
        }
        other => format!("Error: brief generation failed: {other}"),
    }
}

/// Runs the financial crew over one data source and universe
pub struct BriefService {
    crew: FinancialCrew,
    source: Arc<dyn MarketDataSource>,
    universe: Arc<Universe>,
    scorer: SentimentScorer,
    run_timeout: Option<Duration>,
}

impl BriefService {
    pub fn builder(
        service: Arc<dyn TextGenerationService>,
        source: Arc<dyn MarketDataSource>,
    ) -> BriefServiceBuilder {
        BriefServiceBuilder::new(service, source)
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Generate a brief for `query`, or a diagnostic string on failure
    pub async fn run_brief(&self, query: &str) -> String {
        match self.try_run_brief(query).await {
            Ok(brief) => brief,
            Err(e) => {
                warn!(error = %e, "Brief generation failed");
                diagnostic(&e)
            }
        }
    }

    /// Generate a brief, surfacing the underlying error
    pub async fn try_run_brief(&self, query: &str) -> Result<String> {
        let query = match query.trim() {
            "" => DEFAULT_QUERY,
            q => q,
        };

        let output = match self.run_timeout {
            Some(limit) => tokio::time::timeout(limit, self.crew.kickoff(query))
                .await
                .map_err(|_| MarketError::StageFailure {
                    stage: "pipeline".to_string(),
                    reason: format!("timed out after {}s", limit.as_secs_f64()),
                })?,
            None => self.crew.kickoff(query).await,
        }?;

        info!(
            run_id = %output.run_id,
            stages = output.stages.len(),
            "Brief generated"
        );
        Ok(output.final_output)
    }

    /// Compute the analyses directly, without any language model
    pub async fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot::collect(self.source.as_ref(), &self.universe, &self.scorer).await
    }

    /// The snapshot as pretty-printed JSON
    pub async fn data_only(&self) -> Result<String> {
        let snapshot = self.snapshot().await;
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }
}

/// Builder for [`BriefService`]
pub struct BriefServiceBuilder {
    service: Arc<dyn TextGenerationService>,
    source: Arc<dyn MarketDataSource>,
    universe: Universe,
    scorer: SentimentScorer,
    run_timeout: Option<Duration>,
}

impl BriefServiceBuilder {
    pub fn new(
        service: Arc<dyn TextGenerationService>,
        source: Arc<dyn MarketDataSource>,
    ) -> Self {
        Self {
            service,
            source,
            universe: Universe::default(),
            scorer: SentimentScorer::default(),
            run_timeout: None,
        }
    }

    pub fn universe(mut self, universe: Universe) -> Self {
        self.universe = universe;
        self
    }

    pub fn scorer(mut self, scorer: SentimentScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn run_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.run_timeout = timeout;
        self
    }

    pub fn build(self) -> Result<BriefService> {
        let universe = Arc::new(self.universe);
        let tools = analysis_tools(self.source.clone(), universe.clone(), self.scorer.clone());
        let crew = FinancialCrew::new(self.service, tools)?;

        Ok(BriefService {
            crew,
            source: self.source,
            universe,
            scorer: self.scorer,
            run_timeout: self.run_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crew::{MARKET_ANALYST, REPORT_WRITER};
    use crate::data::MockMarketDataSource;
    use agent_core::{Agent, Context};
    use agent_workflow::RoleSpec;
    use async_trait::async_trait;

    mockall::mock! {
        Service {}

        impl TextGenerationService for Service {
            fn is_configured(&self) -> bool;
            fn assign_role(&self, role: &RoleSpec) -> agent_workflow::Result<Arc<dyn Agent>>;
        }
    }

    enum Behaviour {
        Echo,
        Fail(&'static str),
        Stall,
    }

    struct FakeAgent {
        name: String,
        behaviour: Behaviour,
    }

    #[async_trait]
    impl Agent for FakeAgent {
        async fn process(&self, input: String, _context: &mut Context) -> agent_core::Result<String> {
            match self.behaviour {
                Behaviour::Echo => Ok(format!("[{}] {input}", self.name)),
                Behaviour::Fail(reason) => Err(agent_core::Error::ProcessingFailed(reason.into())),
                Behaviour::Stall => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(String::new())
                }
            }
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn service_with(analyst: fn() -> Behaviour) -> MockService {
        let mut service = MockService::new();
        service.expect_is_configured().return_const(true);
        service.expect_assign_role().returning(move |role| {
            let behaviour = if role.name == MARKET_ANALYST {
                analyst()
            } else {
                Behaviour::Echo
            };
            Ok(Arc::new(FakeAgent {
                name: role.name.clone(),
                behaviour,
            }) as Arc<dyn Agent>)
        });
        service
    }

    fn brief_service(service: MockService, timeout: Option<Duration>) -> BriefService {
        BriefService::builder(Arc::new(service), Arc::new(MockMarketDataSource::new()))
            .run_timeout(timeout)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_returns_key_diagnostic_without_fetching() {
        let mut service = MockService::new();
        service.expect_is_configured().return_const(false);
        service.expect_assign_role().never();

        // The mock source has no expectations: any fetch would panic
        let brief = brief_service(service, None).run_brief("anything").await;
        assert_eq!(brief, MISSING_KEY_DIAGNOSTIC);
    }

    #[tokio::test]
    async fn test_brief_flows_through_both_roles() {
        let brief = brief_service(service_with(|| Behaviour::Echo), None)
            .run_brief("How exposed are we?")
            .await;

        assert!(brief.starts_with(&format!("[{REPORT_WRITER}]")));
        assert!(brief.contains(&format!("[{MARKET_ANALYST}]")));
        assert!(brief.contains("How exposed are we?"));
    }

    #[tokio::test]
    async fn test_blank_query_uses_default() {
        let brief = brief_service(service_with(|| Behaviour::Echo), None)
            .run_brief("   ")
            .await;
        assert!(brief.contains(DEFAULT_QUERY));
    }

    #[tokio::test]
    async fn test_stage_failure_names_the_stage() {
        let brief = brief_service(service_with(|| Behaviour::Fail("model unreachable")), None)
            .run_brief("q")
            .await;

        assert!(brief.starts_with("Error: brief generation failed during Market Analyst:"));
        assert!(brief.contains("model unreachable"));
    }

    #[tokio::test]
    async fn test_timeout_becomes_diagnostic() {
        let service = brief_service(
            service_with(|| Behaviour::Stall),
            Some(Duration::from_millis(20)),
        );

        let err = service.try_run_brief("q").await.unwrap_err();
        assert!(matches!(err, MarketError::StageFailure { ref stage, .. } if stage == "pipeline"));
        assert!(service.run_brief("q").await.contains("timed out"));
    }

    #[test]
    fn test_diagnostic_fallback() {
        let text = diagnostic(&MarketError::EmptyPopulation);
        assert!(text.starts_with("Error: brief generation failed:"));
    }

    #[tokio::test]
    async fn test_data_only_reports_unavailable_data() {
        let mut source = MockMarketDataSource::new();
        source
            .expect_quote()
            .returning(|i| Err(MarketError::unavailable(i.symbol, "offline")));
        source
            .expect_latest_earnings_surprise()
            .returning(|i| Err(MarketError::unavailable(i.symbol, "offline")));
        source
            .expect_history()
            .returning(|i, _| Err(MarketError::unavailable(i.symbol, "offline")));

        let service = BriefService::builder(Arc::new(MockService::new()), Arc::new(source))
            .build()
            .unwrap();

        let json: serde_json::Value = serde_json::from_str(&service.data_only().await.unwrap()).unwrap();
        assert_eq!(json["exposure"]["total_percent"], 0.0);
        assert!(json["earnings_surprises"].as_object().unwrap().is_empty());
        assert!(json["sentiment"]["error"].is_string());
    }
}
