//! The two-role financial crew: analyst gathers facts, writer drafts the brief

use agent_tools::Tool;
use agent_workflow::{Crew, CrewOutput, RoleSpec, TaskSpec, TextGenerationService};
use std::sync::Arc;

pub const MARKET_ANALYST: &str = "Market Analyst";
pub const REPORT_WRITER: &str = "Report Writer";

fn market_analyst(tools: Vec<Arc<dyn Tool>>) -> RoleSpec {
    RoleSpec::new(
        MARKET_ANALYST,
        "Analyze market data and provide insights",
        "Expert in Asian tech markets with years of experience in portfolio analysis.",
    )
    .with_tools(tools)
}

fn report_writer() -> RoleSpec {
    RoleSpec::new(
        REPORT_WRITER,
        "Create clear and concise market briefs",
        "Experienced financial writer who specializes in converting complex data into \
         clear narratives.",
    )
}

fn analysis_task() -> TaskSpec {
    TaskSpec::new(
        "Analyze Asian tech stocks: portfolio exposure by market capitalisation, the \
         latest earnings surprises, and overall market sentiment. Answer the request \
         using the tools; call each one that is relevant.",
        "The exposure percentages per company with their total, every reported earnings \
         surprise with its sign, and the sentiment verdict with its contributing factors. \
         State plainly when a figure was unavailable.",
    )
}

fn brief_task() -> TaskSpec {
    TaskSpec::new(
        "Create a market brief based on the analysis, answering the request.",
        "A short spoken-style brief of two or three paragraphs that cites the exact \
         figures from the analysis and ends with the overall sentiment.",
    )
    .with_prior_context()
}

/// Market Analyst (with the analysis tools) followed by Report Writer (no tools)
pub struct FinancialCrew {
    crew: Crew,
}

impl FinancialCrew {
    pub fn new(
        service: Arc<dyn TextGenerationService>,
        analyst_tools: Vec<Arc<dyn Tool>>,
    ) -> agent_workflow::Result<Self> {
        let crew = Crew::builder(service)
            .step(market_analyst(analyst_tools), analysis_task())
            .step(report_writer(), brief_task())
            .build()?;
        Ok(Self { crew })
    }

    pub fn crew(&self) -> &Crew {
        &self.crew
    }

    /// Run both stages on a fresh pipeline run
    pub async fn kickoff(&self, query: &str) -> agent_workflow::Result<CrewOutput> {
        self.crew.kickoff(query).await
    }
}
