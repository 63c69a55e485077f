//! `market-brief`: print an Asia tech market brief to stdout

use agent_llm::providers::{OpenAIConfig, OpenAIProvider};
use agent_market::brief::diagnostic;
use agent_market::{BriefConfig, BriefService, DEFAULT_QUERY, LiveMarketData, MarketConfig};
use agent_runtime::AgentRuntime;
use agent_utils::Config;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_LOG_FILTER: &str = "warn,agent_market=info,agent_workflow=info";

#[derive(Parser, Debug)]
#[command(name = "market-brief")]
#[command(about = "Asia tech exposure, earnings surprises and sentiment as a short brief", long_about = None)]
struct Args {
    /// Question the brief should answer
    #[arg(default_value = DEFAULT_QUERY)]
    query: String,

    /// Chat model to use (overrides OPENAI_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Abort brief generation after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the raw analyses as JSON without calling the language model
    #[arg(long)]
    data_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let env_file = agent_utils::load_env();
    let app = Config::from_env("market-brief");
    if app.is_production() {
        agent_utils::init_json_tracing_with(DEFAULT_LOG_FILTER);
    } else {
        agent_utils::init_tracing_with(DEFAULT_LOG_FILTER);
    }
    debug!(env_file = ?env_file, environment = %app.environment, "Environment loaded");

    let args = Args::parse();

    let mut brief_config = BriefConfig::from_env();
    if let Some(model) = args.model {
        brief_config = brief_config.with_model(model);
    }
    if let Some(secs) = args.timeout_secs {
        brief_config = brief_config.with_run_timeout(Duration::from_secs(secs));
    }

    // A missing key is reported by the brief itself, not at startup
    let openai_config = OpenAIConfig::from_env().unwrap_or_else(|e| {
        debug!(error = %e, "Language model not configured");
        OpenAIConfig::default()
    });
    let provider = Arc::new(OpenAIProvider::with_config(openai_config)?);
    let runtime = Arc::new(AgentRuntime::new(provider, brief_config.runtime_config()));

    let market_config = MarketConfig::from_env()?;
    let source = Arc::new(LiveMarketData::new(&market_config)?);
    let service = BriefService::builder(runtime, source)
        .scorer(market_config.sentiment_scorer())
        .run_timeout(brief_config.run_timeout)
        .build()?;

    if args.data_only {
        println!("{}", service.data_only().await?);
        return Ok(ExitCode::SUCCESS);
    }

    info!(model = %brief_config.model, query = %args.query, "Generating brief");
    match service.try_run_brief(&args.query).await {
        Ok(brief) => {
            println!("{brief}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}", diagnostic(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
