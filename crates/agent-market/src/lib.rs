//! Asia tech market briefs
//!
//! Three analyses over live market data (portfolio exposure by market cap,
//! latest earnings surprises, and a regional sentiment verdict) are exposed
//! as tools to a Market Analyst role, whose findings a Report Writer turns
//! into a short spoken brief.
//!
//! ```no_run
//! use agent_market::{BriefService, LiveMarketData, MarketConfig};
//! # async fn demo(runtime: std::sync::Arc<agent_runtime::AgentRuntime>) -> agent_market::Result<()> {
//! let source = std::sync::Arc::new(LiveMarketData::new(&MarketConfig::from_env()?)?);
//! let service = BriefService::builder(runtime, source).build()?;
//! println!("{}", service.run_brief("How exposed are we to Asia tech?").await);
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod api;
pub mod brief;
pub mod config;
pub mod crew;
pub mod data;
pub mod error;
pub mod instruments;
pub mod tools;

pub use analysis::{ExposureReport, MarketSnapshot, SentimentScorer, SentimentVerdict};
pub use brief::{BriefService, BriefServiceBuilder, DEFAULT_QUERY, MISSING_KEY_DIAGNOSTIC};
pub use config::{BriefConfig, MarketConfig};
pub use crew::FinancialCrew;
pub use data::{LiveMarketData, MarketDataSource, PricePoint, Quote};
pub use error::{MarketError, Result};
pub use instruments::{Instrument, Universe};
pub use tools::analysis_tools;
