//! HTTP clients for the upstream market data providers

pub mod alpha_vantage;
pub mod yahoo;

pub use alpha_vantage::{AlphaVantageClient, CompanyOverview, QuarterlyEarnings};
pub use yahoo::YahooFinanceClient;
