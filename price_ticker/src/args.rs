//! Command-line arguments for the price ticker.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::time::Duration;

use clap::{Parser, ValueEnum};
use price_common::endpoint::{DEFAULT_ENDPOINT, DEFAULT_INTERVAL_SECS, DEFAULT_TIMEOUT_SECS};
use price_common::{Asset, Currency, ErrorPolicy};

/// Output format of rendered quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per update.
    Text,
    /// One JSON object per update.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about = "Live price ticker for a single asset", long_about = None)]
pub struct Args {
    /// Asset to track (remote id or symbol alias, e.g. `solana` or `sol`).
    #[clap(long, value_enum, default_value_t = Asset::Solana)]
    pub asset: Asset,

    /// Currency the price is quoted in.
    #[clap(long, value_enum, default_value_t = Currency::Usd)]
    pub currency: Currency,

    /// Seconds between two fetches.
    #[clap(long, default_value_t = DEFAULT_INTERVAL_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_secs: u64,

    /// Simple-price endpoint of the quote service.
    #[clap(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Per-request timeout in seconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    /// What to show after a failed fetch.
    #[clap(long, value_enum, default_value_t = ErrorPolicy::Clear)]
    pub on_error: ErrorPolicy,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Fetch a single quote, print it and exit.
    #[clap(long)]
    pub once: bool,
}

impl Args {
    /// Poll interval as a `Duration`.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Request timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
