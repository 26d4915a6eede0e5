//! Tracked assets and quote currencies shared by the library and the binary.
//!
//! Both enums serialize (serde, strum and clap alike) to the identifiers the
//! price service expects in its query string, e.g. `solana` and `usd`.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Set of supported assets, keyed by their remote asset id.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "kebab-case")]
#[clap(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Asset {
    /// Solana (`SOL`).
    #[value(alias = "sol")]
    Solana,
    /// Bitcoin (`BTC`).
    #[value(alias = "btc")]
    Bitcoin,
    /// Ether (`ETH`).
    #[value(alias = "eth")]
    Ethereum,
    /// Tether (`USDT`).
    #[value(alias = "usdt")]
    Tether,
    /// USD Coin (`USDC`).
    #[value(alias = "usdc")]
    UsdCoin,
    /// PAX Gold (`PAXG`).
    #[value(alias = "paxg")]
    PaxGold,
}

impl Asset {
    /// Remote identifier used in the `ids` query parameter and as the response key.
    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Short ticker symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Solana => "SOL",
            Asset::Bitcoin => "BTC",
            Asset::Ethereum => "ETH",
            Asset::Tether => "USDT",
            Asset::UsdCoin => "USDC",
            Asset::PaxGold => "PAXG",
        }
    }
}

/// Quote currency (the `vs_currencies` parameter).
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    Hash,
    Eq,
    PartialEq,
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lower")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[allow(missing_docs)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl Currency {
    /// Currency sign prefixed to formatted prices.
    pub fn sign(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Jpy => "¥",
        }
    }

    /// Response field carrying the 24h percentage change, e.g. `usd_24h_change`.
    pub fn change_field(&self) -> String {
        format!("{}_24h_change", self)
    }
}
