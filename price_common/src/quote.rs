//! Quote data model and its status transitions.
//!
//! A `Quote` is the state shown to the rendering layer: the latest price and
//! 24h percentage change for one asset, plus the status of the most recent
//! fetch. It is created in `Loading`, and every fetch completion mutates it in
//! place (`resolve` on success, `fail` on any error).
//!
//! Invariants kept by the transition methods:
//! - `Ready` implies both `price` and `change_percent` are present.
//! - `Error` either clears both values or keeps the last known pair, depending
//!   on the configured [`ErrorPolicy`].
//! - `Loading` only marks an in-flight request; the previous values stay in
//!   place until the request completes.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::asset::{Asset, Currency};
use crate::error::PriceError;

/// Status of the most recent fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuoteStatus {
    /// A request is in flight, or none has completed yet.
    Loading,
    /// The values reflect the most recent successful fetch.
    Ready,
    /// The most recent fetch failed.
    Error,
}

/// What happens to the displayed values when a fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    /// Drop price and change; only the error marker remains.
    #[default]
    Clear,
    /// Keep the last successfully fetched values alongside the error status.
    #[value(name = "keep-last")]
    KeepLastKnown,
}

/// Parsed result of one successful fetch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Price in the quote currency.
    pub price: f64,
    /// Percentage change over the trailing 24 hours.
    pub change_percent: f64,
}

impl PricePoint {
    /// Builds a point, rejecting non-finite numbers.
    pub fn new(price: f64, change_percent: f64) -> Result<Self, PriceError> {
        if !price.is_finite() || !change_percent.is_finite() {
            return Err(PriceError::Payload(format!(
                "non-finite values: price={} change={}",
                price, change_percent
            )));
        }
        Ok(Self {
            price,
            change_percent,
        })
    }
}

/// Displayed quote for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Tracked asset.
    pub asset: Asset,
    /// Currency the price is expressed in.
    pub currency: Currency,
    /// Last price, absent while unresolved or after a cleared failure.
    pub price: Option<f64>,
    /// Last 24h change in percent, absent while unresolved or after a cleared failure.
    pub change_percent: Option<f64>,
    /// Status of the most recent fetch.
    pub status: QuoteStatus,
    /// Completion time of the last successful fetch.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Quote {
    /// Create a new unresolved quote in `Loading` state.
    pub fn new(asset: Asset, currency: Currency) -> Self {
        Self {
            asset,
            currency,
            price: None,
            change_percent: None,
            status: QuoteStatus::Loading,
            updated_at: None,
        }
    }

    /// Mark a request as in flight.
    pub fn begin_refresh(&mut self) {
        self.status = QuoteStatus::Loading;
    }

    /// Apply a successful fetch.
    pub fn resolve(&mut self, point: PricePoint, at: DateTime<Utc>) {
        self.price = Some(point.price);
        self.change_percent = Some(point.change_percent);
        self.status = QuoteStatus::Ready;
        self.updated_at = Some(at);
    }

    /// Apply a failed fetch according to `policy`.
    pub fn fail(&mut self, policy: ErrorPolicy) {
        if policy == ErrorPolicy::Clear {
            self.price = None;
            self.change_percent = None;
        }
        self.status = QuoteStatus::Error;
    }

    /// Encode the quote to JSON bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, PriceError> {
        let json = serde_json::to_vec(self)?;
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(price: f64, change: f64) -> PricePoint {
        PricePoint::new(price, change).unwrap()
    }

    #[test]
    fn starts_loading_without_values() {
        let quote = Quote::new(Asset::Solana, Currency::Usd);
        assert_eq!(quote.status, QuoteStatus::Loading);
        assert_eq!(quote.price, None);
        assert_eq!(quote.change_percent, None);
        assert_eq!(quote.updated_at, None);
    }

    #[test]
    fn resolve_makes_ready_with_both_values() {
        let mut quote = Quote::new(Asset::Solana, Currency::Usd);
        let now = Utc::now();
        quote.resolve(point(150.256, 3.214), now);
        assert_eq!(quote.status, QuoteStatus::Ready);
        assert_eq!(quote.price, Some(150.256));
        assert_eq!(quote.change_percent, Some(3.214));
        assert_eq!(quote.updated_at, Some(now));
    }

    #[test]
    fn refresh_keeps_values_while_loading() {
        let mut quote = Quote::new(Asset::Solana, Currency::Usd);
        quote.resolve(point(10.0, 1.0), Utc::now());
        quote.begin_refresh();
        assert_eq!(quote.status, QuoteStatus::Loading);
        assert_eq!(quote.price, Some(10.0));
    }

    #[test]
    fn clear_policy_drops_values_on_failure() {
        let mut quote = Quote::new(Asset::Solana, Currency::Usd);
        quote.resolve(point(10.0, 1.0), Utc::now());
        quote.fail(ErrorPolicy::Clear);
        assert_eq!(quote.status, QuoteStatus::Error);
        assert_eq!(quote.price, None);
        assert_eq!(quote.change_percent, None);
    }

    #[test]
    fn keep_last_policy_retains_values_on_failure() {
        let mut quote = Quote::new(Asset::Solana, Currency::Usd);
        let at = Utc::now();
        quote.resolve(point(10.0, -1.0), at);
        quote.fail(ErrorPolicy::KeepLastKnown);
        assert_eq!(quote.status, QuoteStatus::Error);
        assert_eq!(quote.price, Some(10.0));
        assert_eq!(quote.change_percent, Some(-1.0));
        assert_eq!(quote.updated_at, Some(at));
    }

    #[test]
    fn error_recovers_to_ready() {
        let mut quote = Quote::new(Asset::Bitcoin, Currency::Eur);
        quote.fail(ErrorPolicy::Clear);
        quote.begin_refresh();
        quote.resolve(point(1.0, 0.0), Utc::now());
        assert_eq!(quote.status, QuoteStatus::Ready);
    }

    #[test]
    fn non_finite_points_are_rejected() {
        assert!(PricePoint::new(f64::NAN, 1.0).is_err());
        assert!(PricePoint::new(1.0, f64::INFINITY).is_err());
    }

    #[test]
    fn json_uses_wire_names() {
        let quote = Quote::new(Asset::UsdCoin, Currency::Usd);
        let json: serde_json::Value = serde_json::from_slice(&quote.to_json_bytes().unwrap()).unwrap();
        assert_eq!(json["asset"], "usd-coin");
        assert_eq!(json["currency"], "usd");
        assert_eq!(json["status"], "loading");
        assert!(json["price"].is_null());
    }
}
