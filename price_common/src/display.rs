//! Presentation strings for a `Quote`.
//!
//! Formatting rules:
//! - `Loading` shows a neutral placeholder for both fields.
//! - `Error` shows an explicit `Error` instead of stale values, whatever the
//!   error policy kept in the quote.
//! - `Ready` shows both numbers with two decimals and an up/down trend.

use crate::quote::{Quote, QuoteStatus};

/// Shown while a value is not available.
pub const PLACEHOLDER: &str = "—";
/// Shown in place of the price after a failed fetch.
pub const ERROR_MARKER: &str = "Error";

/// Direction of the 24h change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    /// Change is zero or positive.
    Up,
    /// Change is negative.
    Down,
}

impl Trend {
    /// Classify a percentage change.
    pub fn of(change_percent: f64) -> Self {
        if change_percent >= 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    /// Arrow glyph for terminal output.
    pub fn arrow(&self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
        }
    }
}

/// Round to two decimal places, the precision of every displayed number.
///
/// Ties round away from zero (`150.125` becomes `150.13`), unlike `{:.2}`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formatted view of a quote, ready to be laid out by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteView {
    /// e.g. `$150.26`, `—` or `Error`.
    pub price: String,
    /// e.g. `-3.21%` or `—`.
    pub change: String,
    /// Present only for ready quotes.
    pub trend: Option<Trend>,
}

impl From<&Quote> for QuoteView {
    fn from(quote: &Quote) -> Self {
        match (quote.status, quote.price, quote.change_percent) {
            (QuoteStatus::Ready, Some(price), Some(change)) => QuoteView {
                price: format!("{}{:.2}", quote.currency.sign(), round2(price)),
                change: format!("{:.2}%", round2(change)),
                trend: Some(Trend::of(change)),
            },
            (QuoteStatus::Error, _, _) => QuoteView {
                price: ERROR_MARKER.to_string(),
                change: PLACEHOLDER.to_string(),
                trend: None,
            },
            _ => QuoteView {
                price: PLACEHOLDER.to_string(),
                change: PLACEHOLDER.to_string(),
                trend: None,
            },
        }
    }
}
