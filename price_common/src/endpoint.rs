//! Price service endpoint: defaults, query parameters and payload parsing.
//!
//! The service answers `GET {endpoint}?ids=solana&vs_currencies=usd&include_24hr_change=true`
//! with a mapping from asset id to an object carrying the price and the 24h change:
//!
//! ```json
//! { "solana": { "usd": 150.256, "usd_24h_change": 3.214 } }
//! ```
//!
//! Anything else (missing asset, missing field, `null`, strings) is a payload error.
use serde_json::Value;

use crate::asset::{Asset, Currency};
use crate::error::PriceError;
use crate::quote::PricePoint;

/// Public simple-price endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.coingecko.com/api/v3/simple/price";
/// Poll interval matching free-tier rate limits (4 minutes).
pub const DEFAULT_INTERVAL_SECS: u64 = 240;
/// Per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Query parameters for one asset in one currency.
pub fn query_pairs(asset: Asset, currency: Currency) -> [(&'static str, String); 3] {
    [
        ("ids", asset.id()),
        ("vs_currencies", currency.to_string()),
        ("include_24hr_change", String::from("true")),
    ]
}

/// Extract the price and 24h change for `asset` from a response body.
pub fn parse_simple_price(
    body: &[u8],
    asset: Asset,
    currency: Currency,
) -> Result<PricePoint, PriceError> {
    let root: Value = serde_json::from_slice(body)
        .map_err(|e| PriceError::Payload(format!("invalid JSON: {}", e)))?;

    let id = asset.id();
    let record = root
        .get(&id)
        .ok_or_else(|| PriceError::Payload(format!("asset `{}` missing in response", id)))?;

    let price = number_field(record, &currency.to_string())?;
    let change = number_field(record, &currency.change_field())?;
    PricePoint::new(price, change)
}

fn number_field(record: &Value, field: &str) -> Result<f64, PriceError> {
    match record.get(field) {
        Some(value) => value
            .as_f64()
            .ok_or_else(|| PriceError::Payload(format!("field `{}` is not numeric: {}", field, value))),
        None => Err(PriceError::Payload(format!("field `{}` missing", field))),
    }
}
