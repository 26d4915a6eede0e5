//!
//! Common types and utilities for the price ticker.
//!
//! This crate aggregates:
//! - `error` — unified error type `PriceError` used across the workspace.
//! - `result` — handy `Result<T, PriceError>` alias.
//! - `asset` — tracked assets and quote currencies.
//! - `quote` — the displayed `Quote`, its status and transitions.
//! - `endpoint` — price service defaults and response parsing.
//! - `display` — two-decimal presentation strings and trend.
//! - `sections` — navigation highlight from section positions.
#![warn(missing_docs)]
pub mod asset;
pub mod display;
pub mod endpoint;
pub mod error;
pub mod quote;
pub mod result;
pub mod sections;

pub use asset::{Asset, Currency};
pub use error::PriceError;
pub use quote::{ErrorPolicy, PricePoint, Quote, QuoteStatus};
pub use result::Result;
