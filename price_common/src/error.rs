//! Error types shared between the common library and the ticker binary.
//!
//! The `PriceError` enum unifies the failure cases of a price fetch (transport,
//! HTTP status, payload shape) with the ambient I/O, serialization, signal and
//! configuration errors, so every crate can propagate a single error type.
//! The poller collapses any of them into `QuoteStatus::Error`.
use std::io;

use thiserror::Error;

/// Unified error type shared by the library and the binary.
#[derive(Error, Debug)]
pub enum PriceError {
    /// I/O error originating from the standard library (stdout, threads).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The request never produced a response (DNS, connect, timeout, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The price service answered with a non-2xx status code.
    #[error("Unexpected HTTP status: {0}")]
    HttpStatus(u16),

    /// The response body did not carry the expected numeric fields.
    #[error("Malformed price payload: {0}")]
    Payload(String),

    /// No usable quote could be obtained (the cause has already been logged).
    #[error("Quote unavailable: {0}")]
    Unavailable(String),

    /// Invalid configuration value (interval, endpoint, ...).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Installing the Ctrl+C handler failed.
    #[error("Signal handler error: {0}")]
    Signal(String),
}
