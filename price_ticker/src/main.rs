//! Price Ticker — polls a public price service for one asset and prints every
//! update to stdout.
//!
//! The poller fetches immediately and then once per interval (4 minutes by
//! default, matching free-tier rate limits). Each completed fetch produces one
//! rendered line: the price and 24h change with two decimals and an up/down
//! arrow, `—` before the first result, or `Error` after a failed fetch.
//!
//! Usage example (CLI):
//! ```bash
//! price_ticker --asset sol --currency usd --interval-secs 240
//! price_ticker --asset btc --once --format json
//! ```
//!
//! Set `RUST_LOG=debug` to see each request.
#![warn(missing_docs)]
mod args;
mod poller;
mod render;
mod source;

use crate::args::{Args, OutputFormat};
use crate::poller::{PollerConfig, PricePoller};
use crate::render::{JsonRenderer, Render, TextRenderer};
use crate::source::HttpPriceSource;
use clap::Parser;
use crossbeam_channel::{Receiver, bounded, select};
use log::{info, warn};
use price_common::{PriceError, QuoteStatus, Result};
use std::io;

fn main() -> Result<(), PriceError> {
    init_logger();
    let args = Args::parse();

    let source = HttpPriceSource::new(&args.endpoint, args.asset, args.currency, args.timeout())?;
    let config = PollerConfig {
        asset: args.asset,
        currency: args.currency,
        interval: args.interval(),
        error_policy: args.on_error,
    };
    let mut poller = PricePoller::new(source, config);
    let mut renderer = make_renderer(args.format);

    if args.once {
        let quote = poller.fetch_once();
        renderer.render(&quote)?;
        return match quote.status {
            QuoteStatus::Ready => Ok(()),
            _ => Err(PriceError::Unavailable(format!(
                "could not fetch {} price",
                args.asset
            ))),
        };
    }

    let shutdown_rx = shutdown_signal()?;
    let updates = poller.subscribe();
    renderer.render(&poller.quote())?;

    info!(
        "Tracking {} in {} every {}s from {}. Press Ctrl+C to exit.",
        args.asset, args.currency, args.interval_secs, args.endpoint
    );
    poller.start()?;

    loop {
        select! {
            recv(shutdown_rx) -> _ => {
                info!("Ctrl+C received. Shutting down ticker...");
                break;
            },
            recv(updates) -> msg => match msg {
                Ok(quote) => {
                    if let Err(e) = renderer.render(&quote) {
                        warn!("Failed to render quote: {}", e);
                    }
                },
                Err(_) => break,
            }
        }
    }

    poller.stop();
    Ok(())
}

fn make_renderer(format: OutputFormat) -> Box<dyn Render> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer::new(io::stdout())),
        OutputFormat::Json => Box::new(JsonRenderer::new(io::stdout())),
    }
}

/// Channel that receives a message on Ctrl+C.
fn shutdown_signal() -> Result<Receiver<()>> {
    let (tx, rx) = bounded(1);
    ctrlc::set_handler(move || {
        let _ = tx.try_send(());
    })
    .map_err(|e| PriceError::Signal(e.to_string()))?;
    Ok(rx)
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
