//! Periodic price poller.
//!
//! The `PricePoller` owns the displayed `Quote` and is its only writer. Once
//! started, a background thread fetches immediately and then once per
//! interval; every completed fetch (success or failure) replaces the quote and
//! broadcasts one snapshot to all subscribers via `crossbeam_channel`.
//!
//! Concurrency and shutdown:
//! - Crossbeam `select!` multiplexes the interval `tick` with a stop channel.
//! - `stop()` clears the `running` flag before waking the worker, so a tick that
//!   is already queued cannot start another fetch. A request in flight at that
//!   moment still completes and publishes one last update.
//! - Fetch errors never leave `fetch_once`; they are logged and turned into
//!   `QuoteStatus::Error`, and the loop keeps ticking.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::{Receiver, Sender, select, tick, unbounded};
use log::{debug, info, warn};
use price_common::{Asset, Currency, ErrorPolicy, Quote, Result};

use crate::source::PriceSource;

/// Poller settings.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Tracked asset.
    pub asset: Asset,
    /// Quote currency.
    pub currency: Currency,
    /// Time between two scheduled fetches.
    pub interval: Duration,
    /// Effect of a failed fetch on the displayed values.
    pub error_policy: ErrorPolicy,
}

/// State shared between the poller handle and its worker thread.
struct Shared {
    source: Box<dyn PriceSource>,
    error_policy: ErrorPolicy,
    quote: Mutex<Quote>,
    subscribers: Mutex<Vec<Sender<Quote>>>,
}

impl Shared {
    fn quote(&self) -> MutexGuard<'_, Quote> {
        self.quote.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn fetch_once(&self) -> Quote {
        self.quote().begin_refresh();

        let outcome = self.source.fetch();
        let snapshot = {
            let mut quote = self.quote();
            match outcome {
                Ok(point) => {
                    quote.resolve(point, Utc::now());
                    debug!(
                        "{} quote updated: price={} change={}%",
                        quote.asset, point.price, point.change_percent
                    );
                }
                Err(e) => {
                    warn!("Failed to fetch {} price: {}", quote.asset, e);
                    quote.fail(self.error_policy);
                }
            }
            quote.clone()
        };

        self.publish(&snapshot);
        snapshot
    }

    fn publish(&self, snapshot: &Quote) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
    }
}

/// Handle to the worker thread of a started poller.
struct Worker {
    stop_tx: Sender<()>,
    running: Arc<AtomicBool>,
}

/// Keeps a `Quote` fresh by fetching it on a fixed interval.
pub struct PricePoller {
    shared: Arc<Shared>,
    interval: Duration,
    worker: Option<Worker>,
}

impl PricePoller {
    /// Create a stopped poller whose quote starts in `Loading`.
    pub fn new<S>(source: S, config: PollerConfig) -> Self
    where
        S: PriceSource + 'static,
    {
        let shared = Shared {
            source: Box::new(source),
            error_policy: config.error_policy,
            quote: Mutex::new(Quote::new(config.asset, config.currency)),
            subscribers: Mutex::new(Vec::new()),
        };
        Self {
            shared: Arc::new(shared),
            interval: config.interval,
            worker: None,
        }
    }

    /// Receive a snapshot after every completed fetch.
    pub fn subscribe(&self) -> Receiver<Quote> {
        let (tx, rx) = unbounded();
        self.shared
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(tx);
        rx
    }

    /// Current snapshot of the quote.
    pub fn quote(&self) -> Quote {
        self.shared.quote().clone()
    }

    /// Whether the worker thread has been started and not stopped.
    pub fn is_running(&self) -> bool {
        self.worker.is_some()
    }

    /// Fetch once on the calling thread and publish the outcome.
    ///
    /// Never fails: any error becomes `QuoteStatus::Error` in the returned snapshot.
    pub fn fetch_once(&self) -> Quote {
        self.shared.fetch_once()
    }

    /// Fetch immediately, then once per interval on a background thread.
    ///
    /// Starting an already running poller does nothing.
    pub fn start(&mut self) -> Result<()> {
        if self.worker.is_some() {
            warn!("Price poller is already running");
            return Ok(());
        }

        let (stop_tx, stop_rx) = unbounded::<()>();
        let running = Arc::new(AtomicBool::new(true));
        let shared = Arc::clone(&self.shared);
        let interval = self.interval;
        let worker_running = Arc::clone(&running);

        thread::Builder::new()
            .name("price-poller".to_string())
            .spawn(move || run_worker(shared, interval, stop_rx, worker_running))?;

        info!("Price poller started, interval {:?}", self.interval);
        self.worker = Some(Worker { stop_tx, running });
        Ok(())
    }

    /// Cancel scheduled fetches. Safe to call repeatedly or before `start`.
    pub fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.running.store(false, Ordering::SeqCst);
            if worker.stop_tx.send(()).is_err() {
                debug!("Price poller worker already exited");
            }
            info!("Price poller stopped");
        }
    }
}

impl Drop for PricePoller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_worker(
    shared: Arc<Shared>,
    interval: Duration,
    stop_rx: Receiver<()>,
    running: Arc<AtomicBool>,
) {
    let ticker = tick(interval);

    if running.load(Ordering::SeqCst) {
        shared.fetch_once();
    }

    loop {
        select! {
            recv(stop_rx) -> _ => break,
            recv(ticker) -> _ => {
                if !running.load(Ordering::SeqCst) {
                    break;
                }
                shared.fetch_once();
            }
        }
    }
    debug!("Price poller worker exiting");
}
