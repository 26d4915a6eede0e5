//! Price sources queried by the poller.
//!
//! `PriceSource` is the seam between the poller and the network: the poller only
//! needs "give me the latest price point or an error". `HttpPriceSource` is the
//! real implementation backed by a blocking `reqwest` client; tests plug in
//! closures instead.
use std::time::Duration;

use log::debug;
use price_common::endpoint::{parse_simple_price, query_pairs};
use price_common::{Asset, Currency, PriceError, PricePoint, Result};
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CACHE_CONTROL};

/// Anything able to produce a fresh price point for one asset.
pub trait PriceSource: Send + Sync {
    /// Fetch the current price and 24h change.
    fn fetch(&self) -> Result<PricePoint>;
}

impl<F> PriceSource for F
where
    F: Fn() -> Result<PricePoint> + Send + Sync,
{
    fn fetch(&self) -> Result<PricePoint> {
        self()
    }
}

/// Simple-price HTTP endpoint for a single asset.
pub struct HttpPriceSource {
    client: Client,
    endpoint: String,
    asset: Asset,
    currency: Currency,
}

impl HttpPriceSource {
    /// Build a source with its own HTTP client and request `timeout`.
    pub fn new(endpoint: &str, asset: Asset, currency: Currency, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(PriceError::Config(format!(
                "endpoint must be an http(s) URL: {}",
                endpoint
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PriceError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            asset,
            currency,
        })
    }
}

impl PriceSource for HttpPriceSource {
    fn fetch(&self) -> Result<PricePoint> {
        debug!("GET {} for {}/{}", self.endpoint, self.asset, self.currency);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&query_pairs(self.asset, self.currency))
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .map_err(|e| PriceError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::HttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| PriceError::Transport(e.to_string()))?;
        parse_simple_price(&body, self.asset, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{Receiver, unbounded};
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serve one canned HTTP response on a local port.
    ///
    /// Returns the endpoint URL and a channel yielding the raw request head.
    fn serve_once(status_line: &'static str, body: &'static str) -> (String, Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let (request_tx, request_rx) = unbounded();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut head = Vec::new();
            let mut buf = [0u8; 1024];
            while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => head.extend_from_slice(&buf[..n]),
                }
            }
            let _ = request_tx.send(String::from_utf8_lossy(&head).to_string());

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        (format!("http://{}/api/v3/simple/price", addr), request_rx)
    }

    fn source_for(endpoint: &str) -> HttpPriceSource {
        HttpPriceSource::new(endpoint, Asset::Solana, Currency::Usd, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn ok_response_yields_price_point() {
        let (endpoint, requests) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"solana":{"usd":150.256,"usd_24h_change":-3.214}}"#,
        );
        let point = source_for(&endpoint).fetch().unwrap();
        assert_eq!(point.price, 150.256);
        assert_eq!(point.change_percent, -3.214);

        let head = requests.recv_timeout(Duration::from_secs(5)).unwrap().to_lowercase();
        assert!(head.starts_with("get /api/v3/simple/price?"));
        assert!(head.contains("ids=solana"));
        assert!(head.contains("vs_currencies=usd"));
        assert!(head.contains("include_24hr_change=true"));
        assert!(head.contains("cache-control: no-cache"));
    }

    #[test]
    fn server_error_is_http_status() {
        let (endpoint, _requests) = serve_once(
            "HTTP/1.1 500 Internal Server Error",
            r#"{"error":"internal"}"#,
        );
        assert!(matches!(
            source_for(&endpoint).fetch(),
            Err(PriceError::HttpStatus(500))
        ));
    }

    #[test]
    fn rate_limited_is_http_status() {
        let (endpoint, _requests) = serve_once("HTTP/1.1 429 Too Many Requests", "{}");
        assert!(matches!(
            source_for(&endpoint).fetch(),
            Err(PriceError::HttpStatus(429))
        ));
    }

    #[test]
    fn ok_with_unexpected_body_is_payload_error() {
        let (endpoint, _requests) = serve_once("HTTP/1.1 200 OK", r#"{"solana":{"usd":150.0}}"#);
        assert!(matches!(
            source_for(&endpoint).fetch(),
            Err(PriceError::Payload(_))
        ));
    }

    #[test]
    fn closures_are_sources() {
        let source = || PricePoint::new(1.5, -0.5);
        assert_eq!(source.fetch().unwrap().price, 1.5);
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let result = HttpPriceSource::new(
            "ftp://example.com/price",
            Asset::Solana,
            Currency::Usd,
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(PriceError::Config(_))));
    }

    #[test]
    fn unreachable_endpoint_is_transport_error() {
        // Nothing listens on the discard port locally.
        let source = HttpPriceSource::new(
            "http://127.0.0.1:9/api/v3/simple/price",
            Asset::Solana,
            Currency::Usd,
            Duration::from_secs(2),
        )
        .unwrap();
        assert!(matches!(source.fetch(), Err(PriceError::Transport(_))));
    }
}
