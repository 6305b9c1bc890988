//! CoinGecko simple-price client

use std::collections::HashMap;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::FeedConfig;
use crate::models::PriceReading;

// CoinGecko rejects requests carrying a default client agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Errors returned by the price feed
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Network failure, timeout, or an undecodable response body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(StatusCode),

    /// The response did not contain a quote for the requested asset
    #[error("asset missing from response: {0}")]
    MissingAsset(String),
}

/// Per-asset quote in the simple-price response
#[derive(Debug, Clone, Copy, Deserialize)]
struct Quote {
    usd: f64,
    usd_24h_change: f64,
}

/// Fetches the current price and 24h change for one asset
pub struct PriceFeed {
    config: FeedConfig,
    client: Client,
}

impl PriceFeed {
    /// Create a new price feed client
    pub fn new(config: FeedConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Fetch one reading for the configured asset
    pub async fn fetch(&self) -> Result<PriceReading, FetchError> {
        let url = format!("{}/api/v3/simple/price", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("ids", self.config.asset_id.as_str()),
                ("vs_currencies", "usd"),
                ("include_24hr_change", "true"),
            ])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let quotes: HashMap<String, Quote> = response.json().await?;
        let quote = quotes
            .get(&self.config.asset_id)
            .ok_or_else(|| FetchError::MissingAsset(self.config.asset_id.clone()))?;

        debug!(
            asset = %self.config.asset_id,
            price = quote.usd,
            change_24h = quote.usd_24h_change,
            "Fetched quote"
        );

        Ok(PriceReading {
            price: quote.usd,
            change_24h: quote.usd_24h_change,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn feed_for(server: &MockServer) -> PriceFeed {
        PriceFeed::new(FeedConfig {
            base_url: server.uri(),
            ..FeedConfig::default()
        })
    }

    #[tokio::test]
    async fn fetches_price_and_change() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "standx-dusd"))
            .and(query_param("vs_currencies", "usd"))
            .and(query_param("include_24hr_change", "true"))
            .and(header("accept", "application/json"))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "standx-dusd": { "usd": 0.9987, "usd_24h_change": -0.42 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reading = feed_for(&server).fetch().await.unwrap();

        assert!((reading.price - 0.9987).abs() < f64::EPSILON);
        assert!((reading.change_24h - (-0.42)).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = feed_for(&server).fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::TOO_MANY_REQUESTS));
    }

    #[tokio::test]
    async fn missing_asset_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "some-other-coin": { "usd": 1.0, "usd_24h_change": 0.0 }
            })))
            .mount(&server)
            .await;

        let err = feed_for(&server).fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::MissingAsset(asset) if asset == "standx-dusd"));
    }

    #[tokio::test]
    async fn non_numeric_field_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "standx-dusd": { "usd": "not-a-number", "usd_24h_change": 0.0 }
            })))
            .mount(&server)
            .await;

        let err = feed_for(&server).fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Http(_)));
    }

    #[tokio::test]
    async fn absent_change_field_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "standx-dusd": { "usd": 0.9991 }
            })))
            .mount(&server)
            .await;

        let err = feed_for(&server).fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Http(_)));
    }
}
