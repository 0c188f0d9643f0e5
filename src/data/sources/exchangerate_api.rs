//! ExchangeRate-API data source integration
//!
//! Provides the latest USD-based rates for ~160 currencies without an API key.

use super::{extract_rate, RateSource};
use crate::error::{DashboardError, Result};
use reqwest::Client;
use std::time::Duration;

/// Latest rates quoted against one USD
pub const EXCHANGERATE_API_URL: &str = "https://open.er-api.com/v6/latest/USD";

/// ExchangeRate-API data source (no API key required)
pub struct ExchangeRateApiSource {
    client: Client,
    url: String,
}

impl ExchangeRateApiSource {
    /// Create a source pointed at the public endpoint
    pub fn new() -> Result<Self> {
        Self::with_url(EXCHANGERATE_API_URL)
    }

    /// Create a source pointed at another endpoint with the same payload shape
    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("purchasing-power/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DashboardError::RateFetchFailure(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl RateSource for ExchangeRateApiSource {
    async fn fetch_rate(&self, currency_code: &str) -> Result<f64> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| DashboardError::RateFetchFailure(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(DashboardError::RateFetchFailure(format!(
                "ExchangeRate-API returned error: {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            DashboardError::RateFetchFailure(format!("Failed to parse response: {}", e))
        })?;

        let rate = extract_rate(&body, currency_code)?;
        log::debug!("{} quoted USD/{} = {}", self.name(), currency_code, rate);
        Ok(rate)
    }

    fn name(&self) -> &str {
        "exchangerate-api"
    }
}
