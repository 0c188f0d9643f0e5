//! Live exchange-rate sources
//!
//! A [`RateSource`] supplies the current rate of the local currency against USD.
//! - ExchangeRate-API: public JSON endpoint with a `rates` object keyed by ISO code
//! - Static: fixed rate, for offline runs
//! - Unavailable: always fails, for exercising the static fallback

#[cfg(feature = "async")]
pub mod exchangerate_api;

#[cfg(feature = "async")]
pub use exchangerate_api::{ExchangeRateApiSource, EXCHANGERATE_API_URL};

use crate::error::{DashboardError, Result};
use std::future::Future;

/// Trait for live exchange-rate sources
pub trait RateSource: Send + Sync {
    /// Fetch how many units of `currency_code` one USD buys right now
    fn fetch_rate(&self, currency_code: &str) -> impl Future<Output = Result<f64>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

/// Pull `rates.<currency_code>` out of a rates payload
///
/// Missing, non-numeric and non-positive values are all fetch failures.
pub fn extract_rate(body: &serde_json::Value, currency_code: &str) -> Result<f64> {
    let rates = body
        .get("rates")
        .and_then(|rates| rates.as_object())
        .ok_or_else(|| {
            DashboardError::RateFetchFailure("Response has no `rates` object".to_string())
        })?;

    let rate = rates
        .get(currency_code)
        .and_then(|value| value.as_f64())
        .ok_or_else(|| {
            DashboardError::RateFetchFailure(format!(
                "Response has no numeric rate for {}",
                currency_code
            ))
        })?;

    if !rate.is_finite() || rate <= 0.0 {
        return Err(DashboardError::RateFetchFailure(format!(
            "Rate for {} must be positive, got: {}",
            currency_code, rate
        )));
    }

    Ok(rate)
}

/// Source that always answers with the same rate
#[derive(Debug, Clone)]
pub struct StaticRateSource {
    rate: f64,
}

impl StaticRateSource {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }
}

impl RateSource for StaticRateSource {
    async fn fetch_rate(&self, _currency_code: &str) -> Result<f64> {
        Ok(self.rate)
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Source that is never reachable
#[derive(Debug, Clone, Default)]
pub struct UnavailableRateSource;

impl RateSource for UnavailableRateSource {
    async fn fetch_rate(&self, currency_code: &str) -> Result<f64> {
        Err(DashboardError::RateFetchFailure(format!(
            "No live source configured for {}",
            currency_code
        )))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
