//! Monthly purchasing-power series
//!
//! Walks a month range, compounds monthly inflation from the first month, and expresses
//! the fixed amount in both currencies, nominal and deflated.

use crate::calendar::{months_between, MonthKey};
use crate::currency::CurrencyBasis;
use crate::data::tables::{InflationTable, RateTable};
use crate::error::{DashboardError, Result};
use crate::finance::constants::ANCHOR_INFLATION_FACTOR;
use serde::{Deserialize, Serialize};

/// One month of the series
///
/// Local amounts are PYG, foreign amounts are USD. Both foreign figures are converted at
/// this month's own exchange rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub month: MonthKey,
    pub basis: CurrencyBasis,
    pub exchange_rate: f64,
    pub monthly_inflation_rate: f64,
    /// 1.0 at the first month, compounded afterwards
    pub cumulative_inflation_factor: f64,
    pub nominal_local: f64,
    pub nominal_foreign: f64,
    pub real_local: f64,
    pub real_foreign: f64,
}

impl MonthlySnapshot {
    /// Local amount lost to inflation this month
    pub fn loss_local(&self) -> f64 {
        self.nominal_local - self.real_local
    }

    /// Real versus nominal, in percent (negative when purchasing power eroded)
    pub fn erosion_percent(&self) -> f64 {
        if self.nominal_local == 0.0 {
            return 0.0;
        }
        (self.real_local - self.nominal_local) / self.nominal_local * 100.0
    }
}

/// Compute one snapshot per month from `start` to `end` inclusive
///
/// `principal` is the fixed monthly amount in `basis`. Months missing from either table
/// use that table's default. A reversed range gives an empty series.
pub fn compute_series(
    principal: f64,
    basis: CurrencyBasis,
    start: MonthKey,
    end: MonthKey,
    rates: &RateTable,
    inflation: &InflationTable,
) -> Result<Vec<MonthlySnapshot>> {
    validate_principal(principal)?;

    let months = months_between(start, end);
    let mut series = Vec::with_capacity(months.len());
    let mut factor = ANCHOR_INFLATION_FACTOR;

    for (index, month) in months.into_iter().enumerate() {
        let exchange_rate = rates.get(month);
        let monthly_inflation_rate = inflation.get(month);

        // The first month is the anchor, its own inflation is not applied
        if index > 0 {
            factor *= 1.0 + monthly_inflation_rate;
        }

        let (nominal_local, nominal_foreign) = match basis {
            CurrencyBasis::Usd => (principal * exchange_rate, principal),
            CurrencyBasis::Pyg => (principal, principal / exchange_rate),
        };
        let real_local = nominal_local / factor;
        let real_foreign = real_local / exchange_rate;

        let values = [factor, nominal_local, nominal_foreign, real_local, real_foreign];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(DashboardError::InvalidInput(format!(
                "Amount {} too large to convert at rate {:.2} for {}",
                principal, exchange_rate, month
            )));
        }

        series.push(MonthlySnapshot {
            month,
            basis,
            exchange_rate,
            monthly_inflation_rate,
            cumulative_inflation_factor: factor,
            nominal_local,
            nominal_foreign,
            real_local,
            real_foreign,
        });
    }

    log::debug!(
        "Computed {} snapshots for {} {} from {} to {}",
        series.len(),
        principal,
        basis,
        start,
        end
    );

    Ok(series)
}

fn validate_principal(principal: f64) -> Result<()> {
    if principal.is_nan() {
        return Err(DashboardError::InvalidInput(
            "Amount must be a number".to_string(),
        ));
    }
    if principal.is_infinite() {
        return Err(DashboardError::InvalidInput(format!(
            "Amount must be finite, got: {}",
            principal
        )));
    }
    if principal < 0.0 {
        return Err(DashboardError::InvalidInput(format!(
            "Amount must not be negative, got: {}",
            principal
        )));
    }
    Ok(())
}

/// The inputs of one dashboard computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRequest {
    pub principal: f64,
    pub basis: CurrencyBasis,
    pub start: MonthKey,
    pub end: MonthKey,
}

impl SeriesRequest {
    pub fn new(principal: f64, basis: CurrencyBasis, start: MonthKey, end: MonthKey) -> Self {
        Self {
            principal,
            basis,
            start,
            end,
        }
    }

    pub fn compute(
        &self,
        rates: &RateTable,
        inflation: &InflationTable,
    ) -> Result<Vec<MonthlySnapshot>> {
        compute_series(
            self.principal,
            self.basis,
            self.start,
            self.end,
            rates,
            inflation,
        )
    }
}
