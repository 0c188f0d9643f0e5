//! Summary metrics over a snapshot series

use crate::currency::CurrencyBasis;
use crate::error::{DashboardError, Result};
use crate::finance::constants::QUOTE_SPREAD;
use crate::finance::series::MonthlySnapshot;
use serde::{Deserialize, Serialize};

/// Headline figures for a computed series
///
/// Local (PYG) figures unless the field name says `foreign`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesKpis {
    pub basis: CurrencyBasis,
    pub initial_nominal: f64,
    pub final_nominal: f64,
    pub final_real: f64,
    /// final_nominal - final_real
    pub loss: f64,
    /// loss as a share of final_nominal, in percent
    pub loss_percent: f64,
    pub exchange_rate_change_percent: f64,
    pub cumulative_inflation_percent: f64,
    pub initial_rate: f64,
    pub final_rate: f64,
    pub initial_nominal_foreign: f64,
    pub final_nominal_foreign: f64,
    pub final_real_foreign: f64,
    /// Final real USD value against the initial nominal USD value, in percent
    pub purchasing_power_variation_percent: f64,
    /// Real versus nominal at the last month, in percent
    pub real_devaluation_percent: f64,
    pub buy_rate: f64,
    pub sell_rate: f64,
}

impl SeriesKpis {
    /// Whether the guaraní lost value against the dollar over the range
    pub fn local_depreciated(&self) -> bool {
        self.exchange_rate_change_percent >= 0.0
    }
}

/// Reduce a series to its summary metrics
pub fn aggregate(series: &[MonthlySnapshot]) -> Result<SeriesKpis> {
    let (initial, last) = match (series.first(), series.last()) {
        (Some(initial), Some(last)) => (initial, last),
        _ => return Err(DashboardError::EmptySeries),
    };

    let loss = last.nominal_local - last.real_local;
    let loss_percent = if last.nominal_local == 0.0 {
        0.0
    } else {
        loss / last.nominal_local * 100.0
    };

    let exchange_rate_change_percent =
        (last.exchange_rate - initial.exchange_rate) / initial.exchange_rate * 100.0;
    let cumulative_inflation_percent = (last.cumulative_inflation_factor - 1.0) * 100.0;

    let purchasing_power_variation_percent = if initial.nominal_foreign == 0.0 {
        0.0
    } else {
        (last.real_foreign - initial.nominal_foreign) / initial.nominal_foreign * 100.0
    };

    Ok(SeriesKpis {
        basis: last.basis,
        initial_nominal: initial.nominal_local,
        final_nominal: last.nominal_local,
        final_real: last.real_local,
        loss,
        loss_percent,
        exchange_rate_change_percent,
        cumulative_inflation_percent,
        initial_rate: initial.exchange_rate,
        final_rate: last.exchange_rate,
        initial_nominal_foreign: initial.nominal_foreign,
        final_nominal_foreign: last.nominal_foreign,
        final_real_foreign: last.real_foreign,
        purchasing_power_variation_percent,
        real_devaluation_percent: last.erosion_percent(),
        buy_rate: last.exchange_rate - QUOTE_SPREAD,
        sell_rate: last.exchange_rate + QUOTE_SPREAD,
    })
}
