//! Report formatting and export
//!
//! Formats figures already computed by [`crate::finance`] for people: es-PY number
//! formatting, Spanish month labels, the detailed monthly table as CSV, and the full
//! report as JSON. Nothing here derives new financial figures.

use crate::calendar::MonthKey;
use crate::currency::CurrencyBasis;
use crate::data::provider::Provenance;
use crate::error::Result;
use crate::finance::{MonthlySnapshot, SeriesKpis, SeriesRequest};
use serde::{Deserialize, Serialize};
use std::io::Write;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

/// `Ene 2022` style label
pub fn format_month_label(month: MonthKey) -> String {
    let index = (month.month() as usize).saturating_sub(1).min(11);
    format!("{} {}", MONTH_ABBREVIATIONS[index], month.year())
}

/// Insert `.` every three digits from the right
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (formatted.as_str(), None),
    };

    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };

    match fraction {
        Some(fraction) => format!("{}{},{}", sign, group_thousands(integer), fraction),
        None => format!("{}{}", sign, group_thousands(integer)),
    }
}

/// es-PY number with two decimals: `7.300.000,00`
pub fn format_number(value: f64) -> String {
    format_with_decimals(value, 2)
}

/// Amount with its currency symbol; guaraníes carry no decimals
pub fn format_currency(value: f64, currency: CurrencyBasis) -> String {
    match currency {
        CurrencyBasis::Pyg => format!("{} {}", currency.symbol(), format_with_decimals(value, 0)),
        CurrencyBasis::Usd => format!("{} {}", currency.symbol(), format_with_decimals(value, 2)),
    }
}

/// Compact amount for tight layouts: `7.30M`, `730K`, `730`
pub fn format_short(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.0}K", value / 1_000.0)
    } else {
        format!("{:.0}", value)
    }
}

/// Label shown next to the figures for the rate provenance
pub fn provenance_badge(provenance: Provenance) -> &'static str {
    match provenance {
        Provenance::Live => "Datos en Tiempo Real",
        Provenance::Static => "Datos Históricos",
    }
}

/// Plain-language summary of the period
pub fn narrative(kpis: &SeriesKpis, start: MonthKey, end: MonthKey) -> String {
    let movement = if kpis.local_depreciated() {
        "depreciación"
    } else {
        "apreciación"
    };

    format!(
        "El guaraní paraguayo mostró una {} del {}% frente al dólar entre {} y {}. \
         La inflación acumulada fue del {}%, por lo que un ingreso fijo pierde el {}% \
         de su poder de compra real ({}).",
        movement,
        format_number(kpis.exchange_rate_change_percent.abs()),
        format_month_label(start),
        format_month_label(end),
        format_number(kpis.cumulative_inflation_percent),
        format_number(kpis.loss_percent),
        format_currency(kpis.loss, CurrencyBasis::Pyg),
    )
}

/// One row of the detailed monthly table
#[derive(Debug, Serialize)]
struct DetailRow {
    month: String,
    label: String,
    nominal_usd: String,
    exchange_rate: String,
    nominal_pyg: String,
    inflation_factor: String,
    real_pyg: String,
    real_usd: String,
    loss_pyg: String,
}

impl From<&MonthlySnapshot> for DetailRow {
    fn from(snapshot: &MonthlySnapshot) -> Self {
        Self {
            month: snapshot.month.to_string(),
            label: format_month_label(snapshot.month),
            nominal_usd: format!("{:.2}", snapshot.nominal_foreign),
            exchange_rate: format!("{:.2}", snapshot.exchange_rate),
            nominal_pyg: format!("{:.2}", snapshot.nominal_local),
            inflation_factor: format!("{:.4}", snapshot.cumulative_inflation_factor),
            real_pyg: format!("{:.2}", snapshot.real_local),
            real_usd: format!("{:.2}", snapshot.real_foreign),
            loss_pyg: format!("{:.2}", snapshot.loss_local()),
        }
    }
}

/// Write the detailed monthly table as CSV
pub fn write_csv<W: Write>(writer: W, series: &[MonthlySnapshot]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for snapshot in series {
        csv_writer.serialize(DetailRow::from(snapshot))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Everything one dashboard computation produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub request: SeriesRequest,
    pub provenance: Provenance,
    pub kpis: SeriesKpis,
    pub snapshots: Vec<MonthlySnapshot>,
}

impl Report {
    pub fn new(
        request: SeriesRequest,
        provenance: Provenance,
        kpis: SeriesKpis,
        snapshots: Vec<MonthlySnapshot>,
    ) -> Self {
        Self {
            request,
            provenance,
            kpis,
            snapshots,
        }
    }

    pub fn narrative(&self) -> String {
        narrative(&self.kpis, self.request.start, self.request.end)
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        write_csv(writer, &self.snapshots)
    }
}
