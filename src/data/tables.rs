//! Month-indexed lookup tables for exchange and inflation rates
//!
//! Both tables store one value per [`MonthKey`] in a `BTreeMap` and fall back to a
//! configured default for months they do not cover. Tables are plain values: an update
//! produces a new table, so a table borrowed by a computation never changes under it.

use crate::calendar::MonthKey;
use crate::error::{DashboardError, Result};
use crate::finance::constants::{DEFAULT_EXCHANGE_RATE, DEFAULT_MONTHLY_INFLATION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// One `month,value` CSV record
#[derive(Debug, Deserialize)]
struct MonthValueRow {
    month: MonthKey,
    value: f64,
}

fn read_month_values<R: Read>(reader: R) -> Result<Vec<(MonthKey, f64)>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut entries = Vec::new();
    for (line, record) in csv_reader.deserialize::<MonthValueRow>().enumerate() {
        let row = record.map_err(|e| {
            DashboardError::ParseError(format!("Invalid CSV record {}: {}", line + 1, e))
        })?;
        entries.push((row.month, row.value));
    }
    Ok(entries)
}

/// PYG per one USD, by month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: BTreeMap<MonthKey, f64>,
    default_rate: f64,
}

impl RateTable {
    /// Empty table using the system default rate
    pub fn new() -> Self {
        Self {
            rates: BTreeMap::new(),
            default_rate: DEFAULT_EXCHANGE_RATE,
        }
    }

    /// Empty table with a custom fallback rate
    pub fn with_default(default_rate: f64) -> Result<Self> {
        validate_rate(default_rate)?;
        Ok(Self {
            rates: BTreeMap::new(),
            default_rate,
        })
    }

    /// Build from `(month, rate)` pairs
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (MonthKey, f64)>,
    {
        let mut table = Self::new();
        table.add_rates(entries)?;
        Ok(table)
    }

    /// Set the rate for one month
    pub fn add_rate(&mut self, month: MonthKey, rate: f64) -> Result<()> {
        validate_rate(rate)?;
        self.rates.insert(month, rate);
        Ok(())
    }

    /// Set several rates, stopping at the first invalid one
    pub fn add_rates<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (MonthKey, f64)>,
    {
        for (month, rate) in entries {
            self.add_rate(month, rate)?;
        }
        Ok(())
    }

    /// Copy of this table with `month` set to `rate`
    pub fn with_rate(&self, month: MonthKey, rate: f64) -> Result<Self> {
        let mut next = self.clone();
        next.add_rate(month, rate)?;
        Ok(next)
    }

    /// Rate for `month`, or the default when unmapped
    pub fn get(&self, month: MonthKey) -> f64 {
        self.rates.get(&month).copied().unwrap_or(self.default_rate)
    }

    /// Rate for `month` only if explicitly mapped
    pub fn get_exact(&self, month: MonthKey) -> Option<f64> {
        self.rates.get(&month).copied()
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// First and last mapped months
    pub fn coverage(&self) -> Option<(MonthKey, MonthKey)> {
        let first = self.rates.keys().next()?;
        let last = self.rates.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, f64)> + '_ {
        self.rates.iter().map(|(month, rate)| (*month, *rate))
    }

    /// Overlay entries read from CSV (`month,value` header)
    pub fn load_from_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let entries = read_month_values(reader)?;
        let count = entries.len();
        self.add_rates(entries)?;
        Ok(count)
    }

    /// Overlay entries read from a CSV file
    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let file = std::fs::File::open(path.as_ref())?;
        let count = self.load_from_csv(file)?;
        log::debug!(
            "Loaded {} exchange rates from {}",
            count,
            path.as_ref().display()
        );
        Ok(count)
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() || rate <= 0.0 {
        return Err(DashboardError::InvalidData(format!(
            "Exchange rate must be positive, got: {}",
            rate
        )));
    }
    Ok(())
}

/// Monthly inflation as a fraction (0.005 = 0.5%), by month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InflationTable {
    rates: BTreeMap<MonthKey, f64>,
    default_rate: f64,
}

impl InflationTable {
    /// Empty table using the system default inflation
    pub fn new() -> Self {
        Self {
            rates: BTreeMap::new(),
            default_rate: DEFAULT_MONTHLY_INFLATION,
        }
    }

    /// Empty table with a custom fallback inflation
    pub fn with_default(default_rate: f64) -> Result<Self> {
        validate_inflation(default_rate)?;
        Ok(Self {
            rates: BTreeMap::new(),
            default_rate,
        })
    }

    /// Build from `(month, inflation)` pairs
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (MonthKey, f64)>,
    {
        let mut table = Self::new();
        table.add_rates(entries)?;
        Ok(table)
    }

    pub fn add_rate(&mut self, month: MonthKey, inflation: f64) -> Result<()> {
        validate_inflation(inflation)?;
        self.rates.insert(month, inflation);
        Ok(())
    }

    pub fn add_rates<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (MonthKey, f64)>,
    {
        for (month, inflation) in entries {
            self.add_rate(month, inflation)?;
        }
        Ok(())
    }

    /// Inflation for `month`, or the default when unmapped
    pub fn get(&self, month: MonthKey) -> f64 {
        self.rates.get(&month).copied().unwrap_or(self.default_rate)
    }

    pub fn get_exact(&self, month: MonthKey) -> Option<f64> {
        self.rates.get(&month).copied()
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, f64)> + '_ {
        self.rates.iter().map(|(month, rate)| (*month, *rate))
    }

    pub fn load_from_csv<R: Read>(&mut self, reader: R) -> Result<usize> {
        let entries = read_month_values(reader)?;
        let count = entries.len();
        self.add_rates(entries)?;
        Ok(count)
    }

    pub fn load_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let file = std::fs::File::open(path.as_ref())?;
        let count = self.load_from_csv(file)?;
        log::debug!(
            "Loaded {} inflation rates from {}",
            count,
            path.as_ref().display()
        );
        Ok(count)
    }
}

impl Default for InflationTable {
    fn default() -> Self {
        Self::new()
    }
}

// Deflation below -100% would flip the sign of real values
fn validate_inflation(inflation: f64) -> Result<()> {
    if !inflation.is_finite() || inflation <= -1.0 {
        return Err(DashboardError::InvalidData(format!(
            "Monthly inflation must be finite and above -1, got: {}",
            inflation
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_rate_lookup_and_default() {
        let table = RateTable::from_entries(vec![(mk("2022-01"), 7300.0)]).unwrap();
        assert_eq!(table.get(mk("2022-01")), 7300.0);
        assert_eq!(table.get(mk("2030-01")), 7500.0);
        assert_eq!(table.get_exact(mk("2030-01")), None);
    }

    #[test]
    fn test_custom_default() {
        let table = RateTable::with_default(6900.0).unwrap();
        assert_eq!(table.get(mk("2022-01")), 6900.0);
        assert!(RateTable::with_default(0.0).is_err());
    }

    #[test]
    fn test_invalid_rate() {
        let mut table = RateTable::new();
        assert!(table.add_rate(mk("2022-01"), -1.0).is_err());
        assert!(table.add_rate(mk("2022-01"), 0.0).is_err());
        assert!(table.add_rate(mk("2022-01"), f64::NAN).is_err());
        assert!(table.is_empty());
    }

    #[test]
    fn test_with_rate_leaves_original_untouched() {
        let base = RateTable::from_entries(vec![(mk("2024-05"), 7400.0)]).unwrap();
        let patched = base.with_rate(mk("2024-05"), 7510.0).unwrap();

        assert_eq!(base.get(mk("2024-05")), 7400.0);
        assert_eq!(patched.get(mk("2024-05")), 7510.0);
    }

    #[test]
    fn test_coverage() {
        let table = RateTable::from_entries(vec![
            (mk("2023-03"), 7300.0),
            (mk("2022-01"), 6900.0),
            (mk("2023-12"), 7280.0),
        ])
        .unwrap();
        assert_eq!(table.coverage(), Some((mk("2022-01"), mk("2023-12"))));
        assert_eq!(RateTable::new().coverage(), None);
    }

    #[test]
    fn test_load_rates_from_csv() {
        let csv_data = "month,value\n# comment line\n2022-01, 7300\n2022-02,7350.5\n";
        let mut table = RateTable::new();
        let count = table.load_from_csv(csv_data.as_bytes()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(table.get(mk("2022-02")), 7350.5);
    }

    #[test]
    fn test_load_rates_rejects_bad_rows() {
        let mut table = RateTable::new();
        assert!(table.load_from_csv("month,value\n2022-13,7300\n".as_bytes()).is_err());
        assert!(table.load_from_csv("month,value\n2022-01,abc\n".as_bytes()).is_err());
        assert!(table.load_from_csv("month,value\n2022-01,-5\n".as_bytes()).is_err());
    }

    #[test]
    fn test_inflation_lookup_and_default() {
        let table = InflationTable::from_entries(vec![(mk("2022-01"), 0.009)]).unwrap();
        assert_eq!(table.get(mk("2022-01")), 0.009);
        assert_eq!(table.get(mk("2022-02")), 0.005);
    }

    #[test]
    fn test_inflation_allows_deflation() {
        let mut table = InflationTable::new();
        assert!(table.add_rate(mk("2022-01"), -0.002).is_ok());
        assert!(table.add_rate(mk("2022-02"), -1.0).is_err());
        assert!(table.add_rate(mk("2022-03"), f64::INFINITY).is_err());
    }

    #[test]
    fn test_load_inflation_from_csv() {
        let mut table = InflationTable::new();
        let count = table
            .load_from_csv("month,value\n2023-01,0.003\n2023-02,0.004\n".as_bytes())
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(mk("2023-02")), 0.004);
    }
}
