//! Static reference data
//!
//! Monthly average USD/PYG rates and monthly IPC (consumer price index) variation
//! published by the Banco Central del Paraguay. Months after the last published figure
//! carry projections. Used as the base truth when no live rate is available.

use crate::calendar::MonthKey;
use crate::data::tables::{InflationTable, RateTable};

/// (year, month, PYG per USD)
const USD_PYG_RATES: &[(i32, u32, f64)] = &[
    (2022, 1, 6890.00),
    (2022, 2, 6960.00),
    (2022, 3, 6930.00),
    (2022, 4, 6840.00),
    (2022, 5, 6830.00),
    (2022, 6, 6850.00),
    (2022, 7, 6880.00),
    (2022, 8, 6880.00),
    (2022, 9, 6980.00),
    (2022, 10, 7160.00),
    (2022, 11, 7210.00),
    (2022, 12, 7300.00),
    (2023, 1, 7350.00),
    (2023, 2, 7240.00),
    (2023, 3, 7180.00),
    (2023, 4, 7160.00),
    (2023, 5, 7220.00),
    (2023, 6, 7260.00),
    (2023, 7, 7260.00),
    (2023, 8, 7290.00),
    (2023, 9, 7290.00),
    (2023, 10, 7330.00),
    (2023, 11, 7330.00),
    (2023, 12, 7290.00),
    (2024, 1, 7290.00),
    (2024, 2, 7300.00),
    (2024, 3, 7320.00),
    (2024, 4, 7420.00),
    (2024, 5, 7500.00),
    (2024, 6, 7530.00),
    (2024, 7, 7550.00),
    (2024, 8, 7620.00),
    (2024, 9, 7790.00),
    (2024, 10, 7840.00),
    (2024, 11, 7810.00),
    (2024, 12, 7820.00),
    (2025, 1, 7880.00),
    (2025, 2, 7930.00),
    (2025, 3, 7970.00),
    (2025, 4, 8010.00),
    (2025, 5, 7990.00),
    (2025, 6, 7980.00),
    (2025, 7, 7590.00),
    (2025, 8, 7380.00),
    (2025, 9, 7180.00),
    (2025, 10, 7080.00),
    (2025, 11, 7060.00),
    (2025, 12, 7050.00),
];

/// (year, month, monthly IPC variation as a fraction)
const MONTHLY_INFLATION: &[(i32, u32, f64)] = &[
    (2022, 1, 0.013),
    (2022, 2, 0.011),
    (2022, 3, 0.017),
    (2022, 4, 0.018),
    (2022, 5, 0.006),
    (2022, 6, 0.013),
    (2022, 7, 0.003),
    (2022, 8, -0.003),
    (2022, 9, -0.001),
    (2022, 10, 0.003),
    (2022, 11, 0.004),
    (2022, 12, 0.003),
    (2023, 1, 0.009),
    (2023, 2, 0.003),
    (2023, 3, 0.003),
    (2023, 4, 0.001),
    (2023, 5, -0.001),
    (2023, 6, 0.001),
    (2023, 7, 0.002),
    (2023, 8, 0.003),
    (2023, 9, 0.003),
    (2023, 10, 0.004),
    (2023, 11, 0.002),
    (2023, 12, 0.004),
    (2024, 1, 0.005),
    (2024, 2, 0.003),
    (2024, 3, 0.004),
    (2024, 4, 0.002),
    (2024, 5, 0.002),
    (2024, 6, 0.001),
    (2024, 7, 0.002),
    (2024, 8, 0.003),
    (2024, 9, 0.003),
    (2024, 10, 0.004),
    (2024, 11, 0.004),
    (2024, 12, 0.004),
    (2025, 1, 0.006),
    (2025, 2, 0.004),
    (2025, 3, 0.005),
    (2025, 4, 0.004),
    (2025, 5, 0.003),
    (2025, 6, 0.003),
    (2025, 7, 0.002),
    (2025, 8, 0.002),
    (2025, 9, 0.003),
    (2025, 10, 0.003),
    (2025, 11, 0.003),
    (2025, 12, 0.003),
];

fn keyed(entries: &'static [(i32, u32, f64)]) -> impl Iterator<Item = (MonthKey, f64)> {
    entries
        .iter()
        .filter_map(|&(year, month, value)| MonthKey::new(year, month).ok().map(|key| (key, value)))
}

/// Reference USD/PYG table with the system default rate for other months
pub fn reference_rates() -> RateTable {
    RateTable::from_entries(keyed(USD_PYG_RATES)).unwrap_or_default()
}

/// Reference IPC table with the system default inflation for other months
pub fn reference_inflation() -> InflationTable {
    InflationTable::from_entries(keyed(MONTHLY_INFLATION)).unwrap_or_default()
}
