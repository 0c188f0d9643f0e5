//! Financial constants and defaults
//!
//! Contains default values and constants used throughout the dashboard

/// Exchange rate (PYG per USD) used for months missing from the rate table
pub const DEFAULT_EXCHANGE_RATE: f64 = 7500.00;

/// Monthly inflation used for months missing from the inflation table
pub const DEFAULT_MONTHLY_INFLATION: f64 = 0.005;

/// Half of the indicative buy/sell spread around the reference rate (PYG)
pub const QUOTE_SPREAD: f64 = 50.0;

/// Cumulative inflation factor at the first month of a range
pub const ANCHOR_INFLATION_FACTOR: f64 = 1.0;

/// ISO code of the local currency fetched from the live source
pub const LOCAL_CURRENCY_CODE: &str = "PYG";

/// Live rate refresh interval (15 minutes)
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 15 * 60;

/// First month analyzed when none is given
pub const DEFAULT_START_MONTH: &str = "2022-01";
