//! # purchasing_power
//!
//! Purchasing-power erosion of a fixed monthly income, denominated in USD or PYG,
//! against monthly USD/PYG exchange rates and Paraguayan consumer-price inflation.
//!
//! The engine walks a month range, compounds inflation from the first month, and
//! produces one [`MonthlySnapshot`](finance::MonthlySnapshot) per month plus summary
//! KPIs. Exchange rates come from static reference data, optionally patched for the
//! current month by a live source through a [`RateProvider`](data::RateProvider).
//!
//! ## Example
//!
//! ```rust
//! use purchasing_power::prelude::*;
//!
//! let rates = reference_rates();
//! let inflation = reference_inflation();
//! let start: MonthKey = "2022-01".parse().unwrap();
//! let end: MonthKey = "2022-12".parse().unwrap();
//!
//! let series = compute_series(1000.0, CurrencyBasis::Usd, start, end, &rates, &inflation).unwrap();
//! assert_eq!(series.len(), 12);
//! assert_eq!(series[0].cumulative_inflation_factor, 1.0);
//!
//! let kpis = aggregate(&series).unwrap();
//! assert!(kpis.loss > 0.0);
//! ```

pub mod calendar;
pub mod currency;
pub mod data;
pub mod error;
pub mod finance;
pub mod report;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::calendar::{month_count, months_between, MonthKey};
    pub use crate::currency::CurrencyBasis;
    pub use crate::data::{
        reference_inflation, reference_rates, InflationTable, Provenance, RateProvider,
        RateSource, RateTable,
    };
    pub use crate::error::{DashboardError, Result};
    pub use crate::finance::{aggregate, compute_series, MonthlySnapshot, SeriesKpis, SeriesRequest};
    pub use crate::report::Report;
}
