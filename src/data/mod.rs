//! Exchange-rate and inflation data
//!
//! # Components
//!
//! - **tables**: month-indexed rate and inflation tables with defaults
//! - **reference**: static USD/PYG and IPC reference data
//! - **sources**: live exchange-rate sources
//! - **provider**: owner of the effective rate table and its provenance
//!
//! # Example
//!
//! ```rust
//! use purchasing_power::data::{reference_inflation, reference_rates};
//!
//! let rates = reference_rates();
//! let inflation = reference_inflation();
//!
//! let month = "2022-01".parse().unwrap();
//! assert_eq!(rates.get(month), 6890.0);
//! assert!(inflation.get(month) > 0.0);
//! ```

pub mod provider;
pub mod reference;
pub mod sources;
pub mod tables;

pub use provider::{Provenance, RateProvider, StatusCallback};
#[cfg(feature = "async")]
pub use provider::RefreshTask;
pub use reference::{reference_inflation, reference_rates};
pub use sources::{extract_rate, RateSource, StaticRateSource, UnavailableRateSource};
pub use tables::{InflationTable, RateTable};
