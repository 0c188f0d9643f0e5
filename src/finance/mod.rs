//! Finance module - series computation, KPIs, constants

pub mod constants;
pub mod kpi;
pub mod series;

pub use kpi::{aggregate, SeriesKpis};
pub use series::{compute_series, MonthlySnapshot, SeriesRequest};
