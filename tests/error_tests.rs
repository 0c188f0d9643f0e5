//! Tests for error creation, message formatting and propagation
//!
//! Every public operation that can fail should surface a `DashboardError`
//! whose message names the offending value.

use purchasing_power::calendar::MonthKey;
use purchasing_power::currency::CurrencyBasis;
use purchasing_power::data::{InflationTable, RateTable};
use purchasing_power::error::DashboardError;
use purchasing_power::finance::{aggregate, compute_series};

#[cfg(test)]
mod error_message_tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = DashboardError::InvalidInput("principal must be finite".to_string());
        assert_eq!(err.to_string(), "Invalid input: principal must be finite");
    }

    #[test]
    fn test_empty_series_message() {
        let err = DashboardError::EmptySeries;
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_rate_fetch_failure_message() {
        let err = DashboardError::RateFetchFailure("HTTP 503".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Rate fetch failed"));
        assert!(msg.contains("503"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "rates.csv");
        let err: DashboardError = io.into();
        assert!(matches!(err, DashboardError::IoError(_)));
        assert!(err.to_string().contains("rates.csv"));
    }

    #[test]
    fn test_serde_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: DashboardError = parse.into();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}

#[cfg(test)]
mod error_propagation_tests {
    use super::*;

    fn mk(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_bad_month_text() {
        let err = "2024-13".parse::<MonthKey>().unwrap_err();
        assert!(matches!(err, DashboardError::ParseError(_)));
        assert!(err.to_string().contains("13"));

        assert!("enero".parse::<MonthKey>().is_err());
        assert!(MonthKey::new(2024, 0).is_err());
    }

    #[test]
    fn test_unknown_currency() {
        let err = "EUR".parse::<CurrencyBasis>().unwrap_err();
        assert!(matches!(err, DashboardError::ParseError(_)));
        assert!(err.to_string().contains("EUR"));
    }

    #[test]
    fn test_negative_principal_rejected() {
        let err = compute_series(
            -1.0,
            CurrencyBasis::Usd,
            mk("2022-01"),
            mk("2022-03"),
            &RateTable::new(),
            &InflationTable::new(),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
    }

    #[test]
    fn test_non_finite_principal_rejected() {
        for principal in [f64::NAN, f64::INFINITY] {
            let result = compute_series(
                principal,
                CurrencyBasis::Pyg,
                mk("2022-01"),
                mk("2022-01"),
                &RateTable::new(),
                &InflationTable::new(),
            );
            assert!(matches!(result, Err(DashboardError::InvalidInput(_))));
        }
    }

    #[test]
    fn test_amount_too_large_to_convert() {
        let result = compute_series(
            1e305,
            CurrencyBasis::Usd,
            mk("2022-01"),
            mk("2022-02"),
            &RateTable::new(),
            &InflationTable::new(),
        );
        let err = result.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidInput(_)));
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_aggregate_empty() {
        assert!(matches!(aggregate(&[]), Err(DashboardError::EmptySeries)));
    }

    #[test]
    fn test_invalid_table_values() {
        let mut rates = RateTable::new();
        assert!(matches!(
            rates.add_rate(mk("2022-01"), 0.0),
            Err(DashboardError::InvalidData(_))
        ));
        assert!(rates.add_rate(mk("2022-01"), f64::NAN).is_err());

        let mut inflation = InflationTable::new();
        assert!(inflation.add_rate(mk("2022-01"), -1.5).is_err());
        assert!(inflation.add_rate(mk("2022-01"), -0.01).is_ok());
    }

    #[test]
    fn test_malformed_csv() {
        let csv = "month,value\n2022-01,abc\n";
        let mut rates = RateTable::new();
        let result = rates.load_from_csv(csv.as_bytes());
        assert!(matches!(result, Err(DashboardError::ParseError(_))));
        assert!(rates.is_empty());
    }
}
