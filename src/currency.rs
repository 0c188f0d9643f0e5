//! Currency basis of the monthly income

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency the fixed monthly amount is denominated in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurrencyBasis {
    /// US Dollar (foreign currency)
    #[serde(rename = "USD")]
    Usd,
    /// Paraguayan Guaraní (local currency)
    #[serde(rename = "PYG")]
    Pyg,
}

impl CurrencyBasis {
    /// Get ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            CurrencyBasis::Usd => "USD",
            CurrencyBasis::Pyg => "PYG",
        }
    }

    /// Get currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyBasis::Usd => "$",
            CurrencyBasis::Pyg => "Gs.",
        }
    }

    /// The other side of the USD/PYG pair
    pub fn other(&self) -> Self {
        match self {
            CurrencyBasis::Usd => CurrencyBasis::Pyg,
            CurrencyBasis::Pyg => CurrencyBasis::Usd,
        }
    }

    /// Whether this is the local (rate-quoted) currency
    pub fn is_local(&self) -> bool {
        matches!(self, CurrencyBasis::Pyg)
    }

    /// Parse from ISO code
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(CurrencyBasis::Usd),
            "PYG" => Some(CurrencyBasis::Pyg),
            _ => None,
        }
    }
}

impl FromStr for CurrencyBasis {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
            .ok_or_else(|| DashboardError::ParseError(format!("Unknown currency basis: {}", s)))
    }
}

impl fmt::Display for CurrencyBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(CurrencyBasis::Usd.code(), "USD");
        assert_eq!(CurrencyBasis::Pyg.code(), "PYG");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(CurrencyBasis::Usd.symbol(), "$");
        assert_eq!(CurrencyBasis::Pyg.symbol(), "Gs.");
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(CurrencyBasis::from_code("USD"), Some(CurrencyBasis::Usd));
        assert_eq!(CurrencyBasis::from_code("pyg"), Some(CurrencyBasis::Pyg));
        assert_eq!(CurrencyBasis::from_code("EUR"), None);
        assert!("ARS".parse::<CurrencyBasis>().is_err());
    }

    #[test]
    fn test_other_and_local() {
        assert_eq!(CurrencyBasis::Usd.other(), CurrencyBasis::Pyg);
        assert!(CurrencyBasis::Pyg.is_local());
        assert!(!CurrencyBasis::Usd.is_local());
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&CurrencyBasis::Pyg).unwrap(), "\"PYG\"");
        let basis: CurrencyBasis = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(basis, CurrencyBasis::Usd);
    }
}
