//! Order records
//!
//! Every order belongs to exactly one customer. Dates are calendar dates
//! stored as ISO 8601 text so that text ordering matches date ordering.

use crate::{Error, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Field values for a new order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer_id: i64,
    pub product: String,
    pub amount: f64,
    /// Defaults to today's local date when `None`
    pub date: Option<NaiveDate>,
}

impl NewOrder {
    pub fn new(
        customer_id: i64,
        product: impl Into<String>,
        amount: f64,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            customer_id,
            product: product.into(),
            amount,
            date,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.product.trim().is_empty() {
            return Err(Error::MissingField("product"));
        }
        // SQLite binds NaN as NULL, which would surface as an opaque NOT NULL failure
        if !self.amount.is_finite() {
            return Err(Error::InvalidAmount(self.amount));
        }
        // Dates are compared as text; only four-digit years sort correctly
        if let Some(date) = self.date {
            if !(0..=9999).contains(&date.year()) {
                return Err(Error::DateOutOfRange(date));
            }
        }
        Ok(())
    }

    /// The date to persist, resolving the default
    pub fn effective_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(today)
    }
}

/// An order joined with the name and email of its customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderWithCustomer {
    pub id: i64,
    pub customer_id: i64,
    pub product: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub customer_name: String,
    pub customer_email: String,
}

/// Current local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_and_amount() {
        assert!(NewOrder::new(1, "Widget", 49.90, None).validate().is_ok());

        let err = NewOrder::new(1, " ", 1.0, None).validate().unwrap_err();
        assert!(matches!(err, Error::MissingField("product")));

        let err = NewOrder::new(1, "Widget", f64::NAN, None).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidAmount(_)));
    }

    #[test]
    fn test_dates_beyond_four_digit_years_are_rejected() {
        let far = NaiveDate::from_ymd_opt(10000, 1, 1);
        let err = NewOrder::new(1, "Widget", 1.0, far).validate().unwrap_err();
        assert!(matches!(err, Error::DateOutOfRange(_)));

        let before_zero = NaiveDate::from_ymd_opt(-1, 6, 1);
        let err = NewOrder::new(1, "Widget", 1.0, before_zero).validate().unwrap_err();
        assert!(matches!(err, Error::DateOutOfRange(_)));

        let last = NaiveDate::from_ymd_opt(9999, 12, 31);
        assert!(NewOrder::new(1, "Widget", 1.0, last).validate().is_ok());
    }

    #[test]
    fn test_date_defaults_to_today() {
        let explicit = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(NewOrder::new(1, "Widget", 1.0, Some(explicit)).effective_date(), explicit);

        let before = today();
        let defaulted = NewOrder::new(1, "Widget", 1.0, None).effective_date();
        assert!(defaulted >= before && defaulted <= today());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert!(parse_date("01/01/2024").is_err());
    }
}
