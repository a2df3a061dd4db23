//! Validated monetary values.
//!
//! Every failure here is `Error::Financial`, so callers can single out
//! financial-integrity problems from other bad input. NaN and infinities are
//! rejected everywhere.

use std::fmt;

use crate::error::{Error, Result};

fn finite(field: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::financial(field, format!("must be a finite number, got {value}")))
    }
}

/// Strictly positive amount (base salary).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Salary(f64);

impl Salary {
    /// # Errors
    ///
    /// Returns `Error::Financial` unless `value > 0`.
    pub fn new(value: f64) -> Result<Self> {
        let value = finite("base_salary", value)?;
        if value <= 0.0 {
            return Err(Error::financial(
                "base_salary",
                format!("must be a positive number, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Non-negative amount (bonus, sales volume, sale delta).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Amount(f64);

impl Amount {
    /// # Errors
    ///
    /// Returns `Error::Financial` if `value < 0`.
    pub fn new(field: &'static str, value: f64) -> Result<Self> {
        let value = finite(field, value)?;
        if value < 0.0 {
            return Err(Error::financial(
                field,
                format!("must not be negative, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Fraction of sales paid out as commission, within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct CommissionRate(f64);

impl CommissionRate {
    /// # Errors
    ///
    /// Returns `Error::Financial` if the rate lies outside `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        let value = finite("commission_rate", value)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::financial(
                "commission_rate",
                format!("must be between 0 and 1, got {value}"),
            ));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

macro_rules! display_inner {
    ($($name:ident),*) => {
        $(impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

display_inner!(Salary, Amount, CommissionRate);

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_salary_must_be_positive() {
        assert!(Salary::new(1.0).is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = Salary::new(bad).expect_err("rejected");
            assert!(err.is_financial(), "{bad}");
        }
    }

    #[test]
    fn test_amount_allows_zero() {
        assert_eq!(Amount::new("bonus", 0.0).map(Amount::get), Ok(0.0));
        assert!(Amount::new("bonus", -0.01).is_err());
    }

    #[test]
    fn test_commission_rate_bounds() {
        assert!(CommissionRate::new(0.0).is_ok());
        assert!(CommissionRate::new(1.0).is_ok());
        assert!(CommissionRate::new(1.0001).is_err());
        assert!(CommissionRate::new(-0.1).is_err());
    }

    #[test]
    fn test_amount_addition() {
        let total = Amount::new("sales_volume", 10.5).expect("valid")
            + Amount::new("sales_volume", 4.5).expect("valid");
        assert!((total.get() - 15.0).abs() < f64::EPSILON);
    }
}
