//! Currency amounts with exactly two decimal places, stored as whole cents.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

use crate::error::RentalError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Parses a non-negative decimal amount with at most two fractional digits,
    /// e.g. `100`, `15.5` or `15.50`.
    pub fn parse(input: &str) -> Result<Self, RentalError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(RentalError::invalid_amount(input, "Amount cannot be empty"));
        }
        if trimmed.starts_with('-') {
            return Err(RentalError::invalid_amount(
                input,
                "Amount cannot be negative",
            ));
        }

        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(RentalError::invalid_amount(input, "Amount has no digits"));
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(RentalError::invalid_amount(
                input,
                "Amount must be a decimal number such as 15.50",
            ));
        }
        if fraction.len() > 2 {
            return Err(RentalError::invalid_amount(
                input,
                "Amount may have at most two decimal places",
            ));
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| RentalError::invalid_amount(input, "Amount is too large"))?
        };
        // "5" means fifty cents, so pad the fraction to two digits.
        let fraction = fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(2)
            .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(fraction))
            .map(Self::from_cents)
            .ok_or_else(|| RentalError::invalid_amount(input, "Amount is too large"))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl FromStr for Money {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents.saturating_add(rhs.cents))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Money::parse(&raw)
            .map_err(|_| serde::de::Error::custom(format!("invalid amount {raw:?}")))
    }
}
