//! License plate validation
//!
//! A plate is exactly six ASCII characters: three letters followed by three
//! digits. Plates are stored uppercase, so two plates that differ only in
//! letter case identify the same vehicle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RentalError;

pub const PLATE_LENGTH: usize = 6;
const LETTER_COUNT: usize = 3;

/// Checks the plate format without allocating. Never fails, only answers.
pub fn is_valid_plate(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    if bytes.len() != PLATE_LENGTH {
        return false;
    }

    let (letters, digits) = bytes.split_at(LETTER_COUNT);
    letters.iter().all(u8::is_ascii_alphabetic) && digits.iter().all(u8::is_ascii_digit)
}

/// A validated, uppercase license plate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LicensePlate(String);

impl LicensePlate {
    pub fn parse(candidate: &str) -> Result<Self, RentalError> {
        if !is_valid_plate(candidate) {
            return Err(RentalError::invalid_plate(candidate));
        }
        Ok(Self(candidate.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against an unvalidated lookup key.
    pub fn matches(&self, key: &str) -> bool {
        self.0.eq_ignore_ascii_case(key)
    }
}

impl fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LicensePlate {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LicensePlate {
    type Error = RentalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LicensePlate> for String {
    fn from(plate: LicensePlate) -> Self {
        plate.0
    }
}

impl AsRef<str> for LicensePlate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
