//! Rental records and the append-only rental history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use super::plate::LicensePlate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    Rent,
    Return,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Rent => "RENT",
            TransactionKind::Return => "RETURN",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RENT" => Ok(TransactionKind::Rent),
            "RETURN" => Ok(TransactionKind::Return),
            _ => Err(format!("Unknown transaction type: {s}")),
        }
    }
}

/// A single rent or return. Vehicle and customer are referenced by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    plate: LicensePlate,
    customer_id: String,
    date: NaiveDate,
    amount: Money,
    kind: TransactionKind,
}

impl RentalRecord {
    pub fn new(
        plate: LicensePlate,
        customer_id: impl Into<String>,
        date: NaiveDate,
        amount: Money,
        kind: TransactionKind,
    ) -> Self {
        Self {
            plate,
            customer_id: customer_id.into(),
            date,
            amount,
            kind,
        }
    }

    pub fn plate(&self) -> &LicensePlate {
        &self.plate
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }
}

impl fmt::Display for RentalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | ${}",
            self.kind, self.plate, self.customer_id, self.date, self.amount
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RentalHistory {
    records: Vec<RentalRecord>,
}

impl RentalHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: RentalRecord) -> &RentalRecord {
        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Removes the newest record. Used to undo an append whose persistence failed.
    pub(crate) fn pop(&mut self) -> Option<RentalRecord> {
        self.records.pop()
    }

    pub fn records(&self) -> &[RentalRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&RentalRecord> {
        self.records.last()
    }

    pub fn for_vehicle<'a>(&'a self, plate: &'a str) -> impl Iterator<Item = &'a RentalRecord> {
        self.records.iter().filter(move |r| r.plate.matches(plate))
    }

    pub fn for_customer<'a>(
        &'a self,
        customer_id: &'a str,
    ) -> impl Iterator<Item = &'a RentalRecord> {
        self.records
            .iter()
            .filter(move |r| r.customer_id == customer_id)
    }
}
