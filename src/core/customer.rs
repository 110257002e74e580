//! Registered customers, keyed by ID.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RentalError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: String,
    name: String,
}

impl Customer {
    /// Both fields are trimmed. The id must be non-empty and free of commas
    /// and line breaks; the name must be non-empty and free of line breaks.
    pub fn new(id: &str, name: &str) -> Result<Self, RentalError> {
        let id = id.trim();
        let name = name.trim();

        if id.is_empty() {
            return Err(RentalError::invalid_customer("ID", "Customer ID cannot be empty"));
        }
        if id.contains([',', '\n', '\r']) {
            return Err(RentalError::invalid_customer(
                "ID",
                "Customer ID cannot contain commas or line breaks",
            ));
        }
        if name.is_empty() {
            return Err(RentalError::invalid_customer(
                "name",
                "Customer name cannot be empty",
            ));
        }
        if name.contains(['\n', '\r']) {
            return Err(RentalError::invalid_customer(
                "name",
                "Customer name cannot contain line breaks",
            ));
        }

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
