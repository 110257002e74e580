use colored::Colorize;
use std::fmt;

use crate::core::VehicleStatus;

/// Broad category of a [`RentalError`], used by callers to branch on outcome
/// and by the CLI to pick an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: bad plate, amount, customer fields or vehicle data.
    Validation,
    /// The input was well formed but the current state does not allow it.
    BusinessRule,
    /// The storage backend failed.
    Persistence,
    Other,
}

#[derive(Debug)]
pub enum RentalError {
    InvalidPlate {
        candidate: String,
    },
    InvalidAmount {
        value: String,
        reason: String,
    },
    InvalidCustomer {
        field: String,
        reason: String,
    },
    InvalidVehicle {
        field: String,
        value: String,
        reason: String,
    },
    InvalidDate {
        value: String,
    },
    MissingPlate,
    DuplicateVehicle {
        plate: String,
    },
    DuplicateCustomer {
        customer_id: String,
    },
    VehicleNotFound {
        plate: String,
    },
    CustomerNotFound {
        customer_id: String,
    },
    VehicleNotAvailable {
        plate: String,
        status: VehicleStatus,
    },
    VehicleNotRented {
        plate: String,
        status: VehicleStatus,
    },
    StatusOverrideRejected {
        plate: String,
        from: VehicleStatus,
        to: VehicleStatus,
    },
    Persistence {
        operation: String,
        path: Option<String>,
        source: anyhow::Error,
    },
    Other(anyhow::Error),
}

impl RentalError {
    pub fn invalid_plate(candidate: impl Into<String>) -> Self {
        Self::InvalidPlate {
            candidate: candidate.into(),
        }
    }

    pub fn invalid_amount(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_customer(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCustomer {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_vehicle(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidVehicle {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    pub fn duplicate_vehicle(plate: impl Into<String>) -> Self {
        Self::DuplicateVehicle {
            plate: plate.into(),
        }
    }

    pub fn duplicate_customer(customer_id: impl Into<String>) -> Self {
        Self::DuplicateCustomer {
            customer_id: customer_id.into(),
        }
    }

    pub fn vehicle_not_found(plate: impl Into<String>) -> Self {
        Self::VehicleNotFound {
            plate: plate.into(),
        }
    }

    pub fn customer_not_found(customer_id: impl Into<String>) -> Self {
        Self::CustomerNotFound {
            customer_id: customer_id.into(),
        }
    }

    pub fn persistence(
        operation: impl Into<String>,
        path: Option<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::Persistence {
            operation: operation.into(),
            path,
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPlate { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidCustomer { .. }
            | Self::InvalidVehicle { .. }
            | Self::InvalidDate { .. }
            | Self::MissingPlate => ErrorKind::Validation,
            Self::DuplicateVehicle { .. }
            | Self::DuplicateCustomer { .. }
            | Self::VehicleNotFound { .. }
            | Self::CustomerNotFound { .. }
            | Self::VehicleNotAvailable { .. }
            | Self::VehicleNotRented { .. }
            | Self::StatusOverrideRejected { .. } => ErrorKind::BusinessRule,
            Self::Persistence { .. } => ErrorKind::Persistence,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Validation => 2,
            ErrorKind::BusinessRule => 3,
            ErrorKind::Persistence => 4,
            ErrorKind::Other => 1,
        }
    }
}

impl fmt::Display for RentalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cross = "✗".red().bold();
        match self {
            Self::InvalidPlate { candidate } => {
                writeln!(f, "{cross} Invalid license plate: {}", candidate.yellow())?;
                writeln!(
                    f,
                    "  {} Expected three letters followed by three digits, e.g. ABC123",
                    "→".blue()
                )
            }
            Self::InvalidAmount { value, reason } => {
                writeln!(f, "{cross} Invalid amount: {}", value.yellow())?;
                writeln!(f, "  {} {}", "→".blue(), reason)
            }
            Self::InvalidCustomer { field, reason } => {
                writeln!(f, "{cross} Invalid customer {}", field.yellow())?;
                writeln!(f, "  {} {}", "→".blue(), reason)
            }
            Self::InvalidVehicle {
                field,
                value,
                reason,
            } => {
                writeln!(
                    f,
                    "{cross} Invalid vehicle {}: {}",
                    field.yellow(),
                    value.yellow()
                )?;
                writeln!(f, "  {} {}", "→".blue(), reason)
            }
            Self::InvalidDate { value } => {
                writeln!(f, "{cross} Invalid date: {}", value.yellow())?;
                writeln!(f, "  {} Expected YYYY-MM-DD, e.g. 2024-03-01", "→".blue())
            }
            Self::MissingPlate => {
                writeln!(f, "{cross} Vehicle has no license plate assigned")
            }
            Self::DuplicateVehicle { plate } => {
                writeln!(
                    f,
                    "{cross} Vehicle with plate {} already exists",
                    plate.yellow()
                )
            }
            Self::DuplicateCustomer { customer_id } => {
                writeln!(
                    f,
                    "{cross} Customer with ID {} already exists",
                    customer_id.yellow()
                )
            }
            Self::VehicleNotFound { plate } => {
                writeln!(f, "{cross} No vehicle with plate {}", plate.yellow())
            }
            Self::CustomerNotFound { customer_id } => {
                writeln!(f, "{cross} No customer with ID {}", customer_id.yellow())
            }
            Self::VehicleNotAvailable { plate, status } => {
                writeln!(
                    f,
                    "{cross} Vehicle {} is not available for renting",
                    plate.yellow()
                )?;
                writeln!(f, "  {} Current status: {}", "→".blue(), status)
            }
            Self::VehicleNotRented { plate, status } => {
                writeln!(f, "{cross} Vehicle {} is not rented", plate.yellow())?;
                writeln!(f, "  {} Current status: {}", "→".blue(), status)
            }
            Self::StatusOverrideRejected { plate, from, to } => {
                writeln!(
                    f,
                    "{cross} Cannot change status of {} from {} to {}",
                    plate.yellow(),
                    from,
                    to
                )?;
                writeln!(
                    f,
                    "  {} RENTED is only entered and left through rent and return",
                    "→".blue()
                )
            }
            Self::Persistence {
                operation,
                path,
                source,
            } => {
                writeln!(
                    f,
                    "{cross} Storage error during: {}",
                    operation.yellow()
                )?;
                if let Some(path) = path {
                    writeln!(f, "  {} Path: {}", "→".blue(), path)?;
                }
                writeln!(f, "  {} Error: {:#}", "→".blue(), source)
            }
            Self::Other(err) => write!(f, "{cross} {err:#}"),
        }
    }
}

impl std::error::Error for RentalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Persistence { source, .. } => Some(source.as_ref()),
            Self::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RentalError {
    fn from(err: std::io::Error) -> Self {
        Self::Persistence {
            operation: "unknown".to_string(),
            path: None,
            source: err.into(),
        }
    }
}

impl From<anyhow::Error> for RentalError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err)
    }
}

pub type Result<T> = std::result::Result<T, RentalError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            RentalError::invalid_plate("AB12").kind(),
            ErrorKind::Validation
        );
        assert_eq!(RentalError::MissingPlate.kind(), ErrorKind::Validation);
        assert_eq!(
            RentalError::invalid_date("2024-13-01").kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            RentalError::duplicate_vehicle("ABC123").kind(),
            ErrorKind::BusinessRule
        );
        assert_eq!(
            RentalError::VehicleNotRented {
                plate: "ABC123".to_string(),
                status: VehicleStatus::Available,
            }
            .kind(),
            ErrorKind::BusinessRule
        );
        assert_eq!(
            RentalError::persistence("save vehicle", None, anyhow::anyhow!("disk full")).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            RentalError::from(anyhow::anyhow!("boom")).kind(),
            ErrorKind::Other
        );
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        assert_eq!(RentalError::invalid_plate("x").exit_code(), 2);
        assert_eq!(RentalError::customer_not_found("C9").exit_code(), 3);
        assert_eq!(
            RentalError::persistence("load", None, anyhow::anyhow!("x")).exit_code(),
            4
        );
        assert_eq!(RentalError::Other(anyhow::anyhow!("x")).exit_code(), 1);
    }

    #[test]
    fn test_display_mentions_key() {
        let err = RentalError::duplicate_customer("C1");
        let text = err.to_string();
        assert!(text.contains("C1"));
        assert!(text.contains("already exists"));

        let err = RentalError::VehicleNotAvailable {
            plate: "ABC123".to_string(),
            status: VehicleStatus::Rented,
        };
        let text = err.to_string();
        assert!(text.contains("ABC123"));
        assert!(text.contains("RENTED"));
    }

    #[test]
    fn test_persistence_error_display_and_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RentalError::persistence(
            "save customer",
            Some("/tmp/customers.txt".to_string()),
            io.into(),
        );
        let text = err.to_string();
        assert!(text.contains("save customer"));
        assert!(text.contains("/tmp/customers.txt"));
        assert!(text.contains("denied"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: RentalError = io.into();
        assert_eq!(err.kind(), ErrorKind::Persistence);
    }
}
