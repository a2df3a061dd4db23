//! Error types for staffing-core.
//!
//! Every fallible operation in the crate returns [`Result<T>`] carrying one
//! closed [`Error`] enum. Errors fall into four groups:
//!
//! - **Validation**: a field failed its format or range rule (`InvalidData`),
//!   with `Financial` as the refinement for monetary fields
//! - **Lookup/uniqueness**: `NotFound`, `DuplicateId`
//! - **State**: `InvalidStatus`, `PreconditionFailed`
//! - **Access/system**: `OutOfRange`, `TypeKind`, `Io`, `InvalidConfig`
//!
//! [`Error::kind`] flattens a value to its [`ErrorKind`] so callers can branch
//! on the category without matching fields.

use std::{fmt::Display, path::Path};

use strum::Display as StrumDisplay;
use thiserror::Error;

/// The aggregate an identity error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
    Employee,
    Department,
    Project,
}

/// Fieldless classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    InvalidData,
    Financial,
    NotFound,
    DuplicateId,
    InvalidStatus,
    PreconditionFailed,
    OutOfRange,
    TypeKind,
    Io,
    InvalidConfig,
}

/// Core error type for staffing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A field failed its format, type or range rule
    #[error("invalid {field}: {reason}")]
    InvalidData { field: String, reason: String },

    /// A monetary field failed validation
    #[error("financial validation failed for {field}: {reason}")]
    Financial { field: String, reason: String },

    /// Lookup by id or name found nothing
    #[error("{entity} '{key}' not found")]
    NotFound { entity: Entity, key: String },

    /// Uniqueness constraint violated on insert
    #[error("{entity} '{key}' already exists")]
    DuplicateId { entity: Entity, key: String },

    /// Status outside the valid set, or an operation the status forbids
    #[error("invalid status '{status}': {reason}")]
    InvalidStatus { status: String, reason: String },

    /// A cross-aggregate guard blocked the operation
    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    /// Positional access past either end of a roster
    #[error("index {index} out of range for roster of {len} employee(s)")]
    OutOfRange { index: isize, len: usize },

    /// Roster key that is neither a position nor a range
    #[error("roster key must be an integer or a range, got '{0}'")]
    TypeKind(String),

    /// File read/write or decode failure
    #[error("I/O failure on {path}: {reason}")]
    Io { path: String, reason: String },

    /// Configuration file or environment override is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for staffing-core operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn financial(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Financial {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: Entity, key: impl Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: Entity, key: impl Display) -> Self {
        Self::DuplicateId {
            entity,
            key: key.to_string(),
        }
    }

    pub fn invalid_status(status: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidStatus {
            status: status.into(),
            reason: reason.into(),
        }
    }

    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::PreconditionFailed(msg.into())
    }

    /// Wrap any I/O or decode failure together with the path it concerns.
    pub fn io(path: &Path, source: impl Display) -> Self {
        Self::Io {
            path: path.display().to_string(),
            reason: source.to_string(),
        }
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidData { .. } => ErrorKind::InvalidData,
            Self::Financial { .. } => ErrorKind::Financial,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::DuplicateId { .. } => ErrorKind::DuplicateId,
            Self::InvalidStatus { .. } => ErrorKind::InvalidStatus,
            Self::PreconditionFailed(_) => ErrorKind::PreconditionFailed,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::TypeKind(_) => ErrorKind::TypeKind,
            Self::Io { .. } => ErrorKind::Io,
            Self::InvalidConfig(_) => ErrorKind::InvalidConfig,
        }
    }

    /// True for data validation failures, financial ones included.
    #[must_use]
    pub const fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData { .. } | Self::Financial { .. })
    }

    #[must_use]
    pub const fn is_financial(&self) -> bool {
        matches!(self, Self::Financial { .. })
    }

    /// Returns the process exit code for this error.
    ///
    /// - 1: validation (bad data, status, key or config)
    /// - 2: I/O
    /// - 3: not found
    /// - 4: state conflict (duplicate, precondition, out of range)
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidData
            | ErrorKind::Financial
            | ErrorKind::InvalidStatus
            | ErrorKind::TypeKind
            | ErrorKind::InvalidConfig => 1,
            ErrorKind::Io => 2,
            ErrorKind::NotFound => 3,
            ErrorKind::DuplicateId | ErrorKind::PreconditionFailed | ErrorKind::OutOfRange => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_financial_counts_as_invalid_data() {
        let err = Error::financial("bonus", "must not be negative");
        assert!(err.is_invalid_data());
        assert!(err.is_financial());
        assert_eq!(err.kind(), ErrorKind::Financial);

        let err = Error::invalid_data("name", "must not be blank");
        assert!(err.is_invalid_data());
        assert!(!err.is_financial());
    }

    #[test]
    fn test_error_display_not_found() {
        let err = Error::not_found(Entity::Department, "Sales");
        assert_eq!(err.to_string(), "department 'Sales' not found");
    }

    #[test]
    fn test_error_display_duplicate() {
        let err = Error::duplicate(Entity::Employee, 7);
        assert_eq!(err.to_string(), "employee '7' already exists");
    }

    #[test]
    fn test_io_error_carries_path() {
        let err = Error::io(Path::new("/tmp/dept.json"), "permission denied");
        let display = err.to_string();
        assert!(display.contains("/tmp/dept.json"));
        assert!(display.contains("permission denied"));
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_kind_names_are_snake_case() {
        assert_eq!(ErrorKind::PreconditionFailed.to_string(), "precondition_failed");
        assert_eq!(ErrorKind::TypeKind.to_string(), "type_kind");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::invalid_data("id", "x").exit_code(), 1);
        assert_eq!(Error::invalid_status("done", "x").exit_code(), 1);
        assert_eq!(Error::io(Path::new("a"), "x").exit_code(), 2);
        assert_eq!(Error::not_found(Entity::Project, 1).exit_code(), 3);
        assert_eq!(Error::precondition("x").exit_code(), 4);
        assert_eq!(Error::OutOfRange { index: 5, len: 2 }.exit_code(), 4);
    }
}
