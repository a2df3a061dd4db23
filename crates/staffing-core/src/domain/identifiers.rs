//! Semantic newtypes for identities and validated text.
//!
//! # Parse-at-Boundaries Pattern
//!
//! Each type:
//! - Validates its input on construction (parse-once pattern)
//! - Cannot represent invalid states
//! - Provides read-only access to the underlying value
//!
//! Identities reject non-positive integers with `InvalidData`. Text types
//! reject empty or whitespace-only strings with `InvalidData`; the accepted
//! value is stored as given so snapshots round-trip byte for byte.

use std::fmt;

use crate::error::{Error, Result};

// ============================================================================
// NUMERIC IDENTITIES
// ============================================================================

fn positive_id(field: &'static str, raw: i64) -> Result<u64> {
    u64::try_from(raw)
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| Error::invalid_data(field, format!("must be a positive integer, got {raw}")))
}

/// Employee identity, unique within a department and across a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmployeeId(u64);

impl EmployeeId {
    /// Parse a raw integer into an employee id.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` if `raw <= 0`.
    pub fn new(raw: i64) -> Result<Self> {
        positive_id("id", raw).map(Self)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Project identity, unique within a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(u64);

impl ProjectId {
    /// Parse a raw integer into a project id.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` if `raw <= 0`.
    pub fn new(raw: i64) -> Result<Self> {
        positive_id("project_id", raw).map(Self)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// NON-BLANK TEXT
// ============================================================================

/// Declares a newtype over `String` that rejects blank input.
macro_rules! non_blank_text {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Field name reported in validation errors.
            pub const FIELD: &'static str = $field;

            /// # Errors
            ///
            /// Returns `Error::InvalidData` if the value is empty or whitespace-only.
            pub fn parse(value: impl Into<String>) -> Result<Self> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(Error::invalid_data($field, "must not be blank"));
                }
                Ok(Self(value))
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

non_blank_text!(
    /// An employee's display name.
    PersonName,
    "name"
);

non_blank_text!(
    /// Free-text department label carried on an employee record.
    ///
    /// Not a reference to a `Department` aggregate.
    DepartmentLabel,
    "department"
);

non_blank_text!(
    /// Department name, the department's key inside a company.
    DepartmentName,
    "department name"
);

non_blank_text!(
    /// Project display name.
    ProjectName,
    "project name"
);

non_blank_text!(
    /// Company name.
    CompanyName,
    "company name"
);

non_blank_text!(
    /// One entry of a developer's tech stack.
    Skill,
    "tech_stack"
);
