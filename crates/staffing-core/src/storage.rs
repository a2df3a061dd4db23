//! Flat-file JSON persistence for department rosters.
//!
//! On-disk shape:
//!
//! ```json
//! { "name": "Engineering", "employees": [ { "type": "manager", ... } ] }
//! ```
//!
//! This module only moves documents between disk and memory. Decoding the
//! individual employee records, and deciding what to do when one is bad, is
//! the department's job.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Whole-roster record: department name plus one snapshot per employee.
///
/// Employee records stay untyped JSON here so that one bad record can be
/// skipped without rejecting the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentDocument {
    pub name: String,
    pub employees: Vec<Value>,
}

impl DepartmentDocument {
    /// Check the document-level shape of a parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` if the value is not an object, or if
    /// `name` is not a string or `employees` is not a list.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(Error::invalid_data(
                "department document",
                "must be a JSON object",
            ));
        };

        let name = match map.remove("name") {
            Some(Value::String(name)) => name,
            Some(_) => return Err(Error::invalid_data("name", "must be a string")),
            None => return Err(Error::invalid_data("name", "required field is missing")),
        };
        let employees = match map.remove("employees") {
            Some(Value::Array(records)) => records,
            Some(_) => return Err(Error::invalid_data("employees", "must be a list")),
            None => {
                return Err(Error::invalid_data(
                    "employees",
                    "required field is missing",
                ))
            }
        };

        Ok(Self { name, employees })
    }
}

/// One employee record an import left out.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Zero-based position in the `employees` list
    pub position: usize,
    /// The record's `type` tag, when it had a readable one
    pub tag: Option<String>,
    pub error: Error,
}

/// Outcome details of a partial import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl ImportReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Read and shape-check a department document.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read or is not valid JSON, and
/// `Error::InvalidData` if the top-level shape is wrong.
pub fn read_document(path: &Path) -> Result<DepartmentDocument> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| Error::io(path, e))?;
    DepartmentDocument::from_value(value)
}

/// Write a department document, replacing any existing file.
///
/// # Errors
///
/// Returns `Error::Io` if encoding or writing fails.
pub fn write_document(path: &Path, document: &DepartmentDocument, pretty: bool) -> Result<()> {
    let encoded = if pretty {
        serde_json::to_string_pretty(document)
    } else {
        serde_json::to_string(document)
    }
    .map_err(|e| Error::io(path, e))?;
    fs::write(path, encoded).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_name_is_invalid_data() {
        let result = DepartmentDocument::from_value(json!({ "employees": [] }));
        assert!(matches!(result, Err(Error::InvalidData { field, .. }) if field == "name"));
    }

    #[test]
    fn test_employees_must_be_a_list() {
        let result = DepartmentDocument::from_value(json!({ "name": "IT", "employees": {} }));
        assert!(matches!(result, Err(Error::InvalidData { field, .. }) if field == "employees"));
    }

    #[test]
    fn test_malformed_json_is_io() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").expect("write");
        assert!(matches!(read_document(&path), Err(Error::Io { .. })));
    }

    #[test]
    fn test_missing_file_is_io() {
        let dir = TempDir::new().expect("tempdir");
        let result = read_document(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_write_into_missing_directory_is_io() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("no-such-dir").join("out.json");
        let document = DepartmentDocument {
            name: "IT".to_string(),
            employees: Vec::new(),
        };
        let result = write_document(&path, &document, true);
        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_compact_and_pretty_read_back_equal() {
        let dir = TempDir::new().expect("tempdir");
        let document = DepartmentDocument {
            name: "IT".to_string(),
            employees: vec![json!({ "type": "employee", "id": 1 })],
        };

        let pretty = dir.path().join("pretty.json");
        let compact = dir.path().join("compact.json");
        write_document(&pretty, &document, true).expect("write pretty");
        write_document(&compact, &document, false).expect("write compact");

        let compact_text = fs::read_to_string(&compact).expect("read");
        assert!(!compact_text.contains('\n'));
        assert_eq!(read_document(&pretty).expect("read"), document);
        assert_eq!(read_document(&compact).expect("read"), document);
    }
}
