//! Department aggregate: an ordered, id-unique roster of employees.
//!
//! # Invariants
//!
//! 1. No two members share an id
//! 2. Members keep insertion order
//! 3. A failed add leaves the roster unchanged
//!
//! Lookups (`find`, `find_mut`) return `Option`; actions on a missing id
//! (`remove`) fail with `NotFound`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

use std::{
    collections::BTreeMap,
    fmt,
    ops::{Bound, RangeBounds},
    path::Path,
    str::FromStr,
};

use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    config::{ExportConfig, ImportConfig, ImportPolicy},
    domain::{
        employee::{Employee, EmployeeKind, StaffMember},
        identifiers::{DepartmentName, EmployeeId},
        snapshot::Snapshot,
    },
    error::{Entity, Error, Result},
    storage::{self, DepartmentDocument, ImportReport, SkippedRecord},
};

// ============================================================================
// EMPLOYEE DIRECTORY
// ============================================================================

/// Read access to an authoritative employee store.
///
/// Project teams hold ids only and resolve them through a directory.
pub trait EmployeeDirectory {
    fn lookup(&self, id: EmployeeId) -> Option<&Employee>;
}

// ============================================================================
// ROSTER KEYS
// ============================================================================

/// Positional key into a roster: one position or a contiguous range.
///
/// Parsed from text: `"3"`, `"-1"`, `"1..3"`, `"..2"`, `"2.."`, `".."`.
/// Negative positions count from the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterKey {
    Index(isize),
    Range {
        start: Option<isize>,
        end: Option<isize>,
    },
}

impl FromStr for RosterKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        let bound = |part: &str| -> Result<Option<isize>> {
            if part.is_empty() {
                return Ok(None);
            }
            part.parse()
                .map(Some)
                .map_err(|_| Error::TypeKind(s.to_string()))
        };

        match text.split_once("..") {
            Some((start, end)) => Ok(Self::Range {
                start: bound(start)?,
                end: bound(end)?,
            }),
            None => text
                .parse()
                .map(Self::Index)
                .map_err(|_| Error::TypeKind(s.to_string())),
        }
    }
}

/// Result of [`Department::select`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    One(&'a Employee),
    Many(&'a [Employee]),
}

/// Resolve a possibly negative bound against `len`, clamped to `[0, len]`.
fn clamp_bound(bound: isize, len: usize) -> usize {
    let len_signed = isize::try_from(len).unwrap_or(isize::MAX);
    let resolved = if bound < 0 {
        bound.saturating_add(len_signed)
    } else {
        bound
    };
    usize::try_from(resolved.clamp(0, len_signed)).unwrap_or(0)
}

// ============================================================================
// DEPARTMENT AGGREGATE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    name: DepartmentName,
    employees: Vec<Employee>,
}

impl Department {
    /// Create an empty department.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: DepartmentName::parse(name)?,
            employees: Vec::new(),
        })
    }

    #[must_use]
    pub const fn name(&self) -> &DepartmentName {
        &self.name
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank name; the name is unchanged.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = DepartmentName::parse(name)?;
        Ok(())
    }

    // ========================================================================
    // ROSTER MUTATION
    // ========================================================================

    /// Append an employee.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateId` if the id is already on the roster.
    pub fn add(&mut self, employee: Employee) -> Result<()> {
        let id = employee.id();
        if self.contains_id(id) {
            return Err(Error::duplicate(Entity::Employee, id));
        }
        debug!(department = %self.name, employee_id = %id, "employee added");
        self.employees.push(employee);
        Ok(())
    }

    /// Remove and return the employee with this id.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no member has the id.
    pub fn remove(&mut self, id: EmployeeId) -> Result<Employee> {
        let position = self
            .employees
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| Error::not_found(Entity::Employee, id))?;
        debug!(department = %self.name, employee_id = %id, "employee removed");
        Ok(self.employees.remove(position))
    }

    // ========================================================================
    // LOOKUP
    // ========================================================================

    #[must_use]
    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    pub fn find_mut(&mut self, id: EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id() == id)
    }

    #[must_use]
    pub fn contains_id(&self, id: EmployeeId) -> bool {
        self.find(id).is_some()
    }

    /// Membership by id, whatever the variant.
    #[must_use]
    pub fn contains(&self, employee: &Employee) -> bool {
        self.contains_id(employee.id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    #[must_use]
    pub fn has_employees(&self) -> bool {
        !self.is_empty()
    }

    /// Member ids in roster order.
    #[must_use]
    pub fn employee_ids(&self) -> Vec<EmployeeId> {
        self.employees.iter().map(StaffMember::id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Employee> {
        self.employees.iter()
    }

    /// Mutable iteration; ids cannot change through it.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Employee> {
        self.employees.iter_mut()
    }

    // ========================================================================
    // STATISTICS
    // ========================================================================

    /// Sum of computed salaries; `0.0` when empty.
    #[must_use]
    pub fn total_salary(&self) -> f64 {
        self.employees.iter().map(StaffMember::compute_salary).sum()
    }

    /// Member count per variant; variants with no members are absent.
    #[must_use]
    pub fn counts_by_type(&self) -> BTreeMap<EmployeeKind, usize> {
        self.employees
            .iter()
            .map(StaffMember::kind)
            .counts()
            .into_iter()
            .collect()
    }

    // ========================================================================
    // POSITIONAL ACCESS
    // ========================================================================

    /// Member at a position; negative positions count from the end.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` past either end.
    pub fn get(&self, index: isize) -> Result<&Employee> {
        let len = self.employees.len();
        let resolved = if index < 0 {
            isize::try_from(len).ok().map(|n| n + index)
        } else {
            Some(index)
        };
        resolved
            .and_then(|i| usize::try_from(i).ok())
            .and_then(|i| self.employees.get(i))
            .ok_or(Error::OutOfRange { index, len })
    }

    /// Contiguous run of members. Bounds may be negative and are clamped,
    /// so an empty or inverted range yields an empty slice.
    #[must_use]
    pub fn slice(&self, range: impl RangeBounds<isize>) -> &[Employee] {
        let start = match range.start_bound() {
            Bound::Included(&s) => Some(s),
            Bound::Excluded(&s) => Some(s.saturating_add(1)),
            Bound::Unbounded => None,
        };
        let end = match range.end_bound() {
            Bound::Included(&e) => Some(e.saturating_add(1)),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => None,
        };
        self.slice_bounds(start, end)
    }

    fn slice_bounds(&self, start: Option<isize>, end: Option<isize>) -> &[Employee] {
        let len = self.employees.len();
        let start = start.map_or(0, |s| clamp_bound(s, len));
        let end = end.map_or(len, |e| clamp_bound(e, len));
        self.employees.get(start..end).unwrap_or_default()
    }

    /// Access by a parsed [`RosterKey`].
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfRange` for a single position past either end.
    pub fn select(&self, key: RosterKey) -> Result<Selection<'_>> {
        match key {
            RosterKey::Index(index) => self.get(index).map(Selection::One),
            RosterKey::Range { start, end } => Ok(Selection::Many(self.slice_bounds(start, end))),
        }
    }

    /// Parse a textual key and select with it.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeKind` if the key is neither an integer nor a range,
    /// and `Error::OutOfRange` as for [`Department::get`].
    pub fn select_str(&self, key: &str) -> Result<Selection<'_>> {
        self.select(key.parse()?)
    }

    // ========================================================================
    // PERSISTENCE
    // ========================================================================

    /// In-memory form of the persisted record.
    #[must_use]
    pub fn to_document(&self) -> DepartmentDocument {
        DepartmentDocument {
            name: self.name.to_string(),
            employees: self
                .employees
                .iter()
                .map(|e| e.to_snapshot().into_value())
                .collect(),
        }
    }

    /// Rebuild a department, applying `config.policy` to records that fail.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank name. Under
    /// `ImportPolicy::FailFast` the first bad record's error is returned.
    pub fn from_document(
        document: DepartmentDocument,
        config: &ImportConfig,
    ) -> Result<(Self, ImportReport)> {
        let mut department = Self::new(document.name)?;
        let mut report = ImportReport::default();

        for (position, record) in document.employees.into_iter().enumerate() {
            let tag = record
                .get("type")
                .and_then(Value::as_str)
                .map(String::from);
            let loaded = Snapshot::try_from(record)
                .and_then(|snapshot| Employee::from_snapshot(&snapshot))
                .and_then(|employee| department.add(employee));

            if let Err(error) = loaded {
                match config.policy {
                    ImportPolicy::FailFast => return Err(error),
                    ImportPolicy::Warn if config.log_skipped => {
                        warn!(
                            department = %department.name,
                            position,
                            tag = tag.as_deref().unwrap_or("<none>"),
                            %error,
                            "skipping employee record"
                        );
                    }
                    ImportPolicy::Warn | ImportPolicy::Silent => {
                        debug!(position, %error, "skipping employee record");
                    }
                }
                report.skipped.push(SkippedRecord {
                    position,
                    tag,
                    error,
                });
            }
        }

        report.loaded = department.len();
        Ok((department, report))
    }

    /// Write the roster to `path` with default export settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be written.
    pub fn export(&self, path: &Path) -> Result<()> {
        self.export_with(path, &ExportConfig::default())
    }

    /// # Errors
    ///
    /// Returns `Error::Io` if the file cannot be written.
    pub fn export_with(&self, path: &Path, config: &ExportConfig) -> Result<()> {
        storage::write_document(path, &self.to_document(), config.pretty)?;
        info!(
            department = %self.name,
            employees = self.len(),
            path = %path.display(),
            "department exported"
        );
        Ok(())
    }

    /// Load a roster from `path` with default import settings, skipping bad
    /// records with a warning.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` for unreadable or malformed files and
    /// `Error::InvalidData` if `name` or `employees` is missing.
    pub fn import(path: &Path) -> Result<(Self, ImportReport)> {
        Self::import_with(path, &ImportConfig::default())
    }

    /// # Errors
    ///
    /// As [`Department::import`]; additionally the first record error under
    /// `ImportPolicy::FailFast`.
    pub fn import_with(path: &Path, config: &ImportConfig) -> Result<(Self, ImportReport)> {
        let document = storage::read_document(path)?;
        let (department, report) = Self::from_document(document, config)?;
        info!(
            department = %department.name,
            loaded = report.loaded,
            skipped = report.skipped.len(),
            path = %path.display(),
            "department imported"
        );
        Ok((department, report))
    }
}

impl EmployeeDirectory for Department {
    fn lookup(&self, id: EmployeeId) -> Option<&Employee> {
        self.find(id)
    }
}

impl<'a> IntoIterator for &'a Department {
    type Item = &'a Employee;
    type IntoIter = std::slice::Iter<'a, Employee>;

    fn into_iter(self) -> Self::IntoIter {
        self.employees.iter()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Department '{}' ({} employee(s), total salary: {:.2})",
            self.name,
            self.len(),
            self.total_salary()
        )
    }
}
