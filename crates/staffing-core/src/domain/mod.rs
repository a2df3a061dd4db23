//! # Domain Layer
//!
//! Employee records, the aggregates that own them, and the codec that moves
//! records in and out of tagged snapshots.
//!
//! ## Module Structure
//!
//! ### Core Types (`identifiers`, `money`)
//!
//! Semantic newtypes that validate on construction:
//! - [`EmployeeId`] / [`ProjectId`] - positive integer identities
//! - [`PersonName`], [`DepartmentName`], [`ProjectName`], ... - non-blank text
//! - [`Salary`], [`Amount`], [`CommissionRate`] - monetary values
//!
//! ### Employees (`employee`, `snapshot`)
//!
//! - [`Employee`] - closed sum over the four variants
//! - [`StaffMember`] - capability shared by every variant
//! - [`Snapshot`] / [`SnapshotCodec`] - tagged record round trip
//!
//! ### Aggregate Roots (`department`, `project`, `company`)
//!
//! - [`Department`] - id-unique employee roster
//! - [`Project`] - status-gated team of employee ids
//! - [`Company`] - cross-aggregate consistency rules

pub mod company;
pub mod department;
pub mod employee;
pub mod identifiers;
pub mod money;
pub mod project;
pub mod snapshot;

pub use company::Company;
pub use department::{Department, EmployeeDirectory, RosterKey, Selection};
pub use employee::{
    Developer, Employee, EmployeeCore, EmployeeKind, Manager, PlainEmployee, Salesperson,
    SeniorityLevel, StaffMember,
};
pub use identifiers::{
    CompanyName, DepartmentLabel, DepartmentName, EmployeeId, PersonName, ProjectId, ProjectName,
    Skill,
};
pub use money::{Amount, CommissionRate, Salary};
pub use project::{Project, ProjectStatus};
pub use snapshot::{required_keys, Snapshot, SnapshotCodec};
