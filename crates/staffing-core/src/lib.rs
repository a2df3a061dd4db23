//! Staffing-core - Employee, department, project and company consistency engine
//!
//! This crate provides:
//! - Validated employee variants with per-variant salary rules
//! - A type-tagged snapshot codec for employee records
//! - Department, project and company aggregates with their cross-aggregate rules
//! - JSON export/import of department rosters
//! - Layered configuration for import and export behaviour

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use config::{load_config, Config, ImportPolicy};
pub use domain::{
    Company, Department, Developer, Employee, EmployeeCore, EmployeeDirectory, EmployeeId,
    EmployeeKind, Manager, PlainEmployee, Project, ProjectId, ProjectStatus, RosterKey,
    Salesperson, Selection, SeniorityLevel, Snapshot, SnapshotCodec, StaffMember,
};
pub use error::{Entity, Error, ErrorKind, Result};
pub use storage::{DepartmentDocument, ImportReport, SkippedRecord};
