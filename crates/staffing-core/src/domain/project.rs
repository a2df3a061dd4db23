//! Project aggregate: a status-gated team roster.
//!
//! The team holds employee ids, never employee records. Salary and count
//! aggregates resolve ids through an [`EmployeeDirectory`]; ids it cannot
//! resolve are ignored.
//!
//! # Invariants
//!
//! 1. `id` never changes after construction
//! 2. No employee id appears twice on the team
//! 3. Members are added only while the status is planning or active
//! 4. Members can be removed in any status

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use strum::{Display as StrumDisplay, EnumString};
use tracing::debug;

use crate::{
    domain::{
        department::EmployeeDirectory,
        employee::{Employee, EmployeeKind, StaffMember},
        identifiers::{EmployeeId, ProjectId, ProjectName},
    },
    error::{Entity, Error, Result},
};

// ============================================================================
// STATUS
// ============================================================================

/// Project lifecycle status.
///
/// `planning -> active -> completed`, with `cancelled` reachable from
/// planning or active. `change_status` accepts any status; only team
/// additions are gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    /// # Errors
    ///
    /// Returns `Error::InvalidStatus` for anything outside the four statuses.
    pub fn parse(status: &str) -> Result<Self> {
        Self::from_str(status).map_err(|_| {
            Error::invalid_status(
                status,
                "must be one of planning, active, completed, cancelled",
            )
        })
    }

    /// Whether the team may grow in this status.
    #[must_use]
    pub const fn accepts_members(self) -> bool {
        matches!(self, Self::Planning | Self::Active)
    }
}

// ============================================================================
// PROJECT AGGREGATE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    id: ProjectId,
    name: ProjectName,
    description: String,
    deadline: DateTime<Utc>,
    status: ProjectStatus,
    team: Vec<EmployeeId>,
}

impl Project {
    /// Create a project with an empty team.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` if `id <= 0` or the name is blank.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
        status: ProjectStatus,
    ) -> Result<Self> {
        Ok(Self {
            id: ProjectId::new(id)?,
            name: ProjectName::parse(name)?,
            description: description.into(),
            deadline,
            status,
            team: Vec::new(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &ProjectName {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank name; the name is unchanged.
    pub fn rename(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = ProjectName::parse(name)?;
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_deadline(&mut self, deadline: DateTime<Utc>) {
        self.deadline = deadline;
    }

    pub fn change_status(&mut self, status: ProjectStatus) {
        debug!(project_id = %self.id, from = %self.status, to = %status, "project status changed");
        self.status = status;
    }

    // ========================================================================
    // TEAM
    // ========================================================================

    /// Put an employee on the team.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStatus` while completed or cancelled, and
    /// `Error::DuplicateId` if the id is already on the team.
    pub fn add_team_member(&mut self, id: EmployeeId) -> Result<()> {
        if !self.status.accepts_members() {
            return Err(Error::invalid_status(
                self.status.to_string(),
                format!("cannot add team members to a {} project", self.status),
            ));
        }
        if self.is_member(id) {
            return Err(Error::duplicate(Entity::Employee, id));
        }
        debug!(project_id = %self.id, employee_id = %id, "team member added");
        self.team.push(id);
        Ok(())
    }

    /// Take an employee off the team, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the id is not on the team.
    pub fn remove_team_member(&mut self, id: EmployeeId) -> Result<()> {
        if self.discard_member(id) {
            debug!(project_id = %self.id, employee_id = %id, "team member removed");
            Ok(())
        } else {
            Err(Error::not_found(Entity::Employee, id))
        }
    }

    /// Drop an id if present; reports whether it was.
    pub(crate) fn discard_member(&mut self, id: EmployeeId) -> bool {
        let before = self.team.len();
        self.team.retain(|member| *member != id);
        self.team.len() != before
    }

    #[must_use]
    pub fn is_member(&self, id: EmployeeId) -> bool {
        self.team.contains(&id)
    }

    /// Team ids in the order they joined.
    #[must_use]
    pub fn member_ids(&self) -> &[EmployeeId] {
        &self.team
    }

    #[must_use]
    pub fn team_size(&self) -> usize {
        self.team.len()
    }

    #[must_use]
    pub fn has_team(&self) -> bool {
        !self.team.is_empty()
    }

    // ========================================================================
    // RESOLVED VIEWS
    // ========================================================================

    /// A team member's record, if the id is on the team and resolves.
    #[must_use]
    pub fn find_member<'d>(
        &self,
        id: EmployeeId,
        directory: &'d impl EmployeeDirectory,
    ) -> Option<&'d Employee> {
        self.is_member(id)
            .then(|| directory.lookup(id))
            .flatten()
    }

    /// Team records that resolve, in team order.
    #[must_use]
    pub fn team<'d>(&self, directory: &'d impl EmployeeDirectory) -> Vec<&'d Employee> {
        self.team
            .iter()
            .filter_map(|&id| directory.lookup(id))
            .collect()
    }

    #[must_use]
    pub fn total_salary(&self, directory: &impl EmployeeDirectory) -> f64 {
        self.team(directory)
            .into_iter()
            .map(StaffMember::compute_salary)
            .sum()
    }

    #[must_use]
    pub fn counts_by_type(
        &self,
        directory: &impl EmployeeDirectory,
    ) -> BTreeMap<EmployeeKind, usize> {
        self.team(directory)
            .into_iter()
            .map(StaffMember::kind)
            .counts()
            .into_iter()
            .collect()
    }

    /// Multi-line summary with the team's resolved salary.
    #[must_use]
    pub fn describe(&self, directory: &impl EmployeeDirectory) -> String {
        format!(
            "Project #{}: {}\nDescription: {}\nDeadline: {}\n\
             Status: {}\nTeam: {} member(s)\nTeam salary: {:.2}",
            self.id,
            self.name,
            self.description,
            self.deadline.format("%d.%m.%Y"),
            self.status,
            self.team.len(),
            self.total_salary(directory)
        )
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Project: {} (status: {}, team: {})",
            self.name,
            self.status,
            self.team.len()
        )
    }
}
