//! Company aggregate root: departments, projects, and the rules that span them.
//!
//! # Invariants
//!
//! 1. Department names are unique
//! 2. Project ids are unique
//! 3. An employee id belongs to at most one department
//! 4. Every id on a project team belongs to some department
//! 5. A department or project with members is deleted only when forced
//! 6. An employee on any project team is never transferred, and is removed
//!    only when forced
//!
//! Departments and projects are reachable read-only. Every change that could
//! break an invariant goes through a method here.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

use std::fmt;

use tracing::debug;

use crate::{
    domain::{
        department::{Department, EmployeeDirectory},
        employee::{Employee, StaffMember},
        identifiers::{CompanyName, EmployeeId, ProjectId},
        project::{Project, ProjectStatus},
    },
    error::{Entity, Error, Result},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Company {
    name: CompanyName,
    departments: Vec<Department>,
    projects: Vec<Project>,
}

impl Company {
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank name.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: CompanyName::parse(name)?,
            departments: Vec::new(),
            projects: Vec::new(),
        })
    }

    #[must_use]
    pub const fn name(&self) -> &CompanyName {
        &self.name
    }

    // ========================================================================
    // DEPARTMENTS
    // ========================================================================

    /// # Errors
    ///
    /// Returns `Error::DuplicateId` if the name is taken or any member id is
    /// already employed in another department.
    pub fn add_department(&mut self, department: Department) -> Result<()> {
        if self.department(department.name().as_str()).is_some() {
            return Err(Error::duplicate(Entity::Department, department.name()));
        }
        if let Some(id) = department
            .employee_ids()
            .into_iter()
            .find(|&id| self.employee(id).is_some())
        {
            return Err(Error::duplicate(Entity::Employee, id));
        }
        debug!(company = %self.name, department = %department.name(), "department added");
        self.departments.push(department);
        Ok(())
    }

    /// Remove a department. Without `force`, a department with members is
    /// kept. Forced removal also takes its members off every project team.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no department has the name and
    /// `Error::PreconditionFailed` if it has members and `force` is false.
    pub fn remove_department(&mut self, name: &str, force: bool) -> Result<Department> {
        let index = self.department_index(name)?;
        if self.departments[index].has_employees() && !force {
            return Err(Error::precondition(format!(
                "department '{name}' still has employees; force the removal or transfer them first"
            )));
        }
        let department = self.departments.remove(index);
        for id in department.employee_ids() {
            self.scrub_from_projects(id);
        }
        debug!(company = %self.name, department = %name, force, "department removed");
        Ok(department)
    }

    #[must_use]
    pub fn department(&self, name: &str) -> Option<&Department> {
        self.departments.iter().find(|d| d.name() == name)
    }

    #[must_use]
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    fn department_index(&self, name: &str) -> Result<usize> {
        self.departments
            .iter()
            .position(|d| d.name() == name)
            .ok_or_else(|| Error::not_found(Entity::Department, name))
    }

    // ========================================================================
    // EMPLOYEES
    // ========================================================================

    /// Hire into a department.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` for an unknown department and
    /// `Error::DuplicateId` if the id is employed anywhere in the company.
    pub fn add_employee(&mut self, department: &str, employee: Employee) -> Result<()> {
        let index = self.department_index(department)?;
        let id = employee.id();
        if self.employee(id).is_some() {
            return Err(Error::duplicate(Entity::Employee, id));
        }
        self.departments[index].add(employee)
    }

    /// Remove an employee from the company. Without `force`, an employee on
    /// any project team is kept; forced removal also clears their
    /// project memberships.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no department employs the id and
    /// `Error::PreconditionFailed` if the employee is on a project and
    /// `force` is false.
    pub fn remove_employee(&mut self, id: EmployeeId, force: bool) -> Result<Employee> {
        let index = self
            .departments
            .iter()
            .position(|d| d.contains_id(id))
            .ok_or_else(|| Error::not_found(Entity::Employee, id))?;
        if self.is_on_any_project(id) && !force {
            return Err(Error::precondition(format!(
                "employee {id} is on a project team; force the removal or unassign them first"
            )));
        }
        self.scrub_from_projects(id);
        self.departments[index].remove(id)
    }

    /// Move an employee between departments.
    ///
    /// Either the employee ends up in `to` only, or nothing changes.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` if either department is missing or the employee is
    ///   not in `from`
    /// - `Error::PreconditionFailed` if the employee is on any project team,
    ///   or `from` and `to` are the same department
    /// - `Error::DuplicateId` if `to` already has the id
    pub fn transfer_employee(&mut self, id: EmployeeId, from: &str, to: &str) -> Result<()> {
        let source = self.department_index(from)?;
        let target = self.department_index(to)?;
        if !self.departments[source].contains_id(id) {
            return Err(Error::not_found(Entity::Employee, id));
        }
        if source == target {
            return Err(Error::precondition(format!(
                "employee {id} is already in department '{from}'"
            )));
        }
        if self.is_on_any_project(id) {
            return Err(Error::precondition(format!(
                "employee {id} is on a project team; unassign them before transferring"
            )));
        }
        if self.departments[target].contains_id(id) {
            return Err(Error::duplicate(Entity::Employee, id));
        }

        let employee = self.departments[source].remove(id)?;
        self.departments[target].add(employee)?;
        debug!(employee_id = %id, from, to, "employee transferred");
        Ok(())
    }

    /// Look an employee up across all departments.
    #[must_use]
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.departments.iter().find_map(|d| d.find(id))
    }

    /// Mutable access for validated in-place changes.
    pub fn employee_mut(&mut self, id: EmployeeId) -> Option<&mut Employee> {
        self.departments.iter_mut().find_map(|d| d.find_mut(id))
    }

    /// Every employee, department by department.
    #[must_use]
    pub fn all_employees(&self) -> Vec<&Employee> {
        self.departments.iter().flat_map(Department::iter).collect()
    }

    #[must_use]
    pub fn employee_count(&self) -> usize {
        self.departments.iter().map(Department::len).sum()
    }

    /// Sum of every department's salary total.
    #[must_use]
    pub fn total_monthly_cost(&self) -> f64 {
        self.departments.iter().map(Department::total_salary).sum()
    }

    // ========================================================================
    // PROJECTS
    // ========================================================================

    /// # Errors
    ///
    /// Returns `Error::DuplicateId` if the project id is taken and
    /// `Error::NotFound` if its team names an id no department employs.
    pub fn add_project(&mut self, project: Project) -> Result<()> {
        if self.project(project.id()).is_some() {
            return Err(Error::duplicate(Entity::Project, project.id()));
        }
        if let Some(&id) = project
            .member_ids()
            .iter()
            .find(|&&id| self.employee(id).is_none())
        {
            return Err(Error::not_found(Entity::Employee, id));
        }
        debug!(company = %self.name, project_id = %project.id(), "project added");
        self.projects.push(project);
        Ok(())
    }

    /// Remove a project. Without `force`, a project with a team is kept.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if no project has the id and
    /// `Error::PreconditionFailed` if it has a team and `force` is false.
    pub fn remove_project(&mut self, id: ProjectId, force: bool) -> Result<Project> {
        let index = self.project_index(id)?;
        if self.projects[index].has_team() && !force {
            return Err(Error::precondition(format!(
                "project {id} still has a team; force the removal or unassign its members first"
            )));
        }
        debug!(company = %self.name, project_id = %id, force, "project removed");
        Ok(self.projects.remove(index))
    }

    #[must_use]
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| p.id() == id)
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn projects_by_status(&self, status: ProjectStatus) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.status() == status).collect()
    }

    /// # Errors
    ///
    /// Returns `Error::NotFound` if no project has the id.
    pub fn change_project_status(&mut self, id: ProjectId, status: ProjectStatus) -> Result<()> {
        let index = self.project_index(id)?;
        self.projects[index].change_status(status);
        Ok(())
    }

    /// Put an employee on a project team.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the project or employee does not exist,
    /// otherwise whatever the project's own gate returns.
    pub fn assign_to_project(&mut self, project: ProjectId, employee: EmployeeId) -> Result<()> {
        let index = self.project_index(project)?;
        if self.employee(employee).is_none() {
            return Err(Error::not_found(Entity::Employee, employee));
        }
        self.projects[index].add_team_member(employee)
    }

    /// # Errors
    ///
    /// Returns `Error::NotFound` if the project does not exist or the
    /// employee is not on its team.
    pub fn unassign_from_project(
        &mut self,
        project: ProjectId,
        employee: EmployeeId,
    ) -> Result<()> {
        let index = self.project_index(project)?;
        self.projects[index].remove_team_member(employee)
    }

    /// Projects whose team includes the employee.
    #[must_use]
    pub fn employee_projects(&self, id: EmployeeId) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.is_member(id)).collect()
    }

    #[must_use]
    pub fn is_on_any_project(&self, id: EmployeeId) -> bool {
        self.projects.iter().any(|p| p.is_member(id))
    }

    /// Take an employee off every team; returns how many projects changed.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` if the employee was on no project.
    pub fn remove_employee_from_all_projects(&mut self, id: EmployeeId) -> Result<usize> {
        match self.scrub_from_projects(id) {
            0 => Err(Error::not_found(Entity::Employee, id)),
            removed => Ok(removed),
        }
    }

    fn scrub_from_projects(&mut self, id: EmployeeId) -> usize {
        self.projects
            .iter_mut()
            .map(|p| p.discard_member(id))
            .filter(|&removed| removed)
            .count()
    }

    fn project_index(&self, id: ProjectId) -> Result<usize> {
        self.projects
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| Error::not_found(Entity::Project, id))
    }

    /// Multi-line summary of the company.
    #[must_use]
    pub fn describe(&self) -> String {
        format!(
            "Company: {}\nDepartments: {}\nEmployees: {}\nProjects: {}\nMonthly cost: {:.2}",
            self.name,
            self.departments.len(),
            self.employee_count(),
            self.projects.len(),
            self.total_monthly_cost()
        )
    }
}

impl EmployeeDirectory for Company {
    fn lookup(&self, id: EmployeeId) -> Option<&Employee> {
        self.employee(id)
    }
}

impl fmt::Display for Company {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Company: {} (departments: {}, employees: {})",
            self.name,
            self.departments.len(),
            self.employee_count()
        )
    }
}
