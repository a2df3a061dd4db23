//! Employee records: a closed set of variants sharing one capability trait.
//!
//! ```text
//! Employee ─┬─ Plain(PlainEmployee)      salary = base
//!           ├─ Manager(Manager)          salary = base + bonus
//!           ├─ Developer(Developer)      salary = base × coefficient(level)
//!           └─ Salesperson(Salesperson)  salary = base + volume × rate
//! ```
//!
//! # Invariants
//!
//! 1. Base fields are validated in order: id, name, department, base salary;
//!    variant fields are validated after them
//! 2. Every mutator runs the construction validation first and leaves the
//!    record untouched when it fails
//! 3. `id` never changes after construction
//! 4. A developer's tech stack holds no duplicates and keeps insertion order
//! 5. A salesperson's sales volume never decreases
//!
//! Equality compares `id` only; ordering compares computed salary.

#![forbid(unsafe_code)]

use std::{cmp::Ordering, fmt, ops::Add, str::FromStr};

use strum::{Display as StrumDisplay, EnumString};

use crate::{
    domain::{
        identifiers::{DepartmentLabel, EmployeeId, PersonName, Skill},
        money::{Amount, CommissionRate, Salary},
    },
    error::{Error, Result},
};

// ============================================================================
// KINDS AND LEVELS
// ============================================================================

/// Variant tag. The lowercase form is the snapshot `type` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EmployeeKind {
    #[strum(serialize = "employee")]
    Plain,
    Manager,
    Developer,
    Salesperson,
}

impl EmployeeKind {
    /// Parse a snapshot `type` tag.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for unknown tags.
    pub fn parse(tag: &str) -> Result<Self> {
        Self::from_str(tag).map_err(|_| {
            Error::invalid_data(
                "type",
                format!("unknown type '{tag}', expected employee|manager|developer|salesperson"),
            )
        })
    }
}

/// Developer seniority, which selects the salary coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SeniorityLevel {
    Junior,
    Middle,
    Senior,
}

impl SeniorityLevel {
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for anything but junior, middle or senior.
    pub fn parse(level: &str) -> Result<Self> {
        Self::from_str(level).map_err(|_| {
            Error::invalid_data(
                "seniority_level",
                format!("unknown level '{level}', expected junior|middle|senior"),
            )
        })
    }

    #[must_use]
    pub const fn coefficient(self) -> f64 {
        match self {
            Self::Junior => 1.0,
            Self::Middle => 1.5,
            Self::Senior => 2.0,
        }
    }
}

// ============================================================================
// SHARED CAPABILITY
// ============================================================================

/// Contract every employee variant fulfils.
pub trait StaffMember: fmt::Display {
    fn core(&self) -> &EmployeeCore;

    fn kind(&self) -> EmployeeKind;

    /// Pure function of current state; never fails for a constructed record.
    fn compute_salary(&self) -> f64;

    fn id(&self) -> EmployeeId {
        self.core().id()
    }

    /// One-line description including the computed salary.
    fn describe(&self) -> String {
        format!("{self}, computed salary: {:.2}", self.compute_salary())
    }
}

// ============================================================================
// BASE FIELDS
// ============================================================================

/// Fields every variant carries.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeCore {
    id: EmployeeId,
    name: PersonName,
    department: DepartmentLabel,
    base_salary: Salary,
}

impl EmployeeCore {
    /// Validate and assemble the base fields.
    ///
    /// # Errors
    ///
    /// Returns the first failure in the order id, name, department, base salary.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        department: impl Into<String>,
        base_salary: f64,
    ) -> Result<Self> {
        let id = EmployeeId::new(id)?;
        let name = PersonName::parse(name)?;
        let department = DepartmentLabel::parse(department)?;
        let base_salary = Salary::new(base_salary)?;
        Ok(Self {
            id,
            name,
            department,
            base_salary,
        })
    }

    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    #[must_use]
    pub const fn department(&self) -> &DepartmentLabel {
        &self.department
    }

    #[must_use]
    pub const fn base_salary(&self) -> f64 {
        self.base_salary.get()
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank name; the name is unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.name = PersonName::parse(name)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank label; the label is unchanged.
    pub fn set_department(&mut self, department: impl Into<String>) -> Result<()> {
        self.department = DepartmentLabel::parse(department)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `Error::Financial` unless `base_salary > 0`; the salary is unchanged.
    pub fn set_base_salary(&mut self, base_salary: f64) -> Result<()> {
        self.base_salary = Salary::new(base_salary)?;
        Ok(())
    }
}

impl fmt::Display for EmployeeCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, name: {}, department: {}, base salary: {}",
            self.id, self.name, self.department, self.base_salary
        )
    }
}

// ============================================================================
// VARIANTS
// ============================================================================

/// Employee paid exactly the base salary.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainEmployee {
    core: EmployeeCore,
}

impl PlainEmployee {
    #[must_use]
    pub const fn new(core: EmployeeCore) -> Self {
        Self { core }
    }
}

impl StaffMember for PlainEmployee {
    fn core(&self) -> &EmployeeCore {
        &self.core
    }

    fn kind(&self) -> EmployeeKind {
        EmployeeKind::Plain
    }

    fn compute_salary(&self) -> f64 {
        self.core.base_salary()
    }
}

impl fmt::Display for PlainEmployee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Employee [{}]", self.core)
    }
}

/// Employee paid base salary plus a fixed bonus.
#[derive(Debug, Clone, PartialEq)]
pub struct Manager {
    core: EmployeeCore,
    bonus: Amount,
}

impl Manager {
    /// # Errors
    ///
    /// Returns `Error::Financial` if `bonus < 0`.
    pub fn new(core: EmployeeCore, bonus: f64) -> Result<Self> {
        let bonus = Amount::new("bonus", bonus)?;
        Ok(Self { core, bonus })
    }

    #[must_use]
    pub const fn bonus(&self) -> f64 {
        self.bonus.get()
    }

    /// # Errors
    ///
    /// Returns `Error::Financial` if `bonus < 0`; the bonus is unchanged.
    pub fn set_bonus(&mut self, bonus: f64) -> Result<()> {
        self.bonus = Amount::new("bonus", bonus)?;
        Ok(())
    }
}

impl StaffMember for Manager {
    fn core(&self) -> &EmployeeCore {
        &self.core
    }

    fn kind(&self) -> EmployeeKind {
        EmployeeKind::Manager
    }

    fn compute_salary(&self) -> f64 {
        self.core.base_salary() + self.bonus.get()
    }
}

impl fmt::Display for Manager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Manager [{}, bonus: {}]", self.core, self.bonus)
    }
}

/// Employee whose base salary is scaled by seniority.
#[derive(Debug, Clone, PartialEq)]
pub struct Developer {
    core: EmployeeCore,
    tech_stack: Vec<Skill>,
    seniority_level: SeniorityLevel,
}

impl Developer {
    /// Build a developer with its own skill list; repeated skills collapse
    /// into their first occurrence.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` if any skill is blank.
    pub fn new<S: Into<String>>(
        core: EmployeeCore,
        tech_stack: impl IntoIterator<Item = S>,
        seniority_level: SeniorityLevel,
    ) -> Result<Self> {
        let parsed = tech_stack
            .into_iter()
            .map(Skill::parse)
            .collect::<Result<Vec<_>>>()?;
        let mut developer = Self {
            core,
            tech_stack: Vec::with_capacity(parsed.len()),
            seniority_level,
        };
        parsed.into_iter().for_each(|skill| {
            developer.push_unique(skill);
        });
        Ok(developer)
    }

    #[must_use]
    pub fn tech_stack(&self) -> &[Skill] {
        &self.tech_stack
    }

    #[must_use]
    pub const fn seniority_level(&self) -> SeniorityLevel {
        self.seniority_level
    }

    #[must_use]
    pub fn has_skill(&self, skill: &str) -> bool {
        self.tech_stack.iter().any(|s| s == skill)
    }

    /// Add a skill. Re-adding a known skill is a no-op and returns `false`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank skill.
    pub fn add_skill(&mut self, skill: impl Into<String>) -> Result<bool> {
        let skill = Skill::parse(skill)?;
        Ok(self.push_unique(skill))
    }

    pub fn set_seniority_level(&mut self, level: SeniorityLevel) {
        self.seniority_level = level;
    }

    fn push_unique(&mut self, skill: Skill) -> bool {
        if self.tech_stack.contains(&skill) {
            return false;
        }
        self.tech_stack.push(skill);
        true
    }
}

impl StaffMember for Developer {
    fn core(&self) -> &EmployeeCore {
        &self.core
    }

    fn kind(&self) -> EmployeeKind {
        EmployeeKind::Developer
    }

    fn compute_salary(&self) -> f64 {
        self.core.base_salary() * self.seniority_level.coefficient()
    }
}

impl fmt::Display for Developer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack = self
            .tech_stack
            .iter()
            .map(Skill::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Developer [{}, level: {}, stack: [{stack}]]",
            self.core, self.seniority_level
        )
    }
}

/// Employee paid base salary plus commission on recorded sales.
#[derive(Debug, Clone, PartialEq)]
pub struct Salesperson {
    core: EmployeeCore,
    commission_rate: CommissionRate,
    sales_volume: Amount,
}

impl Salesperson {
    /// # Errors
    ///
    /// Returns `Error::Financial` if the rate is outside `[0, 1]` or the
    /// volume is negative.
    pub fn new(core: EmployeeCore, commission_rate: f64, sales_volume: f64) -> Result<Self> {
        let commission_rate = CommissionRate::new(commission_rate)?;
        let sales_volume = Amount::new("sales_volume", sales_volume)?;
        Ok(Self {
            core,
            commission_rate,
            sales_volume,
        })
    }

    #[must_use]
    pub const fn commission_rate(&self) -> f64 {
        self.commission_rate.get()
    }

    #[must_use]
    pub const fn sales_volume(&self) -> f64 {
        self.sales_volume.get()
    }

    /// # Errors
    ///
    /// Returns `Error::Financial` if the rate is outside `[0, 1]`; the rate is unchanged.
    pub fn set_commission_rate(&mut self, commission_rate: f64) -> Result<()> {
        self.commission_rate = CommissionRate::new(commission_rate)?;
        Ok(())
    }

    /// Add a sale to the cumulative volume.
    ///
    /// # Errors
    ///
    /// Returns `Error::Financial` if `amount < 0` or the new total is not
    /// finite; the volume is unchanged.
    pub fn record_sale(&mut self, amount: f64) -> Result<()> {
        let amount = Amount::new("sale amount", amount)?;
        self.sales_volume = Amount::new("sales_volume", self.sales_volume.get() + amount.get())?;
        Ok(())
    }
}

impl StaffMember for Salesperson {
    fn core(&self) -> &EmployeeCore {
        &self.core
    }

    fn kind(&self) -> EmployeeKind {
        EmployeeKind::Salesperson
    }

    fn compute_salary(&self) -> f64 {
        self.core.base_salary() + self.sales_volume.get() * self.commission_rate.get()
    }
}

impl fmt::Display for Salesperson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Salesperson [{}, commission rate: {}, sales volume: {}]",
            self.core, self.commission_rate, self.sales_volume
        )
    }
}

// ============================================================================
// SUM TYPE
// ============================================================================

/// Any employee variant.
#[derive(Debug, Clone)]
pub enum Employee {
    Plain(PlainEmployee),
    Manager(Manager),
    Developer(Developer),
    Salesperson(Salesperson),
}

impl Employee {
    fn member(&self) -> &dyn StaffMember {
        match self {
            Self::Plain(e) => e,
            Self::Manager(e) => e,
            Self::Developer(e) => e,
            Self::Salesperson(e) => e,
        }
    }

    fn core_mut(&mut self) -> &mut EmployeeCore {
        match self {
            Self::Plain(e) => &mut e.core,
            Self::Manager(e) => &mut e.core,
            Self::Developer(e) => &mut e.core,
            Self::Salesperson(e) => &mut e.core,
        }
    }

    #[must_use]
    pub fn name(&self) -> &PersonName {
        self.core().name()
    }

    #[must_use]
    pub fn department(&self) -> &DepartmentLabel {
        self.core().department()
    }

    #[must_use]
    pub fn base_salary(&self) -> f64 {
        self.core().base_salary()
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank name.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<()> {
        self.core_mut().set_name(name)
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidData` for a blank label.
    pub fn set_department(&mut self, department: impl Into<String>) -> Result<()> {
        self.core_mut().set_department(department)
    }

    /// # Errors
    ///
    /// Returns `Error::Financial` unless `base_salary > 0`.
    pub fn set_base_salary(&mut self, base_salary: f64) -> Result<()> {
        self.core_mut().set_base_salary(base_salary)
    }

    #[must_use]
    pub const fn as_manager(&self) -> Option<&Manager> {
        match self {
            Self::Manager(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_manager_mut(&mut self) -> Option<&mut Manager> {
        match self {
            Self::Manager(m) => Some(m),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_developer(&self) -> Option<&Developer> {
        match self {
            Self::Developer(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_developer_mut(&mut self) -> Option<&mut Developer> {
        match self {
            Self::Developer(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_salesperson(&self) -> Option<&Salesperson> {
        match self {
            Self::Salesperson(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_salesperson_mut(&mut self) -> Option<&mut Salesperson> {
        match self {
            Self::Salesperson(s) => Some(s),
            _ => None,
        }
    }
}

impl StaffMember for Employee {
    fn core(&self) -> &EmployeeCore {
        self.member().core()
    }

    fn kind(&self) -> EmployeeKind {
        self.member().kind()
    }

    fn compute_salary(&self) -> f64 {
        self.member().compute_salary()
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.member(), f)
    }
}

impl From<PlainEmployee> for Employee {
    fn from(e: PlainEmployee) -> Self {
        Self::Plain(e)
    }
}

impl From<Manager> for Employee {
    fn from(e: Manager) -> Self {
        Self::Manager(e)
    }
}

impl From<Developer> for Employee {
    fn from(e: Developer) -> Self {
        Self::Developer(e)
    }
}

impl From<Salesperson> for Employee {
    fn from(e: Salesperson) -> Self {
        Self::Salesperson(e)
    }
}

// Identity is the roster key, so equality ignores variant and other fields.
impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl PartialOrd for Employee {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compute_salary().partial_cmp(&other.compute_salary())
    }
}

impl Add for &Employee {
    type Output = f64;

    fn add(self, rhs: Self) -> f64 {
        self.compute_salary() + rhs.compute_salary()
    }
}

impl Add<f64> for &Employee {
    type Output = f64;

    fn add(self, rhs: f64) -> f64 {
        self.compute_salary() + rhs
    }
}

impl Add<&Employee> for f64 {
    type Output = Self;

    fn add(self, rhs: &Employee) -> Self {
        self + rhs.compute_salary()
    }
}
