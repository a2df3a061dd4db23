//! Type-tagged snapshot codec.
//!
//! A [`Snapshot`] is the flat key-value record an employee serializes to:
//!
//! ```json
//! { "type": "developer", "id": 3, "name": "Bob", "department": "IT",
//!   "base_salary": 50000.0, "tech_stack": ["rust"], "seniority_level": "senior" }
//! ```
//!
//! Variant fields are merged on top of the base record, so every snapshot
//! carries `type`, `id`, `name`, `department` and `base_salary`.
//!
//! Decoding reads `type`, picks the variant decoder through an exhaustive
//! match, checks that variant's required keys, and then goes through the same
//! validating constructors as direct construction. Unknown tags and missing
//! keys fail with `InvalidData`; nothing falls back to a default variant.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::employee::{
        Developer, Employee, EmployeeCore, EmployeeKind, Manager, PlainEmployee, Salesperson,
        SeniorityLevel, StaffMember,
    },
    error::{Error, Result},
};

const PLAIN_KEYS: &[&str] = &["type", "id", "name", "department", "base_salary"];
const MANAGER_KEYS: &[&str] = &["type", "id", "name", "department", "base_salary", "bonus"];
const DEVELOPER_KEYS: &[&str] = &[
    "type",
    "id",
    "name",
    "department",
    "base_salary",
    "tech_stack",
    "seniority_level",
];
const SALESPERSON_KEYS: &[&str] = &[
    "type",
    "id",
    "name",
    "department",
    "base_salary",
    "commission_rate",
    "sales_volume",
];

// ============================================================================
// SNAPSHOT RECORD
// ============================================================================

/// Flat, tagged key-value record for one employee.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Map<String, Value>);

impl Snapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Drop a key; returns the previous value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// The record's variant tag.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` if `type` is missing, not a string, or unknown.
    pub fn kind(&self) -> Result<EmployeeKind> {
        let tag = self
            .get("type")
            .ok_or_else(|| Error::invalid_data("type", "required field is missing"))?
            .as_str()
            .ok_or_else(|| Error::invalid_data("type", "must be a string"))?;
        EmployeeKind::parse(tag)
    }

    fn require_keys(&self, keys: &[&str]) -> Result<()> {
        keys.iter()
            .find(|key| !self.contains_key(key))
            .map_or(Ok(()), |key| {
                Err(Error::invalid_data(*key, "required field is missing"))
            })
    }

    fn field(&self, key: &str) -> Result<&Value> {
        self.get(key)
            .ok_or_else(|| Error::invalid_data(key, "required field is missing"))
    }

    fn integer(&self, key: &str) -> Result<i64> {
        self.field(key)?
            .as_i64()
            .ok_or_else(|| Error::invalid_data(key, "must be an integer"))
    }

    fn number(&self, key: &str) -> Result<f64> {
        self.field(key)?
            .as_f64()
            .ok_or_else(|| Error::invalid_data(key, "must be a number"))
    }

    fn text(&self, key: &str) -> Result<&str> {
        self.field(key)?
            .as_str()
            .ok_or_else(|| Error::invalid_data(key, "must be a string"))
    }

    fn text_list(&self, key: &str) -> Result<Vec<&str>> {
        self.field(key)?
            .as_array()
            .ok_or_else(|| Error::invalid_data(key, "must be a list of strings"))?
            .iter()
            .map(|item| {
                item.as_str()
                    .ok_or_else(|| Error::invalid_data(key, "must be a list of strings"))
            })
            .collect()
    }

    fn core(&self) -> Result<EmployeeCore> {
        EmployeeCore::new(
            self.integer("id")?,
            self.text("name")?,
            self.text("department")?,
            self.number("base_salary")?,
        )
    }
}

impl From<Map<String, Value>> for Snapshot {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Snapshot {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(Error::invalid_data(
                "employee record",
                format!("must be a JSON object, got {other}"),
            )),
        }
    }
}

// ============================================================================
// PER-VARIANT CODEC
// ============================================================================

/// Encode/decode pair implemented by each variant.
pub trait SnapshotCodec: StaffMember + Sized {
    const KIND: EmployeeKind;

    /// Keys that must be present for this variant, base keys included.
    const REQUIRED_KEYS: &'static [&'static str];

    fn to_snapshot(&self) -> Snapshot;

    /// Build from a snapshot whose tag and keys were already checked.
    fn decode(snapshot: &Snapshot) -> Result<Self>;

    /// # Errors
    ///
    /// Returns `Error::InvalidData` if the tag names another variant or a
    /// required key is missing, and any construction error otherwise.
    fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let kind = snapshot.kind()?;
        if kind != Self::KIND {
            return Err(Error::invalid_data(
                "type",
                format!("expected {}, got {kind}", Self::KIND),
            ));
        }
        snapshot.require_keys(Self::REQUIRED_KEYS)?;
        Self::decode(snapshot)
    }
}

fn base_snapshot(member: &impl StaffMember) -> Snapshot {
    let core = member.core();
    let mut snapshot = Snapshot::new();
    snapshot.insert("type", member.kind().to_string());
    snapshot.insert("id", core.id().get());
    snapshot.insert("name", core.name().as_str());
    snapshot.insert("department", core.department().as_str());
    snapshot.insert("base_salary", core.base_salary());
    snapshot
}

impl SnapshotCodec for PlainEmployee {
    const KIND: EmployeeKind = EmployeeKind::Plain;
    const REQUIRED_KEYS: &'static [&'static str] = PLAIN_KEYS;

    fn to_snapshot(&self) -> Snapshot {
        base_snapshot(self)
    }

    fn decode(snapshot: &Snapshot) -> Result<Self> {
        snapshot.core().map(Self::new)
    }
}

impl SnapshotCodec for Manager {
    const KIND: EmployeeKind = EmployeeKind::Manager;
    const REQUIRED_KEYS: &'static [&'static str] = MANAGER_KEYS;

    fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = base_snapshot(self);
        snapshot.insert("bonus", self.bonus());
        snapshot
    }

    fn decode(snapshot: &Snapshot) -> Result<Self> {
        let core = snapshot.core()?;
        Self::new(core, snapshot.number("bonus")?)
    }
}

impl SnapshotCodec for Developer {
    const KIND: EmployeeKind = EmployeeKind::Developer;
    const REQUIRED_KEYS: &'static [&'static str] = DEVELOPER_KEYS;

    fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = base_snapshot(self);
        let stack: Vec<Value> = self
            .tech_stack()
            .iter()
            .map(|skill| Value::from(skill.as_str()))
            .collect();
        snapshot.insert("tech_stack", stack);
        snapshot.insert("seniority_level", self.seniority_level().to_string());
        snapshot
    }

    fn decode(snapshot: &Snapshot) -> Result<Self> {
        let core = snapshot.core()?;
        let stack = snapshot.text_list("tech_stack")?;
        let level = SeniorityLevel::parse(snapshot.text("seniority_level")?)?;
        Self::new(core, stack, level)
    }
}

impl SnapshotCodec for Salesperson {
    const KIND: EmployeeKind = EmployeeKind::Salesperson;
    const REQUIRED_KEYS: &'static [&'static str] = SALESPERSON_KEYS;

    fn to_snapshot(&self) -> Snapshot {
        let mut snapshot = base_snapshot(self);
        snapshot.insert("commission_rate", self.commission_rate());
        snapshot.insert("sales_volume", self.sales_volume());
        snapshot
    }

    fn decode(snapshot: &Snapshot) -> Result<Self> {
        let core = snapshot.core()?;
        Self::new(
            core,
            snapshot.number("commission_rate")?,
            snapshot.number("sales_volume")?,
        )
    }
}

// ============================================================================
// TAG DISPATCH
// ============================================================================

type Decoder = fn(&Snapshot) -> Result<Employee>;

fn decode_as<T>(snapshot: &Snapshot) -> Result<Employee>
where
    T: SnapshotCodec + Into<Employee>,
{
    T::from_snapshot(snapshot).map(Into::into)
}

/// Decoder for a tag. The match is exhaustive, so adding a variant without a
/// decoder does not compile.
fn decoder_for(kind: EmployeeKind) -> Decoder {
    match kind {
        EmployeeKind::Plain => decode_as::<PlainEmployee>,
        EmployeeKind::Manager => decode_as::<Manager>,
        EmployeeKind::Developer => decode_as::<Developer>,
        EmployeeKind::Salesperson => decode_as::<Salesperson>,
    }
}

/// Required keys for a tag, base keys included.
#[must_use]
pub const fn required_keys(kind: EmployeeKind) -> &'static [&'static str] {
    match kind {
        EmployeeKind::Plain => PlainEmployee::REQUIRED_KEYS,
        EmployeeKind::Manager => Manager::REQUIRED_KEYS,
        EmployeeKind::Developer => Developer::REQUIRED_KEYS,
        EmployeeKind::Salesperson => Salesperson::REQUIRED_KEYS,
    }
}

impl Employee {
    #[must_use]
    pub fn to_snapshot(&self) -> Snapshot {
        match self {
            Self::Plain(e) => e.to_snapshot(),
            Self::Manager(e) => e.to_snapshot(),
            Self::Developer(e) => e.to_snapshot(),
            Self::Salesperson(e) => e.to_snapshot(),
        }
    }

    /// Rebuild whichever variant the snapshot's tag names.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidData` for an unknown tag or a missing key, and
    /// any construction error the variant raises.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let kind = snapshot.kind()?;
        decoder_for(kind)(snapshot)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use serde_json::json;

    use super::*;

    fn snapshot(value: Value) -> Snapshot {
        Snapshot::try_from(value).expect("object")
    }

    fn sample_employees() -> Vec<Employee> {
        let core = |id| EmployeeCore::new(id, "Name", "Dept", 1000.0).expect("valid core");
        vec![
            PlainEmployee::new(core(1)).into(),
            Manager::new(core(2), 300.0).expect("valid").into(),
            Developer::new(core(3), ["rust", "sql"], SeniorityLevel::Middle)
                .expect("valid")
                .into(),
            Salesperson::new(core(4), 0.2, 5000.0).expect("valid").into(),
        ]
    }

    #[test]
    fn test_round_trip_preserves_id_and_salary() {
        for employee in sample_employees() {
            let restored = Employee::from_snapshot(&employee.to_snapshot()).expect("decodes");
            assert_eq!(restored.id(), employee.id());
            assert_eq!(restored.kind(), employee.kind());
            assert!((restored.compute_salary() - employee.compute_salary()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_variant_snapshot_keeps_base_fields() {
        for employee in sample_employees() {
            let snap = employee.to_snapshot();
            for key in PLAIN_KEYS {
                assert!(snap.contains_key(key), "{key} missing for {}", employee.kind());
            }
            for key in required_keys(employee.kind()) {
                assert!(snap.contains_key(key), "{key} missing for {}", employee.kind());
            }
        }
    }

    #[test]
    fn test_tag_values() {
        let tags: Vec<String> = sample_employees()
            .iter()
            .map(|e| e.to_snapshot().kind().expect("tag").to_string())
            .collect();
        assert_eq!(tags, ["employee", "manager", "developer", "salesperson"]);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let snap = snapshot(json!({
            "type": "intern", "id": 1, "name": "A", "department": "D", "base_salary": 1.0
        }));
        let err = Employee::from_snapshot(&snap).expect_err("unknown tag");
        assert!(matches!(err, Error::InvalidData { ref field, .. } if field == "type"));
    }

    #[test]
    fn test_missing_type_rejected() {
        let snap = snapshot(json!({ "id": 1, "name": "A", "department": "D", "base_salary": 1.0 }));
        assert!(Employee::from_snapshot(&snap).is_err());
    }

    #[test]
    fn test_missing_variant_key_rejected() {
        let snap = snapshot(json!({
            "type": "manager", "id": 1, "name": "A", "department": "D", "base_salary": 1.0
        }));
        let err = Employee::from_snapshot(&snap).expect_err("bonus missing");
        assert!(matches!(err, Error::InvalidData { ref field, .. } if field == "bonus"));
    }

    #[test]
    fn test_non_integer_id_rejected() {
        for id in [json!(1.5), json!("1"), json!(null), json!(0), json!(-3)] {
            let snap = snapshot(json!({
                "type": "employee", "id": id, "name": "A", "department": "D", "base_salary": 1.0
            }));
            let err = Employee::from_snapshot(&snap).expect_err("bad id");
            assert!(matches!(err, Error::InvalidData { .. }), "id={id}");
        }
    }

    #[test]
    fn test_decode_uses_construction_validation() {
        let snap = snapshot(json!({
            "type": "salesperson", "id": 1, "name": "A", "department": "D",
            "base_salary": 1.0, "commission_rate": 1.5, "sales_volume": 0.0
        }));
        let err = Employee::from_snapshot(&snap).expect_err("rate out of range");
        assert!(err.is_financial());
    }

    #[test]
    fn test_variant_decoder_checks_tag() {
        let manager = Manager::new(
            EmployeeCore::new(1, "A", "D", 10.0).expect("valid core"),
            1.0,
        )
        .expect("valid manager");
        let err = Developer::from_snapshot(&manager.to_snapshot()).expect_err("wrong tag");
        assert!(err.to_string().contains("expected developer"));
    }

    #[test]
    fn test_non_object_record_rejected() {
        assert!(Snapshot::try_from(json!([1, 2])).is_err());
    }
}
