//! Property-based tests for employee validation, salary rules and the snapshot codec.
//!
//! Invariants tested:
//! 1. Each variant's salary matches its formula
//! 2. Non-positive ids are rejected by every variant
//! 3. Snapshot round trip keeps id and computed salary
//! 4. Failed mutations leave the record unchanged
//! 5. Sales volume never decreases

// Integration tests have relaxed clippy settings for test ergonomics.
// Production code (src/) must use strict zero-unwrap/panic patterns.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::float_cmp,
    clippy::uninlined_format_args,
    clippy::doc_markdown
)]

use proptest::prelude::*;
use staffing_core::{
    Developer, Employee, EmployeeCore, Error, Manager, PlainEmployee, Salesperson,
    SeniorityLevel, Snapshot, StaffMember,
};

/// Optimized proptest config for fast employee property tests.
fn fast_config() -> ProptestConfig {
    ProptestConfig {
        cases: 64,
        max_shrink_iters: 256,
        ..ProptestConfig::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

// =============================================================================
// STRATEGIES
// =============================================================================

fn valid_id() -> impl Strategy<Value = i64> + Clone {
    1i64..=1_000_000
}

fn invalid_id() -> impl Strategy<Value = i64> {
    prop_oneof![Just(0i64), Just(-1i64), i64::MIN..0]
}

fn salary() -> impl Strategy<Value = f64> + Clone {
    1.0f64..1_000_000.0
}

fn level() -> impl Strategy<Value = SeniorityLevel> {
    prop_oneof![
        Just(SeniorityLevel::Junior),
        Just(SeniorityLevel::Middle),
        Just(SeniorityLevel::Senior),
    ]
}

fn skills() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,8}", 0..6)
}

/// Any of the four variants with valid fields.
fn employee() -> impl Strategy<Value = Employee> {
    let core = (valid_id(), "[A-Z][a-z]{1,10}", salary())
        .prop_map(|(id, name, base)| EmployeeCore::new(id, name, "Ops", base).expect("valid core"));

    prop_oneof![
        core.clone()
            .prop_map(|c| Employee::from(PlainEmployee::new(c))),
        (core.clone(), 0.0f64..50_000.0)
            .prop_map(|(c, bonus)| Employee::from(Manager::new(c, bonus).expect("valid"))),
        (core.clone(), skills(), level()).prop_map(|(c, stack, lvl)| {
            Employee::from(Developer::new(c, stack, lvl).expect("valid"))
        }),
        (core, 0.0f64..=1.0, 0.0f64..1_000_000.0).prop_map(|(c, rate, volume)| {
            Employee::from(Salesperson::new(c, rate, volume).expect("valid"))
        }),
    ]
}

// =============================================================================
// SALARY RULES
// =============================================================================

#[test]
fn senior_developer_doubles_base() {
    let core = EmployeeCore::new(1, "Bob", "IT", 50_000.0).expect("valid core");
    let dev = Developer::new(core, ["rust"], SeniorityLevel::Senior).expect("valid");
    assert!(close(dev.compute_salary(), 100_000.0));
}

proptest! {
    #![proptest_config(fast_config())]

    #[test]
    fn manager_salary_is_base_plus_bonus(base in salary(), bonus in 0.0f64..50_000.0) {
        let core = EmployeeCore::new(1, "M", "Ops", base).expect("valid core");
        let manager = Manager::new(core, bonus).expect("valid");
        prop_assert!(close(manager.compute_salary(), base + bonus));
    }

    #[test]
    fn developer_salary_scales_by_level(base in salary(), lvl in level()) {
        let core = EmployeeCore::new(1, "D", "Ops", base).expect("valid core");
        let dev = Developer::new(core, Vec::<String>::new(), lvl).expect("valid");
        prop_assert!(close(dev.compute_salary(), base * lvl.coefficient()));
    }

    #[test]
    fn salesperson_salary_adds_commission(
        base in salary(),
        rate in 0.0f64..=1.0,
        volume in 0.0f64..1_000_000.0,
    ) {
        let core = EmployeeCore::new(1, "S", "Ops", base).expect("valid core");
        let seller = Salesperson::new(core, rate, volume).expect("valid");
        prop_assert!(close(seller.compute_salary(), base + volume * rate));
    }

    #[test]
    fn plain_salary_is_base(base in salary()) {
        let core = EmployeeCore::new(1, "P", "Ops", base).expect("valid core");
        prop_assert!(close(PlainEmployee::new(core).compute_salary(), base));
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

proptest! {
    #![proptest_config(fast_config())]

    /// Variants share the base constructor, so a bad id never reaches them.
    #[test]
    fn non_positive_id_rejected(id in invalid_id()) {
        let result = EmployeeCore::new(id, "Ann", "Ops", 100.0);
        prop_assert!(matches!(result, Err(Error::InvalidData { .. })), "{:?}", result);
    }

    #[test]
    fn non_positive_salary_is_financial(base in -1_000_000.0f64..=0.0) {
        let result = EmployeeCore::new(1, "Ann", "Ops", base);
        prop_assert!(matches!(result, Err(Error::Financial { .. })), "{:?}", result);
    }

    #[test]
    fn rate_outside_unit_interval_rejected(
        rate in prop_oneof![-10.0f64..-0.0001, 1.0001f64..10.0],
    ) {
        let core = EmployeeCore::new(1, "S", "Ops", 100.0).expect("valid core");
        let result = Salesperson::new(core, rate, 0.0);
        prop_assert!(matches!(result, Err(Error::Financial { .. })), "{:?}", result);
    }

    #[test]
    fn failed_salary_update_keeps_old_value(mut e in employee(), bad in -1000.0f64..=0.0) {
        let before = e.compute_salary();
        prop_assert!(e.set_base_salary(bad).is_err());
        prop_assert_eq!(e.compute_salary(), before);
    }

    #[test]
    fn sales_volume_never_decreases(sales in prop::collection::vec(-100.0f64..100.0, 1..20)) {
        let core = EmployeeCore::new(1, "S", "Ops", 100.0).expect("valid core");
        let mut seller = Salesperson::new(core, 0.1, 0.0).expect("valid");
        for amount in sales {
            let before = seller.sales_volume();
            let _ = seller.record_sale(amount);
            prop_assert!(seller.sales_volume() >= before);
        }
    }

    #[test]
    fn skills_stay_unique(stack in skills(), extra in "[a-z]{1,8}") {
        let core = EmployeeCore::new(1, "D", "Ops", 100.0).expect("valid core");
        let mut dev = Developer::new(core, stack, SeniorityLevel::Junior).expect("valid");
        let _ = dev.add_skill(extra.clone()).expect("non-blank skill");
        let added_again = dev.add_skill(extra).expect("non-blank skill");
        prop_assert!(!added_again);

        let mut seen = dev.tech_stack().to_vec();
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), dev.tech_stack().len());
    }
}

// =============================================================================
// SNAPSHOT ROUND TRIP
// =============================================================================

proptest! {
    #![proptest_config(fast_config())]

    #[test]
    fn snapshot_round_trip_keeps_id_and_salary(e in employee()) {
        let decoded = Employee::from_snapshot(&e.to_snapshot()).expect("round trip");
        prop_assert_eq!(decoded.id(), e.id());
        prop_assert_eq!(decoded.kind(), e.kind());
        prop_assert!(close(decoded.compute_salary(), e.compute_salary()));
    }

    #[test]
    fn snapshot_survives_json_text(e in employee()) {
        let text = serde_json::to_string(&e.to_snapshot()).expect("encode");
        let snapshot: Snapshot = serde_json::from_str(&text).expect("decode");
        let decoded = Employee::from_snapshot(&snapshot).expect("round trip");
        prop_assert_eq!(&decoded, &e);
        prop_assert!(close(decoded.compute_salary(), e.compute_salary()));
    }

    #[test]
    fn dropping_a_required_key_fails(e in employee(), pick in any::<prop::sample::Index>()) {
        let keys = staffing_core::domain::required_keys(e.kind());
        let key = keys[pick.index(keys.len())];
        let mut snapshot = e.to_snapshot();
        snapshot.remove(key);
        let result = Employee::from_snapshot(&snapshot);
        prop_assert!(matches!(result, Err(Error::InvalidData { .. })), "{}: {:?}", key, result);
    }
}
