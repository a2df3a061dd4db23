use std::{collections::BTreeMap, path::Path};

use anyhow::Result;
use clap::ArgMatches;
use serde_json::{json, Value};
use staffing_core::{
    config::ImportConfig, load_config, Department, Employee, Error, ImportPolicy, ImportReport,
    Selection, StaffMember,
};
use tracing::info;

pub fn dispatch(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("department", sub_m)) => dispatch_department(sub_m),
        Some(("config", sub_m)) => dispatch_config(sub_m),
        _ => anyhow::bail!("Unknown command. Run 'staffing --help' for usage."),
    }
}

fn dispatch_department(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("inspect", sub_m)) => handle_inspect(sub_m),
        Some(("validate", sub_m)) => handle_validate(sub_m),
        _ => anyhow::bail!("Unknown department command. Run 'staffing department --help'."),
    }
}

fn dispatch_config(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("show", _)) => handle_config_show(),
        _ => anyhow::bail!("Unknown config command. Run 'staffing config --help'."),
    }
}

fn file_arg(matches: &ArgMatches) -> Result<&Path> {
    matches
        .get_one::<String>("file")
        .map(Path::new)
        .ok_or_else(|| anyhow::anyhow!("FILE argument is required"))
}

fn employee_json(employee: &Employee) -> Value {
    let mut snapshot = employee.to_snapshot();
    snapshot.insert("monthly_salary", employee.compute_salary());
    snapshot.into_value()
}

fn skipped_json(report: &ImportReport) -> Value {
    report
        .skipped
        .iter()
        .map(|s| {
            json!({
                "position": s.position,
                "type": s.tag,
                "kind": s.error.kind().to_string(),
                "error": s.error.to_string(),
            })
        })
        .collect()
}

// ============================================================================
// DEPARTMENT INSPECT
// ============================================================================

fn handle_inspect(matches: &ArgMatches) -> Result<()> {
    let path = file_arg(matches)?;
    let config = load_config()?;
    let (department, report) = Department::import_with(path, &config.import)?;

    let rows: Vec<&Employee> = match matches.get_one::<String>("key") {
        Some(key) => match department.select_str(key)? {
            Selection::One(employee) => vec![employee],
            Selection::Many(employees) => employees.iter().collect(),
        },
        None => department.iter().collect(),
    };

    if matches.get_flag("json") {
        let counts: BTreeMap<String, usize> = department
            .counts_by_type()
            .into_iter()
            .map(|(kind, count)| (kind.to_string(), count))
            .collect();
        let output = json!({
            "name": department.name().as_str(),
            "total_salary": department.total_salary(),
            "counts": counts,
            "employees": rows.into_iter().map(employee_json).collect::<Vec<_>>(),
            "skipped": skipped_json(&report),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{department}");
    for (kind, count) in department.counts_by_type() {
        println!("  {kind}: {count}");
    }
    println!();
    for employee in rows {
        println!("{}", employee.describe());
    }
    if !report.is_complete() {
        println!();
        println!("{} record(s) skipped", report.skipped.len());
    }
    Ok(())
}

// ============================================================================
// DEPARTMENT VALIDATE
// ============================================================================

fn handle_validate(matches: &ArgMatches) -> Result<()> {
    let path = file_arg(matches)?;
    let config = load_config()?;
    // Collect every bad record rather than stopping at the first.
    let import = ImportConfig {
        policy: ImportPolicy::Silent,
        ..config.import
    };
    let (department, report) = Department::import_with(path, &import)?;
    info!(
        department = %department.name(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "department file checked"
    );

    if matches.get_flag("json") {
        let output = json!({
            "name": department.name().as_str(),
            "valid": report.is_complete(),
            "loaded": report.loaded,
            "skipped": skipped_json(&report),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for skipped in &report.skipped {
            println!(
                "record #{} ({}): {}",
                skipped.position,
                skipped.tag.as_deref().unwrap_or("untagged"),
                skipped.error
            );
        }
        if report.is_complete() {
            println!("OK: {} employee record(s) valid", report.loaded);
        }
    }

    if report.is_complete() {
        Ok(())
    } else {
        Err(Error::invalid_data(
            "employees",
            format!(
                "{} of {} record(s) failed validation",
                report.skipped.len(),
                report.loaded + report.skipped.len()
            ),
        )
        .into())
    }
}

// ============================================================================
// CONFIG SHOW
// ============================================================================

fn handle_config_show() -> Result<()> {
    let config = load_config()?;
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
