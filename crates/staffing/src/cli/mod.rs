pub mod handlers;

use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("staffing")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and validate department roster files")
        .subcommand_required(true)
        .subcommand(cmd_department())
        .subcommand(cmd_config())
}

fn file_arg() -> Arg {
    Arg::new("file")
        .value_name("FILE")
        .required(true)
        .help("Department JSON file")
}

fn json_flag() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print machine-readable JSON")
}

fn cmd_department() -> Command {
    Command::new("department")
        .about("Work with department files")
        .subcommand_required(true)
        .subcommand(
            Command::new("inspect")
                .about("Summarise a department file")
                .arg(file_arg())
                .arg(
                    Arg::new("key")
                        .long("key")
                        .value_name("KEY")
                        .allow_hyphen_values(true)
                        .help("Roster position or range, e.g. 0, -1, 1..3, ..2"),
                )
                .arg(json_flag()),
        )
        .subcommand(
            Command::new("validate")
                .about("Check every employee record in a department file")
                .arg(file_arg())
                .arg(json_flag()),
        )
}

fn cmd_config() -> Command {
    Command::new("config")
        .about("Configuration")
        .subcommand_required(true)
        .subcommand(Command::new("show").about("Print the effective configuration"))
}

/// Process exit code for a failed command.
///
/// Core errors carry their own code; anything else exits with 1.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<staffing_core::Error>()
        .map_or(1, |e| u8::try_from(e.exit_code()).unwrap_or(1))
}
