use std::process::ExitCode;

use staffing::cli::{build_cli, exit_code, handlers};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    match handlers::dispatch(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Error: {err:#}");
            }
            ExitCode::from(exit_code(&err))
        }
    }
}
