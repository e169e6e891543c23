//! imgsweep - Duplicate Image Remover
//!
//! Entry point for the imgsweep CLI application.

use clap::error::ErrorKind;
use clap::Parser;

use imgsweep::{cli::Cli, config::Settings, error::ExitCode, logging, pipeline};

fn main() {
    // Parse command-line arguments. Missing directories (anything short of
    // a main directory plus one more) is a usage error.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::Success,
                _ => ExitCode::UsageError,
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    logging::init_logging(cli.verbosity);

    // Validate before any filesystem mutation; config errors carry their
    // own exit codes and are reported even when logging is disabled.
    let plan = match Settings::from_cli(&cli).resolve() {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code().as_i32());
        }
    };

    match pipeline::run(&plan) {
        Ok(_report) => {
            log::info!("done");
            std::process::exit(ExitCode::Success.as_i32());
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(ExitCode::GeneralError.as_i32());
        }
    }
}
