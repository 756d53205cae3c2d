//! Binary entry point for the otoro CLI.

use std::io::Write as _;
use std::process::ExitCode;

use clap::Parser;

use otoro_cli::{Cli, init_logging, render_summary, run_cli};

fn main() -> ExitCode {
    if let Err(err) = init_logging() {
        eprintln!("otoro: {err}");
        return ExitCode::FAILURE;
    }

    let cli = Cli::parse();
    match run_cli(cli) {
        Ok(summary) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            if let Err(err) = render_summary(&summary, &mut handle) {
                tracing::error!(error = %err, "failed to render summary");
                return ExitCode::FAILURE;
            }
            if let Err(err) = handle.flush() {
                tracing::error!(error = %err, "failed to flush stdout");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "run failed");
            eprintln!("otoro: {err}");
            ExitCode::FAILURE
        }
    }
}
