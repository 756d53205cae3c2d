//! Command-line interface orchestration for the otoro clustering pipeline.
//!
//! The CLI offers a single `run` command that loads a numeric text file (one
//! point per line) and executes the HDBSCAN pipeline over it.

mod commands;

pub use commands::{
    AlgorithmChoice, Cli, CliError, Command, ExecutionSummary, MetricChoice, RunCommand,
    render_summary, run_cli,
};

#[cfg(test)]
mod tests;
