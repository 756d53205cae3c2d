//! Otoro CLI library.
//!
//! Exposes the command surface and logging bootstrap so integration tests
//! and the binary share one implementation.

pub mod cli;
pub mod logging;

pub use cli::{Cli, CliError, ExecutionSummary, render_summary, run_cli};
pub use logging::{LoggingError, init_logging};
