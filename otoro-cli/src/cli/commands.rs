//! Command implementations and argument parsing for the otoro CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use otoro_core::{
    Algorithm, FeatureMatrix, MatrixError, Metric, OtoroBuilder, OtoroError,
    estimate_peak_bytes, format_bytes,
};
use thiserror::Error;

const DEFAULT_MIN_PTS: usize = 5;
const DEFAULT_MIN_CLUSTER_SIZE: usize = 5;
const DEFAULT_ALPHA: f64 = 1.0;
const DEFAULT_LEAF_SIZE: usize = 40;
const DEFAULT_MINKOWSKI_P: f64 = 2.0;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "otoro", about = "Execute the otoro HDBSCAN clustering pipeline.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a numeric text file.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to a UTF-8 text file with one point per line; values are
    /// separated by commas or whitespace. Blank lines and `#` comments are
    /// skipped.
    pub path: PathBuf,

    /// Neighbourhood size for core-distance computation.
    #[arg(long = "min-pts", default_value_t = DEFAULT_MIN_PTS)]
    pub min_pts: usize,

    /// Minimum number of points per cluster.
    #[arg(long = "min-cluster-size", default_value_t = DEFAULT_MIN_CLUSTER_SIZE)]
    pub min_cluster_size: usize,

    /// Edge-weight scaler; larger values merge less conservatively.
    #[arg(long, default_value_t = DEFAULT_ALPHA)]
    pub alpha: f64,

    /// Pairwise metric.
    #[arg(long, value_enum, default_value = "euclidean")]
    pub metric: MetricChoice,

    /// Exponent for the minkowski metric (ignored otherwise).
    #[arg(long = "minkowski-p", default_value_t = DEFAULT_MINKOWSKI_P)]
    pub minkowski_p: f64,

    /// MST backend.
    #[arg(long, value_enum, default_value = "generic")]
    pub algorithm: AlgorithmChoice,

    /// Block-size hint for the on-demand backend.
    #[arg(long = "leaf-size", default_value_t = DEFAULT_LEAF_SIZE)]
    pub leaf_size: usize,

    /// Refuse to run when the pre-flight memory estimate exceeds this many
    /// bytes.
    #[arg(long = "max-memory-bytes")]
    pub max_memory_bytes: Option<u64>,

    /// Include the per-point labels in the summary.
    #[arg(long = "print-labels")]
    pub print_labels: bool,
}

/// Metrics selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricChoice {
    /// Straight-line (L2) distance.
    Euclidean,
    /// City-block (L1) distance.
    Manhattan,
    /// Maximum coordinate difference.
    Chebyshev,
    /// Generalised Lp distance; see `--minkowski-p`.
    Minkowski,
    /// One minus cosine similarity.
    Cosine,
}

impl MetricChoice {
    fn to_metric(self, minkowski_p: f64) -> Metric {
        match self {
            Self::Euclidean => Metric::Euclidean,
            Self::Manhattan => Metric::Manhattan,
            Self::Chebyshev => Metric::Chebyshev,
            Self::Minkowski => Metric::Minkowski { p: minkowski_p },
            Self::Cosine => Metric::Cosine,
        }
    }
}

/// MST backends selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AlgorithmChoice {
    /// Dense mutual-reachability matrix.
    Generic,
    /// On-demand Prim's; linear memory.
    PrimsIndexed,
}

impl From<AlgorithmChoice> for Algorithm {
    fn from(choice: AlgorithmChoice) -> Self {
        match choice {
            AlgorithmChoice::Generic => Self::Generic,
            AlgorithmChoice::PrimsIndexed => Self::PrimsIndexed,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading the input.
    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A line of the input could not be parsed as numbers.
    #[error("`{}` line {line}: cannot parse `{token}` as a number", .path.display())]
    Parse {
        /// Path that triggered the failure.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// The parsed rows did not form a valid feature matrix.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// The pre-flight memory estimate exceeded the configured guard.
    #[error("estimated peak memory {required} bytes exceeds the configured limit of {limit} bytes")]
    MemoryGuard {
        /// Estimated requirement in bytes.
        required: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },
    /// Core clustering failed.
    #[error(transparent)]
    Core(#[from] OtoroError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Display name of the input (the file name when available).
    pub input: String,
    /// Number of clustered points.
    pub points: usize,
    /// Number of clusters found.
    pub clusters: usize,
    /// Number of noise points.
    pub noise: usize,
    /// Per-point labels, when requested.
    pub labels: Option<Vec<i64>>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, validation, or clustering fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(command) => run_command(command),
    }
}

pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let rows = load_rows(&command.path)?;
    let matrix = FeatureMatrix::from_rows(rows)?;
    let points = matrix.rows();

    if let Some(limit) = command.max_memory_bytes {
        let required = estimate_peak_bytes(points, command.algorithm.into()).unwrap_or(u64::MAX);
        tracing::info!(
            required = %format_bytes(required),
            limit = %format_bytes(limit),
            "memory guard consulted"
        );
        if required > limit {
            return Err(CliError::MemoryGuard { required, limit });
        }
    }

    let model = OtoroBuilder::new()
        .with_min_pts(command.min_pts)
        .with_min_cluster_size(command.min_cluster_size)
        .with_alpha(command.alpha)
        .with_metric(command.metric.to_metric(command.minkowski_p))
        .with_algorithm(command.algorithm.into())
        .with_leaf_size(command.leaf_size)
        .build(matrix)?;
    model.fit()?;

    Ok(ExecutionSummary {
        input: display_name(&command.path),
        points,
        clusters: model.num_clusters()?,
        noise: model.num_noise()?,
        labels: command.print_labels.then(|| model.labels()).transpose()?,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

pub(super) fn load_rows(path: &Path) -> Result<Vec<Vec<f64>>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let mut row = Vec::new();
        for token in trimmed.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let value = token.parse::<f64>().map_err(|_| CliError::Parse {
                path: path.to_path_buf(),
                line: index + 1,
                token: token.to_owned(),
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Renders `summary` as the CLI's stdout payload.
///
/// # Errors
/// Propagates writer failures.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "input: {}", summary.input)?;
    writeln!(writer, "points: {}", summary.points)?;
    writeln!(writer, "clusters: {}", summary.clusters)?;
    writeln!(writer, "noise: {}", summary.noise)?;
    if let Some(labels) = &summary.labels {
        for (point, label) in labels.iter().enumerate() {
            writeln!(writer, "{point}\t{label}")?;
        }
    }
    Ok(())
}
