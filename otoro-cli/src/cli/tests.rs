//! Unit tests for the CLI commands.

use std::io::Write as _;

use rstest::rstest;
use tempfile::NamedTempFile;

use super::commands::load_rows;
use super::{
    AlgorithmChoice, Cli, CliError, Command, MetricChoice, RunCommand, render_summary, run_cli,
};

fn write_input(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write input");
    file
}

fn run_command_for(file: &NamedTempFile) -> RunCommand {
    RunCommand {
        path: file.path().to_path_buf(),
        min_pts: 2,
        min_cluster_size: 3,
        alpha: 1.0,
        metric: MetricChoice::Euclidean,
        minkowski_p: 2.0,
        algorithm: AlgorithmChoice::Generic,
        leaf_size: 40,
        max_memory_bytes: None,
        print_labels: false,
    }
}

const TWO_BLOBS: &str = "\
# blob one
0.0, 0.0
0.0, 0.1
0.1, 0.0

# blob two
9.0 9.0
9.0 9.1
9.1 9.0
";

#[rstest]
#[case("1.0, 2.0\n3.0, 4.0\n", vec![vec![1.0, 2.0], vec![3.0, 4.0]])]
#[case("1.0 2.0\n\n# comment\n3.0\t4.0\n", vec![vec![1.0, 2.0], vec![3.0, 4.0]])]
#[case("5,6\n", vec![vec![5.0, 6.0]])]
fn loads_delimited_rows(#[case] contents: &str, #[case] expected: Vec<Vec<f64>>) {
    let file = write_input(contents);
    let rows = load_rows(file.path()).expect("input parses");
    assert_eq!(rows, expected);
}

#[test]
fn reports_the_offending_token_on_parse_failures() {
    let file = write_input("1.0, banana\n");
    let err = load_rows(file.path()).expect_err("bad token");
    match err {
        CliError::Parse { line, token, .. } => {
            assert_eq!(line, 1);
            assert_eq!(token, "banana");
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn missing_files_surface_io_errors() {
    let err = load_rows(std::path::Path::new("/nonexistent/otoro-input")).expect_err("no file");
    assert!(matches!(err, CliError::Io { .. }));
}

#[test]
fn clusters_the_two_blob_fixture() {
    let file = write_input(TWO_BLOBS);
    let cli = Cli {
        command: Command::Run(run_command_for(&file)),
    };
    let summary = run_cli(cli).expect("run succeeds");
    assert_eq!(summary.points, 6);
    assert_eq!(summary.clusters, 2);
    assert_eq!(summary.noise, 0);
    assert!(summary.labels.is_none());
}

#[test]
fn print_labels_includes_the_label_vector() {
    let file = write_input(TWO_BLOBS);
    let mut command = run_command_for(&file);
    command.print_labels = true;
    let summary = run_cli(Cli {
        command: Command::Run(command),
    })
    .expect("run succeeds");
    let labels = summary.labels.as_ref().expect("labels requested");
    assert_eq!(labels.len(), 6);
    assert_eq!(labels[0], labels[1]);
    assert_ne!(labels[0], labels[5]);
}

#[test]
fn the_memory_guard_rejects_oversized_runs() {
    let file = write_input(TWO_BLOBS);
    let mut command = run_command_for(&file);
    command.max_memory_bytes = Some(64);
    let err = run_cli(Cli {
        command: Command::Run(command),
    })
    .expect_err("64 bytes cannot hold the pipeline");
    assert!(matches!(err, CliError::MemoryGuard { limit: 64, .. }));
}

#[test]
fn invalid_parameters_surface_core_errors() {
    let file = write_input(TWO_BLOBS);
    let mut command = run_command_for(&file);
    command.alpha = 0.0;
    let err = run_cli(Cli {
        command: Command::Run(command),
    })
    .expect_err("alpha 0 is invalid");
    assert!(matches!(err, CliError::Core(_)));
}

#[test]
fn renders_a_parseable_summary() {
    let summary = super::ExecutionSummary {
        input: "points.txt".to_owned(),
        points: 3,
        clusters: 1,
        noise: 1,
        labels: Some(vec![0, 0, -1]),
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer).expect("writing to a Vec cannot fail");
    let rendered = String::from_utf8(buffer).expect("utf-8 output");
    assert_eq!(
        rendered,
        "input: points.txt\npoints: 3\nclusters: 1\nnoise: 1\n0\t0\n1\t0\n2\t-1\n"
    );
}
