//! Integration tests for the anomaly-frames binary.
//!
//! Spawns the compiled binary against temporary datasets to check the
//! behaviors that only exist at the CLI layer: debug mode, exit codes,
//! and frame file naming.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn write_dataset(dir: &TempDir, csv: &str) -> PathBuf {
    let path = dir.path().join("anomalies.csv");
    std::fs::write(&path, csv).unwrap();
    path
}

fn complete_csv(years: usize) -> String {
    let mut csv = String::from("Year,Value\n");
    for y in 0..years {
        for m in 1..=12 {
            csv.push_str(&format!(
                "{}{m:02},{}\n",
                1880 + y,
                (y as f32) * 0.1 - 0.4 + (m as f32) * 0.02
            ));
        }
    }
    csv
}

fn run(dataset: &std::path::Path, output: &std::path::Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_anomaly-frames"))
        .arg("--dataset")
        .arg(dataset)
        .arg("--output")
        .arg(output)
        .args(["--size", "80", "--title-size", "8"])
        .args(extra)
        .output()
        .unwrap()
}

#[test]
fn debug_run_writes_exactly_one_frame() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, &complete_csv(9));
    let output = dir.path().join("frames");

    // Debug mode: frame 0 only, regardless of the configured duration.
    let result = run(&dataset, &output, &["--duration", "600", "--debug"]);
    assert!(
        result.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let written: Vec<_> = std::fs::read_dir(&output)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(written, vec!["0000000.png"]);
}

#[test]
fn full_run_writes_one_numbered_frame_per_step() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(&dir, &complete_csv(4));
    let output = dir.path().join("frames");

    let result = run(&dataset, &output, &["--duration", "3"]);
    assert!(result.status.success());

    let mut written: Vec<_> = std::fs::read_dir(&output)
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    written.sort();
    assert_eq!(written, vec!["0000000.png", "0000001.png", "0000002.png"]);
}

#[test]
fn malformed_dataset_exits_nonzero_without_output() {
    let dir = TempDir::new().unwrap();

    // 1880 has 11 values instead of 12; 1881 is complete, so the gap cannot
    // be excused as a trailing partial year.
    let mut csv = String::from("Year,Value\n");
    for m in 1..=11 {
        csv.push_str(&format!("1880{m:02},0.1\n"));
    }
    for m in 1..=12 {
        csv.push_str(&format!("1881{m:02},0.2\n"));
    }

    let dataset = write_dataset(&dir, &csv);
    let output = dir.path().join("frames");

    let result = run(&dataset, &output, &["--duration", "3"]);
    assert!(!result.status.success());
    assert!(
        String::from_utf8_lossy(&result.stderr).contains("failed to load dataset"),
        "stderr: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    assert!(!output.exists(), "no frames may be written on load failure");
}

#[test]
fn missing_dataset_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    let dataset = dir.path().join("no-such-file.csv");
    let output = dir.path().join("frames");

    let result = run(&dataset, &output, &["--duration", "1"]);
    assert!(!result.status.success());
}
