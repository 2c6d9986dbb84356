//! CLI contract tests
//!
//! Verifies reading parsing, output formats, --fail-on exit codes, and
//! file input/output against the built binary.

use std::process::Command;

fn aqimeter_bin() -> String {
    env!("CARGO_BIN_EXE_aqimeter").to_string()
}

fn run_aqimeter(args: &[&str]) -> (i32, String, String) {
    let mut cmd = Command::new(aqimeter_bin());
    // Keep the host environment from changing defaults under test
    cmd.env_remove("AQIMETER_FORMAT");
    for arg in args {
        cmd.arg(arg);
    }
    let output = cmd.output().expect("Failed to run aqimeter");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (code, stdout, stderr)
}

// ============================================================================
// report: formats
// ============================================================================

#[test]
fn test_report_text_has_rows_and_overall() {
    let (code, stdout, _) = run_aqimeter(&[
        "report", "-r", "pm2.5=35.0", "-r", "pm10=80", "-r", "co=0.7", "--no-color",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("pm2.5"));
    assert!(stdout.contains("99"));
    assert!(stdout.contains("63"));
    assert!(stdout.contains("n/a"), "unsupported pollutant should render n/a");
    assert!(stdout.contains("Overall AQI: 99"));
    assert!(stdout.contains("Moderate"));
}

#[test]
fn test_report_json_is_parseable() {
    let (code, stdout, _) = run_aqimeter(&[
        "report", "-r", "pm2.5=35.0", "-r", "pm10=80", "-r", "co=0.7", "--format", "json",
    ]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(v["overall"]["index"], 99);
    assert_eq!(v["overall"]["category"], "moderate");
    let readings = v["readings"].as_array().unwrap();
    assert_eq!(readings.len(), 3);
    let co = readings
        .iter()
        .find(|r| r["pollutant"] == "co")
        .expect("co row present");
    assert!(co["index"].is_null());
}

#[test]
fn test_report_markdown_has_tables() {
    let (code, stdout, _) = run_aqimeter(&["report", "-r", "pm10=80", "--format", "md"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("# "));
    assert!(stdout.contains("| pm10 | 80.0 | 63 |"));
}

#[test]
fn test_report_out_of_range_is_undefined_not_an_error() {
    let (code, stdout, _) = run_aqimeter(&["report", "-r", "pm2.5=600", "--format", "json"]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert!(v["readings"][0]["index"].is_null());
    assert!(v["overall"].is_null());
}

// ============================================================================
// report: input validation
// ============================================================================

#[test]
fn test_report_rejects_non_numeric_reading() {
    let (code, _, stderr) = run_aqimeter(&["report", "-r", "pm2.5=abc"]);
    assert_eq!(code, 2, "clap should reject the malformed value");
    assert!(stderr.contains("malformed"));
}

#[test]
fn test_report_rejects_missing_equals() {
    let (code, _, stderr) = run_aqimeter(&["report", "-r", "pm2.5"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("NAME=VALUE"));
}

#[test]
fn test_report_rejects_negative_concentration() {
    let (code, _, stderr) = run_aqimeter(&["report", "-r", "pm2.5=-3"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("non-negative"));
}

#[test]
fn test_report_without_readings_fails() {
    let (code, _, stderr) = run_aqimeter(&["report"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no readings"));
}

// ============================================================================
// report: --fail-on
// ============================================================================

#[test]
fn test_fail_on_exits_nonzero_at_threshold() {
    // pm2.5=160 interpolates into the Very Unhealthy band
    let (code, _, _) = run_aqimeter(&[
        "report", "-r", "pm2.5=160", "--fail-on", "unhealthy", "--no-color",
    ]);
    assert_eq!(code, 1);
}

#[test]
fn test_fail_on_exits_zero_below_threshold() {
    let (code, _, _) = run_aqimeter(&[
        "report", "-r", "pm2.5=5", "--fail-on", "unhealthy", "--no-color",
    ]);
    assert_eq!(code, 0);
}

#[test]
fn test_fail_on_rejects_unknown_category() {
    let (code, _, stderr) = run_aqimeter(&["report", "-r", "pm2.5=5", "--fail-on", "awful"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("not a category"));
}

// ============================================================================
// report: file input and output
// ============================================================================

#[test]
fn test_report_reads_json_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("readings.json");
    std::fs::write(&input, r#"{"PM2.5": 35.0, "PM10": 80}"#).unwrap();

    let (code, stdout, _) = run_aqimeter(&[
        "report",
        "--input",
        input.to_str().unwrap(),
        "--format",
        "json",
    ]);
    assert_eq!(code, 0);
    let v: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON");
    assert_eq!(v["overall"]["index"], 99);
}

#[test]
fn test_report_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.md");

    let (code, stdout, _) = run_aqimeter(&[
        "report",
        "-r",
        "pm10=80",
        "--format",
        "markdown",
        "-o",
        out.to_str().unwrap(),
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Report written to"));
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.contains("| pm10 | 80.0 | 63 |"));
}

#[test]
fn test_report_missing_input_file_fails() {
    let (code, _, stderr) = run_aqimeter(&["report", "--input", "/nonexistent/readings.json"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("failed to read input"));
}

// ============================================================================
// other commands
// ============================================================================

#[test]
fn test_tables_lists_builtins() {
    let (code, stdout, _) = run_aqimeter(&["tables"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("PM2.5"));
    assert!(stdout.contains("PM10"));
    assert!(stdout.contains("500.4"));
    assert!(stdout.contains("604.0"));
}

#[test]
fn test_tables_unknown_pollutant_fails() {
    let (code, _, stderr) = run_aqimeter(&["tables", "--pollutant", "xyz"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("no breakpoint table"));
}

#[test]
fn test_sample_is_reproducible_with_seed() {
    let (code_a, stdout_a, _) = run_aqimeter(&["sample", "--seed", "7", "--format", "json"]);
    let (code_b, stdout_b, _) = run_aqimeter(&["sample", "--seed", "7", "--format", "json"]);
    assert_eq!(code_a, 0);
    assert_eq!(code_b, 0);
    assert_eq!(stdout_a, stdout_b);

    let v: serde_json::Value = serde_json::from_str(&stdout_a).expect("Invalid JSON");
    for row in v["readings"].as_array().unwrap() {
        let conc = row["concentration"].as_f64().unwrap();
        assert!(conc >= 0.0);
    }
}

#[test]
fn test_version_prints_package_version() {
    let (code, stdout, _) = run_aqimeter(&["version"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}
