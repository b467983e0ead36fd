use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

use logwarden::config::{AnalyzerConfig, Overrides};

fn fixture_log() -> String {
    let mut log = String::new();
    for i in 0..12 {
        log.push_str(&format!(
            "203.0.113.5 - - [03/Dec/2024:10:12:{:02} +0000] \"POST /login HTTP/1.1\" 401 128 \"Invalid credentials\"\n",
            i
        ));
    }
    for i in 0..4 {
        log.push_str(&format!(
            "192.168.1.1 - - [03/Dec/2024:10:13:{:02} +0000] \"GET /home HTTP/1.1\" 200 512\n",
            i
        ));
    }
    log.push_str("10.0.0.2 - - [03/Dec/2024:10:14:00 +0000] \"POST /login HTTP/1.1\" 401 128\n");
    log.push_str("this line is noise\n");
    log
}

fn write_log(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("access.log");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_run_writes_csv_and_flags_brute_force() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());
    let csv_path = dir.path().join("results.csv");

    let mut cfg = AnalyzerConfig::default();
    cfg.apply_overrides(&Overrides {
        csv_path: Some(csv_path.clone()),
        ..Default::default()
    });

    let report = logwarden::analyze(&log, &cfg).unwrap();
    assert_eq!(logwarden::export(&report, &cfg).unwrap(), Some(csv_path.as_path()));
    assert_eq!(report.stats.lines_read, 18);
    assert_eq!(report.stats.lines_without_ip, 1);
    assert_eq!(report.suspicious_ips.len(), 1);
    assert_eq!(report.suspicious_ips[0].key, "203.0.113.5");
    assert_eq!(report.suspicious_ips[0].count, 12);
    assert_eq!(report.top_endpoint.as_ref().unwrap().key, "/login");
    assert_eq!(report.top_endpoint.as_ref().unwrap().count, 13);

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.contains("203.0.113.5,12"));
    assert!(csv.contains("/login,13"));
}

#[test]
fn test_run_without_csv_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());
    let csv_path = dir.path().join("results.csv");

    let mut cfg = AnalyzerConfig::default();
    cfg.apply_overrides(&Overrides {
        csv_path: Some(csv_path.clone()),
        no_csv: true,
        ..Default::default()
    });

    let report = logwarden::analyze(&log, &cfg).unwrap();
    assert_eq!(logwarden::export(&report, &cfg).unwrap(), None);
    assert!(!csv_path.exists());
}

#[test]
fn test_run_rejects_zero_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());

    let mut cfg = AnalyzerConfig::default();
    cfg.apply_overrides(&Overrides {
        threshold: Some(0),
        no_csv: true,
        ..Default::default()
    });
    assert!(logwarden::analyze(&log, &cfg).is_err());
}

#[test]
fn test_cli_analyze_prints_tables() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());
    let csv_path = dir.path().join("out.csv");

    Command::cargo_bin("logwarden")
        .unwrap()
        .env_remove("LOGWARDEN_CONFIG")
        .arg("analyze")
        .arg(&log)
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Requests per IP Address:"))
        .stdout(predicate::str::contains("/login (Accessed 13 times)"))
        .stdout(predicate::str::contains("Suspicious Activity Detected:"));

    assert!(csv_path.exists());
}

#[test]
fn test_cli_failed_export_still_prints_tables() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());
    let csv_path = dir.path().join("missing").join("out.csv");

    Command::cargo_bin("logwarden")
        .unwrap()
        .env_remove("LOGWARDEN_CONFIG")
        .arg("analyze")
        .arg(&log)
        .arg("--output")
        .arg(&csv_path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Requests per IP Address:"))
        .stdout(predicate::str::contains("Suspicious Activity Detected:"))
        .stderr(predicate::str::contains("failed to create CSV file"));
}

#[test]
fn test_cli_threshold_flag_hides_suspects() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());

    Command::cargo_bin("logwarden")
        .unwrap()
        .env_remove("LOGWARDEN_CONFIG")
        .current_dir(dir.path())
        .args(["analyze", "--no-csv", "--threshold", "13"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("No suspicious activity detected."));

    assert!(!dir.path().join("log_analysis_results.csv").exists());
}

#[test]
fn test_cli_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());

    let output = Command::cargo_bin("logwarden")
        .unwrap()
        .env_remove("LOGWARDEN_CONFIG")
        .args(["analyze", "--no-csv", "--json"])
        .arg(&log)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["threshold"], 10);
    assert_eq!(json["suspicious_ips"][0]["key"], "203.0.113.5");
    assert_eq!(json["stats"]["lines_read"], 18);
}

#[test]
fn test_cli_config_file_sets_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());
    let config = dir.path().join("logwarden.toml");
    fs::write(&config, "[detection]\nfailed_login_threshold = 1\n").unwrap();

    Command::cargo_bin("logwarden")
        .unwrap()
        .env("LOGWARDEN_CONFIG", &config)
        .args(["analyze", "--no-csv"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.0.2"))
        .stdout(predicate::str::contains("Suspicious Activity Detected:"));
}

#[test]
fn test_cli_empty_log_reports_no_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), "");

    Command::cargo_bin("logwarden")
        .unwrap()
        .env_remove("LOGWARDEN_CONFIG")
        .args(["analyze", "--no-csv"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("No endpoints were observed in the log."));
}

#[test]
fn test_cli_logs_run_start_once() {
    let dir = tempfile::tempdir().unwrap();
    let log = write_log(dir.path(), &fixture_log());

    Command::cargo_bin("logwarden")
        .unwrap()
        .env_remove("LOGWARDEN_CONFIG")
        .env("RUST_LOG", "info")
        .args(["analyze", "--no-csv"])
        .arg(&log)
        .assert()
        .success()
        .stderr(predicate::str::contains("analyzing access log").count(1))
        .stderr(predicate::str::contains("Running log analysis").not());
}

#[test]
fn test_cli_missing_log_fails() {
    Command::cargo_bin("logwarden")
        .unwrap()
        .env_remove("LOGWARDEN_CONFIG")
        .args(["analyze", "--no-csv", "/no/such/access.log"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open log file"));
}
