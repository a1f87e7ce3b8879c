//! Integration tests for the `dashboard`, `init` and `validate` commands.
//!
//! Each test writes saved SSC responses to a temporary directory and drives the
//! command line through `run` with a capturing host.

use aspm_metrics::Host;
use camino::Utf8PathBuf;
use serde_json::{Value, json};
use std::fs;

/// Test host that captures output to in-memory buffers.
struct TestHost {
    output_buf: Vec<u8>,
    error_buf: Vec<u8>,
}

impl TestHost {
    const fn new() -> Self {
        Self {
            output_buf: Vec::new(),
            error_buf: Vec::new(),
        }
    }

    fn output_str(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }
}

impl Host for TestHost {
    fn output(&mut self) -> impl std::io::Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl std::io::Write {
        &mut self.error_buf
    }

    fn exit(&mut self, _code: i32) {}
}

struct Fixture {
    dir: tempfile::TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(self.dir.path().join(name)).unwrap()
    }

    fn write(&self, name: &str, value: &Value) -> String {
        let path = self.path(name);
        fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
        path.into_string()
    }
}

fn versions() -> Value {
    json!({
        "data": [
            { "id": 10, "name": "1.0", "performanceIndicators": [{ "name": "FortifySecurityRating", "value": 4.5 }] },
            { "id": 11, "name": "2.0", "performanceIndicators": [{ "name": "FortifySecurityRating", "value": 1.5 }] },
            { "id": 12, "name": "3.0", "performanceIndicators": [] }
        ],
        "count": 3,
        "totalCount": 3
    })
}

fn issues() -> Value {
    json!({
        "data": [
            { "issueName": "A", "severity": 1.0, "projectVersionId": 10, "scanStatus": "REVIEWED" },
            { "issueName": "A", "severity": 1.0, "projectVersionId": 11 },
            { "issueName": "B", "severity": 3.0, "projectVersionId": 10 },
            { "issueName": "A", "severity": 5.0, "projectVersionId": 10 },
            { "issueName": "C", "severity": "High", "projectVersionId": 12 },
            { "issueName": "B", "severity": "Low", "projectVersionId": 12 }
        ],
        "count": 6,
        "totalCount": 12
    })
}

fn remediated() -> Value {
    json!({
        "data": [
            { "severity": "High", "foundDate": "2024-01-01T00:00:00.000+0000", "removedDate": "2024-01-11T00:00:00.000+0000" },
            { "severity": "High", "foundDate": "2024-02-10", "removedDate": "2024-02-01" },
            { "severity": "Low", "foundDate": "2024-03-01T00:00:00Z" }
        ]
    })
}

fn history() -> Value {
    json!({
        "data": [
            { "issueName": "A", "projectVersionId": 10, "removed": true },
            { "issueName": "A", "projectVersionId": 10, "removed": false },
            { "issueName": "B", "projectVersionId": 10 }
        ]
    })
}

fn artifacts(scan_types: &[&str]) -> Value {
    let scans: Vec<_> = scan_types.iter().map(|t| json!({ "scanType": t })).collect();
    json!({ "data": [{ "id": 1, "embed": { "scans": scans } }] })
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_dashboard_json_report() {
    let fixture = Fixture::new();
    let report = fixture.path("dashboard.json");

    let args = vec![
        "aspm-metrics".to_string(),
        "dashboard".to_string(),
        "--versions".to_string(),
        fixture.write("versions.json", &versions()),
        "--issues".to_string(),
        fixture.write("issues.json", &issues()),
        "--remediated".to_string(),
        fixture.write("remediated.json", &remediated()),
        "--history".to_string(),
        fixture.write("history.json", &history()),
        "--artifacts".to_string(),
        fixture.write("artifacts-10.json", &artifacts(&["SAST", "SAST", "SCA"])),
        "--artifacts".to_string(),
        fixture.write("artifacts-11.json", &artifacts(&["DAST", "FUTURE"])),
        "--top".to_string(),
        "2".to_string(),
        "--json".to_string(),
        report.to_string(),
    ];

    let mut host = TestHost::new();
    aspm_metrics::run(&mut host, args).unwrap();
    assert!(host.output_str().is_empty(), "console output should be suppressed by --json");

    let dashboard: Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();

    let compliance = &dashboard["compliance"];
    assert_eq!(compliance["pass"], json!(1));
    assert_eq!(compliance["fail"], json!(1));
    assert_eq!(compliance["unassessed"], json!(1));

    let distribution = &dashboard["severity_distribution"];
    assert_eq!(distribution["observed"]["critical"], json!(2));
    assert_eq!(distribution["estimated"]["critical"], json!(4));
    assert_eq!(distribution["observed"]["unknown"], json!(1));
    assert_eq!(distribution["extrapolated"], json!(true));

    let groups = dashboard["top_categories"]["groups"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0]["category"], json!("A"));
    assert_eq!(groups[0]["total"], json!(3));
    assert_eq!(groups[0]["version_count"], json!(2));
    assert_eq!(groups[1]["category"], json!("B"));
    assert_eq!(dashboard["top_categories"]["unrecognized_severity"], json!(1));

    assert_eq!(dashboard["star_rating"]["stars"], json!(1));
    assert_eq!(dashboard["star_rating"]["reason"], json!("Critical issue present"));

    assert_eq!(dashboard["review_rates"]["overall"]["reviewed"], json!(1));
    assert_eq!(dashboard["review_rates"]["overall"]["total"], json!(6));

    let times = &dashboard["remediation_times"];
    assert_eq!(times["by_severity"]["high"]["mean_days"], json!(10.0));
    assert_eq!(times["by_severity"]["low"], Value::Null);
    assert_eq!(times["excluded"]["negative"], json!(1));
    assert_eq!(times["excluded"]["missing_timestamp"], json!(1));

    let candidates = dashboard["recurrence_candidates"].as_array().unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["version_id"], json!("10"));

    let coverage = &dashboard["scan_coverage"];
    assert_eq!(coverage["versions"], json!(2));
    assert_eq!(coverage["counts"]["SAST"], json!(1));
    assert_eq!(coverage["counts"]["DAST"], json!(1));
    assert_eq!(coverage["counts"]["other"], json!(1));
    assert_eq!(coverage["percentages"]["SCA"], json!(50.0));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_dashboard_console_report() {
    let fixture = Fixture::new();
    let issues_path = fixture.write("issues.json", &issues());

    let mut host = TestHost::new();
    aspm_metrics::run(&mut host, ["aspm-metrics", "dashboard", "--issues", issues_path.as_str(), "--color", "never"]).unwrap();

    let output = host.output_str();
    assert!(output.contains("Severity Distribution"));
    assert!(output.contains("Critical : ~4 (2 observed)"));
    assert!(output.contains("6 of 12 issues sampled"));
    assert!(output.contains("1. A : 3"));
    assert!(output.contains("Critical issue present"));
    assert!(!output.contains("Compliance"));
    assert!(!output.contains("\x1b["));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_dashboard_rejects_unusable_response() {
    let fixture = Fixture::new();
    let bad = fixture.write("bad.json", &json!({ "data": "not a list" }));

    let mut host = TestHost::new();
    let result = aspm_metrics::run(&mut host, ["aspm-metrics", "dashboard", "--issues", bad.as_str()]);
    assert!(result.is_err());
    assert!(host.output_str().is_empty());
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_dashboard_honors_config_file() {
    let fixture = Fixture::new();
    let config = fixture.path("aspm.toml");
    fs::write(&config, "top_categories = 1\nunreviewed_status = \"REVIEWED\"\n").unwrap();
    let report = fixture.path("dashboard.json");
    let issues_path = fixture.write("issues.json", &issues());

    let mut host = TestHost::new();
    aspm_metrics::run(
        &mut host,
        [
            "aspm-metrics",
            "dashboard",
            "--issues",
            issues_path.as_str(),
            "--config",
            config.as_str(),
            "--json",
            report.as_str(),
        ],
    )
    .unwrap();

    let dashboard: Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(dashboard["top_categories"]["groups"].as_array().unwrap().len(), 1);
    assert_eq!(dashboard["review_rates"]["overall"]["reviewed"], json!(0));
}

#[test]
#[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
fn test_init_then_validate() {
    let fixture = Fixture::new();
    let config = fixture.path("aspm.toml");

    let mut host = TestHost::new();
    aspm_metrics::run(&mut host, ["aspm-metrics", "init", config.as_str()]).unwrap();
    assert!(host.output_str().contains("Generated default configuration file"));

    let mut host = TestHost::new();
    aspm_metrics::run(&mut host, ["aspm-metrics", "validate", "--config", config.as_str()]).unwrap();
    assert!(host.output_str().contains("Configuration file is valid"));
}
