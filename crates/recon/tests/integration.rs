use std::path::PathBuf;

use chrono::NaiveDate;
use shelflife_recon::config::PipelineConfig;
use shelflife_recon::engine::run;
use shelflife_recon::error::PipelineError;
use shelflife_recon::model::{PipelineInput, SourceBatch, Status};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

fn fixture_config() -> PipelineConfig {
    PipelineConfig::from_toml(&fixture("two-branch.toml")).unwrap()
}

fn fixture_input() -> PipelineInput {
    PipelineInput {
        batches: vec![
            SourceBatch { source: "yangon".into(), csv: fixture("yangon.csv") },
            SourceBatch { source: "mandalay".into(), csv: fixture("mandalay.csv") },
        ],
    }
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
}

#[test]
fn two_branch_end_to_end() {
    let result = run(&fixture_config(), &fixture_input(), as_of()).unwrap();

    // Lossless: 5 Yangon + 3 Mandalay rows in, 8 canonical records out.
    assert_eq!(result.records.len(), 8);
    assert_eq!(result.summary.total_records, 8);

    // Yangon rows precede Mandalay rows, each batch in feed order.
    let batches: Vec<&str> = result.records.iter().map(|r| r.batch_no.as_str()).collect();
    assert_eq!(
        batches,
        ["YGN-1001", "YGN-1002", "YGN-1003", "YGN-1004", "YGN-1005", "MDL-2001", "MDL-2002", "MDL-2003"],
    );

    // Two expired batches at 100 and 50 units: loss metric is exactly 150.
    assert_eq!(result.summary.expired_units, 150);
    assert_eq!(result.summary.critical_units, 240);
    assert_eq!(result.summary.total_units, 980);
}

#[test]
fn status_boundaries_across_both_formats() {
    let result = run(&fixture_config(), &fixture_input(), as_of()).unwrap();
    let by_batch = |batch: &str| result.records.iter().find(|r| r.batch_no == batch).unwrap();

    assert_eq!(by_batch("YGN-1001").status, Status::Expired);
    assert_eq!(by_batch("YGN-1003").days_until_expiry, 5);
    assert_eq!(by_batch("YGN-1003").status, Status::Critical);
    // 90 days out sits exactly on the healthy boundary.
    assert_eq!(by_batch("MDL-2002").days_until_expiry, 90);
    assert_eq!(by_batch("MDL-2002").status, Status::Healthy);
    // Day-first parse: 25/01/2026 is January 25th, 10 days out.
    assert_eq!(by_batch("MDL-2001").days_until_expiry, 10);
    assert_eq!(by_batch("MDL-2001").status, Status::Critical);
}

#[test]
fn same_inputs_same_classification() {
    let a = run(&fixture_config(), &fixture_input(), as_of()).unwrap();
    let b = run(&fixture_config(), &fixture_input(), as_of()).unwrap();
    assert_eq!(a.summary, b.summary);
    let statuses = |r: &shelflife_recon::model::PipelineResult| {
        r.records.iter().map(|x| x.status).collect::<Vec<_>>()
    };
    assert_eq!(statuses(&a), statuses(&b));
}

#[test]
fn one_bad_date_fails_the_run() {
    let input = PipelineInput {
        batches: vec![
            SourceBatch { source: "yangon".into(), csv: fixture("yangon.csv") },
            SourceBatch { source: "mandalay".into(), csv: fixture("mandalay-bad-date.csv") },
        ],
    };
    let err = run(&fixture_config(), &input, as_of()).unwrap_err();
    match err {
        PipelineError::DateParse { source, record_id, value, .. } => {
            assert_eq!(source, "mandalay");
            assert_eq!(record_id, "MDL-2002");
            assert_eq!(value, "2026-04-15");
        }
        other => panic!("expected DateParse, got {other}"),
    }
}

#[test]
fn json_output_round_trips() {
    let result = run(&fixture_config(), &fixture_input(), as_of()).unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["meta"]["config_name"], "Two Branch Fixture");
    assert_eq!(json["meta"]["as_of"], "2026-01-15");
    assert_eq!(json["summary"]["expired_units"], 150);
    assert_eq!(json["records"].as_array().unwrap().len(), 8);
    assert_eq!(json["records"][5]["expiry_date"], "2026-01-25");
}
