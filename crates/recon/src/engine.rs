use chrono::NaiveDate;

use crate::classify::derive_records;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::ingest::load_source_rows;
use crate::model::{NormalizedRow, PipelineInput, PipelineResult, RunMeta};
use crate::summary::compute_summary;

/// Run the reconciliation pipeline: map each batch through its source's
/// schema entry, concatenate in input order, derive expiry risk against the
/// shared `as_of` date, and summarize.
///
/// Any unparseable row fails the whole run; the caller keeps its previous
/// result. The input is never mutated.
pub fn run(
    config: &PipelineConfig,
    input: &PipelineInput,
    as_of: NaiveDate,
) -> Result<PipelineResult, PipelineError> {
    let mut rows: Vec<NormalizedRow> = Vec::new();
    for batch in &input.batches {
        let source_config = config
            .sources
            .get(&batch.source)
            .ok_or_else(|| PipelineError::UnknownSource(batch.source.clone()))?;
        rows.extend(load_source_rows(&batch.source, &batch.csv, source_config)?);
    }

    let records = derive_records(&rows, as_of, &config.classify.rules);
    let summary = compute_summary(&records);

    Ok(PipelineResult {
        meta: RunMeta {
            config_name: config.name.clone(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            as_of,
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        summary,
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SourceBatch, Status};

    const YGN_CSV: &str = "\
Product_ID,Product_Name,Batch_No,Expiry_Date,Stock_Qty,Warehouse_Loc
P001,Amoxicillin 500mg,YGN-1001,2026-01-05,100,Yangon_Main
P002,Paracetamol 500mg,YGN-1002,2026-02-20,200,Yangon_Main
";

    const MDL_CSV: &str = "\
PID,Name,Batch,Exp_Date,Qty,Location
P003,Cetirizine 10mg,MDL-2001,25/12/2026,40,Mandalay_Branch
P004,Vitamin C 1000mg,MDL-2002,01/01/2026,60,Mandalay_Branch
";

    fn input() -> PipelineInput {
        PipelineInput {
            batches: vec![
                SourceBatch { source: "yangon".into(), csv: YGN_CSV.into() },
                SourceBatch { source: "mandalay".into(), csv: MDL_CSV.into() },
            ],
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn lossless_concatenation_in_input_order() {
        let result = run(&PipelineConfig::builtin(), &input(), as_of()).unwrap();
        // 2 + 2 in, 4 out: no drops, no duplicates.
        assert_eq!(result.records.len(), 4);
        let batches: Vec<&str> = result.records.iter().map(|r| r.batch_no.as_str()).collect();
        assert_eq!(batches, ["YGN-1001", "YGN-1002", "MDL-2001", "MDL-2002"]);
    }

    #[test]
    fn derived_fields_against_shared_as_of() {
        let result = run(&PipelineConfig::builtin(), &input(), as_of()).unwrap();
        assert_eq!(result.meta.as_of, as_of());

        let by_batch = |batch: &str| {
            result.records.iter().find(|r| r.batch_no == batch).unwrap()
        };
        // 2026-01-05 is 10 days past as_of
        assert_eq!(by_batch("YGN-1001").days_until_expiry, -10);
        assert_eq!(by_batch("YGN-1001").status, Status::Expired);
        // 2026-02-20 is 36 days out
        assert_eq!(by_batch("YGN-1002").days_until_expiry, 36);
        assert_eq!(by_batch("YGN-1002").status, Status::Critical);
        // Day-first 25/12/2026 is Dec 25th, 344 days out
        assert_eq!(by_batch("MDL-2001").days_until_expiry, 344);
        assert_eq!(by_batch("MDL-2001").status, Status::Healthy);
        assert_eq!(by_batch("MDL-2002").days_until_expiry, -14);
        assert_eq!(by_batch("MDL-2002").status, Status::Expired);
    }

    #[test]
    fn summary_attached() {
        let result = run(&PipelineConfig::builtin(), &input(), as_of()).unwrap();
        assert_eq!(result.summary.total_records, 4);
        assert_eq!(result.summary.total_units, 400);
        assert_eq!(result.summary.expired_units, 160);
        assert_eq!(result.summary.critical_units, 200);
    }

    #[test]
    fn unknown_source_rejected() {
        let input = PipelineInput {
            batches: vec![SourceBatch { source: "naypyidaw".into(), csv: YGN_CSV.into() }],
        };
        let err = run(&PipelineConfig::builtin(), &input, as_of()).unwrap_err();
        assert!(matches!(err, PipelineError::UnknownSource(ref s) if s == "naypyidaw"));
    }

    #[test]
    fn bad_date_fails_whole_run() {
        let bad_mdl = MDL_CSV.replace("01/01/2026", "2026-01-01");
        let input = PipelineInput {
            batches: vec![
                SourceBatch { source: "yangon".into(), csv: YGN_CSV.into() },
                SourceBatch { source: "mandalay".into(), csv: bad_mdl },
            ],
        };
        let err = run(&PipelineConfig::builtin(), &input, as_of()).unwrap_err();
        assert!(matches!(err, PipelineError::DateParse { .. }));
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let result = run(&PipelineConfig::builtin(), &PipelineInput::default(), as_of()).unwrap();
        assert!(result.records.is_empty());
        assert_eq!(result.summary.total_units, 0);
    }
}
