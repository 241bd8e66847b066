use chrono::NaiveDate;

use crate::config::SourceConfig;
use crate::error::PipelineError;
use crate::model::NormalizedRow;

/// Load one source's CSV feed into normalized rows, applying that source's
/// column mapping and asserted date format.
///
/// The date format is a fixed property of the source, never inferred from
/// the value: "05/04/2026" under a day-first source is April 5th, full stop.
/// Any row that fails to parse aborts the whole batch.
pub fn load_source_rows(
    source: &str,
    csv_data: &str,
    config: &SourceConfig,
) -> Result<Vec<NormalizedRow>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| PipelineError::Csv(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = &config.columns;

    let idx = |name: &str| -> Result<usize, PipelineError> {
        headers.iter().position(|h| h == name).ok_or_else(|| PipelineError::MissingColumn {
            source: source.into(),
            column: name.into(),
        })
    };

    let product_id_idx = idx(&col.product_id)?;
    let product_name_idx = idx(&col.product_name)?;
    let batch_no_idx = idx(&col.batch_no)?;
    let expiry_date_idx = idx(&col.expiry_date)?;
    let quantity_idx = idx(&col.quantity)?;
    let branch_location_idx = idx(&col.branch_location)?;

    let mut rows = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|e| PipelineError::Csv(e.to_string()))?;

        let product_id = record.get(product_id_idx).unwrap_or("").to_string();
        let product_name = record.get(product_name_idx).unwrap_or("").to_string();
        let batch_no = record.get(batch_no_idx).unwrap_or("").to_string();
        let branch_location = record.get(branch_location_idx).unwrap_or("").to_string();

        let date_str = record.get(expiry_date_idx).unwrap_or("");
        let expiry_date =
            NaiveDate::parse_from_str(date_str, &config.date_format).map_err(|_| {
                PipelineError::DateParse {
                    source: source.into(),
                    record_id: batch_no.clone(),
                    value: date_str.into(),
                    format: config.date_format.clone(),
                }
            })?;

        let quantity_str = record.get(quantity_idx).unwrap_or("");
        let quantity: u32 =
            quantity_str.parse().map_err(|_| PipelineError::QuantityParse {
                source: source.into(),
                record_id: batch_no.clone(),
                value: quantity_str.into(),
            })?;

        rows.push(NormalizedRow {
            source: source.into(),
            product_id,
            product_name,
            batch_no,
            expiry_date,
            quantity,
            branch_location,
        });
    }

    Ok(rows)
}
