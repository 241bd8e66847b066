use chrono::NaiveDate;

use crate::config::ClassifyRule;
use crate::model::{InventoryRecord, NormalizedRow, Status};

/// Classify a days-until-expiry value against the ordered rule list.
/// First rule whose `below_days` bound exceeds the value wins; past every
/// rule the batch is Healthy.
pub fn classify(days_until_expiry: i64, rules: &[ClassifyRule]) -> Status {
    for rule in rules {
        if days_until_expiry < rule.below_days {
            return rule.status;
        }
    }
    Status::Healthy
}

/// Compute the derived fields for every normalized row against one shared
/// `as_of` date. A single run never mixes evaluation instants, so a batch
/// sitting exactly on a threshold cannot flap within the run.
pub fn derive_records(
    rows: &[NormalizedRow],
    as_of: NaiveDate,
    rules: &[ClassifyRule],
) -> Vec<InventoryRecord> {
    rows.iter()
        .map(|row| {
            let days_until_expiry = (row.expiry_date - as_of).num_days();
            InventoryRecord {
                product_id: row.product_id.clone(),
                product_name: row.product_name.clone(),
                batch_no: row.batch_no.clone(),
                expiry_date: row.expiry_date,
                quantity: row.quantity,
                branch_location: row.branch_location.clone(),
                days_until_expiry,
                status: classify(days_until_expiry, rules),
            }
        })
        .collect()
}
