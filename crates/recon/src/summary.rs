use std::collections::HashMap;

use crate::model::{InventoryRecord, InventorySummary, Status};

/// Compute the scalar aggregates from the canonical table.
/// An empty table reports zeros rather than failing.
pub fn compute_summary(records: &[InventoryRecord]) -> InventorySummary {
    let mut status_counts: HashMap<String, usize> = HashMap::new();
    let mut total_units: u64 = 0;
    let mut critical_units: u64 = 0;
    let mut expired_units: u64 = 0;

    for r in records {
        *status_counts.entry(r.status.to_string()).or_insert(0) += 1;

        let units = u64::from(r.quantity);
        total_units += units;
        match r.status {
            Status::Critical => critical_units += units,
            Status::Expired => expired_units += units,
            Status::Healthy => {}
        }
    }

    InventorySummary {
        total_records: records.len(),
        total_units,
        critical_units,
        expired_units,
        status_counts,
    }
}
