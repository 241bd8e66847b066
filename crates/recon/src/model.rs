use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One raw branch feed: CSV text with that source's native headers.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub source: String,
    pub csv: String,
}

/// Batches in concatenation order. Records from the first batch come first
/// in the canonical table; row order within a batch is preserved.
#[derive(Debug, Clone, Default)]
pub struct PipelineInput {
    pub batches: Vec<SourceBatch>,
}

/// A single row after schema mapping and date normalization, before the
/// derived fields are computed.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub source: String,
    pub product_id: String,
    pub product_name: String,
    pub batch_no: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub branch_location: String,
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Expiry-risk classification of one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Expired,
    Critical,
    Healthy,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => write!(f, "EXPIRED"),
            Self::Critical => write!(f, "CRITICAL"),
            Self::Healthy => write!(f, "HEALTHY"),
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

/// One canonical inventory record, independent of source branch schema.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryRecord {
    pub product_id: String,
    pub product_name: String,
    pub batch_no: String,
    pub expiry_date: NaiveDate,
    pub quantity: u32,
    pub branch_location: String,
    pub days_until_expiry: i64,
    pub status: Status,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventorySummary {
    pub total_records: usize,
    pub total_units: u64,
    pub critical_units: u64,
    pub expired_units: u64,
    pub status_counts: HashMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    pub meta: RunMeta,
    pub summary: InventorySummary,
    pub records: Vec<InventoryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub config_name: String,
    pub engine_version: String,
    /// The single shared "now" all derived fields in this run were computed
    /// against.
    pub as_of: NaiveDate,
    pub run_at: String,
}
