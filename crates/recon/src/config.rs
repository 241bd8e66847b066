use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::PipelineError;
use crate::model::Status;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub sources: BTreeMap<String, SourceConfig>,
    #[serde(default)]
    pub classify: ClassifyConfig,
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Per-source mapping entry: raw header name for each canonical field, plus
/// the date format that source is asserted to emit. Parsing never guesses a
/// format; a third branch is a new `[sources.*]` table, not new code.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub columns: ColumnMapping,
    pub date_format: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ColumnMapping {
    pub product_id: String,
    pub product_name: String,
    pub batch_no: String,
    pub expiry_date: String,
    pub quantity: String,
    pub branch_location: String,
}

// ---------------------------------------------------------------------------
// Classification rules
// ---------------------------------------------------------------------------

/// Ordered thresholds. A record takes the status of the first rule whose
/// `below_days` bound exceeds its days-until-expiry; past every rule it is
/// Healthy.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<ClassifyRule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifyRule {
    pub below_days: i64,
    pub status: Status,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self { rules: default_rules() }
    }
}

fn default_rules() -> Vec<ClassifyRule> {
    vec![
        ClassifyRule { below_days: 0, status: Status::Expired },
        ClassifyRule { below_days: 90, status: Status::Critical },
    ]
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl PipelineConfig {
    pub fn from_toml(input: &str) -> Result<Self, PipelineError> {
        let config: PipelineConfig =
            toml::from_str(input).map_err(|e| PipelineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// The two-branch demo config matching the synthetic feeds: Yangon emits
    /// ISO dates, Mandalay emits day-first dates.
    pub fn builtin() -> Self {
        Self {
            name: "two-branch demo".into(),
            sources: BTreeMap::from([
                (
                    "yangon".into(),
                    SourceConfig {
                        columns: ColumnMapping {
                            product_id: "Product_ID".into(),
                            product_name: "Product_Name".into(),
                            batch_no: "Batch_No".into(),
                            expiry_date: "Expiry_Date".into(),
                            quantity: "Stock_Qty".into(),
                            branch_location: "Warehouse_Loc".into(),
                        },
                        date_format: "%Y-%m-%d".into(),
                    },
                ),
                (
                    "mandalay".into(),
                    SourceConfig {
                        columns: ColumnMapping {
                            product_id: "PID".into(),
                            product_name: "Name".into(),
                            batch_no: "Batch".into(),
                            expiry_date: "Exp_Date".into(),
                            quantity: "Qty".into(),
                            branch_location: "Location".into(),
                        },
                        date_format: "%d/%m/%Y".into(),
                    },
                ),
            ]),
            classify: ClassifyConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.sources.is_empty() {
            return Err(PipelineError::ConfigValidation(
                "at least 1 source is required".into(),
            ));
        }

        // Each source's date format must carry a full calendar date.
        for (name, source) in &self.sources {
            for part in ["%Y", "%m", "%d"] {
                if !source.date_format.contains(part) {
                    return Err(PipelineError::ConfigValidation(format!(
                        "source '{name}': date_format '{}' lacks {part}",
                        source.date_format
                    )));
                }
            }
        }

        let rules = &self.classify.rules;
        if rules.is_empty() {
            return Err(PipelineError::ConfigValidation(
                "at least 1 classify rule is required".into(),
            ));
        }
        for pair in rules.windows(2) {
            if pair[0].below_days >= pair[1].below_days {
                return Err(PipelineError::ConfigValidation(format!(
                    "classify rules must be strictly ascending by below_days: {} then {}",
                    pair[0].below_days, pair[1].below_days
                )));
            }
        }
        // Healthy is the fallback past every rule, never a threshold.
        if rules.iter().any(|r| r.status == Status::Healthy) {
            return Err(PipelineError::ConfigValidation(
                "healthy is the fallback status and cannot appear in a rule".into(),
            ));
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
