//! Plain-text dashboard rendering: metric strip, fire-sale table, branch
//! risk bars.

use shelflife_recon::model::PipelineResult;
use shelflife_store::{BranchRisk, FireSaleRow, Metrics};

const BAR_WIDTH: usize = 30;

pub fn dashboard(
    result: &PipelineResult,
    metrics: &Metrics,
    fire_sale: &[FireSaleRow],
    branch_risk: &[BranchRisk],
) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{} — stock risk as of {}\n\n",
        result.meta.config_name, result.meta.as_of,
    ));

    out.push_str(&format!("Total inventory     {:>8} units\n", metrics.total_units));
    out.push_str(&format!("At risk (CRITICAL)  {:>8} units\n", metrics.critical_units));
    out.push_str(&format!("Expired (loss)      {:>8} units\n", metrics.expired_units));
    out.push('\n');

    out.push_str("Fire sale — CRITICAL batches, soonest expiry first\n");
    if fire_sale.is_empty() {
        out.push_str("  (no critical batches)\n");
    } else {
        out.push_str(&format!(
            "  {} {} {} {} {:>5}\n",
            pad_right("PRODUCT", 20),
            pad_right("BATCH", 10),
            pad_right("BRANCH", 16),
            pad_right("EXPIRY", 10),
            "DAYS",
        ));
        for row in fire_sale {
            out.push_str(&format!(
                "  {} {} {} {} {:>5}\n",
                pad_right(&row.product_name, 20),
                pad_right(&row.batch_no, 10),
                pad_right(&row.branch_location, 16),
                pad_right(&row.expiry_date, 10),
                row.days_until_expiry,
            ));
        }
    }
    out.push('\n');

    out.push_str("Risk by branch (CRITICAL + EXPIRED batches)\n");
    if branch_risk.is_empty() {
        out.push_str("  (no at-risk batches)\n");
    } else {
        let max_count = branch_risk.iter().map(|b| b.batch_count).max().unwrap_or(1).max(1);
        for branch in branch_risk {
            let bar_len = (branch.batch_count as usize * BAR_WIDTH) / max_count as usize;
            out.push_str(&format!(
                "  {} {} {}\n",
                pad_right(&branch.branch_location, 16),
                "#".repeat(bar_len.max(1)),
                branch.batch_count,
            ));
        }
    }

    out
}

/// Pad or truncate to exactly `width` columns. Truncation marks with "..".
fn pad_right(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len > width {
        let kept: String = s.chars().take(width.saturating_sub(2)).collect();
        format!("{kept}..")
    } else {
        format!("{}{}", s, " ".repeat(width - len))
    }
}
