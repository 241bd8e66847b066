//! `shelflife-store` — read-only query surface for the presentation layer.
//!
//! Loads one reconciled run into an in-memory SQLite table and answers the
//! dashboard's fixed queries. The store takes no writes after load; a new
//! run gets a new store.

use rusqlite::{params, Connection};
use serde::Serialize;

use shelflife_recon::model::InventoryRecord;

const SCHEMA: &str = r#"
CREATE TABLE inventory (
    product_id        TEXT NOT NULL,
    product_name      TEXT NOT NULL,
    batch_no          TEXT NOT NULL,
    expiry_date       TEXT NOT NULL,    -- ISO YYYY-MM-DD
    quantity          INTEGER NOT NULL,
    branch_location   TEXT NOT NULL,
    days_until_expiry INTEGER NOT NULL,
    status            TEXT NOT NULL     -- EXPIRED | CRITICAL | HEALTHY
);
"#;

/// The three scalar dashboard metrics, in units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub total_units: i64,
    pub critical_units: i64,
    pub expired_units: i64,
}

/// One row of the fire-sale projection: CRITICAL batches, soonest expiry
/// first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FireSaleRow {
    pub product_name: String,
    pub batch_no: String,
    pub branch_location: String,
    pub expiry_date: String,
    pub days_until_expiry: i64,
}

/// Count of at-risk (CRITICAL or EXPIRED) batches for one branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchRisk {
    pub branch_location: String,
    pub batch_count: i64,
}

pub struct InventoryStore {
    conn: Connection,
}

impl InventoryStore {
    /// Build a fresh in-memory table from one run's canonical records.
    pub fn load(records: &[InventoryRecord]) -> Result<Self, String> {
        let conn = Connection::open_in_memory().map_err(|e| e.to_string())?;
        conn.execute_batch(SCHEMA).map_err(|e| e.to_string())?;

        conn.execute("BEGIN TRANSACTION", []).map_err(|e| e.to_string())?;
        {
            let mut stmt = conn
                .prepare(
                    "INSERT INTO inventory (product_id, product_name, batch_no, expiry_date, quantity, branch_location, days_until_expiry, status) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                )
                .map_err(|e| e.to_string())?;

            for r in records {
                stmt.execute(params![
                    r.product_id,
                    r.product_name,
                    r.batch_no,
                    r.expiry_date.to_string(),
                    i64::from(r.quantity),
                    r.branch_location,
                    r.days_until_expiry,
                    r.status.to_string(),
                ])
                .map_err(|e| e.to_string())?;
            }
        }
        conn.execute("COMMIT", []).map_err(|e| e.to_string())?;

        Ok(Self { conn })
    }

    /// Total, at-risk, and expired unit counts. Empty table reports zeros.
    pub fn metrics(&self) -> Result<Metrics, String> {
        self.conn
            .query_row(
                "SELECT
                    COALESCE(SUM(quantity), 0),
                    COALESCE(SUM(CASE WHEN status = 'CRITICAL' THEN quantity ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN status = 'EXPIRED' THEN quantity ELSE 0 END), 0)
                 FROM inventory",
                [],
                |row| {
                    Ok(Metrics {
                        total_units: row.get(0)?,
                        critical_units: row.get(1)?,
                        expired_units: row.get(2)?,
                    })
                },
            )
            .map_err(|e| e.to_string())
    }

    /// CRITICAL batches ordered by days until expiry, soonest first.
    pub fn fire_sale(&self) -> Result<Vec<FireSaleRow>, String> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT product_name, batch_no, branch_location, expiry_date, days_until_expiry
                 FROM inventory
                 WHERE status = 'CRITICAL'
                 ORDER BY days_until_expiry ASC",
            )
            .map_err(|e| e.to_string())?;

        let rows = stmt
            .query_map([], |row| {
                Ok(FireSaleRow {
                    product_name: row.get(0)?,
                    batch_no: row.get(1)?,
                    branch_location: row.get(2)?,
                    expiry_date: row.get(3)?,
                    days_until_expiry: row.get(4)?,
                })
            })
            .map_err(|e| e.to_string())?;

        rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
    }

    /// At-risk batch counts per branch, branches in name order.
    pub fn branch_risk(&self) -> Result<Vec<BranchRisk>, String> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT branch_location, COUNT(*)
                 FROM inventory
                 WHERE status IN ('CRITICAL', 'EXPIRED')
                 GROUP BY branch_location
                 ORDER BY branch_location",
            )
            .map_err(|e| e.to_string())?;

        let rows = stmt
            .query_map([], |row| {
                Ok(BranchRisk { branch_location: row.get(0)?, batch_count: row.get(1)? })
            })
            .map_err(|e| e.to_string())?;

        rows.collect::<Result<Vec<_>, _>>().map_err(|e| e.to_string())
    }
}
