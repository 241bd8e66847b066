use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::CATALOG;

/// Generator settings. `seed` pins the RNG for reproducible feeds; tests use
/// it, the CLI leaves it unset unless asked.
#[derive(Debug, Clone)]
pub struct GenConfig {
    pub rows_per_branch: usize,
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self { rows_per_branch: 50, seed: None }
    }
}

/// One raw branch export: source tag + CSV text in that branch's native
/// shape.
#[derive(Debug, Clone)]
pub struct BranchFeed {
    pub source: String,
    pub csv: String,
}

/// The fixed shape of one branch's export.
struct BranchProfile {
    source: &'static str,
    location: &'static str,
    batch_prefix: &'static str,
    date_format: &'static str,
    headers: &'static str,
    quantity_range: RangeInclusive<u32>,
    /// Expiry offsets in days from `as_of`. A small discrete set so boundary
    /// classifications show up in every run.
    expiry_offsets: &'static [i64],
}

const YANGON: BranchProfile = BranchProfile {
    source: "yangon",
    location: "Yangon_Main",
    batch_prefix: "YGN",
    date_format: "%Y-%m-%d",
    headers: "Product_ID,Product_Name,Batch_No,Expiry_Date,Stock_Qty,Warehouse_Loc",
    quantity_range: 50..=500,
    expiry_offsets: &[-10, 30, 60, 365],
};

const MANDALAY: BranchProfile = BranchProfile {
    source: "mandalay",
    location: "Mandalay_Branch",
    batch_prefix: "MDL",
    date_format: "%d/%m/%Y",
    headers: "PID,Name,Batch,Exp_Date,Qty,Location",
    quantity_range: 20..=200,
    expiry_offsets: &[10, 90, 120],
};

/// Generate both branch feeds relative to `as_of`. Yangon first, then
/// Mandalay, matching the concatenation order downstream. Always succeeds.
pub fn generate(config: &GenConfig, as_of: NaiveDate) -> Vec<BranchFeed> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    vec![
        branch_feed(&YANGON, config.rows_per_branch, as_of, &mut rng),
        branch_feed(&MANDALAY, config.rows_per_branch, as_of, &mut rng),
    ]
}

fn branch_feed(
    profile: &BranchProfile,
    rows: usize,
    as_of: NaiveDate,
    rng: &mut StdRng,
) -> BranchFeed {
    let mut csv = String::with_capacity(64 * (rows + 1));
    csv.push_str(profile.headers);
    csv.push('\n');

    for _ in 0..rows {
        let product = CATALOG[rng.gen_range(0..CATALOG.len())];
        let offset = profile.expiry_offsets[rng.gen_range(0..profile.expiry_offsets.len())];
        let expiry = (as_of + Duration::days(offset)).format(profile.date_format);
        let batch_no = format!("{}-{}", profile.batch_prefix, rng.gen_range(1000..=9999));
        let quantity = rng.gen_range(profile.quantity_range.clone());

        // Catalog names carry no commas, so plain joining is CSV-safe here.
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            product.id, product.name, batch_no, expiry, quantity, profile.location,
        ));
    }

    BranchFeed { source: profile.source.into(), csv }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn seeded(rows: usize) -> Vec<BranchFeed> {
        generate(&GenConfig { rows_per_branch: rows, seed: Some(42) }, as_of())
    }

    fn data_lines(feed: &BranchFeed) -> Vec<&str> {
        feed.csv.lines().skip(1).collect()
    }

    #[test]
    fn exact_row_counts() {
        let feeds = seeded(50);
        assert_eq!(feeds.len(), 2);
        assert_eq!(data_lines(&feeds[0]).len(), 50);
        assert_eq!(data_lines(&feeds[1]).len(), 50);
    }

    #[test]
    fn yangon_before_mandalay() {
        let feeds = seeded(5);
        assert_eq!(feeds[0].source, "yangon");
        assert_eq!(feeds[1].source, "mandalay");
    }

    #[test]
    fn native_headers_preserved() {
        let feeds = seeded(1);
        assert!(feeds[0].csv.starts_with("Product_ID,Product_Name,Batch_No,"));
        assert!(feeds[1].csv.starts_with("PID,Name,Batch,"));
    }

    #[test]
    fn date_encodings_diverge() {
        let feeds = seeded(20);
        for line in data_lines(&feeds[0]) {
            let date = line.split(',').nth(3).unwrap();
            assert_eq!(date.len(), 10);
            assert_eq!(&date[4..5], "-", "yangon must emit ISO dates: {line}");
        }
        for line in data_lines(&feeds[1]) {
            let date = line.split(',').nth(3).unwrap();
            assert_eq!(date.len(), 10);
            assert_eq!(&date[2..3], "/", "mandalay must emit day-first dates: {line}");
        }
    }

    #[test]
    fn rows_reference_the_catalog() {
        let feeds = seeded(30);
        for feed in &feeds {
            for line in data_lines(feed) {
                let id = line.split(',').next().unwrap();
                assert!(CATALOG.iter().any(|p| p.id == id), "unknown product id {id}");
            }
        }
    }

    #[test]
    fn quantities_within_branch_ranges() {
        let feeds = seeded(40);
        for line in data_lines(&feeds[0]) {
            let qty: u32 = line.split(',').nth(4).unwrap().parse().unwrap();
            assert!((50..=500).contains(&qty));
        }
        for line in data_lines(&feeds[1]) {
            let qty: u32 = line.split(',').nth(4).unwrap().parse().unwrap();
            assert!((20..=200).contains(&qty));
        }
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = seeded(25);
        let b = seeded(25);
        assert_eq!(a[0].csv, b[0].csv);
        assert_eq!(a[1].csv, b[1].csv);
    }

    #[test]
    fn zero_rows_is_headers_only() {
        let feeds = seeded(0);
        assert_eq!(feeds[0].csv.lines().count(), 1);
        assert_eq!(feeds[1].csv.lines().count(), 1);
    }
}
