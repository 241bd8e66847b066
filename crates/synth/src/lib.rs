//! `shelflife-synth` — Synthetic branch-feed generator.
//!
//! Produces the two demo branch exports as raw CSV text, each with its own
//! headers, date encoding, quantity range, and expiry-offset set. The format
//! divergence between the feeds is the point: the reconciliation engine's
//! correctness is defined against it.

pub mod catalog;
pub mod generate;

pub use catalog::{Product, CATALOG};
pub use generate::{generate, BranchFeed, GenConfig};
