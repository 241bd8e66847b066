//! `shelflife-recon` — Branch-feed reconciliation engine.
//!
//! Pure engine crate: receives raw branch feeds, returns the canonical
//! inventory table with derived expiry-risk classification.
//! No CLI or IO dependencies.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod model;
pub mod summary;

pub use config::PipelineConfig;
pub use engine::run;
pub use error::PipelineError;
pub use model::{InventoryRecord, PipelineInput, PipelineResult, SourceBatch, Status};
