//! Dashboard session state: one owned snapshot, replaced wholesale on each
//! successful regeneration.

use chrono::NaiveDate;

use shelflife_recon::config::PipelineConfig;
use shelflife_recon::engine::run;
use shelflife_recon::error::PipelineError;
use shelflife_recon::model::{PipelineInput, PipelineResult, SourceBatch};
use shelflife_synth::generate::{generate, GenConfig};

/// Owns the current reconciled snapshot. A regeneration that fails leaves
/// the previous snapshot in place; there is no partial replacement.
pub struct Session {
    config: PipelineConfig,
    gen: GenConfig,
    current: Option<PipelineResult>,
}

impl Session {
    pub fn new(config: PipelineConfig, gen: GenConfig) -> Self {
        Self { config, gen, current: None }
    }

    /// Pull fresh feeds from the branches and reconcile them. `as_of` is
    /// captured once here and shared by generation and derivation.
    pub fn regenerate(&mut self) -> Result<&PipelineResult, PipelineError> {
        let as_of = chrono::Local::now().date_naive();
        let feeds = generate(&self.gen, as_of);
        let input = PipelineInput {
            batches: feeds
                .into_iter()
                .map(|f| SourceBatch { source: f.source, csv: f.csv })
                .collect(),
        };
        self.refresh_with(&input, as_of)
    }

    /// Reconcile a caller-supplied input. On success the snapshot is
    /// replaced atomically; on failure it is untouched.
    pub fn refresh_with(
        &mut self,
        input: &PipelineInput,
        as_of: NaiveDate,
    ) -> Result<&PipelineResult, PipelineError> {
        let result = run(&self.config, input, as_of)?;
        Ok(self.current.insert(result))
    }

    pub fn current(&self) -> Option<&PipelineResult> {
        self.current.as_ref()
    }
}
