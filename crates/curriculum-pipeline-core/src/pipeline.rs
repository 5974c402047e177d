//! Assembly of the six-phase status strip.
//!
//! Runs every phase classifier against one snapshot and returns the states
//! in [`PipelinePhase::ALL`] order. The classifiers are independent of one
//! another; only the staging phase consumes a derived input (the status
//! counts).

use crate::health::{
    chunk_phase_health, document_phase_health, enrichment_phase_health, processing_phase_health,
    production_phase_health, staging_phase_health,
};
use crate::models::{
    ChunkStats, DocumentStats, PipelinePhase, PipelinePhaseState, ProductionComponent, StagingRow,
    StagingStatusCounts,
};
use crate::status::count_by_status;

/// Borrowed view over one consistent statistics snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineInputs<'a> {
    pub documents: Option<&'a DocumentStats>,
    pub chunks: Option<&'a ChunkStats>,
    pub staging_counts: Option<StagingStatusCounts>,
    pub production: &'a [ProductionComponent],
}

impl<'a> PipelineInputs<'a> {
    /// Build inputs, deriving staging counts from `rows`.
    ///
    /// An empty row list yields no counts at all.
    pub fn from_staging_rows(
        documents: Option<&'a DocumentStats>,
        chunks: Option<&'a ChunkStats>,
        rows: &[StagingRow],
        production: &'a [ProductionComponent],
    ) -> Self {
        let staging_counts = if rows.is_empty() {
            None
        } else {
            Some(count_by_status(rows))
        };
        Self {
            documents,
            chunks,
            staging_counts,
            production,
        }
    }
}

/// Classify one phase.
pub fn phase_state(phase: PipelinePhase, inputs: &PipelineInputs<'_>) -> PipelinePhaseState {
    match phase {
        PipelinePhase::Documents => document_phase_health(inputs.documents),
        PipelinePhase::Processing => processing_phase_health(inputs.documents),
        PipelinePhase::Enrichment => enrichment_phase_health(inputs.documents, inputs.chunks),
        PipelinePhase::Chunks => chunk_phase_health(inputs.chunks),
        PipelinePhase::Staging => staging_phase_health(inputs.staging_counts.as_ref()),
        PipelinePhase::Production => production_phase_health(inputs.production),
    }
}

/// Classify all six phases, in pipeline order.
pub fn compute_pipeline_phases(inputs: &PipelineInputs<'_>) -> Vec<PipelinePhaseState> {
    PipelinePhase::ALL
        .iter()
        .map(|phase| phase_state(*phase, inputs))
        .collect()
}
