//! Pipeline phase health classification.
//!
//! One classifier per pipeline phase. Each maps that phase's statistics
//! snapshot to a [`PipelinePhaseState`]. The decision tables differ per
//! phase, so the six functions stay separate rather than sharing a generic
//! driver. Rules are checked top to bottom; the first match wins.
//!
//! | Phase | Empty | Error | Partial | Complete |
//! |-------|-------|-------|---------|----------|
//! | Documents | no stats / `total == 0` | never | never | any documents |
//! | Processing | no stats / `total == 0` | `failed > 0` | pending or processing | otherwise |
//! | Enrichment | no doc stats / `total == 0` | nothing enriched | otherwise | all docs enriched and all chunks classified |
//! | Chunks | no stats / `total_chunks == 0` | never | some chunks unembedded | otherwise |
//! | Staging | no counts / `total == 0` | `rejected > 0` | otherwise | `imported == total` |
//! | Production | no components | never | no topics anywhere | at least one topic |
//!
//! Documents, Chunks, and Production have no error state.

use crate::models::{
    ChunkStats, DocumentStats, DocumentStatus, PhaseHealth, PipelinePhase, PipelinePhaseState,
    ProductionComponent, StagingStatusCounts,
};

/// Phase 1: have any source documents been ingested?
pub fn document_phase_health(stats: Option<&DocumentStats>) -> PipelinePhaseState {
    let phase = PipelinePhase::Documents;
    let stats = match stats {
        Some(s) if s.total > 0 => s,
        _ => return PipelinePhaseState::new(phase, PhaseHealth::Empty, "No documents"),
    };

    let detail = format!("{} docs ({} types)", stats.total, stats.distinct_doc_types());
    PipelinePhaseState::new(phase, PhaseHealth::Complete, detail)
}

/// Phase 2: have all documents finished processing?
///
/// Any failure reports `error`, even while other documents are still in
/// flight.
pub fn processing_phase_health(stats: Option<&DocumentStats>) -> PipelinePhaseState {
    let phase = PipelinePhase::Processing;
    let stats = match stats {
        Some(s) if s.total > 0 => s,
        _ => return PipelinePhaseState::new(phase, PhaseHealth::Empty, "No documents"),
    };

    let completed = stats.status_count(DocumentStatus::Completed);
    let failed = stats.status_count(DocumentStatus::Failed);
    let in_progress = stats
        .status_count(DocumentStatus::Pending)
        .saturating_add(stats.status_count(DocumentStatus::Processing));

    if failed > 0 {
        return PipelinePhaseState::new(
            phase,
            PhaseHealth::Error,
            format!("{} completed, {} failed", completed, failed),
        );
    }

    if in_progress > 0 {
        return PipelinePhaseState::new(
            phase,
            PhaseHealth::Partial,
            format!("{} completed, {} in progress", completed, in_progress),
        );
    }

    PipelinePhaseState::new(
        phase,
        PhaseHealth::Complete,
        format!("{} completed", completed),
    )
}

/// Phase 3: are documents enriched and chunks classified to topics?
///
/// A subject with documents but no chunk stats (or zero chunks) only needs
/// its documents enriched to be complete.
pub fn enrichment_phase_health(
    doc_stats: Option<&DocumentStats>,
    chunk_stats: Option<&ChunkStats>,
) -> PipelinePhaseState {
    let phase = PipelinePhase::Enrichment;
    let docs = match doc_stats {
        Some(s) if s.total > 0 => s,
        _ => return PipelinePhaseState::new(phase, PhaseHealth::Empty, "No documents"),
    };

    let enriched = docs.enriched_count;
    let total = docs.total;
    let total_chunks = chunk_stats.map_or(0, |c| c.total_chunks);
    let classified = chunk_stats.map_or(0, |c| c.chunks_with_topic);

    if enriched == 0 {
        return PipelinePhaseState::new(
            phase,
            PhaseHealth::Error,
            format!("0/{} enriched", total),
        );
    }

    let mut parts = vec![format!("{}/{} enriched", enriched, total)];
    if total_chunks > 0 {
        parts.push(format!("{}/{} classified", classified, total_chunks));
    }

    let all_docs_enriched = enriched >= total;
    let all_chunks_classified = total_chunks == 0 || classified >= total_chunks;
    let health = if all_docs_enriched && all_chunks_classified {
        PhaseHealth::Complete
    } else {
        PhaseHealth::Partial
    };

    PipelinePhaseState::new(phase, health, parts.join(", "))
}

/// Phase 4: does every chunk have an embedding?
pub fn chunk_phase_health(stats: Option<&ChunkStats>) -> PipelinePhaseState {
    let phase = PipelinePhase::Chunks;
    let stats = match stats {
        Some(s) if s.total_chunks > 0 => s,
        _ => return PipelinePhaseState::new(phase, PhaseHealth::Empty, "No chunks"),
    };

    let with_embedding = stats.chunks_with_embedding;
    let total = stats.total_chunks;

    if with_embedding < total {
        return PipelinePhaseState::new(
            phase,
            PhaseHealth::Partial,
            format!("{}/{} embedded", with_embedding, total),
        );
    }

    PipelinePhaseState::new(phase, PhaseHealth::Complete, format!("{} chunks", total))
}

/// Phase 5: has every staging row been imported?
///
/// Rejections report `error` even when other rows are approved or
/// imported.
pub fn staging_phase_health(counts: Option<&StagingStatusCounts>) -> PipelinePhaseState {
    let phase = PipelinePhase::Staging;
    let counts = match counts {
        Some(c) if c.total > 0 => c,
        _ => return PipelinePhaseState::new(phase, PhaseHealth::Empty, "No staging data"),
    };

    if counts.rejected > 0 {
        return PipelinePhaseState::new(
            phase,
            PhaseHealth::Error,
            format!("{} rejected, {} approved", counts.rejected, counts.approved),
        );
    }

    if counts.imported == counts.total {
        return PipelinePhaseState::new(
            phase,
            PhaseHealth::Complete,
            format!("{} imported", counts.imported),
        );
    }

    let mut parts = Vec::new();
    if counts.pending > 0 {
        parts.push(format!("{} pending", counts.pending));
    }
    if counts.review > 0 {
        parts.push(format!("{} in review", counts.review));
    }
    if counts.approved > 0 {
        parts.push(format!("{} approved", counts.approved));
    }
    // Only imported rows plus rows with unrecognised statuses remain.
    if parts.is_empty() {
        parts.push(format!("{}/{} imported", counts.imported, counts.total));
    }

    PipelinePhaseState::new(phase, PhaseHealth::Partial, parts.join(", "))
}

/// Phase 6: has anything been promoted to the production tables?
///
/// Detail is `components/themes/topics`.
pub fn production_phase_health(components: &[ProductionComponent]) -> PipelinePhaseState {
    let phase = PipelinePhase::Production;
    if components.is_empty() {
        return PipelinePhaseState::new(phase, PhaseHealth::Empty, "No production data");
    }

    let themes: usize = components.iter().map(|c| c.themes.len()).sum();
    let topics: usize = components.iter().map(ProductionComponent::topic_count).sum();

    let health = if topics > 0 {
        PhaseHealth::Complete
    } else {
        PhaseHealth::Partial
    };

    PipelinePhaseState::new(
        phase,
        health,
        format!("{}/{}/{}", components.len(), themes, topics),
    )
}
