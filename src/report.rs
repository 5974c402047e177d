//! Pipeline report assembly and export.
//!
//! Derives everything the admin dashboard shows for one subject (the six
//! phase states, staging status counts, labelled document and chunk
//! breakdowns, and the grouped staging hierarchy) from a single
//! [`PipelineSnapshot`], and writes the result as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use curriculum_pipeline_core::hierarchy::build_hierarchy;
use curriculum_pipeline_core::models::{
    ChunkStats, ChunkType, DocType, DocumentStats, DocumentStatus, PipelinePhase,
    PipelinePhaseState, StagingHierarchy, StagingStatus, StagingStatusCounts,
};
use curriculum_pipeline_core::pipeline::{compute_pipeline_phases, PipelineInputs};

use crate::config::Config;
use crate::snapshot::{validate_subject_id, PipelineSnapshot};

/// One phase's state, with its position and section heading.
#[derive(Debug, Clone, Serialize)]
pub struct PhaseEntry {
    pub number: u8,
    pub title: &'static str,
    #[serde(flatten)]
    pub state: PipelinePhaseState,
}

/// A non-zero count for one known key, with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelledCount {
    pub key: &'static str,
    pub label: &'static str,
    pub count: u64,
}

/// Labelled counts for the document and chunk sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Breakdown {
    pub documents_by_status: Vec<LabelledCount>,
    pub documents_by_type: Vec<LabelledCount>,
    pub chunks_by_type: Vec<LabelledCount>,
    pub staging_by_status: Vec<LabelledCount>,
}

impl Breakdown {
    /// Keys outside the known enums are left out.
    pub fn from_stats(
        documents: Option<&DocumentStats>,
        chunks: Option<&ChunkStats>,
        staging: Option<&StagingStatusCounts>,
    ) -> Self {
        let mut breakdown = Breakdown::default();

        if let Some(docs) = documents {
            breakdown.documents_by_status = DocumentStatus::ALL
                .iter()
                .map(|s| (s.as_str(), s.label(), docs.status_count(*s)))
                .filter_map(labelled)
                .collect();
            breakdown.documents_by_type = DocType::ALL
                .iter()
                .map(|t| (t.as_str(), t.label(), docs.doc_type_count(*t)))
                .filter_map(labelled)
                .collect();
        }

        if let Some(chunks) = chunks {
            breakdown.chunks_by_type = ChunkType::ALL
                .iter()
                .map(|t| (t.as_str(), t.label(), chunks.chunk_type_count(*t)))
                .filter_map(labelled)
                .collect();
        }

        if let Some(counts) = staging {
            breakdown.staging_by_status = StagingStatus::ALL
                .iter()
                .map(|s| (s.as_str(), s.label(), counts.get(*s)))
                .filter_map(labelled)
                .collect();
        }

        breakdown
    }
}

fn labelled((key, label, count): (&'static str, &'static str, u64)) -> Option<LabelledCount> {
    (count > 0).then_some(LabelledCount { key, label, count })
}

/// Everything derived from one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub subject_id: String,
    pub generated_at: DateTime<Utc>,
    /// Six entries, in pipeline order.
    pub phases: Vec<PhaseEntry>,
    pub staging_counts: Option<StagingStatusCounts>,
    pub breakdown: Breakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<StagingHierarchy>,
}

impl PipelineReport {
    /// Phases whose health needs an operator.
    pub fn attention_phases(&self) -> Vec<&PhaseEntry> {
        self.phases
            .iter()
            .filter(|p| p.state.health.needs_attention())
            .collect()
    }
}

/// Build a report from one snapshot.
pub fn build_report(config: &Config, snapshot: &PipelineSnapshot) -> PipelineReport {
    let inputs = PipelineInputs::from_staging_rows(
        snapshot.documents.as_ref(),
        snapshot.chunks.as_ref(),
        &snapshot.staging,
        &snapshot.production,
    );
    let phases: Vec<PhaseEntry> = PipelinePhase::ALL
        .iter()
        .zip(compute_pipeline_phases(&inputs))
        .map(|(phase, state)| PhaseEntry {
            number: phase.number(),
            title: phase.title(),
            state,
        })
        .collect();

    let hierarchy = if config.report.include_hierarchy && !snapshot.staging.is_empty() {
        Some(build_hierarchy(&snapshot.staging))
    } else {
        None
    };

    for entry in &phases {
        let phase = &entry.state;
        debug!(
            subject = %snapshot.subject_id,
            phase = %phase.label,
            health = %phase.health,
            detail = %phase.detail,
            "classified phase"
        );
        if phase.health.needs_attention() {
            warn!(
                subject = %snapshot.subject_id,
                phase = %phase.label,
                detail = %phase.detail,
                "phase needs attention"
            );
        }
    }

    PipelineReport {
        subject_id: snapshot.subject_id.clone(),
        generated_at: Utc::now(),
        phases,
        staging_counts: inputs.staging_counts,
        breakdown: Breakdown::from_stats(
            snapshot.documents.as_ref(),
            snapshot.chunks.as_ref(),
            inputs.staging_counts.as_ref(),
        ),
        hierarchy,
    }
}

/// Write `<report_dir>/<subject_id>.json`, returning the path written.
pub fn write_report(config: &Config, report: &PipelineReport) -> Result<PathBuf> {
    validate_subject_id(&report.subject_id)
        .with_context(|| "Refusing to write report")?;

    let dir = config.report_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create report directory: {}", dir.display()))?;

    let json = if config.report.pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .with_context(|| "Failed to serialize report")?;

    let path = dir.join(format!("{}.json", report.subject_id));
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    info!(
        subject = %report.subject_id,
        path = %path.display(),
        attention = report.attention_phases().len(),
        "wrote pipeline report"
    );

    Ok(path)
}
