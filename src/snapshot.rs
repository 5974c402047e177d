//! Statistics snapshot loading.
//!
//! A snapshot is everything the data-fetch layer produced for one subject at
//! one point in time: document stats, chunk stats, staging rows, and the
//! production hierarchy. It is stored as a single JSON file per subject so
//! that every derived structure is computed from one consistent view.
//!
//! ```json
//! {
//!   "subject_id": "bio-gcse",
//!   "documents": { "total": 10, "by_status": { "completed": 10 }, ... },
//!   "chunks": { "total_chunks": 240, "chunks_with_embedding": 240, ... },
//!   "staging": [ { "id": 1, "component_name": "Paper 1", ... } ],
//!   "production": []
//! }
//! ```

use std::path::{Component, Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use curriculum_pipeline_core::models::{ChunkStats, DocumentStats, ProductionComponent, StagingRow};

use crate::config::Config;

/// One subject's pipeline data at a single point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSnapshot {
    pub subject_id: String,
    #[serde(default)]
    pub documents: Option<DocumentStats>,
    #[serde(default)]
    pub chunks: Option<ChunkStats>,
    #[serde(default)]
    pub staging: Vec<StagingRow>,
    #[serde(default)]
    pub production: Vec<ProductionComponent>,
}

impl PipelineSnapshot {
    /// Staging rows whose status falls outside the known lifecycle.
    pub fn unknown_status_rows(&self) -> impl Iterator<Item = &StagingRow> {
        self.staging.iter().filter(|r| r.status.known().is_none())
    }
}

/// Parse a snapshot from JSON text.
pub fn parse_snapshot(content: &str) -> Result<PipelineSnapshot> {
    let snapshot: PipelineSnapshot =
        serde_json::from_str(content).with_context(|| "Failed to parse snapshot JSON")?;

    for row in snapshot.unknown_status_rows() {
        warn!(
            subject = %snapshot.subject_id,
            row_id = row.id,
            status = row.status.as_str(),
            "staging row has unrecognised status; counted in total only"
        );
    }

    Ok(snapshot)
}

/// Check that `subject_id` can name a file inside a configured directory.
///
/// Rejects blank ids, path separators, `..`, and anything that is not a
/// single plain path component.
pub fn validate_subject_id(subject_id: &str) -> Result<()> {
    if subject_id.trim().is_empty() {
        anyhow::bail!("subject id must not be empty");
    }

    if subject_id.contains(|c: char| c == '/' || c == '\\') || subject_id.contains("..") {
        anyhow::bail!("subject id '{}' must not contain path separators or '..'", subject_id);
    }

    let path = Path::new(subject_id);
    let mut components = path.components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if path.is_absolute() || !single_normal {
        anyhow::bail!("subject id '{}' is not a plain name", subject_id);
    }

    Ok(())
}

/// Load `<snapshot.dir>/<subject_id>.json`.
pub fn load_snapshot(config: &Config, subject_id: &str) -> Result<PipelineSnapshot> {
    validate_subject_id(subject_id)?;

    let path = config.snapshot_path(subject_id);
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;

    let snapshot = parse_snapshot(&content)
        .with_context(|| format!("Invalid snapshot: {}", path.display()))?;

    if snapshot.subject_id != subject_id {
        anyhow::bail!(
            "Snapshot {} is for subject '{}', expected '{}'",
            path.display(),
            snapshot.subject_id,
            subject_id
        );
    }

    debug!(
        subject = subject_id,
        staging_rows = snapshot.staging.len(),
        production_components = snapshot.production.len(),
        has_documents = snapshot.documents.is_some(),
        has_chunks = snapshot.chunks.is_some(),
        "loaded snapshot"
    );

    Ok(snapshot)
}
