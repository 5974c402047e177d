//! Core data models used throughout the curriculum pipeline.
//!
//! These types mirror the rows and statistics snapshots handed over by the
//! data-fetch layer (staging rows, document and chunk stats, the production
//! hierarchy) and the derived structures computed from them (staging
//! hierarchy, status counts, phase health).
//!
//! Statistics maps stay keyed by `String` so that an unexpected key coming
//! from the data layer never fails a load; the closed enums below provide
//! typed access into them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Staging
// ---------------------------------------------------------------------------

/// Approval lifecycle of a staging row.
///
/// `pending → review → approved → imported`, with `rejected` reachable from
/// `pending` or `review`. Transitions are enforced by the mutation endpoints,
/// not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StagingStatus {
    Pending,
    Review,
    Approved,
    Rejected,
    Imported,
}

impl StagingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [StagingStatus; 5] = [
        StagingStatus::Pending,
        StagingStatus::Review,
        StagingStatus::Approved,
        StagingStatus::Rejected,
        StagingStatus::Imported,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StagingStatus::Pending => "pending",
            StagingStatus::Review => "review",
            StagingStatus::Approved => "approved",
            StagingStatus::Rejected => "rejected",
            StagingStatus::Imported => "imported",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StagingStatus::Pending => "Pending",
            StagingStatus::Review => "In Review",
            StagingStatus::Approved => "Approved",
            StagingStatus::Rejected => "Rejected",
            StagingStatus::Imported => "Imported",
        }
    }

    /// Parse a wire value. Returns `None` for anything outside the lifecycle.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    /// No further transition leaves this status.
    pub fn is_terminal(self) -> bool {
        matches!(self, StagingStatus::Rejected | StagingStatus::Imported)
    }

    /// Statuses that a bulk approval moves to [`StagingStatus::Approved`].
    pub fn is_bulk_approvable(self) -> bool {
        matches!(self, StagingStatus::Pending | StagingStatus::Review)
    }
}

impl fmt::Display for StagingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The status value a staging row actually carries.
///
/// The data layer may hand back values outside the known lifecycle; those
/// are kept verbatim as [`RowStatus::Unknown`] instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowStatus {
    Known(StagingStatus),
    Unknown(String),
}

impl RowStatus {
    pub fn known(&self) -> Option<StagingStatus> {
        match self {
            RowStatus::Known(status) => Some(*status),
            RowStatus::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RowStatus::Known(status) => status.as_str(),
            RowStatus::Unknown(raw) => raw,
        }
    }
}

impl From<StagingStatus> for RowStatus {
    fn from(status: StagingStatus) -> Self {
        RowStatus::Known(status)
    }
}

/// One extracted curriculum topic candidate, not yet promoted to production.
///
/// Names and orders are immutable once staged; only `status` changes.
/// `(component_name, theme_name, topic_name)` is not a unique key across
/// extraction batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingRow {
    pub id: i64,
    pub subject_id: String,
    pub component_name: String,
    pub component_order: i64,
    pub component_weighting: Option<String>,
    pub theme_name: String,
    pub theme_order: i64,
    pub topic_name: String,
    pub topic_order: i64,
    pub canonical_code: Option<String>,
    pub extraction_batch_id: String,
    pub status: RowStatus,
    pub created_at: DateTime<Utc>,
}

/// Staging rows grouped into component → theme → topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagingHierarchy {
    pub components: Vec<StagingComponentGroup>,
}

impl StagingHierarchy {
    /// Number of topic rows across every component and theme.
    pub fn topic_count(&self) -> usize {
        self.components
            .iter()
            .flat_map(|c| c.themes.iter())
            .map(|t| t.topics.len())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingComponentGroup {
    pub name: String,
    pub order: i64,
    pub weighting: Option<String>,
    pub themes: Vec<StagingThemeGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingThemeGroup {
    pub name: String,
    pub order: i64,
    /// Leaf rows, sorted by `topic_order`. Never deduplicated.
    pub topics: Vec<StagingRow>,
}

/// Per-status tallies over a set of staging rows.
///
/// `total` is the number of rows counted, including rows whose status is
/// unknown, so the five named counters sum to at most `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingStatusCounts {
    pub pending: u64,
    pub review: u64,
    pub approved: u64,
    pub rejected: u64,
    pub imported: u64,
    pub total: u64,
}

impl StagingStatusCounts {
    pub fn get(&self, status: StagingStatus) -> u64 {
        match status {
            StagingStatus::Pending => self.pending,
            StagingStatus::Review => self.review,
            StagingStatus::Approved => self.approved,
            StagingStatus::Rejected => self.rejected,
            StagingStatus::Imported => self.imported,
        }
    }

    /// Sum of the five named counters, saturating at `u64::MAX`.
    pub fn known_total(&self) -> u64 {
        StagingStatus::ALL
            .iter()
            .fold(0u64, |sum, status| sum.saturating_add(self.get(*status)))
    }

    /// Rows a bulk approval would move to `approved`.
    pub fn bulk_approvable(&self) -> u64 {
        self.pending.saturating_add(self.review)
    }
}

// ---------------------------------------------------------------------------
// Documents and chunks
// ---------------------------------------------------------------------------

/// Processing status of a source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Deleted,
}

impl DocumentStatus {
    pub const ALL: [DocumentStatus; 5] = [
        DocumentStatus::Pending,
        DocumentStatus::Processing,
        DocumentStatus::Completed,
        DocumentStatus::Failed,
        DocumentStatus::Deleted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentStatus::Pending => "pending",
            DocumentStatus::Processing => "processing",
            DocumentStatus::Completed => "completed",
            DocumentStatus::Failed => "failed",
            DocumentStatus::Deleted => "deleted",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocumentStatus::Pending => "Pending",
            DocumentStatus::Processing => "Processing",
            DocumentStatus::Completed => "Completed",
            DocumentStatus::Failed => "Failed",
            DocumentStatus::Deleted => "Deleted",
        }
    }
}

/// Kind of source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocType {
    /// Question paper.
    Qp,
    /// Mark scheme.
    Ms,
    /// Examiner report.
    Er,
    /// Grade thresholds.
    Gt,
    /// Sample paper.
    Sp,
    Spec,
    /// Revision guide.
    Rev,
}

impl DocType {
    pub const ALL: [DocType; 7] = [
        DocType::Qp,
        DocType::Ms,
        DocType::Er,
        DocType::Gt,
        DocType::Sp,
        DocType::Spec,
        DocType::Rev,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocType::Qp => "qp",
            DocType::Ms => "ms",
            DocType::Er => "er",
            DocType::Gt => "gt",
            DocType::Sp => "sp",
            DocType::Spec => "spec",
            DocType::Rev => "rev",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DocType::Qp => "Question Papers",
            DocType::Ms => "Mark Schemes",
            DocType::Er => "Examiner Reports",
            DocType::Gt => "Grade Thresholds",
            DocType::Sp => "Sample Papers",
            DocType::Spec => "Specifications",
            DocType::Rev => "Revision Guides",
        }
    }
}

/// Classification assigned to a chunk during enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChunkType {
    Question,
    Answer,
    MarkingCriteria,
    GradeTable,
    ExaminerComment,
    Definition,
    Explanation,
    WorkedExample,
    LearningObjective,
    Practical,
    DataTable,
    General,
}

impl ChunkType {
    pub const ALL: [ChunkType; 12] = [
        ChunkType::Question,
        ChunkType::Answer,
        ChunkType::MarkingCriteria,
        ChunkType::GradeTable,
        ChunkType::ExaminerComment,
        ChunkType::Definition,
        ChunkType::Explanation,
        ChunkType::WorkedExample,
        ChunkType::LearningObjective,
        ChunkType::Practical,
        ChunkType::DataTable,
        ChunkType::General,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ChunkType::Question => "question",
            ChunkType::Answer => "answer",
            ChunkType::MarkingCriteria => "marking_criteria",
            ChunkType::GradeTable => "grade_table",
            ChunkType::ExaminerComment => "examiner_comment",
            ChunkType::Definition => "definition",
            ChunkType::Explanation => "explanation",
            ChunkType::WorkedExample => "worked_example",
            ChunkType::LearningObjective => "learning_objective",
            ChunkType::Practical => "practical",
            ChunkType::DataTable => "data_table",
            ChunkType::General => "general",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChunkType::Question => "Questions",
            ChunkType::Answer => "Answers",
            ChunkType::MarkingCriteria => "Marking Criteria",
            ChunkType::GradeTable => "Grade Tables",
            ChunkType::ExaminerComment => "Examiner Comments",
            ChunkType::Definition => "Definitions",
            ChunkType::Explanation => "Explanations",
            ChunkType::WorkedExample => "Worked Examples",
            ChunkType::LearningObjective => "Learning Objectives",
            ChunkType::Practical => "Practicals",
            ChunkType::DataTable => "Data Tables",
            ChunkType::General => "General",
        }
    }
}

/// Document statistics for one subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub total: u64,
    #[serde(default)]
    pub by_status: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_doc_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_year: BTreeMap<String, u64>,
    #[serde(default)]
    pub enriched_count: u64,
    #[serde(default)]
    pub missing_summary_count: u64,
}

impl DocumentStats {
    /// Count for `status`, zero when the key is absent.
    pub fn status_count(&self, status: DocumentStatus) -> u64 {
        self.by_status.get(status.as_str()).copied().unwrap_or(0)
    }

    pub fn doc_type_count(&self, doc_type: DocType) -> u64 {
        self.by_doc_type.get(doc_type.as_str()).copied().unwrap_or(0)
    }

    /// Number of distinct document-type keys present.
    pub fn distinct_doc_types(&self) -> usize {
        self.by_doc_type.len()
    }
}

/// Chunk and embedding statistics for one subject.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChunkStats {
    pub total_chunks: u64,
    #[serde(default)]
    pub chunks_with_embedding: u64,
    #[serde(default)]
    pub chunks_with_topic: u64,
    #[serde(default)]
    pub chunks_without_topic: u64,
    #[serde(default)]
    pub unique_topics_covered: u64,
    #[serde(default)]
    pub by_chunk_type: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_document: Vec<DocumentChunkCount>,
}

impl ChunkStats {
    pub fn chunk_type_count(&self, chunk_type: ChunkType) -> u64 {
        self.by_chunk_type
            .get(chunk_type.as_str())
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentChunkCount {
    pub document_id: String,
    pub document_title: String,
    pub doc_type: String,
    pub chunk_count: u64,
}

// ---------------------------------------------------------------------------
// Production hierarchy
// ---------------------------------------------------------------------------

/// A promoted curriculum component with its themes and topics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionComponent {
    pub id: String,
    pub component_name: String,
    pub component_weighting: Option<String>,
    pub order_index: i64,
    #[serde(default)]
    pub themes: Vec<ProductionTheme>,
}

impl ProductionComponent {
    pub fn topic_count(&self) -> usize {
        self.themes.iter().map(|t| t.topics.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTheme {
    pub id: String,
    pub theme_name: String,
    pub order_index: i64,
    #[serde(default)]
    pub topics: Vec<ProductionTopic>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionTopic {
    pub id: String,
    pub topic_name: String,
    pub order_index: i64,
    pub canonical_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Phase health
// ---------------------------------------------------------------------------

/// Health verdict for one pipeline phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseHealth {
    /// No data has reached the phase yet.
    Empty,
    /// Some progress, work remains.
    Partial,
    /// Fully satisfied for all current input.
    Complete,
    /// Needs a human: failures or rejections.
    Error,
}

impl PhaseHealth {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseHealth::Empty => "empty",
            PhaseHealth::Partial => "partial",
            PhaseHealth::Complete => "complete",
            PhaseHealth::Error => "error",
        }
    }

    /// Short badge text shown next to a phase.
    pub fn badge_label(self) -> &'static str {
        match self {
            PhaseHealth::Empty => "Empty",
            PhaseHealth::Partial => "Partial",
            PhaseHealth::Complete => "Complete",
            PhaseHealth::Error => "Issues",
        }
    }

    pub fn needs_attention(self) -> bool {
        self == PhaseHealth::Error
    }
}

impl fmt::Display for PhaseHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six content-pipeline phases, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelinePhase {
    Documents,
    Processing,
    Enrichment,
    Chunks,
    Staging,
    Production,
}

impl PipelinePhase {
    pub const ALL: [PipelinePhase; 6] = [
        PipelinePhase::Documents,
        PipelinePhase::Processing,
        PipelinePhase::Enrichment,
        PipelinePhase::Chunks,
        PipelinePhase::Staging,
        PipelinePhase::Production,
    ];

    /// 1-based position in the pipeline.
    pub fn number(self) -> u8 {
        match self {
            PipelinePhase::Documents => 1,
            PipelinePhase::Processing => 2,
            PipelinePhase::Enrichment => 3,
            PipelinePhase::Chunks => 4,
            PipelinePhase::Staging => 5,
            PipelinePhase::Production => 6,
        }
    }

    /// Fixed label carried by [`PipelinePhaseState::label`].
    pub fn label(self) -> &'static str {
        match self {
            PipelinePhase::Documents => "Documents",
            PipelinePhase::Processing => "Processing",
            PipelinePhase::Enrichment => "Enrichment",
            PipelinePhase::Chunks => "Chunks",
            PipelinePhase::Staging => "Staging",
            PipelinePhase::Production => "Production",
        }
    }

    /// Longer heading used for the phase's detail section.
    pub fn title(self) -> &'static str {
        match self {
            PipelinePhase::Documents => "Documents",
            PipelinePhase::Processing => "Processing",
            PipelinePhase::Enrichment => "Enrichment & Metadata",
            PipelinePhase::Chunks => "Chunks & Embeddings",
            PipelinePhase::Staging => "Curriculum Staging",
            PipelinePhase::Production => "Production Tables",
        }
    }
}

/// Output of a phase classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelinePhaseState {
    pub health: PhaseHealth,
    pub label: String,
    pub detail: String,
}

impl PipelinePhaseState {
    pub fn new(phase: PipelinePhase, health: PhaseHealth, detail: impl Into<String>) -> Self {
        Self {
            health,
            label: phase.label().to_string(),
            detail: detail.into(),
        }
    }
}
