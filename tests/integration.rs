use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use curriculum_pipeline::config::load_config;
use curriculum_pipeline::pipeline_core::models::PhaseHealth;
use curriculum_pipeline::report::{build_report, write_report};
use curriculum_pipeline::snapshot::{load_snapshot, parse_snapshot};

fn staging_row(
    id: i64,
    component: (&str, i64),
    theme: (&str, i64),
    topic: (&str, i64),
    status: &str,
) -> String {
    format!(
        r#"{{"id": {}, "subject_id": "bio-gcse", "component_name": "{}", "component_order": {},
  "component_weighting": "50%", "theme_name": "{}", "theme_order": {},
  "topic_name": "{}", "topic_order": {}, "canonical_code": null,
  "extraction_batch_id": "batch-1", "status": "{}", "created_at": "2026-02-27T12:00:00Z"}}"#,
        id, component.0, component.1, theme.0, theme.1, topic.0, topic.1, status
    )
}

fn setup_test_env(extra_report: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let snapshots = root.join("snapshots");
    fs::create_dir_all(&snapshots).unwrap();

    let rows = [
        staging_row(4, ("Chemistry", 2), ("Atomic structure", 1), ("Atoms", 1), "approved"),
        staging_row(2, ("Biology", 1), ("Cells", 1), ("Cell division", 2), "pending"),
        staging_row(1, ("Biology", 1), ("Cells", 1), ("Cell structure", 1), "pending"),
        staging_row(3, ("Biology", 1), ("Organisation", 2), ("Tissues", 1), "review"),
        staging_row(5, ("Chemistry", 2), ("Atomic structure", 1), ("Isotopes", 2), "archived"),
    ];

    let snapshot = format!(
        r#"{{
  "subject_id": "bio-gcse",
  "documents": {{
    "total": 10,
    "by_status": {{"completed": 10}},
    "by_doc_type": {{"qp": 4, "ms": 4, "er": 2}},
    "by_year": {{"2023": 5, "2024": 5}},
    "enriched_count": 7,
    "missing_summary_count": 3
  }},
  "chunks": {{
    "total_chunks": 300,
    "chunks_with_embedding": 300,
    "chunks_with_topic": 120,
    "chunks_without_topic": 180,
    "unique_topics_covered": 14,
    "by_chunk_type": {{"question": 200, "answer": 100}},
    "by_document": [
      {{"document_id": "d1", "document_title": "June 2023 Paper 1", "doc_type": "qp", "chunk_count": 30}}
    ]
  }},
  "staging": [{}],
  "production": [
    {{"id": "c1", "component_name": "Biology", "component_weighting": null, "order_index": 1,
      "themes": [{{"id": "t1", "theme_name": "Cells", "order_index": 1, "topics": []}}]}}
  ]
}}"#,
        rows.join(",\n")
    );
    fs::write(snapshots.join("bio-gcse.json"), snapshot).unwrap();

    let config_content = format!(
        r#"[snapshot]
dir = "{}/snapshots"

[report]
output_dir = "{}/reports"
{}
"#,
        root.display(),
        root.display(),
        extra_report
    );
    let config_path = root.join("pipeline.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_full_report_from_snapshot() {
    let (_tmp, config_path) = setup_test_env("");
    let config = load_config(&config_path).unwrap();
    let snapshot = load_snapshot(&config, "bio-gcse").unwrap();
    let report = build_report(&config, &snapshot);

    let health: Vec<PhaseHealth> = report.phases.iter().map(|p| p.state.health).collect();
    assert_eq!(
        health,
        vec![
            PhaseHealth::Complete,
            PhaseHealth::Complete,
            PhaseHealth::Partial,
            PhaseHealth::Complete,
            PhaseHealth::Partial,
            PhaseHealth::Partial,
        ]
    );
    assert_eq!(report.phases[0].state.detail, "10 docs (3 types)");
    assert_eq!(report.phases[2].state.detail, "7/10 enriched, 120/300 classified");
    assert_eq!(report.phases[4].state.detail, "2 pending, 1 in review, 1 approved");
    assert_eq!(report.phases[5].state.detail, "1/1/0");

    let counts = report.staging_counts.unwrap();
    assert_eq!(counts.total, 5);
    assert_eq!(counts.known_total(), 4);

    let hierarchy = report.hierarchy.as_ref().unwrap();
    assert_eq!(hierarchy.components.len(), 2);
    assert_eq!(hierarchy.components[0].name, "Biology");
    assert_eq!(hierarchy.components[0].themes.len(), 2);
    assert_eq!(hierarchy.components[1].name, "Chemistry");
    assert_eq!(
        hierarchy.components[0].themes[0].topics[0].topic_name,
        "Cell structure"
    );
    assert_eq!(hierarchy.topic_count(), 5);
}

#[test]
fn test_write_report_round_trip() {
    let (tmp, config_path) = setup_test_env("pretty = false");
    let config = load_config(&config_path).unwrap();
    let snapshot = load_snapshot(&config, "bio-gcse").unwrap();
    let report = build_report(&config, &snapshot);

    let path = write_report(&config, &report).unwrap();
    assert_eq!(path, tmp.path().join("reports").join("bio-gcse.json"));

    let raw = fs::read_to_string(&path).unwrap();
    assert!(!raw.contains('\n'), "compact output expected");

    let json = read_json(&path);
    assert_eq!(json["subject_id"], "bio-gcse");
    assert_eq!(json["phases"].as_array().unwrap().len(), 6);
    assert_eq!(json["phases"][4]["label"], "Staging");
    assert_eq!(json["phases"][4]["title"], "Curriculum Staging");
    assert_eq!(json["phases"][4]["number"], 5);
    assert_eq!(json["breakdown"]["chunks_by_type"][0]["label"], "Questions");
    assert_eq!(json["phases"][4]["health"], "partial");
    assert_eq!(json["staging_counts"]["total"], 5);
    assert_eq!(
        json["hierarchy"]["components"][0]["themes"][1]["topics"][0]["status"],
        "review"
    );
}

#[test]
fn test_report_without_hierarchy() {
    let (_tmp, config_path) = setup_test_env("include_hierarchy = false");
    let config = load_config(&config_path).unwrap();
    let snapshot = load_snapshot(&config, "bio-gcse").unwrap();
    let report = build_report(&config, &snapshot);
    let path = write_report(&config, &report).unwrap();

    let json = read_json(&path);
    assert!(json.get("hierarchy").is_none());
    assert_eq!(json["staging_counts"]["pending"], 2);
}

#[test]
fn test_missing_snapshot_errors() {
    let (_tmp, config_path) = setup_test_env("");
    let config = load_config(&config_path).unwrap();

    let err = load_snapshot(&config, "physics").unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read snapshot"));
    assert!(load_snapshot(&config, "  ").is_err());
}

#[test]
fn test_subject_mismatch_errors() {
    let (tmp, config_path) = setup_test_env("");
    let config = load_config(&config_path).unwrap();
    fs::copy(
        tmp.path().join("snapshots").join("bio-gcse.json"),
        tmp.path().join("snapshots").join("chem.json"),
    )
    .unwrap();

    let err = load_snapshot(&config, "chem").unwrap_err();
    assert!(err.to_string().contains("expected 'chem'"));
}

#[test]
fn test_missing_config_errors() {
    let tmp = TempDir::new().unwrap();
    let err = load_config(&tmp.path().join("nope.toml")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_subject_id_cannot_escape_snapshot_dir() {
    let (tmp, config_path) = setup_test_env("");
    let config = load_config(&config_path).unwrap();
    fs::write(
        tmp.path().join("outside.json"),
        r#"{"subject_id": "../outside"}"#,
    )
    .unwrap();

    let err = load_snapshot(&config, "../outside").unwrap_err();
    assert!(err.to_string().contains("path separators"));
    assert!(load_snapshot(&config, "a/b").is_err());
    assert!(load_snapshot(&config, "..").is_err());
}

#[test]
fn test_report_cannot_escape_report_dir() {
    let (tmp, config_path) = setup_test_env("");
    let config = load_config(&config_path).unwrap();

    for subject in ["../../escaped", "a/b"] {
        let snapshot =
            parse_snapshot(&format!(r#"{{"subject_id": "{}"}}"#, subject)).unwrap();
        let report = build_report(&config, &snapshot);
        let err = write_report(&config, &report).unwrap_err();
        assert!(format!("{:#}", err).contains("Refusing to write report"));
    }

    assert!(!tmp.path().join("escaped.json").exists());
    assert!(!tmp.path().parent().unwrap().join("escaped.json").exists());
    assert!(!tmp.path().join("reports").join("a").exists());
}
