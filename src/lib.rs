//! # Curriculum Pipeline
//!
//! Status aggregation and phase health reporting for a curriculum content
//! pipeline.
//!
//! Source documents flow through six phases before their curriculum topics
//! reach production. This crate takes a statistics snapshot for one subject
//! (produced by the data-fetch layer) and derives the status counts, staging
//! hierarchy, and per-phase health that an operator dashboard shows.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────────┐   ┌──────────┐
//! │  Snapshot   │──▶│  curriculum-pipeline  │──▶│  Report  │
//! │  (JSON)     │   │  -core (pure)         │   │  (JSON)  │
//! └─────────────┘   └──────────────────────┘   └──────────┘
//! ```
//!
//! ## Data Flow
//!
//! 1. [`config::load_config`] reads the TOML configuration.
//! 2. [`snapshot::load_snapshot`] reads one subject's snapshot.
//! 3. [`report::build_report`] groups staging rows, counts statuses, and
//!    classifies all six phases against that one snapshot.
//! 4. [`report::write_report`] exports the result.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`snapshot`] | Snapshot loading |
//! | [`report`] | Report assembly and export |
//!
//! The pure logic lives in [`curriculum_pipeline_core`], re-exported here as
//! [`pipeline_core`].

pub mod config;
pub mod report;
pub mod snapshot;

pub use curriculum_pipeline_core as pipeline_core;
