//! # Curriculum Pipeline Core
//!
//! Pure logic for the curriculum content pipeline: data models, staging
//! hierarchy grouping, status counting, and per-phase health
//! classification.
//!
//! This crate performs no I/O, holds no shared state, and never fails.
//! Every function is a total transformation over an in-memory snapshot,
//! so any of them may be called concurrently or repeatedly.
//!
//! ## Pipeline phases
//!
//! ```text
//! Documents → Processing → Enrichment → Chunks → Staging → Production
//! ```
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Rows, stats snapshots, and derived types |
//! | [`hierarchy`] | Component → theme → topic grouping |
//! | [`status`] | Staging status tallies |
//! | [`health`] | One health classifier per phase |
//! | [`pipeline`] | All six phase states for one snapshot |

pub mod health;
pub mod hierarchy;
pub mod models;
pub mod pipeline;
pub mod status;
