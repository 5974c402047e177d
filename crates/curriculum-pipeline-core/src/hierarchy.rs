//! Staging row grouping.
//!
//! Folds a flat list of [`StagingRow`]s into a component → theme → topic
//! [`StagingHierarchy`].
//!
//! # Algorithm
//!
//! 1. Walk the rows once. Components are keyed by `component_name`, themes
//!    by `theme_name` within their component. Keys are created on first
//!    sight, in encounter order.
//! 2. A repeated component key overwrites the stored order and weighting
//!    with the current row's values; a repeated theme key overwrites the
//!    stored theme order. The last row seen for a name wins.
//! 3. Every row is appended to its theme's topic list. Topics are never
//!    deduplicated.
//! 4. Sort components by order, themes by order, topics by `topic_order`.
//!    All sorts are stable, so equal orders keep encounter order.
//!
//! # Example
//!
//! ```rust
//! use curriculum_pipeline_core::hierarchy::build_hierarchy;
//!
//! let hierarchy = build_hierarchy(&[]);
//! assert!(hierarchy.components.is_empty());
//! ```

use std::collections::HashMap;

use crate::models::{StagingComponentGroup, StagingHierarchy, StagingRow, StagingThemeGroup};

struct ComponentAcc {
    name: String,
    order: i64,
    weighting: Option<String>,
    themes: Vec<StagingThemeGroup>,
    theme_index: HashMap<String, usize>,
}

/// Group staging rows into a sorted three-level hierarchy.
///
/// Total over its input: empty input yields an empty hierarchy, and rows
/// with empty names simply group under the empty string.
pub fn build_hierarchy(rows: &[StagingRow]) -> StagingHierarchy {
    let mut components: Vec<ComponentAcc> = Vec::new();
    let mut component_index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let ci = match component_index.get(&row.component_name) {
            Some(&i) => {
                let comp = &mut components[i];
                comp.order = row.component_order;
                comp.weighting = row.component_weighting.clone();
                i
            }
            None => {
                components.push(ComponentAcc {
                    name: row.component_name.clone(),
                    order: row.component_order,
                    weighting: row.component_weighting.clone(),
                    themes: Vec::new(),
                    theme_index: HashMap::new(),
                });
                component_index.insert(row.component_name.clone(), components.len() - 1);
                components.len() - 1
            }
        };

        let comp = &mut components[ci];
        let ti = match comp.theme_index.get(&row.theme_name) {
            Some(&i) => {
                comp.themes[i].order = row.theme_order;
                i
            }
            None => {
                comp.themes.push(StagingThemeGroup {
                    name: row.theme_name.clone(),
                    order: row.theme_order,
                    topics: Vec::new(),
                });
                comp.theme_index
                    .insert(row.theme_name.clone(), comp.themes.len() - 1);
                comp.themes.len() - 1
            }
        };

        comp.themes[ti].topics.push(row.clone());
    }

    let mut groups: Vec<StagingComponentGroup> = components
        .into_iter()
        .map(|comp| {
            let mut themes = comp.themes;
            themes.sort_by_key(|t| t.order);
            for theme in &mut themes {
                theme.topics.sort_by_key(|r| r.topic_order);
            }
            StagingComponentGroup {
                name: comp.name,
                order: comp.order,
                weighting: comp.weighting,
                themes,
            }
        })
        .collect();
    groups.sort_by_key(|c| c.order);

    StagingHierarchy { components: groups }
}
