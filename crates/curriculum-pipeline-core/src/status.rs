//! Status tallies over staging rows.

use crate::models::{StagingRow, StagingStatus, StagingStatusCounts};

/// Count rows per [`StagingStatus`].
///
/// `total` is always `rows.len()`. Rows with an unknown status are counted
/// in `total` only. The result does not depend on row order.
pub fn count_by_status(rows: &[StagingRow]) -> StagingStatusCounts {
    let mut counts = StagingStatusCounts {
        total: rows.len() as u64,
        ..StagingStatusCounts::default()
    };

    for row in rows {
        match row.status.known() {
            Some(StagingStatus::Pending) => counts.pending += 1,
            Some(StagingStatus::Review) => counts.review += 1,
            Some(StagingStatus::Approved) => counts.approved += 1,
            Some(StagingStatus::Rejected) => counts.rejected += 1,
            Some(StagingStatus::Imported) => counts.imported += 1,
            None => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RowStatus;

    fn row_with(id: i64, status: RowStatus) -> StagingRow {
        StagingRow {
            id,
            subject_id: "subj-1".to_string(),
            component_name: "Component 1".to_string(),
            component_order: 1,
            component_weighting: None,
            theme_name: "Theme 1".to_string(),
            theme_order: 1,
            topic_name: format!("Topic {}", id),
            topic_order: id,
            canonical_code: None,
            extraction_batch_id: "batch-1".to_string(),
            status,
            created_at: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        }
    }

    fn rows(statuses: &[&str]) -> Vec<StagingRow> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let status = match StagingStatus::parse(s) {
                    Some(known) => RowStatus::Known(known),
                    None => RowStatus::Unknown(s.to_string()),
                };
                row_with(i as i64, status)
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(count_by_status(&[]), StagingStatusCounts::default());
    }

    #[test]
    fn test_counts_each_status() {
        let counts = count_by_status(&rows(&[
            "pending", "pending", "review", "approved", "approved", "approved", "rejected",
            "imported",
        ]));
        assert_eq!(
            counts,
            StagingStatusCounts {
                pending: 2,
                review: 1,
                approved: 3,
                rejected: 1,
                imported: 1,
                total: 8,
            }
        );
        assert_eq!(counts.known_total(), counts.total);
        assert_eq!(counts.bulk_approvable(), 3);
    }

    #[test]
    fn test_unknown_status_counts_toward_total_only() {
        let counts = count_by_status(&rows(&["pending", "archived", "total", ""]));
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.known_total(), 1);
    }

    #[test]
    fn test_order_independent() {
        let mut r = rows(&["imported", "pending", "bogus", "review", "rejected"]);
        let forward = count_by_status(&r);
        r.reverse();
        assert_eq!(count_by_status(&r), forward);
        assert_eq!(count_by_status(&r), count_by_status(&r));
    }

    #[test]
    fn test_get_matches_fields() {
        let counts = count_by_status(&rows(&["review", "review", "imported"]));
        assert_eq!(counts.get(StagingStatus::Review), 2);
        assert_eq!(counts.get(StagingStatus::Imported), 1);
        let summed: u64 = StagingStatus::ALL.iter().map(|s| counts.get(*s)).sum();
        assert_eq!(summed, counts.known_total());
    }
}
