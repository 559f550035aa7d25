//! Aggregate progress statistics for one child.
//!
//! Pure functions over the progress records the backend returns; the report
//! crate renders the resulting summary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::{Activity, ProgressRecord};

/// Aggregated view of a child's stored progress history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildSummary {
    /// Child the summary belongs to.
    pub child_id: String,
    /// Number of recorded sessions.
    pub sessions: usize,
    /// Mean score across all sessions.
    pub average_score: f64,
    /// Highest recorded score.
    pub best_score: f64,
    /// Share of sessions flagged as completed.
    pub completion_rate: f64,
    /// Second-half average minus first-half average; positive means the
    /// child is improving over time.
    pub trend: f64,
    /// Per activity-category statistics.
    pub per_category: HashMap<String, CategoryStats>,
}

/// Statistics for one activity category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub sessions: usize,
    pub average_score: f64,
    /// Mean move count where recorded.
    pub average_moves: Option<f64>,
}

/// Build a [`ChildSummary`] from a child's records, oldest first.
///
/// Records whose activity is missing from the catalog are grouped under the
/// `"desconhecida"` category rather than dropped.
pub fn summarize(
    child_id: &str,
    records: &[ProgressRecord],
    activities: &[Activity],
) -> ChildSummary {
    let categories: HashMap<&str, &str> = activities
        .iter()
        .map(|a| (a.id.as_str(), a.category.as_str()))
        .collect();

    let sessions = records.len();
    let average_score = mean(records.iter().map(|r| r.score));
    let best_score = records.iter().map(|r| r.score).fold(0.0, f64::max);
    let completion_rate = if sessions == 0 {
        0.0
    } else {
        records.iter().filter(|r| r.completed).count() as f64 / sessions as f64
    };

    let half = sessions / 2;
    let trend = if half == 0 {
        0.0
    } else {
        mean(records[sessions - half..].iter().map(|r| r.score))
            - mean(records[..half].iter().map(|r| r.score))
    };

    let mut grouped: HashMap<String, Vec<&ProgressRecord>> = HashMap::new();
    for record in records {
        let category = categories
            .get(record.activity_id.as_str())
            .copied()
            .filter(|c| !c.is_empty())
            .unwrap_or("desconhecida");
        grouped.entry(category.to_string()).or_default().push(record);
    }

    let per_category = grouped
        .into_iter()
        .map(|(category, group)| {
            let with_moves: Vec<f64> = group
                .iter()
                .filter_map(|r| r.moves.map(f64::from))
                .collect();
            let stats = CategoryStats {
                category: category.clone(),
                sessions: group.len(),
                average_score: mean(group.iter().map(|r| r.score)),
                average_moves: if with_moves.is_empty() {
                    None
                } else {
                    Some(with_moves.iter().sum::<f64>() / with_moves.len() as f64)
                },
            };
            (category, stats)
        })
        .collect();

    ChildSummary {
        child_id: child_id.to_string(),
        sessions,
        average_score,
        best_score,
        completion_rate,
        trend,
        per_category,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let collected: Vec<f64> = values.collect();
    if collected.is_empty() {
        0.0
    } else {
        collected.iter().sum::<f64>() / collected.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(activity_id: &str, score: f64, moves: Option<u32>) -> ProgressRecord {
        ProgressRecord {
            child_id: "c1".into(),
            activity_id: activity_id.into(),
            score,
            moves,
            elapsed_secs: None,
            note: None,
            completed: true,
        }
    }

    fn activity(id: &str, category: &str) -> Activity {
        Activity {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            category: category.into(),
            difficulty: 1,
        }
    }

    #[test]
    fn empty_history_yields_zeroed_summary() {
        let summary = summarize("c1", &[], &[]);
        assert_eq!(summary.sessions, 0);
        assert_eq!(summary.average_score, 0.0);
        assert_eq!(summary.completion_rate, 0.0);
        assert!(summary.per_category.is_empty());
    }

    #[test]
    fn averages_and_categories() {
        let records = vec![
            record("a1", 6.0, Some(10)),
            record("a1", 8.0, Some(14)),
            record("a2", 10.0, None),
        ];
        let activities = vec![activity("a1", "memoria"), activity("a2", "emocoes")];
        let summary = summarize("c1", &records, &activities);

        assert_eq!(summary.sessions, 3);
        assert_eq!(summary.average_score, 8.0);
        assert_eq!(summary.best_score, 10.0);
        assert_eq!(summary.completion_rate, 1.0);

        let memoria = &summary.per_category["memoria"];
        assert_eq!(memoria.sessions, 2);
        assert_eq!(memoria.average_score, 7.0);
        assert_eq!(memoria.average_moves, Some(12.0));
        assert_eq!(summary.per_category["emocoes"].average_moves, None);
    }

    #[test]
    fn trend_compares_halves() {
        let records = vec![
            record("a1", 4.0, None),
            record("a1", 5.0, None),
            record("a1", 8.0, None),
            record("a1", 9.0, None),
        ];
        let summary = summarize("c1", &records, &[]);
        assert_eq!(summary.trend, 4.0);
        // Unknown activities land in the fallback category.
        assert!(summary.per_category.contains_key("desconhecida"));
    }
}
