// College-to-NBA pipeline ranking.

use super::{mean, round2, CollegeMetric, COLLEGE_MIN_PLAYERS, RANKING_LIMIT};
use crate::dataset::{PlayerRecord, PlayerTable};
use serde::Serialize;
use std::collections::HashMap;

/// One ranked group: its key, the ranked value, and how many rows back it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGroup {
    pub key: String,
    pub value: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollegeRanking {
    pub metric: CollegeMetric,
    /// Highest value first, at most [`RANKING_LIMIT`] entries.
    pub entries: Vec<RankedGroup>,
}

impl CollegeRanking {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rank colleges by player count or by a stat average.
///
/// Rows without a college are ignored. Average rankings only consider
/// colleges with at least [`COLLEGE_MIN_PLAYERS`] players and report the
/// mean rounded to two decimals. Ties keep the order in which colleges
/// first appear in the table.
pub fn college_ranking(table: &PlayerTable, metric: CollegeMetric) -> CollegeRanking {
    let groups = group_by_college(table.records());

    let mut entries: Vec<RankedGroup> = match metric {
        CollegeMetric::Count => groups
            .into_iter()
            .map(|(college, rows)| RankedGroup {
                key: college.to_string(),
                value: rows.len() as f64,
                support: rows.len(),
            })
            .collect(),
        CollegeMetric::Average(stat) => groups
            .into_iter()
            .filter(|(_, rows)| rows.len() >= COLLEGE_MIN_PLAYERS)
            .filter_map(|(college, rows)| {
                let avg = mean(rows.iter().filter_map(|r| stat.value(r)))?;
                Some(RankedGroup {
                    key: college.to_string(),
                    value: round2(avg),
                    support: rows.len(),
                })
            })
            .collect(),
    };

    // Stable: equal values stay in first-appearance order.
    entries.sort_by(|a, b| b.value.total_cmp(&a.value));
    entries.truncate(RANKING_LIMIT);

    CollegeRanking { metric, entries }
}

/// Group rows by college, preserving first-appearance order.
fn group_by_college(records: &[PlayerRecord]) -> Vec<(&str, Vec<&PlayerRecord>)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&PlayerRecord>)> = Vec::new();

    for record in records {
        let Some(college) = record.college.as_deref().map(str::trim) else {
            continue;
        };
        if college.is_empty() {
            continue;
        }
        match index.get(college).copied() {
            Some(idx) => groups[idx].1.push(record),
            None => {
                index.insert(college, groups.len());
                groups.push((college, vec![record]));
            }
        }
    }

    groups
}
