// Dropdown options derived from the loaded table.

use super::{CollegeMetric, Metric};
use crate::dataset::{Decade, PlayerTable};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOptions {
    /// "First Last" display names, first appearance order, no duplicates.
    pub players: Vec<String>,
    /// Every decade from the earliest to the latest first active year.
    pub decades: Vec<Decade>,
    /// Sorted, unique.
    pub teams: Vec<String>,
    pub metrics: Vec<Metric>,
    /// `count` followed by the stat metrics.
    pub college_metrics: Vec<String>,
}

pub fn dashboard_options(table: &PlayerTable) -> DashboardOptions {
    let mut seen = HashSet::new();
    let players = table
        .records()
        .iter()
        .map(|r| r.display_name())
        .filter(|name| !name.is_empty() && seen.insert(name.clone()))
        .collect();

    let first = table.records().iter().map(|r| r.decade()).min();
    let last = table.records().iter().map(|r| r.decade()).max();
    let mut decades = Vec::new();
    if let Some(last) = last {
        let mut decade = first;
        while let Some(d) = decade.filter(|d| *d <= last) {
            decades.push(d);
            decade = d.next();
        }
    }

    let teams: BTreeSet<&str> = table
        .records()
        .iter()
        .filter_map(|r| r.team.as_deref())
        .collect();

    let college_metrics = std::iter::once(CollegeMetric::Count)
        .chain(Metric::ALL.into_iter().map(CollegeMetric::Average))
        .map(|m| m.to_string())
        .collect();

    DashboardOptions {
        players,
        decades,
        teams: teams.into_iter().map(str::to_string).collect(),
        metrics: Metric::ALL.to_vec(),
        college_metrics,
    }
}
