// Team legacy hierarchy: All Teams -> team -> decade.
//
// Node values are metric sums. A team's value is computed from its decade
// children and the root's from its teams, so every parent equals the exact
// sum of its direct children.

use super::Metric;
use crate::dataset::{Decade, PlayerTable};
use serde::Serialize;
use std::collections::BTreeMap;

/// Label of the implicit root node.
pub const LEGACY_ROOT: &str = "All Teams";

/// Mean, count and sum of the metric over a group of rows.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AggregateStats {
    /// `None` when no row in the group had a value.
    pub mean: Option<f64>,
    /// Rows with a value.
    pub count: usize,
    pub sum: f64,
}

impl AggregateStats {
    fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.mean = Some(self.sum / self.count as f64);
    }

    fn combine<'a, I: IntoIterator<Item = &'a AggregateStats>>(parts: I) -> AggregateStats {
        let (sum, count) = parts
            .into_iter()
            .fold((0.0, 0), |(sum, count), s| (sum + s.sum, count + s.count));
        AggregateStats {
            mean: (count > 0).then(|| sum / count as f64),
            count,
            sum,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecadeNode {
    pub decade: Decade,
    pub stats: AggregateStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamNode {
    pub team: String,
    pub stats: AggregateStats,
    /// Ascending by decade.
    pub decades: Vec<DecadeNode>,
}

impl TeamNode {
    /// Node value in the hierarchy.
    pub fn value(&self) -> f64 {
        self.stats.sum
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamLegacy {
    pub metric: Metric,
    /// Sorted by team name.
    pub teams: Vec<TeamNode>,
}

impl TeamLegacy {
    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn root_value(&self) -> f64 {
        self.teams.iter().map(TeamNode::value).sum()
    }
}

/// Aggregate `metric` per team and per (team, decade of first active year).
///
/// Rows with no team are skipped. A decade whose rows all lack the metric
/// still appears, with a zero count and sum.
pub fn team_legacy(table: &PlayerTable, metric: Metric) -> TeamLegacy {
    let mut tree: BTreeMap<&str, BTreeMap<Decade, AggregateStats>> = BTreeMap::new();

    for record in table.records() {
        let Some(team) = record.team.as_deref() else {
            continue;
        };
        let slot = tree
            .entry(team)
            .or_default()
            .entry(record.decade())
            .or_default();
        if let Some(value) = metric.value(record) {
            slot.push(value);
        }
    }

    let teams = tree
        .into_iter()
        .map(|(team, decades)| {
            let decades: Vec<DecadeNode> = decades
                .into_iter()
                .map(|(decade, stats)| DecadeNode { decade, stats })
                .collect();
            TeamNode {
                team: team.to_string(),
                stats: AggregateStats::combine(decades.iter().map(|d| &d.stats)),
                decades,
            }
        })
        .collect();

    TeamLegacy { metric, teams }
}
