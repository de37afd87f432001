// Side-by-side career averages for up to three players (radar chart).

use super::{mean, Metric, MAX_COMPARED_PLAYERS};
use crate::dataset::PlayerTable;
use serde::Serialize;

/// Career means of the three headline stats for one player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerComparison {
    pub name: String,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
}

impl PlayerComparison {
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Points => self.points,
            Metric::Rebounds => self.rebounds,
            Metric::Assists => self.assists,
        }
    }
}

/// Compare the players named in `names` ("First Last").
///
/// An empty selection or one with more than [`MAX_COMPARED_PLAYERS`] names
/// returns an empty result. Names matching no rows are skipped, and a name
/// listed twice yields a single entry. A stat with no values averages to 0.
pub fn compare_players(table: &PlayerTable, names: &[String]) -> Vec<PlayerComparison> {
    if names.is_empty() || names.len() > MAX_COMPARED_PLAYERS {
        return Vec::new();
    }

    let mut out: Vec<PlayerComparison> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if out.iter().any(|c| c.name == name) {
            continue;
        }

        let rows: Vec<_> = table.rows_for(name).collect();
        if rows.is_empty() {
            continue;
        }

        let avg = |metric: Metric| mean(rows.iter().filter_map(|r| metric.value(r))).unwrap_or(0.0);
        out.push(PlayerComparison {
            name: name.to_string(),
            points: avg(Metric::Points),
            rebounds: avg(Metric::Rebounds),
            assists: avg(Metric::Assists),
        });
    }

    out
}
