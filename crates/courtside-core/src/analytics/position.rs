// Stat distribution per position, optionally narrowed to a decade and team.

use super::Metric;
use crate::dataset::{Decade, PlayerTable, Position};
use serde::Serialize;
use std::collections::BTreeMap;

/// All metric values recorded for one normalized position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionGroup {
    pub position: Position,
    /// Values in table order.
    pub values: Vec<f64>,
}

impl PositionGroup {
    pub fn summary(&self) -> Option<BoxSummary> {
        BoxSummary::from_values(&self.values)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDistribution {
    pub metric: Metric,
    pub decade: Option<Decade>,
    pub team: Option<String>,
    /// Canonical position order: G, F, C, G-F, F-C, then unknown codes.
    pub groups: Vec<PositionGroup>,
}

impl PositionDistribution {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Group `metric` values by primary position.
///
/// Rows without a position or a metric value are dropped. With `decade`
/// set, only rows whose first active year falls inside it are kept; with
/// `team` set, only rows for that exact team name.
pub fn position_distribution(
    table: &PlayerTable,
    metric: Metric,
    decade: Option<Decade>,
    team: Option<&str>,
) -> PositionDistribution {
    let team = team.map(str::trim).filter(|t| !t.is_empty());
    let mut grouped: BTreeMap<Position, Vec<f64>> = BTreeMap::new();

    for record in table.records() {
        let Some(code) = record.position.as_deref().filter(|c| !c.trim().is_empty()) else {
            continue;
        };
        let Some(value) = metric.value(record) else {
            continue;
        };
        if decade.is_some_and(|d| !d.contains(record.from_year)) {
            continue;
        }
        if team.is_some_and(|t| record.team.as_deref() != Some(t)) {
            continue;
        }
        grouped.entry(Position::primary(code)).or_default().push(value);
    }

    PositionDistribution {
        metric,
        decade,
        team: team.map(str::to_string),
        groups: grouped
            .into_iter()
            .map(|(position, values)| PositionGroup { position, values })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Box summary
// ---------------------------------------------------------------------------

/// Five-number summary with Tukey fences.
///
/// Quartiles use linear interpolation between closest ranks. Whiskers reach
/// the most extreme values inside `[q1 - 1.5 IQR, q3 + 1.5 IQR]`; anything
/// beyond is an outlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl BoxSummary {
    pub fn from_values(values: &[f64]) -> Option<BoxSummary> {
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let (inside, outliers): (Vec<f64>, Vec<f64>) = sorted
            .iter()
            .partition(|v| **v >= low_fence && **v <= high_fence);
        // The quartiles always lie inside the fences.
        let lower_whisker = inside.first().copied().unwrap_or(q1);
        let upper_whisker = inside.last().copied().unwrap_or(q3);

        Some(BoxSummary {
            lower_whisker,
            q1,
            median,
            q3,
            upper_whisker,
            outliers,
            count: sorted.len(),
        })
    }
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}
