// Analytics engine: one pure operation per dashboard chart.
//
// Every operation takes the shared read-only `PlayerTable` plus typed
// selection parameters. A selection that matches nothing yields an empty
// result, never an error; errors are reserved for selections that cannot be
// interpreted at all (unknown metric, malformed decade).

pub mod college;
pub mod compare;
pub mod legacy;
pub mod options;
pub mod position;
pub mod timeline;

use crate::dataset::PlayerRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use college::{college_ranking, CollegeRanking, RankedGroup};
pub use compare::{compare_players, PlayerComparison};
pub use legacy::{team_legacy, AggregateStats, DecadeNode, TeamLegacy, TeamNode, LEGACY_ROOT};
pub use options::{dashboard_options, DashboardOptions};
pub use position::{position_distribution, BoxSummary, PositionDistribution, PositionGroup};
pub use timeline::{career_spans, player_time_series, CareerSpan, SeasonPoint};

/// At most this many players can be compared at once.
pub const MAX_COMPARED_PLAYERS: usize = 3;

/// College rankings keep this many entries.
pub const RANKING_LIMIT: usize = 20;

/// Colleges with fewer players are left out of average-stat rankings.
pub const COLLEGE_MIN_PLAYERS: usize = 5;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregationError {
    #[error("unknown metric `{0}` (expected PTS, REB or AST)")]
    UnknownMetric(String),

    #[error("unknown college metric `{0}` (expected count, PTS, REB or AST)")]
    UnknownCollegeMetric(String),

    #[error("decade {0} is not a multiple of 10")]
    InvalidDecade(i32),

    #[error("{0}")]
    Failed(String),
}

/// Outcome of one chart's aggregation: the data, or a message to show in
/// place of the chart.
pub type AggregationResult<T> = Result<T, AggregationError>;

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// A per-season-average counting stat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "PTS")]
    Points,
    #[serde(rename = "REB")]
    Rebounds,
    #[serde(rename = "AST")]
    Assists,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Points, Metric::Rebounds, Metric::Assists];

    /// Source column name, also the wire value.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Points => "PTS",
            Metric::Rebounds => "REB",
            Metric::Assists => "AST",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Points => "Points",
            Metric::Rebounds => "Rebounds",
            Metric::Assists => "Assists",
        }
    }

    pub fn value(&self, record: &PlayerRecord) -> Option<f64> {
        match self {
            Metric::Points => record.points,
            Metric::Rebounds => record.rebounds,
            Metric::Assists => record.assists,
        }
    }
}

impl FromStr for Metric {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PTS" => Ok(Metric::Points),
            "REB" => Ok(Metric::Rebounds),
            "AST" => Ok(Metric::Assists),
            _ => Err(AggregationError::UnknownMetric(s.to_string())),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// What a college ranking is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollegeMetric {
    /// Number of players from the college.
    Count,
    /// Mean of a stat over the college's players.
    Average(Metric),
}

impl FromStr for CollegeMetric {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("count") {
            return Ok(CollegeMetric::Count);
        }
        s.parse::<Metric>()
            .map(CollegeMetric::Average)
            .map_err(|_| AggregationError::UnknownCollegeMetric(s.to_string()))
    }
}

impl fmt::Display for CollegeMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollegeMetric::Count => f.write_str("count"),
            CollegeMetric::Average(m) => write!(f, "{m}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean; `None` for an empty input.
pub(crate) fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dataset::{PlayerRecord, PlayerTable};

    /// Compact record builder for synthetic tables.
    pub fn player(first: &str, last: &str, year: i32, team: &str, pts: f64) -> PlayerRecord {
        PlayerRecord {
            first_name: first.into(),
            last_name: last.into(),
            from_year: year,
            to_year: year + 1,
            team: Some(team.into()),
            position: Some("G".into()),
            college: None,
            points: Some(pts),
            rebounds: Some(pts / 2.0),
            assists: Some(pts / 4.0),
            active: false,
        }
    }

    pub fn table(records: Vec<PlayerRecord>) -> PlayerTable {
        PlayerTable::new(records)
    }
}
