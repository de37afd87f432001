// Single-player timelines: points by season and team stints.

use crate::dataset::PlayerTable;
use serde::Serialize;

/// Points recorded for a row starting in `year`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeasonPoint {
    pub year: i32,
    pub points: f64,
}

/// One team stint on a career timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CareerSpan {
    pub team: String,
    pub start_year: i32,
    pub end_year: i32,
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
}

/// `(first active year, points)` for every row of the player, ordered by
/// year. Rows without a points value are left out. Ties keep table order.
pub fn player_time_series(table: &PlayerTable, name: &str) -> Vec<SeasonPoint> {
    if name.trim().is_empty() {
        return Vec::new();
    }

    let mut series: Vec<SeasonPoint> = table
        .rows_for(name)
        .filter_map(|r| {
            r.points.map(|points| SeasonPoint {
                year: r.from_year,
                points,
            })
        })
        .collect();
    series.sort_by_key(|p| p.year);
    series
}

/// The player's team stints ordered by start year. Rows with no team are
/// left out since they cannot be placed on the timeline.
pub fn career_spans(table: &PlayerTable, name: &str) -> Vec<CareerSpan> {
    if name.trim().is_empty() {
        return Vec::new();
    }

    let mut spans: Vec<CareerSpan> = table
        .rows_for(name)
        .filter_map(|r| {
            let team = r.team.clone()?;
            Some(CareerSpan {
                team,
                start_year: r.from_year,
                end_year: r.to_year,
                points: r.points,
                rebounds: r.rebounds,
                assists: r.assists,
            })
        })
        .collect();
    spans.sort_by_key(|s| s.start_year);
    spans
}
