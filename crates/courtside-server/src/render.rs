// Request dispatch: aggregation, then the matching figure renderer.

use crate::protocol::{ChartRequest, ChartResponse};
use courtside_charts::{
    bind, career_arc_figure, college_figure, legacy_figure, points_timeline_figure,
    position_figure, radar_figure, Figure,
};
use courtside_core::analytics::{
    career_spans, college_ranking, compare_players, player_time_series, position_distribution,
    team_legacy, AggregationError, AggregationResult, CollegeMetric, Metric,
};
use courtside_core::dataset::{Decade, PlayerTable};
use std::sync::Arc;
use tracing::{debug, error};

/// Build the figure for one request. Never fails: bad parameters become a
/// placeholder figure.
pub fn render(table: &PlayerTable, request: &ChartRequest) -> Figure {
    match request {
        ChartRequest::Radar { players } => radar_figure(&compare_players(table, players)),

        ChartRequest::PointsTimeline { player } => match player.as_deref() {
            Some(name) => points_timeline_figure(name, &player_time_series(table, name)),
            None => Figure::empty(),
        },

        ChartRequest::CareerArc { player } => match player.as_deref() {
            Some(name) => career_arc_figure(name, &career_spans(table, name)),
            None => Figure::empty(),
        },

        ChartRequest::CollegePipeline { metric } => {
            bind(metric.parse::<CollegeMetric>(), |metric| {
                college_figure(&college_ranking(table, metric))
            })
        }

        ChartRequest::PositionDistribution {
            metric,
            decade,
            team,
        } => bind(position_params(metric, *decade), |(metric, decade)| {
            position_figure(&position_distribution(table, metric, decade, team.as_deref()))
        }),

        ChartRequest::TeamLegacy { metric } => bind(metric.parse::<Metric>(), |metric| {
            legacy_figure(&team_legacy(table, metric))
        }),
    }
}

fn position_params(
    metric: &str,
    decade: Option<i32>,
) -> AggregationResult<(Metric, Option<Decade>)> {
    let metric = metric.parse::<Metric>()?;
    let decade = decade
        .map(|start| Decade::from_start(start).ok_or(AggregationError::InvalidDecade(start)))
        .transpose()?;
    Ok((metric, decade))
}

/// Render on the blocking pool. A render that panics comes back as an error
/// placeholder for the requested chart.
pub async fn render_isolated(table: Arc<PlayerTable>, request: ChartRequest) -> ChartResponse {
    let chart = request.chart_id();
    debug!("rendering {chart}");

    let outcome = tokio::task::spawn_blocking(move || render(&table, &request))
        .await
        .map_err(|e| {
            error!("render task for {chart} failed: {e}");
            AggregationError::Failed(e.to_string())
        });

    ChartResponse {
        chart: Some(chart),
        figure: bind(outcome, |figure| figure),
    }
}
