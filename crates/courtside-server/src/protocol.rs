// Chart request/response messages shared by `POST /api/chart` and `/ws`.
//
// Requests are JSON objects tagged by `chart`:
//
//   {"chart": "radar", "players": ["Kobe Bryant", "Tim Duncan"]}
//   {"chart": "position_distribution", "metric": "REB", "decade": 1990}
//
// Metric names travel as strings so an unknown metric reaches the binding
// layer and comes back as a placeholder figure instead of a decode error.

use courtside_charts::Figure;
use serde::{Deserialize, Serialize};
use std::fmt;

fn default_metric() -> String {
    "PTS".into()
}

fn default_college_metric() -> String {
    "count".into()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chart", rename_all = "snake_case")]
pub enum ChartRequest {
    Radar {
        #[serde(default)]
        players: Vec<String>,
    },
    PointsTimeline {
        #[serde(default)]
        player: Option<String>,
    },
    CareerArc {
        #[serde(default)]
        player: Option<String>,
    },
    CollegePipeline {
        #[serde(default = "default_college_metric")]
        metric: String,
    },
    PositionDistribution {
        #[serde(default = "default_metric")]
        metric: String,
        #[serde(default)]
        decade: Option<i32>,
        #[serde(default)]
        team: Option<String>,
    },
    TeamLegacy {
        #[serde(default = "default_metric")]
        metric: String,
    },
}

impl ChartRequest {
    /// The dashboard element this request updates.
    pub fn chart_id(&self) -> ChartId {
        match self {
            ChartRequest::Radar { .. } => ChartId::Radar,
            ChartRequest::PointsTimeline { .. } => ChartId::PointsTimeline,
            ChartRequest::CareerArc { .. } => ChartId::CareerArc,
            ChartRequest::CollegePipeline { .. } => ChartId::CollegePipeline,
            ChartRequest::PositionDistribution { .. } => ChartId::PositionDistribution,
            ChartRequest::TeamLegacy { .. } => ChartId::TeamLegacy,
        }
    }
}

/// Element id of each chart on the dashboard page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartId {
    #[serde(rename = "radar-chart")]
    Radar,
    #[serde(rename = "line-chart")]
    PointsTimeline,
    #[serde(rename = "career-arc-timeline")]
    CareerArc,
    #[serde(rename = "college-pipeline-chart")]
    CollegePipeline,
    #[serde(rename = "position-distribution-chart")]
    PositionDistribution,
    #[serde(rename = "team-legacy-graph")]
    TeamLegacy,
}

impl ChartId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartId::Radar => "radar-chart",
            ChartId::PointsTimeline => "line-chart",
            ChartId::CareerArc => "career-arc-timeline",
            ChartId::CollegePipeline => "college-pipeline-chart",
            ChartId::PositionDistribution => "position-distribution-chart",
            ChartId::TeamLegacy => "team-legacy-graph",
        }
    }
}

impl fmt::Display for ChartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered chart. `chart` is `None` when the request could not be
/// decoded, so the target element is unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartResponse {
    pub chart: Option<ChartId>,
    pub figure: Figure,
}

impl ChartResponse {
    /// Response to a request that failed to decode.
    pub fn invalid(reason: impl fmt::Display) -> Self {
        ChartResponse {
            chart: None,
            figure: Figure::placeholder(format!("Invalid chart request: {reason}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_tagged_requests() {
        let req: ChartRequest =
            serde_json::from_str(r#"{"chart":"radar","players":["Kobe Bryant"]}"#).unwrap();
        assert_eq!(
            req,
            ChartRequest::Radar {
                players: vec!["Kobe Bryant".into()]
            }
        );
        assert_eq!(req.chart_id(), ChartId::Radar);
    }

    #[test]
    fn missing_fields_take_dropdown_defaults() {
        let req: ChartRequest =
            serde_json::from_str(r#"{"chart":"position_distribution"}"#).unwrap();
        assert_eq!(
            req,
            ChartRequest::PositionDistribution {
                metric: "PTS".into(),
                decade: None,
                team: None,
            }
        );

        let req: ChartRequest = serde_json::from_str(r#"{"chart":"college_pipeline"}"#).unwrap();
        assert_eq!(
            req,
            ChartRequest::CollegePipeline {
                metric: "count".into()
            }
        );

        let req: ChartRequest = serde_json::from_str(r#"{"chart":"points_timeline"}"#).unwrap();
        assert_eq!(req, ChartRequest::PointsTimeline { player: None });
    }

    #[test]
    fn unknown_chart_is_rejected() {
        assert!(serde_json::from_str::<ChartRequest>(r#"{"chart":"heatmap"}"#).is_err());
    }

    #[test]
    fn chart_ids_serialize_as_element_ids() {
        assert_eq!(
            serde_json::to_value(ChartId::TeamLegacy).unwrap(),
            json!("team-legacy-graph")
        );
        assert_eq!(ChartId::CareerArc.to_string(), "career-arc-timeline");
    }

    #[test]
    fn invalid_response_has_no_chart() {
        let resp = ChartResponse::invalid("expected value at line 1");
        let v = serde_json::to_value(&resp).unwrap();
        assert_eq!(v["chart"], serde_json::Value::Null);
        assert_eq!(
            v["figure"]["layout"]["annotations"][0]["text"],
            "Invalid chart request: expected value at line 1"
        );
    }
}
