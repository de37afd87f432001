// One render function per dashboard chart.
//
// Renderers take an aggregation result and never fail: an empty result
// becomes an empty figure or a "no data" message, and an aggregation error
// is turned into a placeholder by `bind`.

use crate::figure::*;
use crate::theme;
use courtside_core::analytics::{
    AggregateStats, AggregationResult, CareerSpan, CollegeMetric, CollegeRanking, Metric,
    PlayerComparison, PositionDistribution, SeasonPoint, TeamLegacy, LEGACY_ROOT, RANKING_LIMIT,
};
use tracing::warn;

/// Message shown when the position filters match nothing.
pub const NO_POSITION_DATA: &str = "No data available for the selected filters";

// ---------------------------------------------------------------------------
// Error boundary
// ---------------------------------------------------------------------------

/// Render a successful aggregation, or a placeholder carrying the error.
pub fn bind<T, F>(outcome: AggregationResult<T>, render: F) -> Figure
where
    F: FnOnce(T) -> Figure,
{
    match outcome {
        Ok(value) => render(value),
        Err(e) => {
            warn!("chart aggregation failed: {e}");
            Figure::placeholder(format!("Error generating chart: {e}"))
        }
    }
}

// ---------------------------------------------------------------------------
// Shared layout pieces
// ---------------------------------------------------------------------------

fn dark_axis() -> Axis {
    Axis {
        gridcolor: Some(theme::GRID),
        color: Some(theme::TEXT),
        ..Axis::default()
    }
}

fn dark_layout(title: String) -> Layout {
    Layout {
        title: Some(Title::new(title)),
        paper_bgcolor: Some(theme::CARD_BG),
        plot_bgcolor: Some(theme::CARD_BG),
        font: Some(Font::color(theme::TEXT)),
        xaxis: Some(dark_axis()),
        yaxis: Some(dark_axis()),
        ..Layout::default()
    }
}

fn light_axis() -> Axis {
    Axis {
        gridcolor: Some(theme::LIGHT_GRID),
        ..Axis::default()
    }
}

// ---------------------------------------------------------------------------
// Player charts
// ---------------------------------------------------------------------------

/// Radar chart overlaying each player's career means.
pub fn radar_figure(players: &[PlayerComparison]) -> Figure {
    if players.is_empty() {
        return Figure::empty();
    }

    let theta: Vec<String> = Metric::ALL.iter().map(|m| m.label().to_string()).collect();
    let data = players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            Trace::Scatterpolar(ScatterPolar {
                name: p.name.clone(),
                r: Metric::ALL.iter().map(|m| p.value(*m)).collect(),
                theta: theta.clone(),
                fill: "toself",
                line: Line {
                    color: theme::series_color(i),
                },
            })
        })
        .collect();

    let layout = Layout {
        title: Some(Title {
            text: "Player Comparison".into(),
            x: Some(0.5),
            xanchor: Some("center"),
            font: Some(Font::color(theme::ACCENT)),
        }),
        polar: Some(Polar {
            radialaxis: Axis {
                visible: Some(true),
                ..dark_axis()
            },
            angularaxis: Axis {
                color: Some(theme::TEXT),
                ..Axis::default()
            },
            bgcolor: theme::CARD_BG,
        }),
        showlegend: Some(true),
        paper_bgcolor: Some(theme::CARD_BG),
        plot_bgcolor: Some(theme::CARD_BG),
        font: Some(Font::color(theme::TEXT)),
        ..Layout::default()
    };

    Figure::new(data, layout)
}

/// Line chart of points by first active year.
pub fn points_timeline_figure(player: &str, series: &[SeasonPoint]) -> Figure {
    if series.is_empty() {
        return Figure::empty();
    }

    let trace = Trace::Scatter(Scatter {
        name: None,
        x: series.iter().map(|p| f64::from(p.year)).collect::<Vec<_>>().into(),
        y: series.iter().map(|p| p.points).collect::<Vec<_>>().into(),
        mode: "lines+markers",
        marker: Some(Marker {
            size: Some(10),
            color: Some(theme::ACCENT),
        }),
    });

    Figure::new(vec![trace], dark_layout(format!("{player} Points Over Time")))
}

/// Horizontal interval bars, one trace per team so each team gets a color.
/// A bar covers its seasons inclusively, from `start_year` up to
/// `end_year + 1`, so a single-season stint is one year wide.
pub fn career_arc_figure(player: &str, spans: &[CareerSpan]) -> Figure {
    if spans.is_empty() {
        return Figure::empty();
    }

    let mut teams: Vec<(&str, Vec<&CareerSpan>)> = Vec::new();
    for span in spans {
        match teams.iter_mut().find(|(team, _)| *team == span.team) {
            Some((_, group)) => group.push(span),
            None => teams.push((span.team.as_str(), vec![span])),
        }
    }

    let data = teams
        .into_iter()
        .enumerate()
        .map(|(i, (team, group))| {
            let mut bar = Bar::new(
                group
                    .iter()
                    .map(|s| f64::from(s.end_year - s.start_year) + 1.0)
                    .collect::<Vec<_>>(),
                vec![team.to_string(); group.len()],
            );
            bar.name = Some(team.to_string());
            bar.orientation = Some("h");
            bar.base = Some(group.iter().map(|s| f64::from(s.start_year)).collect());
            bar.customdata = Some(
                group
                    .iter()
                    .map(|s| {
                        vec![
                            Some(f64::from(s.start_year)),
                            Some(f64::from(s.end_year)),
                            s.points,
                            s.rebounds,
                            s.assists,
                        ]
                    })
                    .collect(),
            );
            bar.hovertemplate = Some(
                concat!(
                    "%{y}<br>%{customdata[0]}-%{customdata[1]}",
                    "<br>PTS: %{customdata[2]}<br>REB: %{customdata[3]}",
                    "<br>AST: %{customdata[4]}<extra></extra>",
                )
                .into(),
            );
            bar.marker = Some(Marker {
                size: None,
                color: Some(theme::series_color(i)),
            });
            Trace::Bar(bar)
        })
        .collect();

    let mut layout = dark_layout(format!("{player} Career Arc"));
    layout.yaxis = Some(Axis {
        kind: Some("category"),
        ..dark_axis()
    });
    layout.barmode = Some("overlay");

    Figure::new(data, layout)
}

// ---------------------------------------------------------------------------
// College pipeline
// ---------------------------------------------------------------------------

pub fn college_figure(ranking: &CollegeRanking) -> Figure {
    if ranking.is_empty() {
        return Figure::placeholder(match ranking.metric {
            CollegeMetric::Count => "No college data available",
            CollegeMetric::Average(_) => "No colleges with sufficient data found",
        });
    }

    let colleges: Vec<String> = ranking.entries.iter().map(|e| e.key.clone()).collect();
    let values: Vec<f64> = ranking.entries.iter().map(|e| e.value).collect();
    let mut bar = Bar::new(colleges, values);
    bar.textposition = Some("auto");

    let (title, y_title) = match ranking.metric {
        CollegeMetric::Count => {
            bar.text = Some(ranking.entries.iter().map(|e| e.support.to_string()).collect());
            (
                format!("Top {RANKING_LIMIT} Colleges by Number of NBA Players"),
                "Number of Players".to_string(),
            )
        }
        CollegeMetric::Average(metric) => {
            bar.text = Some(
                ranking
                    .entries
                    .iter()
                    .map(|e| format!("{:.1}<br>({} players)", e.value, e.support))
                    .collect(),
            );
            bar.hovertemplate = Some(format!(
                "College: %{{x}}<br>{metric}: %{{y:.1f}}<br>Players: %{{text}}<extra></extra>"
            ));
            (
                format!("Top {RANKING_LIMIT} Colleges by Average {metric}"),
                format!("Average {metric}"),
            )
        }
    };

    let layout = Layout {
        title: Some(Title::new(title)),
        xaxis: Some(Axis {
            title: Some(Title::new("College")),
            tickangle: Some(-45),
            ..light_axis()
        }),
        yaxis: Some(Axis {
            title: Some(Title::new(y_title)),
            zeroline: Some(true),
            ..light_axis()
        }),
        height: Some(600),
        margin: Some(Margin {
            b: Some(150),
            ..Margin::default()
        }),
        showlegend: Some(false),
        plot_bgcolor: Some("white"),
        ..Layout::default()
    };

    Figure::new(vec![Trace::Bar(bar)], layout)
}

// ---------------------------------------------------------------------------
// Position distribution
// ---------------------------------------------------------------------------

pub fn position_figure(dist: &PositionDistribution) -> Figure {
    if dist.is_empty() {
        return Figure::no_data(NO_POSITION_DATA);
    }

    let data = dist
        .groups
        .iter()
        .map(|group| {
            Trace::Box(BoxTrace {
                name: group.position.to_string(),
                y: group.values.clone(),
                boxpoints: "outliers",
                jitter: 0.3,
                pointpos: -1.8,
                meta: group.summary().and_then(|s| serde_json::to_value(s).ok()),
            })
        })
        .collect();

    let mut title = format!("{} Distribution by Position", dist.metric);
    if let Some(decade) = dist.decade {
        title.push_str(&format!(" ({decade})"));
    }
    if let Some(team) = &dist.team {
        title.push_str(&format!(" - {team}"));
    }

    let layout = Layout {
        title: Some(Title::new(title)),
        yaxis: Some(Axis {
            title: Some(Title::new(dist.metric.column())),
            zeroline: Some(false),
            tickformat: Some(".1f"),
            ..light_axis()
        }),
        showlegend: Some(false),
        height: Some(600),
        boxmode: Some("group"),
        plot_bgcolor: Some("white"),
        ..Layout::default()
    };

    Figure::new(data, layout)
}

// ---------------------------------------------------------------------------
// Team legacy
// ---------------------------------------------------------------------------

/// Sunburst with "total" branch values: All Teams, then teams, then decades.
pub fn legacy_figure(legacy: &TeamLegacy) -> Figure {
    if legacy.is_empty() {
        return Figure::placeholder("No team data available");
    }

    let metric = legacy.metric;
    let mut ids = vec![LEGACY_ROOT.to_string()];
    let mut labels = vec![LEGACY_ROOT.to_string()];
    let mut parents = vec![String::new()];
    let mut values = vec![legacy.root_value()];

    for team in &legacy.teams {
        ids.push(team.team.clone());
        labels.push(node_label(&team.team, metric, &team.stats));
        parents.push(LEGACY_ROOT.to_string());
        values.push(team.value());
    }
    for team in &legacy.teams {
        for decade in &team.decades {
            ids.push(format!("{}_{}", team.team, decade.decade));
            labels.push(node_label(&decade.decade.to_string(), metric, &decade.stats));
            parents.push(team.team.clone());
            values.push(decade.stats.sum);
        }
    }

    let trace = Trace::Sunburst(Sunburst {
        ids,
        labels,
        parents,
        values,
        branchvalues: "total",
        maxdepth: 2,
    });

    let layout = Layout {
        title: Some(Title::new(format!("Team Legacy: {metric} Across Decades"))),
        width: Some(1000),
        height: Some(800),
        sunburstcolorway: Some(theme::SET3.to_vec()),
        margin: Some(Margin {
            t: Some(30),
            l: Some(0),
            r: Some(0),
            b: Some(0),
        }),
        ..Layout::default()
    };

    Figure::new(vec![trace], layout)
}

fn node_label(name: &str, metric: Metric, stats: &AggregateStats) -> String {
    let avg = stats
        .mean
        .map(|m| format!("{m:.1}"))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "{name}<br>Total {metric}: {}<br>Avg {metric}: {avg}<br>Players: {}",
        thousands(stats.sum),
        stats.count
    )
}

/// Round to a whole number and group digits with commas: 12345.6 -> "12,346".
fn thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value.abs());
    let mut out = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (i, ch) in rounded.chars().enumerate() {
        if i > 0 && (rounded.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if value < 0.0 && rounded != "0" {
        out.insert(0, '-');
    }
    out
}
