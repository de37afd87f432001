// End-to-end tests over the fixture player index: discovery, normalization,
// the analytics operations, and the export round trip.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use courtside_core::analytics::*;
use courtside_core::config::DataConfig;
use courtside_core::dataset::loader::{self, load_from_dirs, load_path, DataSource};
use courtside_core::dataset::{Decade, PlayerTable, Position};
use courtside_core::report::{write_frame, DatasetSummary};

// ===========================================================================
// Test helpers
// ===========================================================================

const FIXTURES: &str = "tests/fixtures";

fn fixture_path() -> PathBuf {
    PathBuf::from(FIXTURES).join("players.csv")
}

fn fixture_table() -> PlayerTable {
    load_path(&fixture_path()).unwrap().table
}

fn team_set(table: &PlayerTable) -> BTreeSet<String> {
    table.records().iter().filter_map(|r| r.team.clone()).collect()
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn fixture_loads_with_all_columns() {
    let dataset = load_path(&fixture_path()).unwrap();
    assert_eq!(dataset.frame.shape(), (16, 13));
    assert!(dataset.frame.has_column("JERSEY_NUMBER"));
    assert!(dataset.conversion_errors.is_empty());
    assert_eq!(dataset.table.len(), 16);
    assert_eq!(dataset.frame.column("FROM_YEAR").unwrap().kind(), "int");
    assert_eq!(dataset.frame.column("AST").unwrap().kind(), "float");
}

#[test]
fn discovery_finds_fixture_by_file_name() {
    let config = DataConfig {
        file_name: "players.csv".into(),
        extra_dirs: Vec::new(),
    };
    let dirs = vec![PathBuf::from("does/not/exist"), PathBuf::from(FIXTURES)];
    let dataset = load_from_dirs(&config, &dirs).unwrap();
    assert_eq!(dataset.source, DataSource::File(fixture_path()));
}

#[test]
fn export_round_trip_keeps_rows_and_teams() {
    let dataset = load_path(&fixture_path()).unwrap();
    let out = std::env::temp_dir().join("courtside_pipeline_round_trip.csv");
    write_frame(&dataset.frame, &out).unwrap();

    let reloaded = load_path(&out).unwrap();
    assert_eq!(reloaded.frame.shape(), dataset.frame.shape());
    assert_eq!(reloaded.table.len(), dataset.table.len());
    assert_eq!(team_set(&reloaded.table), team_set(&dataset.table));
    assert_eq!(reloaded.table, dataset.table);

    let _ = fs::remove_file(&out);
}

#[test]
fn summary_matches_fixture() {
    let summary = DatasetSummary::from_table(&fixture_table());
    assert_eq!(summary.total_players, 16);
    assert_eq!(summary.active_players, 9);
    assert_eq!(summary.unique_teams, 9);
    assert_eq!(summary.years_range(), "1979-2024");
}

// ===========================================================================
// Analytics
// ===========================================================================

#[test]
fn radar_comparison_of_three_players() {
    let table = fixture_table();
    let names: Vec<String> = ["Kobe Bryant", "LeBron James", "Tim Duncan"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    let result = compare_players(&table, &names);
    assert_eq!(result.len(), 3);
    assert_eq!(result[1].name, "LeBron James");
    assert_eq!(result[1].assists, 7.4);
    assert_eq!(result[2].rebounds, 10.8);
}

#[test]
fn career_views_for_one_player() {
    let table = fixture_table();
    let series = player_time_series(&table, "Michael Jordan");
    assert_eq!(series, vec![SeasonPoint { year: 1984, points: 30.1 }]);

    let spans = career_spans(&table, "Michael Jordan");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].team, "Chicago Bulls");
    assert_eq!((spans[0].start_year, spans[0].end_year), (1984, 2002));
}

#[test]
fn college_pipeline_rankings() {
    let table = fixture_table();

    let by_count = college_ranking(&table, CollegeMetric::Count);
    assert_eq!(by_count.entries[0].key, "Duke");
    assert_eq!(by_count.entries[0].value, 6.0);
    assert!(by_count.entries.len() <= RANKING_LIMIT);

    // Only Duke reaches the five-player threshold; Reddish has no PTS.
    let by_points = college_ranking(&table, "PTS".parse().unwrap());
    assert_eq!(by_points.entries.len(), 1);
    assert_eq!(by_points.entries[0].key, "Duke");
    assert_eq!(by_points.entries[0].value, 15.8);
}

#[test]
fn position_distribution_for_team_and_decade() {
    let table = fixture_table();
    let eighties = Decade::from_start(1980);
    let bulls = position_distribution(&table, Metric::Rebounds, eighties, Some("Chicago Bulls"));

    // Jordan G-F folds into G, Pippen F-G into F alongside Rodman.
    let codes: Vec<&Position> = bulls.groups.iter().map(|g| &g.position).collect();
    assert_eq!(codes, vec![&Position::Guard, &Position::Forward]);
    assert_eq!(bulls.groups[1].values, vec![13.1, 6.4]);

    let fifties = Decade::from_start(1950);
    let empty = position_distribution(&table, Metric::Points, fifties, Some("Chicago Bulls"));
    assert!(empty.is_empty());
}

#[test]
fn team_legacy_hierarchy_sums() {
    let legacy = team_legacy(&fixture_table(), Metric::Points);
    let lakers = legacy
        .teams
        .iter()
        .find(|t| t.team == "Los Angeles Lakers")
        .unwrap();

    let decades: Vec<i32> = lakers.decades.iter().map(|d| d.decade.start()).collect();
    assert_eq!(decades, vec![1970, 1990, 2000, 2010]);
    // Reddish's 2010s row has no PTS.
    assert_eq!(lakers.decades[3].stats.count, 0);

    for team in &legacy.teams {
        let children: f64 = team.decades.iter().map(|d| d.stats.sum).sum();
        assert_eq!(team.value(), children);
    }
}

#[test]
fn options_reflect_fixture() {
    let opts = dashboard_options(&fixture_table());
    assert_eq!(opts.players.len(), 16);
    assert_eq!(opts.players[0], "Kobe Bryant");
    assert_eq!(opts.decades.first().map(|d| d.start()), Some(1970));
    assert_eq!(opts.decades.last().map(|d| d.start()), Some(2010));
    assert_eq!(opts.teams.len(), 9);
}

#[test]
fn fallback_table_drives_every_operation() {
    let table = loader::fallback_dataset().table;
    assert_eq!(player_time_series(&table, "Sample Player").len(), 1);
    assert_eq!(career_spans(&table, "Sample Player")[0].team, "Sample Team");
    assert!(college_ranking(&table, CollegeMetric::Average(Metric::Points)).is_empty());
    assert_eq!(team_legacy(&table, Metric::Points).teams.len(), 1);
}
