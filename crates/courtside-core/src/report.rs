// Dataset summary and CSV export used by the `courtside-export` tool.

use crate::dataset::{Frame, PlayerTable};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default output file of the export tool.
pub const DEFAULT_EXPORT_FILE: &str = "processed_nba_stats.csv";

/// Rows shown by the head preview.
pub const HEAD_ROWS: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write CSV to {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total_players: usize,
    /// Rows with `ROSTER_STATUS == 1`.
    pub active_players: usize,
    pub unique_teams: usize,
    /// Earliest first active year.
    pub first_year: Option<i32>,
    /// Latest last active year.
    pub last_year: Option<i32>,
}

impl DatasetSummary {
    pub fn from_table(table: &PlayerTable) -> Self {
        let records = table.records();
        let teams: HashSet<&str> = records.iter().filter_map(|r| r.team.as_deref()).collect();
        DatasetSummary {
            total_players: records.len(),
            active_players: records.iter().filter(|r| r.active).count(),
            unique_teams: teams.len(),
            first_year: records.iter().map(|r| r.from_year).min(),
            last_year: records.iter().map(|r| r.to_year).max(),
        }
    }

    /// "1946-2024", or "n/a" for an empty table.
    pub fn years_range(&self) -> String {
        match (self.first_year, self.last_year) {
            (Some(first), Some(last)) => format!("{first}-{last}"),
            _ => "n/a".to_string(),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Players: {}", self.total_players)?;
        writeln!(f, "Active Players: {}", self.active_players)?;
        writeln!(f, "Number of Unique Teams: {}", self.unique_teams)?;
        write!(f, "Years Range: {}", self.years_range())
    }
}

// ---------------------------------------------------------------------------
// Preview and export
// ---------------------------------------------------------------------------

/// Fixed-width text rendering of the header and the first `n` rows.
pub fn head_preview(frame: &Frame, n: usize) -> String {
    let mut rows: Vec<Vec<String>> = vec![frame.column_names().to_vec()];
    rows.extend((0..frame.num_rows().min(n)).map(|row| frame.row_text(row)));

    let widths: Vec<usize> = (0..frame.num_columns())
        .map(|col| rows.iter().map(|r| r[col].chars().count()).max().unwrap_or(0))
        .collect();

    rows.iter()
        .map(|r| {
            r.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write every column of `frame` to `path` as CSV.
pub fn write_frame(frame: &Frame, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    frame.write_csv(file).map_err(|e| ExportError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    info!(
        "wrote {} rows x {} columns to {}",
        frame.num_rows(),
        frame.num_columns(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::loader::fallback_dataset;
    use crate::dataset::normalize::normalize;
    use crate::dataset::PlayerRecord;

    fn record(team: Option<&str>, from: i32, to: i32, active: bool) -> PlayerRecord {
        PlayerRecord {
            first_name: "A".into(),
            last_name: "B".into(),
            from_year: from,
            to_year: to,
            team: team.map(str::to_string),
            position: None,
            college: None,
            points: None,
            rebounds: None,
            assists: None,
            active,
        }
    }

    #[test]
    fn summary_counts_rows_teams_and_years() {
        let t = PlayerTable::new(vec![
            record(Some("Lakers"), 1996, 2016, false),
            record(Some("Lakers"), 2003, 2024, true),
            record(Some("Celtics"), 1979, 1992, false),
            record(None, 2020, 2021, true),
        ]);
        let s = DatasetSummary::from_table(&t);
        assert_eq!(s.total_players, 4);
        assert_eq!(s.active_players, 2);
        assert_eq!(s.unique_teams, 2);
        assert_eq!(s.years_range(), "1979-2024");
        assert!(s.to_string().contains("Active Players: 2"));
    }

    #[test]
    fn empty_table_summary() {
        let s = DatasetSummary::from_table(&PlayerTable::default());
        assert_eq!(s.total_players, 0);
        assert_eq!(s.years_range(), "n/a");
    }

    #[test]
    fn head_preview_aligns_columns() {
        let csv = "NAME,PTS\nShaquille,28.7\nYao,19\n";
        let frame = Frame::from_csv_reader(csv.as_bytes()).unwrap();
        let text = head_preview(&frame, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["NAME       PTS", "Shaquille  28.7"]);
    }

    #[test]
    fn write_frame_round_trips() {
        let path = std::env::temp_dir().join("courtside_report_write.csv");
        let frame = fallback_dataset().frame;
        write_frame(&frame, &path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let mut reread = Frame::from_csv_reader(file).unwrap();
        normalize(&mut reread);
        assert_eq!(reread.shape(), frame.shape());
        assert_eq!(reread.row_text(0), frame.row_text(0));

        let _ = std::fs::remove_file(&path);
    }
}
