// Typed player records built from a normalized frame.
//
// The schema is checked once, when the table is built: required columns
// must exist, each row must carry a first active year, and stat cells that
// are missing, malformed, or negative become `None`.

use super::frame::{Column, Frame};
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const COL_FIRST_NAME: &str = "PLAYER_FIRST_NAME";
pub const COL_LAST_NAME: &str = "PLAYER_LAST_NAME";
pub const COL_FROM_YEAR: &str = "FROM_YEAR";
pub const COL_TO_YEAR: &str = "TO_YEAR";
pub const COL_TEAM: &str = "TEAM_NAME";
pub const COL_POSITION: &str = "POSITION";
pub const COL_COLLEGE: &str = "COLLEGE";
pub const COL_POINTS: &str = "PTS";
pub const COL_REBOUNDS: &str = "REB";
pub const COL_ASSISTS: &str = "AST";
/// Optional; `1` marks a player on an active roster.
pub const COL_ROSTER_STATUS: &str = "ROSTER_STATUS";

pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_FIRST_NAME,
    COL_LAST_NAME,
    COL_FROM_YEAR,
    COL_TO_YEAR,
    COL_TEAM,
    COL_POSITION,
    COL_COLLEGE,
    COL_POINTS,
    COL_REBOUNDS,
    COL_ASSISTS,
];

/// Active years accepted from the file.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 0..=9999;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// ---------------------------------------------------------------------------
// Decade
// ---------------------------------------------------------------------------

/// A ten-year bucket identified by its first year (always a multiple of 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Decade(i32);

impl Decade {
    /// The decade containing `year`: `floor(year / 10) * 10`. Years below
    /// the lowest representable decade map to that decade.
    pub fn of_year(year: i32) -> Self {
        let tens = year.div_euclid(10);
        match tens.checked_mul(10) {
            Some(start) => Decade(start),
            None => Decade((tens + 1) * 10),
        }
    }

    /// Accept an explicit decade start. Returns `None` unless `start` is a
    /// multiple of 10.
    pub fn from_start(start: i32) -> Option<Self> {
        (start.rem_euclid(10) == 0).then_some(Decade(start))
    }

    pub fn start(&self) -> i32 {
        self.0
    }

    /// True when `year` falls in `[start, start + 10)`.
    pub fn contains(&self, year: i32) -> bool {
        year >= self.0 && self.0.checked_add(10).map_or(true, |end| year < end)
    }

    /// The following decade, or `None` past the last representable one.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(10).map(Decade)
    }
}

impl fmt::Display for Decade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Basketball position code.
///
/// Display order is G, F, C, G-F, F-C, then any other code alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Position {
    Guard,
    Forward,
    Center,
    GuardForward,
    ForwardCenter,
    Other(String),
}

impl Position {
    /// Parse an exact position code ("G", "G-F", ...). Unknown codes are kept
    /// verbatim in [`Position::Other`].
    pub fn parse(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "G" => Position::Guard,
            "F" => Position::Forward,
            "C" => Position::Center,
            "G-F" => Position::GuardForward,
            "F-C" => Position::ForwardCenter,
            _ => Position::Other(code.trim().to_string()),
        }
    }

    /// Normalize a possibly compound code to its primary token
    /// ("G-F" -> G, "C-F" -> C) and parse it.
    pub fn primary(code: &str) -> Self {
        let head = code.split('-').next().unwrap_or(code);
        Position::parse(head)
    }

    pub fn code(&self) -> &str {
        match self {
            Position::Guard => "G",
            Position::Forward => "F",
            Position::Center => "C",
            Position::GuardForward => "G-F",
            Position::ForwardCenter => "F-C",
            Position::Other(code) => code,
        }
    }

    /// Rank in the display order; every unknown code shares the last rank.
    pub fn display_rank(&self) -> usize {
        match self {
            Position::Guard => 0,
            Position::Forward => 1,
            Position::Center => 2,
            Position::GuardForward => 3,
            Position::ForwardCenter => 4,
            Position::Other(_) => 5,
        }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.display_rank()
            .cmp(&other.display_rank())
            .then_with(|| self.code().cmp(other.code()))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// Player record
// ---------------------------------------------------------------------------

/// One row of the player index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerRecord {
    pub first_name: String,
    pub last_name: String,
    pub from_year: i32,
    /// Never earlier than `from_year`.
    pub to_year: i32,
    pub team: Option<String>,
    /// Raw position code, possibly compound.
    pub position: Option<String>,
    pub college: Option<String>,
    pub points: Option<f64>,
    pub rebounds: Option<f64>,
    pub assists: Option<f64>,
    pub active: bool,
}

impl PlayerRecord {
    /// "First Last", the form used by the player dropdowns. A blank part is
    /// left out along with its separator.
    pub fn display_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => format!("{} {}", self.first_name, self.last_name),
            (false, true) => self.first_name.clone(),
            _ => self.last_name.clone(),
        }
    }

    /// True when this row belongs to the player shown as `name`, i.e. when
    /// the trimmed `name` equals [`PlayerRecord::display_name`].
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (false, false) => name
                .strip_prefix(self.first_name.as_str())
                .and_then(|rest| rest.strip_suffix(self.last_name.as_str()))
                .is_some_and(|sep| sep == " "),
            (false, true) => name == self.first_name,
            _ => name == self.last_name,
        }
    }

    pub fn decade(&self) -> Decade {
        Decade::of_year(self.from_year)
    }
}

// ---------------------------------------------------------------------------
// Player table
// ---------------------------------------------------------------------------

/// The read-only player index every analytics operation runs against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTable {
    records: Vec<PlayerRecord>,
}

impl PlayerTable {
    pub fn new(records: Vec<PlayerRecord>) -> Self {
        PlayerTable { records }
    }

    /// Validate the frame's columns and build typed records.
    ///
    /// Rows without a usable first active year (missing, or outside
    /// [`YEAR_RANGE`]) are dropped. A last active year that is missing, out
    /// of range, or earlier than the first is clamped to it.
    pub fn from_frame(frame: &Frame) -> Result<Self, SchemaError> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !frame.has_column(c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }

        // Presence was checked above.
        let col = |name: &str| {
            frame
                .column(name)
                .ok_or_else(|| SchemaError::MissingColumns(vec![name.into()]))
        };
        let first = col(COL_FIRST_NAME)?;
        let last = col(COL_LAST_NAME)?;
        let from_year = col(COL_FROM_YEAR)?;
        let to_year = col(COL_TO_YEAR)?;
        let team = col(COL_TEAM)?;
        let position = col(COL_POSITION)?;
        let college = col(COL_COLLEGE)?;
        let points = col(COL_POINTS)?;
        let rebounds = col(COL_REBOUNDS)?;
        let assists = col(COL_ASSISTS)?;
        let roster_status = frame.column(COL_ROSTER_STATUS);

        let mut records = Vec::with_capacity(frame.num_rows());
        let mut dropped = 0usize;
        let mut clamped = 0usize;

        for row in 0..frame.num_rows() {
            let Some(from) = year_at(from_year, row) else {
                dropped += 1;
                continue;
            };
            let to = match year_at(to_year, row) {
                Some(to) if to >= from => to,
                _ => {
                    clamped += 1;
                    from
                }
            };

            records.push(PlayerRecord {
                first_name: owned_text(first, row).unwrap_or_default(),
                last_name: owned_text(last, row).unwrap_or_default(),
                from_year: from,
                to_year: to,
                team: owned_text(team, row),
                position: owned_text(position, row),
                college: owned_text(college, row),
                points: stat_at(points, row),
                rebounds: stat_at(rebounds, row),
                assists: stat_at(assists, row),
                active: roster_status.and_then(|c| c.int_at(row)) == Some(1),
            });
        }

        if dropped > 0 {
            warn!("dropped {dropped} rows without a usable {COL_FROM_YEAR}");
        }
        if clamped > 0 {
            info!("clamped {COL_TO_YEAR} to {COL_FROM_YEAR} on {clamped} rows");
        }

        Ok(PlayerTable { records })
    }

    pub fn records(&self) -> &[PlayerRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows belonging to the player shown as `name`, in table order.
    pub fn rows_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PlayerRecord> + 'a {
        self.records.iter().filter(move |r| r.matches_name(name))
    }
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

fn owned_text(column: &Column, row: usize) -> Option<String> {
    column
        .text_at(row)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn year_at(column: &Column, row: usize) -> Option<i32> {
    column
        .int_at(row)
        .and_then(|y| i32::try_from(y).ok())
        .filter(|y| YEAR_RANGE.contains(y))
}

fn stat_at(column: &Column, row: usize) -> Option<f64> {
    column.float_at(row).filter(|v| *v >= 0.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::normalize::normalize;

    const HEADER: &str = concat!(
        "PLAYER_FIRST_NAME,PLAYER_LAST_NAME,FROM_YEAR,TO_YEAR,",
        "TEAM_NAME,POSITION,COLLEGE,PTS,REB,AST",
    );

    fn table(rows: &str) -> PlayerTable {
        let data = format!("{HEADER}\n{rows}");
        let mut frame = Frame::from_csv_reader(data.as_bytes()).unwrap();
        normalize(&mut frame);
        PlayerTable::from_frame(&frame).unwrap()
    }

    #[test]
    fn decade_floors_to_multiple_of_ten() {
        assert_eq!(Decade::of_year(1999).start(), 1990);
        assert_eq!(Decade::of_year(2000).start(), 2000);
        assert_eq!(Decade::of_year(-5).start(), -10);
        assert_eq!(Decade::of_year(1987).to_string(), "1980s");
        assert!(Decade::of_year(1987).contains(1989));
        assert!(!Decade::of_year(1987).contains(1990));
    }

    #[test]
    fn decade_arithmetic_stops_at_i32_bounds() {
        let top = Decade::of_year(i32::MAX);
        assert_eq!(top.start(), 2_147_483_640);
        assert_eq!(top.next(), None);
        assert!(top.contains(i32::MAX));
        assert!(!top.contains(2_147_483_639));

        let bottom = Decade::of_year(i32::MIN);
        assert_eq!(bottom.start(), -2_147_483_640);
        assert_eq!(bottom.start().rem_euclid(10), 0);

        assert_eq!(Decade::of_year(1990).next(), Some(Decade::of_year(2000)));
    }

    #[test]
    fn years_outside_range_are_dropped_or_clamped() {
        let t = table(
            "\
A,One,2147483647,2147483647,Team,G,,1,1,1
B,Two,-5,2001,Team,G,,1,1,1
C,Three,2000,99999,Team,G,,1,1,1",
        );
        assert_eq!(t.len(), 1);
        assert_eq!(t.records()[0].first_name, "C");
        assert_eq!(t.records()[0].to_year, 2000);
    }

    #[test]
    fn decade_from_start_requires_multiple_of_ten() {
        assert_eq!(Decade::from_start(1990).map(|d| d.start()), Some(1990));
        assert!(Decade::from_start(1995).is_none());
    }

    #[test]
    fn compound_position_uses_primary_token() {
        assert_eq!(Position::primary("G-F"), Position::Guard);
        assert_eq!(Position::primary("F-C"), Position::Forward);
        assert_eq!(Position::primary("C"), Position::Center);
        assert_eq!(Position::primary("PG-SG"), Position::Other("PG".into()));
    }

    #[test]
    fn position_display_order_puts_unknown_last() {
        let mut positions = vec![
            Position::Other("Z".into()),
            Position::ForwardCenter,
            Position::Center,
            Position::Other("A".into()),
            Position::Guard,
            Position::GuardForward,
            Position::Forward,
        ];
        positions.sort();
        let codes: Vec<&str> = positions.iter().map(|p| p.code()).collect();
        assert_eq!(codes, vec!["G", "F", "C", "G-F", "F-C", "A", "Z"]);
    }

    #[test]
    fn records_are_typed() {
        let t = table("LeBron,James,2003,2023,Los Angeles Lakers,F,,27.1,7.5,7.4");
        assert_eq!(t.len(), 1);
        let r = &t.records()[0];
        assert_eq!(r.display_name(), "LeBron James");
        assert_eq!(r.from_year, 2003);
        assert_eq!(r.to_year, 2023);
        assert_eq!(r.team.as_deref(), Some("Los Angeles Lakers"));
        assert_eq!(r.college, None);
        assert_eq!(r.points, Some(27.1));
        assert!(!r.active);
    }

    #[test]
    fn missing_required_columns_are_reported() {
        let frame = Frame::from_csv_reader("PLAYER_FIRST_NAME,PTS\nA,1".as_bytes()).unwrap();
        let err = PlayerTable::from_frame(&frame).unwrap_err();
        match err {
            SchemaError::MissingColumns(cols) => {
                assert!(cols.contains(&"FROM_YEAR".to_string()));
                assert!(cols.contains(&"COLLEGE".to_string()));
                assert!(!cols.contains(&"PTS".to_string()));
            }
        }
    }

    #[test]
    fn rows_without_from_year_are_dropped() {
        let t = table(
            "\
A,One,,2001,Team,G,,1,1,1
B,Two,2000,2001,Team,G,,1,1,1",
        );
        assert_eq!(t.len(), 1);
        assert_eq!(t.records()[0].first_name, "B");
    }

    #[test]
    fn to_year_clamped_to_from_year() {
        let t = table(
            "\
A,One,2005,2001,Team,G,,1,1,1
B,Two,2000,,Team,G,,1,1,1",
        );
        assert_eq!(t.records()[0].to_year, 2005);
        assert_eq!(t.records()[1].to_year, 2000);
    }

    #[test]
    fn malformed_and_negative_stats_become_none() {
        // PTS fails whole-column conversion and stays text; the bad cell
        // reads as None while the good one still parses.
        let t = table(
            "\
A,One,2000,2001,Team,G,,n/a,-1,3
B,Two,2000,2001,Team,G,,12.5,4,2",
        );
        assert_eq!(t.records()[0].points, None);
        assert_eq!(t.records()[0].rebounds, None);
        assert_eq!(t.records()[0].assists, Some(3.0));
        assert_eq!(t.records()[1].points, Some(12.5));
    }

    #[test]
    fn roster_status_marks_active_players() {
        let data = format!(
            "{HEADER},ROSTER_STATUS\nA,One,2000,2001,T,G,,1,1,1,1\nB,Two,2000,2001,T,G,,1,1,1,0"
        );
        let frame = Frame::from_csv_reader(data.as_bytes()).unwrap();
        let t = PlayerTable::from_frame(&frame).unwrap();
        assert!(t.records()[0].active);
        assert!(!t.records()[1].active);
    }

    #[test]
    fn name_matching_requires_exact_first_and_last() {
        let t = table(
            "\
Gary,Payton II,2016,2023,Team,G,,1,1,1
Gary,Payton,1990,2007,Team,G,,1,1,1",
        );
        assert_eq!(t.rows_for("Gary Payton").count(), 1);
        assert_eq!(t.rows_for("Gary Payton II").count(), 1);
        assert_eq!(t.rows_for(" Gary Payton ").count(), 1);
        assert_eq!(t.rows_for("Gary").count(), 0);
        assert_eq!(t.rows_for("GaryPayton").count(), 0);
    }

    #[test]
    fn single_names_display_without_separator() {
        let t = table(
            "\
Nene,,2002,2019,Team,F-C,,11.0,6.3,1.3
,Hilario,2002,2019,Team,F-C,,1,1,1",
        );
        let nene = &t.records()[0];
        assert_eq!(nene.display_name(), "Nene");
        assert!(nene.matches_name("Nene"));
        assert!(nene.matches_name(" Nene "));
        assert_eq!(t.records()[1].display_name(), "Hilario");
        assert_eq!(t.rows_for("Hilario").count(), 1);
        assert_eq!(t.rows_for("Nene").count(), 1);
    }
}
