// Best-effort numeric coercion of the year and stat columns.
//
// Each known column is converted as a whole. If any non-blank cell fails to
// parse, the column keeps its text values and the failure is reported; the
// remaining columns are still converted.

use super::frame::{parse_float, parse_int, Column, Frame};
use tracing::{debug, warn};

/// Target type for a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Whole-number year.
    Year,
    /// Non-integral per-season average.
    Stat,
}

impl NumericKind {
    fn label(&self) -> &'static str {
        match self {
            NumericKind::Year => "integer year",
            NumericKind::Stat => "float stat",
        }
    }
}

/// Columns the normalizer converts, in conversion order.
pub const NUMERIC_COLUMNS: &[(&str, NumericKind)] = &[
    ("FROM_YEAR", NumericKind::Year),
    ("TO_YEAR", NumericKind::Year),
    ("PTS", NumericKind::Stat),
    ("REB", NumericKind::Stat),
    ("AST", NumericKind::Stat),
];

/// A column that could not be coerced. The column is left as text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot convert column {column} to {target}: row {row} holds {value:?}")]
pub struct TypeConversionError {
    pub column: String,
    pub target: &'static str,
    pub row: usize,
    pub value: String,
}

/// Convert every column in [`NUMERIC_COLUMNS`] that is present in `frame`.
///
/// Returns the conversion failures (one per failed column). Failures are
/// also logged; they never abort normalization.
pub fn normalize(frame: &mut Frame) -> Vec<TypeConversionError> {
    let mut errors = Vec::new();

    for &(name, kind) in NUMERIC_COLUMNS {
        let Some(column) = frame.column_mut(name) else {
            continue;
        };
        match convert_column(name, column, kind) {
            Ok(Some(converted)) => {
                debug!("converted column {name} to {}", converted.kind());
                *column = converted;
            }
            Ok(None) => {}
            Err(e) => {
                warn!("data type conversion error: {e}");
                errors.push(e);
            }
        }
    }

    errors
}

/// Returns `Ok(None)` when the column already has the target type.
fn convert_column(
    name: &str,
    column: &Column,
    kind: NumericKind,
) -> Result<Option<Column>, TypeConversionError> {
    let cells = match (column, kind) {
        (Column::Int(_), NumericKind::Year) | (Column::Float(_), NumericKind::Stat) => {
            return Ok(None);
        }
        (Column::Float(values), NumericKind::Year) => {
            // Re-run the text path so whole floats become ints and others fail.
            values
                .iter()
                .map(|v| v.map(|f| f.to_string()))
                .collect::<Vec<_>>()
        }
        (Column::Int(values), NumericKind::Stat) => {
            return Ok(Some(Column::Float(
                values.iter().map(|v| v.map(|n| n as f64)).collect(),
            )));
        }
        (Column::Text(values), _) => values.clone(),
    };

    let failure = |row: usize, value: &str| TypeConversionError {
        column: name.to_string(),
        target: kind.label(),
        row,
        value: value.to_string(),
    };

    match kind {
        NumericKind::Year => {
            let mut out = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                match cell.as_deref() {
                    None => out.push(None),
                    Some(raw) => out.push(Some(parse_int(raw).ok_or_else(|| failure(row, raw))?)),
                }
            }
            Ok(Some(Column::Int(out)))
        }
        NumericKind::Stat => {
            let mut out = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                match cell.as_deref() {
                    None => out.push(None),
                    Some(raw) => out.push(Some(parse_float(raw).ok_or_else(|| failure(row, raw))?)),
                }
            }
            Ok(Some(Column::Float(out)))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(csv_data: &str) -> Frame {
        Frame::from_csv_reader(csv_data.as_bytes()).unwrap()
    }

    #[test]
    fn clean_columns_are_converted() {
        let mut f = frame(
            "\
FROM_YEAR,TO_YEAR,PTS,REB,AST,TEAM_NAME
1996,2016,25.0,5.2,4.7,Los Angeles Lakers
2003,2023,27.1,7.5,7.4,Cleveland Cavaliers",
        );

        let errors = normalize(&mut f);
        assert!(errors.is_empty());
        assert_eq!(f.column("FROM_YEAR").unwrap().kind(), "int");
        assert_eq!(f.column("TO_YEAR").unwrap().kind(), "int");
        assert_eq!(f.column("PTS").unwrap().kind(), "float");
        assert_eq!(f.column("TEAM_NAME").unwrap().kind(), "text");
        assert_eq!(f.column("FROM_YEAR").unwrap().int_at(1), Some(2003));
    }

    #[test]
    fn blank_cells_do_not_fail_conversion() {
        let mut f = frame(
            "\
FROM_YEAR,PTS
1996,
2003,27.1",
        );

        assert!(normalize(&mut f).is_empty());
        assert_eq!(f.column("PTS").unwrap(), &Column::Float(vec![None, Some(27.1)]));
    }

    #[test]
    fn failed_column_is_left_unchanged_and_others_convert() {
        let mut f = frame(
            "\
FROM_YEAR,PTS,REB
1996,25.0,5.2
2003,n/a,7.5",
        );
        let before = f.column("PTS").unwrap().clone();

        let errors = normalize(&mut f);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].column, "PTS");
        assert_eq!(errors[0].row, 1);
        assert_eq!(errors[0].value, "n/a");

        assert_eq!(f.column("PTS").unwrap(), &before);
        assert_eq!(f.column("FROM_YEAR").unwrap().kind(), "int");
        assert_eq!(f.column("REB").unwrap().kind(), "float");
    }

    #[test]
    fn fractional_year_is_a_conversion_error() {
        let mut f = frame(
            "\
FROM_YEAR
1996.5",
        );

        let errors = normalize(&mut f);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].target, "integer year");
        assert_eq!(f.column("FROM_YEAR").unwrap().kind(), "text");
    }

    #[test]
    fn whole_float_years_become_ints() {
        let mut f = frame(
            "\
FROM_YEAR
1996.0",
        );

        assert!(normalize(&mut f).is_empty());
        assert_eq!(f.column("FROM_YEAR").unwrap(), &Column::Int(vec![Some(1996)]));
    }

    #[test]
    fn missing_columns_are_skipped() {
        let mut f = frame("TEAM_NAME\nBoston Celtics");
        assert!(normalize(&mut f).is_empty());
    }

    #[test]
    fn already_typed_columns_are_kept() {
        let mut f = Frame::from_columns(vec![
            ("FROM_YEAR".into(), Column::Int(vec![Some(2000)])),
            ("PTS".into(), Column::Int(vec![Some(10)])),
        ]);

        assert!(normalize(&mut f).is_empty());
        assert_eq!(f.column("FROM_YEAR").unwrap(), &Column::Int(vec![Some(2000)]));
        assert_eq!(f.column("PTS").unwrap(), &Column::Float(vec![Some(10.0)]));
    }
}
