// Column-oriented in-memory table read from (and written back to) CSV.
//
// A `Frame` keeps every column of the source file, including ones the
// dashboard never reads, so the export tool can re-serialize the table
// without losing data. Cells start as text; the normalizer converts the
// numeric columns it knows about in place.

use std::borrow::Cow;
use std::io::{Read, Write};

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// A single column. Blank cells are `None` regardless of the column type.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Text(Vec<Option<String>>),
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(v) => v.len(),
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short type label used in log messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Column::Text(_) => "text",
            Column::Int(_) => "int",
            Column::Float(_) => "float",
        }
    }

    /// Cell rendered as text; `None` for blank cells.
    pub fn text_at(&self, row: usize) -> Option<Cow<'_, str>> {
        match self {
            Column::Text(v) => v.get(row)?.as_deref().map(Cow::Borrowed),
            Column::Int(v) => v.get(row).copied().flatten().map(|n| Cow::Owned(n.to_string())),
            Column::Float(v) => v.get(row).copied().flatten().map(|f| Cow::Owned(f.to_string())),
        }
    }

    /// Cell as an integer. Text cells are parsed leniently; unparsable text
    /// reads as `None`.
    pub fn int_at(&self, row: usize) -> Option<i64> {
        match self {
            Column::Int(v) => v.get(row).copied().flatten(),
            Column::Float(v) => v.get(row).copied().flatten().and_then(float_to_int),
            Column::Text(v) => v.get(row)?.as_deref().and_then(parse_int),
        }
    }

    /// Cell as a finite float. Text cells are parsed leniently.
    pub fn float_at(&self, row: usize) -> Option<f64> {
        match self {
            Column::Float(v) => v.get(row).copied().flatten().filter(|f| f.is_finite()),
            Column::Int(v) => v.get(row).copied().flatten().map(|n| n as f64),
            Column::Text(v) => v.get(row)?.as_deref().and_then(parse_float),
        }
    }
}

// ---------------------------------------------------------------------------
// Cell parsers
// ---------------------------------------------------------------------------

/// Parse an integer cell. Accepts `2000` and float spellings with no
/// fractional part such as `2000.0`.
pub fn parse_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    s.parse::<f64>().ok().and_then(float_to_int)
}

/// Parse a float cell, rejecting NaN and infinities.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn float_to_int(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    names: Vec<String>,
    columns: Vec<Column>,
    rows: usize,
}

impl Frame {
    /// Build a frame from named columns. All columns must have equal length.
    pub fn from_columns(columns: Vec<(String, Column)>) -> Self {
        let rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|(_, c)| c.len() == rows));
        let (names, columns) = columns.into_iter().unzip();
        Frame {
            names,
            columns,
            rows,
        }
    }

    /// Read a CSV with a header row. Cells are trimmed; empty cells become
    /// `None`. Every column starts out as `Column::Text`.
    pub fn from_csv_reader<R: Read>(rdr: R) -> Result<Self, csv::Error> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(rdr);

        let names: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

        for result in reader.records() {
            let record = result?;
            for (idx, column) in cells.iter_mut().enumerate() {
                let value = record.get(idx).filter(|s| !s.is_empty()).map(str::to_string);
                column.push(value);
            }
        }

        let rows = cells.first().map(Vec::len).unwrap_or(0);
        Ok(Frame {
            names,
            columns: cells.into_iter().map(Column::Text).collect(),
            rows,
        })
    }

    /// Write the frame as CSV with a header row. Blank cells are written
    /// as empty fields.
    pub fn write_csv<W: Write>(&self, wtr: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(wtr);
        writer.write_record(&self.names)?;
        for row in 0..self.rows {
            writer.write_record(self.row_text(row))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|idx| &self.columns[idx])
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        let idx = self.position(name)?;
        Some(&mut self.columns[idx])
    }

    /// All cells of one row rendered as text, blank cells as "".
    pub fn row_text(&self, row: usize) -> Vec<String> {
        self.columns
            .iter()
            .map(|c| c.text_at(row).map(Cow::into_owned).unwrap_or_default())
            .collect()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
