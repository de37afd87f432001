// Dataset discovery and loading.
//
// The player index is looked up by file name in an ordered list of candidate
// directories. The dashboard never runs without a table: any failure while
// locating, reading, or validating the file falls back to a one-row
// placeholder table.

use super::frame::{Column, Frame};
use super::normalize::{normalize, TypeConversionError};
use super::schema::{self, PlayerTable, SchemaError};
use crate::config::DataConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("could not find {file_name} in any of: {}", display_paths(.searched))]
    DataNotFound {
        file_name: String,
        searched: Vec<PathBuf>,
    },

    #[error("failed to read file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    #[error("invalid dataset {path}: {source}")]
    Schema { path: PathBuf, source: SchemaError },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Loaded dataset
// ---------------------------------------------------------------------------

/// Where the loaded table came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Fallback,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Fallback => f.write_str("fallback"),
        }
    }
}

/// A normalized frame (all source columns) plus its typed view.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub frame: Frame,
    pub table: PlayerTable,
    pub source: DataSource,
    pub conversion_errors: Vec<TypeConversionError>,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Candidate directories in search order: `<cwd>/data`, `<cwd>/deploy/data`,
/// the executable's directory and its `data/`, `<cwd>`, configured extra
/// directories, then the platform data directory.
pub fn candidate_dirs(config: &DataConfig) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let cwd = std::env::current_dir().ok();

    if let Some(cwd) = &cwd {
        dirs.push(cwd.join("data"));
        dirs.push(cwd.join("deploy").join("data"));
    }
    if let Some(exe_dir) = exe_dir() {
        dirs.push(exe_dir.clone());
        dirs.push(exe_dir.join("data"));
    }
    if let Some(cwd) = cwd {
        dirs.push(cwd);
    }

    dirs.extend(config.extra_dirs.iter().cloned());

    if let Some(project) = directories::ProjectDirs::from("org", "courtside", "courtside") {
        dirs.push(project.data_dir().to_path_buf());
    }

    dirs
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Return the first `dir/file_name` that exists as a file.
pub fn locate(file_name: &str, dirs: &[PathBuf]) -> Result<PathBuf, DatasetError> {
    let mut searched = Vec::with_capacity(dirs.len());
    for dir in dirs {
        let candidate = dir.join(file_name);
        debug!("checking {}", candidate.display());
        if candidate.is_file() {
            info!("found dataset at {}", candidate.display());
            return Ok(candidate);
        }
        searched.push(candidate);
    }
    Err(DatasetError::DataNotFound {
        file_name: file_name.to_string(),
        searched,
    })
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Read the CSV at `path` into a raw (un-normalized) frame.
pub fn read_frame(path: &Path) -> Result<Frame, DatasetError> {
    let file = std::fs::File::open(path).map_err(|e| DatasetError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Frame::from_csv_reader(file).map_err(|e| DatasetError::Csv {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read, normalize, and validate the CSV at `path`.
pub fn load_path(path: &Path) -> Result<Dataset, DatasetError> {
    let mut frame = read_frame(path)?;
    let conversion_errors = normalize(&mut frame);
    let table = PlayerTable::from_frame(&frame).map_err(|e| DatasetError::Schema {
        path: path.to_path_buf(),
        source: e,
    })?;

    let (rows, cols) = frame.shape();
    info!(
        "loaded {} with shape ({rows}, {cols}); {} usable player rows",
        path.display(),
        table.len()
    );
    debug!("columns: {:?}", frame.column_names());

    Ok(Dataset {
        frame,
        table,
        source: DataSource::File(path.to_path_buf()),
        conversion_errors,
    })
}

/// Locate the configured file in `dirs` and load it.
pub fn load_from_dirs(config: &DataConfig, dirs: &[PathBuf]) -> Result<Dataset, DatasetError> {
    let path = locate(&config.file_name, dirs)?;
    load_path(&path)
}

/// Load the dataset, substituting the fallback table on any failure.
pub fn load_or_fallback(config: &DataConfig) -> Dataset {
    load_or_fallback_from(config, &candidate_dirs(config))
}

/// Like [`load_or_fallback`] with an explicit directory list.
pub fn load_or_fallback_from(config: &DataConfig, dirs: &[PathBuf]) -> Dataset {
    match load_from_dirs(config, dirs) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("error loading data: {e}");
            warn!("using fallback dataset");
            fallback_dataset()
        }
    }
}

// ---------------------------------------------------------------------------
// Fallback table
// ---------------------------------------------------------------------------

/// A one-row frame carrying every required column with placeholder values.
pub fn fallback_frame() -> Frame {
    let text = |s: &str| Column::Text(vec![Some(s.to_string())]);
    Frame::from_columns(vec![
        (schema::COL_FIRST_NAME.into(), text("Sample")),
        (schema::COL_LAST_NAME.into(), text("Player")),
        (schema::COL_FROM_YEAR.into(), Column::Int(vec![Some(2000)])),
        (schema::COL_TO_YEAR.into(), Column::Int(vec![Some(2001)])),
        (schema::COL_TEAM.into(), text("Sample Team")),
        (schema::COL_POSITION.into(), text("G")),
        (schema::COL_COLLEGE.into(), text("Sample College")),
        (schema::COL_POINTS.into(), Column::Float(vec![Some(0.0)])),
        (schema::COL_REBOUNDS.into(), Column::Float(vec![Some(0.0)])),
        (schema::COL_ASSISTS.into(), Column::Float(vec![Some(0.0)])),
    ])
}

pub fn fallback_dataset() -> Dataset {
    let frame = fallback_frame();
    let table = PlayerTable::from_frame(&frame).unwrap_or_default();
    Dataset {
        frame,
        table,
        source: DataSource::Fallback,
        conversion_errors: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
