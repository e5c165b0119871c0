//! Two-column time-series files written by the MD trajectory pipeline.
//!
//! Format: one sample per line, `time observable`, whitespace separated.
//! Blank lines and `#` comments are skipped. Anything else is an error that
//! names the file and the 1-based line.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Parsed series; `time` and `values` have equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeSeries {
    pub source: PathBuf,
    pub time: Vec<f64>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Input-format errors.
#[derive(Debug)]
pub enum SeriesError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    ColumnCount {
        path: PathBuf,
        line: usize,
        found: usize,
    },
    Number {
        path: PathBuf,
        line: usize,
        token: String,
    },
    Empty {
        path: PathBuf,
    },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            SeriesError::ColumnCount { path, line, found } => write!(
                f,
                "{}:{line}: expected 2 columns (time, observable), found {found}",
                path.display()
            ),
            SeriesError::Number { path, line, token } => {
                write!(f, "{}:{line}: not a number: {token:?}", path.display())
            }
            SeriesError::Empty { path } => write!(f, "{}: series has no samples", path.display()),
        }
    }
}

impl std::error::Error for SeriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeriesError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Parse series text; `source` is used for diagnostics only.
pub fn parse_series(text: &str, source: &Path) -> Result<TimeSeries, SeriesError> {
    let mut time = Vec::new();
    let mut values = Vec::new();
    for (k, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() != 2 {
            return Err(SeriesError::ColumnCount {
                path: source.to_path_buf(),
                line: k + 1,
                found: cols.len(),
            });
        }
        let parse = |tok: &str| {
            tok.parse::<f64>().map_err(|_| SeriesError::Number {
                path: source.to_path_buf(),
                line: k + 1,
                token: tok.to_string(),
            })
        };
        time.push(parse(cols[0])?);
        values.push(parse(cols[1])?);
    }
    if values.is_empty() {
        return Err(SeriesError::Empty {
            path: source.to_path_buf(),
        });
    }
    Ok(TimeSeries {
        source: source.to_path_buf(),
        time,
        values,
    })
}

/// Read and parse a series file.
pub fn read_series(path: &Path) -> Result<TimeSeries, SeriesError> {
    let text = fs::read_to_string(path).map_err(|source| SeriesError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_series(&text, path)
}
