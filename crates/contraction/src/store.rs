//! Typed, versioned result blob shared between the analysis and comparison runs.
//!
//! Layout: one flat JSON object per topology,
//! `{"schema":1,"topology":"theta","g":…,"trace":…,"v":7,"e":9,"loops":3}`.
//! Files are write-once: `write_blob` refuses to replace an existing file
//! unless asked to.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::factor::TopologyMetrics;

/// Current on-disk schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Directory used when no explicit path is given.
pub const DEFAULT_RESULTS_DIR: &str = "results";

/// Persisted contraction-factor record for one topology.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultBlob {
    pub schema: u32,
    pub topology: String,
    pub g: f64,
    pub trace: f64,
    pub v: usize,
    pub e: usize,
    pub loops: i64,
}

impl ResultBlob {
    pub fn new(topology: &str, g: f64, trace: f64, metrics: TopologyMetrics) -> Self {
        Self {
            schema: SCHEMA_VERSION,
            topology: topology.to_string(),
            g,
            trace,
            v: metrics.vertices,
            e: metrics.edges,
            loops: metrics.loops,
        }
    }

    pub fn metrics(&self) -> TopologyMetrics {
        TopologyMetrics {
            vertices: self.v,
            edges: self.e,
            loops: self.loops,
        }
    }
}

/// `results/<topology>_results.json`
pub fn default_blob_path(topology: &str) -> PathBuf {
    Path::new(DEFAULT_RESULTS_DIR).join(format!("{topology}_results.json"))
}

/// Errors reading or writing result blobs.
#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Format { path: PathBuf, source: serde_json::Error },
    AlreadyExists { path: PathBuf },
    SchemaMismatch { path: PathBuf, found: u32 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            StoreError::Format { path, source } => {
                write!(f, "{}: malformed result blob: {source}", path.display())
            }
            StoreError::AlreadyExists { path } => write!(
                f,
                "{} already exists (result blobs are write-once)",
                path.display()
            ),
            StoreError::SchemaMismatch { path, found } => write!(
                f,
                "{}: schema version {found} is not supported (expected {SCHEMA_VERSION})",
                path.display()
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Format { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Write `blob` to `path`, creating parent directories.
///
/// Without `overwrite` the file is opened with `create_new`, so an existing
/// file is never truncated.
pub fn write_blob(path: &Path, blob: &ResultBlob, overwrite: bool) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }
    let bytes = serde_json::to_vec_pretty(blob).map_err(|source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    })?;
    let mut opts = fs::OpenOptions::new();
    opts.write(true);
    if overwrite {
        opts.create(true).truncate(true);
    } else {
        opts.create_new(true);
    }
    let mut file = opts.open(path).map_err(|source| match source.kind() {
        io::ErrorKind::AlreadyExists => StoreError::AlreadyExists {
            path: path.to_path_buf(),
        },
        _ => io_err(source),
    })?;
    file.write_all(&bytes).map_err(io_err)
}

/// Read and validate a blob.
pub fn read_blob(path: &Path) -> Result<ResultBlob, StoreError> {
    let bytes = fs::read(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let format_err = |source| StoreError::Format {
        path: path.to_path_buf(),
        source,
    };
    // Check the version before the full shape so old files report the schema, not a missing field.
    let raw: serde_json::Value = serde_json::from_slice(&bytes).map_err(format_err)?;
    let found = raw.get("schema").and_then(|s| s.as_u64()).unwrap_or(0) as u32;
    if found != SCHEMA_VERSION {
        return Err(StoreError::SchemaMismatch {
            path: path.to_path_buf(),
            found,
        });
    }
    serde_json::from_value(raw).map_err(format_err)
}
