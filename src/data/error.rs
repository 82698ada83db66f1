use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised while locating or reading the paper table.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}", missing_input_message(.preferred, .fallback.as_deref()))]
    MissingInput {
        preferred: PathBuf,
        fallback: Option<PathBuf>,
    },

    #[error("reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parsing CSV {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("parsing JSON {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("reading parquet {}: {source}", .path.display())]
    Parquet {
        path: PathBuf,
        source: parquet::errors::ParquetError,
    },

    #[error("decoding parquet {}: {source}", .path.display())]
    Arrow {
        path: PathBuf,
        source: arrow::error::ArrowError,
    },

    #[error("{}: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("unsupported file type: {} (expected .csv, .json or .parquet)", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

fn missing_input_message(preferred: &Path, fallback: Option<&Path>) -> String {
    match fallback {
        Some(fallback) => format!(
            "No {} or {} found. Place the CSV in the working directory.",
            preferred.display(),
            fallback.display()
        ),
        None => format!(
            "No {} found. Place the CSV in the working directory.",
            preferred.display()
        ),
    }
}
