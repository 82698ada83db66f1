use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use log::{debug, info};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{normalize_cell, PaperTable};

type RawRow = Vec<Option<String>>;

// ---------------------------------------------------------------------------
// Load request: which files to try, and how much of the fallback to read
// ---------------------------------------------------------------------------

/// Arguments of one load. Also the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadRequest {
    /// Read in full when it exists.
    pub preferred: PathBuf,
    /// Read when `preferred` is absent.
    pub fallback: Option<PathBuf>,
    /// Leading rows to read from the fallback; ignored for `preferred`.
    pub row_limit: Option<usize>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the paper table from the first existing file of `request`.
pub fn load_table(request: &LoadRequest) -> Result<PaperTable, LoadError> {
    if request.preferred.exists() {
        let table = load_file(&request.preferred, None)?;
        info!(
            "Loaded {} papers from {} with columns {:?}",
            table.len(),
            request.preferred.display(),
            table.columns()
        );
        return Ok(table);
    }

    if let Some(fallback) = request.fallback.as_deref().filter(|p| p.exists()) {
        let table = load_file(fallback, request.row_limit)?;
        info!(
            "Loaded {} papers from fallback {} (row limit {:?}) with columns {:?}",
            table.len(),
            fallback.display(),
            request.row_limit,
            table.columns()
        );
        return Ok(table);
    }

    Err(LoadError::MissingInput {
        preferred: request.preferred.clone(),
        fallback: request.fallback.clone(),
    })
}

/// Load one file, reading at most `row_limit` rows.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one paper per line
/// * `.json`    – `[{ "title": ..., "journal": ..., ... }, ...]`
/// * `.parquet` – any scalar columns
pub fn load_file(path: &Path, row_limit: Option<usize>) -> Result<PaperTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let limit = row_limit.unwrap_or(usize::MAX);
    let (columns, rows) = match ext.as_str() {
        "csv" => read_csv(path, limit)?,
        "json" => read_json(path, limit)?,
        "parquet" | "pq" => read_parquet(path, limit)?,
        _ => {
            return Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    };
    Ok(PaperTable::from_rows(columns, rows))
}

// ---------------------------------------------------------------------------
// Process-lifetime cache
// ---------------------------------------------------------------------------

/// Memoises successful loads keyed by their [`LoadRequest`]. Entries are never
/// invalidated; failed loads are not stored, so they are retried next time.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<LoadRequest, Arc<PaperTable>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&mut self, request: &LoadRequest) -> Result<Arc<PaperTable>, LoadError> {
        if let Some(table) = self.tables.get(request) {
            debug!("Cache hit for {request:?}");
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(load_table(request)?);
        self.tables.insert(request.clone(), Arc::clone(&table));
        Ok(table)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path, limit: usize) -> Result<(Vec<String>, Vec<RawRow>), LoadError> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;
    let columns: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records().take(limit) {
        let record = result.map_err(csv_err)?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok((columns, rows))
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Records-oriented JSON (the default of `df.to_json(orient='records')`).
/// Columns are the union of all keys, in the order they are first met.
fn read_json(path: &Path, limit: usize) -> Result<(Vec<String>, Vec<RawRow>), LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue = serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let records = root.as_array().ok_or_else(|| LoadError::Malformed {
        path: path.to_path_buf(),
        reason: "expected a top-level JSON array".to_string(),
    })?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::new();
    for (i, rec) in records.iter().take(limit).enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::Malformed {
            path: path.to_path_buf(),
            reason: format!("row {i} is not a JSON object"),
        })?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .into_iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).and_then(json_to_cell))
                .collect()
        })
        .collect();
    Ok((columns, rows))
}

fn json_to_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => normalize_cell(s),
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Every cell is rendered to text and then
/// parsed like a CSV cell.
fn read_parquet(path: &Path, limit: usize) -> Result<(Vec<String>, Vec<RawRow>), LoadError> {
    let parquet_err = |source| LoadError::Parquet {
        path: path.to_path_buf(),
        source,
    };

    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file).map_err(parquet_err)?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().map_err(parquet_err)?;

    let mut rows: Vec<RawRow> = Vec::new();
    'batches: for batch_result in reader {
        let batch = batch_result.map_err(|source| LoadError::Arrow {
            path: path.to_path_buf(),
            source,
        })?;

        for row in 0..batch.num_rows() {
            if rows.len() >= limit {
                break 'batches;
            }
            let mut cells = Vec::with_capacity(columns.len());
            for col in batch.columns() {
                if col.is_null(row) {
                    cells.push(None);
                    continue;
                }
                let text = array_value_to_string(col.as_ref(), row).map_err(|source| {
                    LoadError::Arrow {
                        path: path.to_path_buf(),
                        source,
                    }
                })?;
                cells.push(normalize_cell(&text));
            }
            rows.push(cells);
        }
    }
    Ok((columns, rows))
}
