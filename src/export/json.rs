//! JSON import/export of schedule records.
//! A snapshot file is a JSON array of `{ id, interval, ease_factor, due_at }` objects.

use crate::models::CardSchedule;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schedule JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn io_error(path: &Path, source: std::io::Error) -> ExportError {
    ExportError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Reads schedule records from a JSON file.
pub fn import_snapshot(path: impl AsRef<Path>) -> Result<Vec<CardSchedule>, ExportError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| io_error(path, e))?;
    let records: Vec<CardSchedule> = serde_json::from_reader(BufReader::new(file))?;

    tracing::info!(count = records.len(), path = %path.display(), "imported schedule records");
    Ok(records)
}

/// Writes schedule records to a JSON file, pretty-printed.
pub fn export_schedules_to_path(
    records: &[CardSchedule],
    path: impl AsRef<Path>,
) -> Result<(), ExportError> {
    let path = path.as_ref();
    let json_string = serde_json::to_string_pretty(records)?;
    let mut file = File::create(path).map_err(|e| io_error(path, e))?;
    file.write_all(json_string.as_bytes())
        .map_err(|e| io_error(path, e))?;
    Ok(())
}
