//! CSV export of the visible page.

use super::BookRow;
use crate::model::{ExportError, SortField};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the export inside the export directory.
pub const EXPORT_FILE_NAME: &str = "books.csv";

/// Serialize `rows` to CSV: a header record, then one record per row, joined
/// with `\n`. Fields containing a comma, quote, CR or LF are quoted and inner
/// quotes doubled.
pub fn to_csv(rows: &[BookRow]) -> String {
    let header = SortField::ALL.map(SortField::label);
    std::iter::once(record(header))
        .chain(rows.iter().map(|row| record(row.fields())))
        .collect::<Vec<_>>()
        .join("\n")
}

fn record(fields: [&str; 7]) -> String {
    fields.map(escape_field).join(",")
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Write `rows` as `books.csv` inside `dir`, returning the written path.
pub fn write_export(dir: &Path, rows: &[BookRow]) -> Result<PathBuf, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, to_csv(rows)).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), rows = rows.len(), "Exported visible page");
    Ok(path)
}
