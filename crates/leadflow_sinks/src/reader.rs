use leadflow_protocol::{LeadField, LeadRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::{SinkError, SinkResult};

/// Records read from one lead CSV.
///
/// `rows` keeps every input column verbatim so artifacts can be written with
/// the same columns as the input; `records` is the typed view of the same
/// rows, index for index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFile {
    /// Header names exactly as they appear in the file.
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub records: Vec<LeadRecord>,
    /// Header names that were not recognized and were skipped.
    pub ignored_columns: Vec<String>,
}

/// Read a lead CSV from disk.
pub fn read_leads(path: &Path) -> SinkResult<LeadFile> {
    let file = File::open(path).map_err(|e| SinkError::io(path, e))?;
    read_leads_from(file, path)
}

/// Read lead CSV data from any reader. `source` is only used in errors.
///
/// A header row is required. Values are kept verbatim (no trimming or type
/// coercion); a row whose field count differs from the header is an error.
pub fn read_leads_from<R: Read>(reader: R, source: &Path) -> SinkResult<LeadFile> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| SinkError::csv(source, e))?
        .clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SinkError::MissingHeader(source.to_path_buf()));
    }

    let mut mapping: Vec<(usize, LeadField)> = Vec::new();
    let mut ignored_columns = Vec::new();
    for (idx, name) in headers.iter().enumerate() {
        match name.parse::<LeadField>() {
            Ok(field) => {
                if mapping.iter().any(|(_, f)| *f == field) {
                    return Err(SinkError::DuplicateColumn {
                        path: source.to_path_buf(),
                        column: field.as_str().to_string(),
                    });
                }
                mapping.push((idx, field));
            }
            Err(_) => ignored_columns.push(name.to_string()),
        }
    }

    if !ignored_columns.is_empty() {
        debug!(
            file = %source.display(),
            columns = ?ignored_columns,
            "Ignoring unrecognized columns"
        );
    }

    let mut rows = Vec::new();
    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row.map_err(|e| SinkError::csv(source, e))?;
        let mut record = LeadRecord::new();
        for (idx, field) in &mapping {
            if let Some(value) = row.get(*idx) {
                record.set(*field, value);
            }
        }
        records.push(record);
        rows.push(row.iter().map(str::to_string).collect());
    }

    Ok(LeadFile {
        header: headers.iter().map(str::to_string).collect(),
        rows,
        records,
        ignored_columns,
    })
}
