use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::{SinkError, SinkResult};

/// `<prefix><original file name>`, e.g. `valid_leads.csv`.
pub fn artifact_file_name(prefix: &str, source: &Path) -> SinkResult<String> {
    let name = source
        .file_name()
        .ok_or_else(|| SinkError::NoFileName(source.to_path_buf()))?;
    Ok(format!("{}{}", prefix, name.to_string_lossy()))
}

/// Staged CSV artifact writer.
///
/// Rows are written to a hidden temp file next to the final path; `commit`
/// renames it into place. Dropping the sink before commit removes whatever
/// was written.
pub struct CsvArtifactSink {
    final_path: PathBuf,
    /// Temp file path for staging
    temp_path: Option<PathBuf>,
    rows_written: u64,
}

impl CsvArtifactSink {
    /// Write `header` and `rows` unchanged to a staged file that becomes
    /// `<dir>/<file_name>` on commit.
    pub fn stage<'a, I>(
        dir: &Path,
        file_name: &str,
        header: &[String],
        rows: I,
    ) -> SinkResult<Self>
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        std::fs::create_dir_all(dir).map_err(|e| SinkError::io(dir, e))?;

        let final_path = dir.join(file_name);
        let temp_path = dir.join(format!(".{}.tmp", file_name));

        debug!(
            "Staging CSV artifact: {} (temp: {})",
            final_path.display(),
            temp_path.display()
        );

        let mut sink = Self {
            final_path,
            temp_path: Some(temp_path.clone()),
            rows_written: 0,
        };
        // On error `sink` drops here and the partial temp file is removed
        sink.rows_written = write_rows(&temp_path, header, rows)?;
        Ok(sink)
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Promote the staged file to its final name.
    pub fn commit(&mut self) -> SinkResult<PathBuf> {
        if let Some(temp_path) = self.temp_path.take() {
            if let Err(e) = std::fs::rename(&temp_path, &self.final_path) {
                self.temp_path = Some(temp_path);
                return Err(SinkError::io(&self.final_path, e));
            }
            info!(
                "Committed CSV artifact: {} ({} rows)",
                self.final_path.display(),
                self.rows_written
            );
        }
        Ok(self.final_path.clone())
    }
}

impl Drop for CsvArtifactSink {
    fn drop(&mut self) {
        // Cleanup temp file if we didn't finish properly
        if let Some(temp_path) = &self.temp_path {
            if temp_path.exists() {
                let _ = std::fs::remove_file(temp_path);
                warn!("Cleaned up orphaned temp file: {}", temp_path.display());
            }
        }
    }
}

fn write_rows<'a, I>(path: &Path, header: &[String], rows: I) -> SinkResult<u64>
where
    I: IntoIterator<Item = &'a [String]>,
{
    let mut writer = csv::Writer::from_path(path).map_err(|e| SinkError::csv(path, e))?;

    writer
        .write_record(header)
        .map_err(|e| SinkError::csv(path, e))?;

    let mut written = 0;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| SinkError::csv(path, e))?;
        written += 1;
    }

    writer.flush().map_err(|e| SinkError::io(path, e))?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::read_leads;
    use leadflow_protocol::LeadField;
    use tempfile::tempdir;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn header() -> Vec<String> {
        strings(&["company_name", "email", "notes", "status"])
    }

    fn rows() -> Vec<Vec<String>> {
        vec![
            strings(&["Smith, Jones & Co.", "a@sjc.com", "call back Tuesday", "Proposal Sent"]),
            strings(&["Quote \"Inc\"", "", "", ""]),
        ]
    }

    #[test]
    fn test_artifact_file_name() {
        assert_eq!(
            artifact_file_name("valid_", Path::new("/in/leads.csv")).unwrap(),
            "valid_leads.csv"
        );
        assert!(artifact_file_name("valid_", Path::new("/")).is_err());
    }

    #[test]
    fn test_stage_commit_keeps_every_column() {
        let dir = tempdir().unwrap();
        let rows = rows();
        let mut sink = CsvArtifactSink::stage(
            dir.path(),
            "valid_x.csv",
            &header(),
            rows.iter().map(Vec::as_slice),
        )
        .unwrap();
        assert_eq!(sink.rows_written(), 2);
        assert!(!dir.path().join("valid_x.csv").exists());

        let path = sink.commit().unwrap();
        assert!(path.exists());
        assert!(!dir.path().join(".valid_x.csv.tmp").exists());

        let file = read_leads(&path).unwrap();
        assert_eq!(file.header, header());
        assert_eq!(file.rows, rows);
        assert_eq!(file.ignored_columns, vec!["notes"]);
        assert_eq!(file.records[0].get(LeadField::Status), Some("Proposal Sent"));
    }

    #[test]
    fn test_drop_without_commit_removes_temp() {
        let dir = tempdir().unwrap();
        let rows = rows();
        {
            let _sink = CsvArtifactSink::stage(
                dir.path(),
                "invalid_x.csv",
                &header(),
                rows.iter().map(Vec::as_slice),
            )
            .unwrap();
            assert!(dir.path().join(".invalid_x.csv.tmp").exists());
        }
        assert!(!dir.path().join(".invalid_x.csv.tmp").exists());
        assert!(!dir.path().join("invalid_x.csv").exists());
    }

    #[test]
    fn test_failed_commit_leaves_temp_for_drop() {
        let dir = tempdir().unwrap();
        // A directory in the way makes the rename fail
        std::fs::create_dir(dir.path().join("valid_y.csv")).unwrap();
        let rows = rows();
        {
            let mut sink = CsvArtifactSink::stage(
                dir.path(),
                "valid_y.csv",
                &header(),
                rows.iter().map(Vec::as_slice),
            )
            .unwrap();
            assert!(sink.commit().is_err());
            assert!(dir.path().join(".valid_y.csv.tmp").exists());
        }
        assert!(!dir.path().join(".valid_y.csv.tmp").exists());
        assert!(dir.path().join("valid_y.csv").is_dir());
    }
}
