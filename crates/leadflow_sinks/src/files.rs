use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::{SinkError, SinkResult};

/// List `*.csv` files directly inside `dir`, sorted by file name.
///
/// Only regular files with a lowercase `.csv` suffix are returned; hidden
/// staging files (leading `.`) are skipped.
pub fn discover_csv_files(dir: &Path) -> SinkResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(SinkError::NotADirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| SinkError::io(dir, e))? {
        let entry = entry.map_err(|e| SinkError::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| SinkError::io(&path, e))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with('.') || !name.ends_with(".csv") {
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// `<archive_root>/<YYYYMMDD>`
pub fn archive_dir_for(archive_root: &Path, date: NaiveDate) -> PathBuf {
    archive_root.join(date.format("%Y%m%d").to_string())
}

/// Move a processed original into its dated archive directory.
pub fn archive_file(path: &Path, archive_root: &Path, date: NaiveDate) -> SinkResult<PathBuf> {
    let dest_dir = archive_dir_for(archive_root, date);
    let dest = move_into_dir(path, &dest_dir)?;
    info!("Archived {} -> {}", path.display(), dest.display());
    Ok(dest)
}

/// Move `path` into `dir` (created if needed), keeping its file name.
///
/// If the name is already taken a numeric suffix is added (`leads_1.csv`,
/// `leads_2.csv`, ...), so nothing already in `dir` is replaced. Falls back to
/// copy+remove when a rename is not possible (e.g. across filesystems); the
/// source is only removed after the copy succeeded.
pub fn move_into_dir(path: &Path, dir: &Path) -> SinkResult<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| SinkError::NoFileName(path.to_path_buf()))?;
    std::fs::create_dir_all(dir).map_err(|e| SinkError::io(dir, e))?;

    let dest = free_destination(dir, Path::new(name));
    if dest.file_name() != Some(name) {
        warn!(
            "{} already exists, moving to {}",
            dir.join(name).display(),
            dest.display()
        );
    }

    if std::fs::rename(path, &dest).is_err() {
        std::fs::copy(path, &dest).map_err(|e| SinkError::io(&dest, e))?;
        std::fs::remove_file(path).map_err(|e| SinkError::io(path, e))?;
    }

    Ok(dest)
}

fn free_destination(dir: &Path, name: &Path) -> PathBuf {
    let dest = dir.join(name);
    if !dest.exists() {
        return dest;
    }

    let stem = name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = name
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (1u32..)
        .map(|n| dir.join(format!("{}_{}{}", stem, n, ext)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_discover_sorted_csv_only() {
        let dir = tempdir().unwrap();
        for name in ["b.csv", "a.csv", "notes.txt", ".staged.csv.tmp", "C.CSV", ".hidden.csv"] {
            std::fs::write(dir.path().join(name), "company_name,email\n").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.csv")).unwrap();

        let files = discover_csv_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, ["a.csv", "b.csv"]);
    }

    #[test]
    fn test_discover_missing_dir() {
        let dir = tempdir().unwrap();
        let result = discover_csv_files(&dir.path().join("missing"));
        assert!(matches!(result, Err(SinkError::NotADirectory(_))));
    }

    #[test]
    fn test_archive_file_uses_dated_dir() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("leads.csv");
        std::fs::write(&input, "company_name,email\n").unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let dest = archive_file(&input, &dir.path().join("archive"), date).unwrap();

        assert_eq!(dest, dir.path().join("archive").join("20240309").join("leads.csv"));
        assert!(dest.exists());
        assert!(!input.exists());
    }

    #[test]
    fn test_move_missing_source_fails_without_side_effects() {
        let dir = tempdir().unwrap();
        let result = move_into_dir(&dir.path().join("ghost.csv"), &dir.path().join("failed"));
        assert!(result.is_err());
        assert!(!dir.path().join("failed").join("ghost.csv").exists());
    }

    #[test]
    fn test_same_name_gets_suffix_instead_of_replacing() {
        let dir = tempdir().unwrap();
        let archive = dir.path().join("archive");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let input = dir.path().join("leads.csv");

        std::fs::write(&input, "first").unwrap();
        let first = archive_file(&input, &archive, date).unwrap();
        std::fs::write(&input, "second").unwrap();
        let second = archive_file(&input, &archive, date).unwrap();
        std::fs::write(&input, "third").unwrap();
        let third = archive_file(&input, &archive, date).unwrap();

        assert_eq!(first.file_name().unwrap(), "leads.csv");
        assert_eq!(second.file_name().unwrap(), "leads_1.csv");
        assert_eq!(third.file_name().unwrap(), "leads_2.csv");
        assert_eq!(std::fs::read_to_string(&first).unwrap(), "first");
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "second");
        assert_eq!(std::fs::read_to_string(&third).unwrap(), "third");
    }
}
