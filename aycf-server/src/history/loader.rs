//! Snapshot file discovery and loading.
//!
//! The corpus is a directory tree of daily CSV runs. Files that cannot be
//! read or that lack the required columns are skipped and counted, never
//! fatal on their own; a directory being swapped out by the refresh job mid
//! scan therefore degrades to fewer rows rather than an error.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::{City, RouteAppearance};

use super::error::HistoryError;

/// Column holding the route origin. Required.
const COL_FROM: &str = "departure_from";

/// Column holding the route destination. Required.
const COL_TO: &str = "departure_to";

/// Columns that may hold the snapshot generation timestamp, in preference
/// order. Optional.
const COL_TIMESTAMPS: &[&str] = &["data_generated", "run_ts"];

/// Raw route appearances with per-file load counters.
#[derive(Debug, Clone)]
pub struct LoadedHistory {
    /// All rows across all usable files, city names normalised.
    pub records: Vec<RouteAppearance>,

    /// Snapshot files found under the data directory.
    pub files_scanned: usize,

    /// Files that contributed at least one row.
    pub files_contributing: usize,

    /// Files skipped because they could not be read or lacked the required
    /// columns.
    pub files_skipped: usize,
}

/// Load every snapshot file under `data_dir` (recursive).
///
/// Fails with [`HistoryError::NoDataFound`] when the directory holds no
/// snapshot files at all, and with [`HistoryError::SchemaMismatch`] when
/// files exist but none carries the required columns.
pub fn load_history(data_dir: &Path) -> Result<LoadedHistory, HistoryError> {
    let paths = collect_snapshot_files(data_dir);
    if paths.is_empty() {
        return Err(HistoryError::NoDataFound {
            dir: data_dir.to_path_buf(),
        });
    }

    let mut records = Vec::new();
    let mut files_contributing = 0;
    let mut files_skipped = 0;
    let mut any_schema_ok = false;

    for path in &paths {
        match load_file(path) {
            Some(rows) => {
                any_schema_ok = true;
                if !rows.is_empty() {
                    files_contributing += 1;
                }
                records.extend(rows);
            }
            None => {
                debug!(path = %path.display(), "skipping unusable snapshot file");
                files_skipped += 1;
            }
        }
    }

    if !any_schema_ok {
        return Err(HistoryError::SchemaMismatch {
            dir: data_dir.to_path_buf(),
            files: paths.len(),
        });
    }

    Ok(LoadedHistory {
        records,
        files_scanned: paths.len(),
        files_contributing,
        files_skipped,
    })
}

/// Number of snapshot files currently under `data_dir`. Used by the health
/// endpoint and the refresh job's usable-cache check.
pub fn snapshot_file_count(data_dir: &Path) -> usize {
    collect_snapshot_files(data_dir).len()
}

/// Recursively collect `.csv` files, sorted by path for determinism.
fn collect_snapshot_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    collect_into(dir, &mut files);
    files.sort();
    files
}

fn collect_into(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_into(&path, out);
        } else if path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
        {
            out.push(path);
        }
    }
}

/// Load one snapshot file. Returns `None` when the file cannot be opened
/// or lacks the required columns; rows that fail to parse are dropped
/// individually.
fn load_file(path: &Path) -> Option<Vec<RouteAppearance>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .ok()?;

    let headers = reader.headers().ok()?.clone();
    let find = |name: &str| headers.iter().position(|h| h.trim() == name);

    let from_idx = find(COL_FROM)?;
    let to_idx = find(COL_TO)?;
    let ts_idx = COL_TIMESTAMPS.iter().find_map(|&col| find(col));

    let mut rows = Vec::new();
    for record in reader.records() {
        let Ok(record) = record else {
            continue;
        };

        let (Some(from), Some(to)) = (record.get(from_idx), record.get(to_idx)) else {
            continue;
        };

        let from = City::normalise(from);
        let to = City::normalise(to);
        if from.is_empty() || to.is_empty() {
            continue;
        }

        let observed_at = ts_idx
            .and_then(|idx| record.get(idx))
            .and_then(parse_timestamp);

        rows.push(RouteAppearance {
            from,
            to,
            observed_at,
        });
    }

    Some(rows)
}

/// Best-effort timestamp parsing over the formats seen in the corpus.
///
/// Anything unparseable becomes `None`; such records are kept, since the
/// source does not always stamp its runs.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%d/%m/%Y %H:%M:%S",
        "%d/%m/%Y %H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn empty_dir_is_no_data_found() {
        let dir = tempdir().unwrap();
        let err = load_history(dir.path()).unwrap_err();
        assert!(matches!(err, HistoryError::NoDataFound { .. }));
    }

    #[test]
    fn missing_dir_is_no_data_found() {
        let err = load_history(Path::new("/nonexistent/aycf/data")).unwrap_err();
        assert!(matches!(err, HistoryError::NoDataFound { .. }));
    }

    #[test]
    fn all_files_wrong_schema_is_mismatch() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "foo,bar\n1,2\n").unwrap();
        fs::write(dir.path().join("b.csv"), "origin,dest\nX,Y\n").unwrap();

        let err = load_history(dir.path()).unwrap_err();
        assert!(matches!(err, HistoryError::SchemaMismatch { files: 2, .. }));
    }

    #[test]
    fn bad_files_are_skipped_when_one_is_usable() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.csv"), "foo,bar\n1,2\n").unwrap();
        fs::write(
            dir.path().join("good.csv"),
            "departure_from,departure_to\nLiverpool,Budapest\n",
        )
        .unwrap();

        let loaded = load_history(dir.path()).unwrap();
        assert_eq!(loaded.files_scanned, 2);
        assert_eq!(loaded.files_contributing, 1);
        assert_eq!(loaded.files_skipped, 1);
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn recursive_discovery() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("2024").join("05");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            nested.join("run.csv"),
            "departure_from,departure_to\nWarsaw,Kutaisi\n",
        )
        .unwrap();

        let loaded = load_history(dir.path()).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.records[0].from.as_str(), "Warsaw");
    }

    #[test]
    fn city_names_are_normalised_on_load() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("run.csv"),
            "departure_from,departure_to\n London Luton , Kutaisi \n",
        )
        .unwrap();

        let loaded = load_history(dir.path()).unwrap();
        assert_eq!(loaded.records[0].from.as_str(), "London");
        assert_eq!(loaded.records[0].to.as_str(), "Kutaisi");
    }

    #[test]
    fn timestamp_column_is_optional_and_best_effort() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("run.csv"),
            "departure_from,departure_to,data_generated\n\
             Liverpool,Budapest,2024-05-06 07:30:00\n\
             Liverpool,Budapest,not a timestamp\n\
             Liverpool,Budapest,\n",
        )
        .unwrap();

        let loaded = load_history(dir.path()).unwrap();
        assert_eq!(loaded.records.len(), 3);
        assert!(loaded.records[0].observed_at.is_some());
        assert!(loaded.records[1].observed_at.is_none());
        assert!(loaded.records[2].observed_at.is_none());
    }

    #[test]
    fn run_ts_fallback_column() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("run.csv"),
            "departure_from,departure_to,run_ts\nLiverpool,Budapest,2024-05-06T07:30:00\n",
        )
        .unwrap();

        let loaded = load_history(dir.path()).unwrap();
        assert!(loaded.records[0].observed_at.is_some());
    }

    #[test]
    fn rows_with_blank_cities_are_dropped() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("run.csv"),
            "departure_from,departure_to\n,Budapest\nLiverpool,\nLiverpool,Budapest\n",
        )
        .unwrap();

        let loaded = load_history(dir.path()).unwrap();
        assert_eq!(loaded.records.len(), 1);
    }

    #[test]
    fn snapshot_file_count_counts_recursively() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.csv"), "x\n").unwrap();
        fs::write(dir.path().join("sub").join("b.csv"), "x\n").unwrap();
        fs::write(dir.path().join("notes.txt"), "x\n").unwrap();

        assert_eq!(snapshot_file_count(dir.path()), 2);
        assert_eq!(snapshot_file_count(Path::new("/nonexistent")), 0);
    }

    #[test]
    fn parse_timestamp_formats() {
        assert!(parse_timestamp("2024-05-06 07:30:00").is_some());
        assert!(parse_timestamp("2024-05-06T07:30:00").is_some());
        assert!(parse_timestamp("2024-05-06T07:30:00Z").is_some());
        assert!(parse_timestamp("2024-05-06T07:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-05-06 07:30:00.123").is_some());
        assert!(parse_timestamp("2024-05-06").is_some());
        assert!(parse_timestamp("06/05/2024 07:30").is_some());

        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("2024-13-40").is_none());
    }
}
