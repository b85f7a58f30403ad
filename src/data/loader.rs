use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use anyhow::{Context, Result};

use super::error::DataError;
use super::model::{TrackRecord, TrackTable, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse a track table from a CSV file.
///
/// Layout: a header row naming at least [`REQUIRED_COLUMNS`]; extra
/// columns are ignored. Empty numeric cells become `NaN`, `mode` and
/// `time_signature` keep whatever type their text parses as.
pub fn load_tracks(path: &Path) -> std::result::Result<TrackTable, DataError> {
    let unavailable = |e: anyhow::Error| DataError::DataUnavailable {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    };

    let mut reader = open_csv(path).map_err(unavailable)?;
    let headers = read_headers(&mut reader).map_err(unavailable)?;
    check_schema(&headers)?;

    let records = read_records(&mut reader).map_err(unavailable)?;
    Ok(TrackTable::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV helpers
// ---------------------------------------------------------------------------

fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_path(path)
        .context("opening CSV")
}

fn read_headers(reader: &mut csv::Reader<File>) -> Result<Vec<String>> {
    Ok(reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect())
}

fn check_schema(headers: &[String]) -> std::result::Result<(), DataError> {
    match REQUIRED_COLUMNS
        .iter()
        .find(|col| !headers.iter().any(|h| h == *col))
    {
        Some(col) => Err(DataError::SchemaMismatch {
            column: col.to_string(),
        }),
        None => Ok(()),
    }
}

fn read_records(reader: &mut csv::Reader<File>) -> Result<Vec<TrackRecord>> {
    reader
        .deserialize::<TrackRecord>()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {}", row_no + 1)))
        .collect()
}

// ---------------------------------------------------------------------------
// Memoized loading
// ---------------------------------------------------------------------------

/// Explicit path → table memo.
///
/// Lookups share a read lock. A miss takes the write lock, checks again and
/// loads, so each path is parsed at most once until it is invalidated.
/// Failed loads are not remembered.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: RwLock<HashMap<PathBuf, Arc<TrackTable>>>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide cache used by the application.
    pub fn shared() -> &'static TableCache {
        static SHARED: OnceLock<TableCache> = OnceLock::new();
        SHARED.get_or_init(TableCache::new)
    }

    /// Return the table for `path`, reading the file only on a miss.
    pub fn load(&self, path: &Path) -> std::result::Result<Arc<TrackTable>, DataError> {
        if let Some(table) = self.get(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(table);
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = tables.get(path) {
            return Ok(Arc::clone(table));
        }

        let table = match load_tracks(path) {
            Ok(table) => Arc::new(table),
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                return Err(e);
            }
        };
        log::info!(
            "Loaded {} tracks across {} genres from {}",
            table.len(),
            table.genres.len(),
            path.display()
        );
        tables.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Cached table for `path`, if any.
    pub fn get(&self, path: &Path) -> Option<Arc<TrackTable>> {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Forget the table for `path`; the next `load` re-reads the file.
    pub fn invalidate(&self, path: &Path) -> bool {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(path)
            .is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::aggregate;
    use crate::data::model::{GroupColumn, GroupKey, MetricColumn};
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "genre,artist_name,track_name,track_id,popularity,acousticness,\
danceability,duration_ms,energy,instrumentalness,key,liveness,loudness,mode,speechiness,\
tempo,time_signature,valence";

    fn write_csv(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    fn sample_csv() -> String {
        format!(
            "{HEADER}\n\
Pop,Artist A,Song 1,id1,50,0.2,0.5,210000,0.6,0.0,C,0.1,-5.0,Major,0.05,120.0,4/4,0.7\n\
Rock,Artist B,Song 2,id2,80,0.1,0.7,180000,0.9,0.0,D,0.2,-4.0,Minor,0.04,140.0,3/4,0.4\n"
        )
    }

    #[test]
    fn loads_rows_and_infers_types() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "tracks.csv", &sample_csv());

        let table = load_tracks(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.records[1].artist_name, "Artist B");
        assert_eq!(table.records[1].popularity, 80.0);
        assert_eq!(table.records[0].mode, GroupKey::Text("Major".to_string()));
        assert_eq!(table.records[1].time_signature, GroupKey::Text("3/4".to_string()));
    }

    #[test]
    fn empty_numeric_cell_is_nan() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\nPop,A,S,id,,0.2,0.5,210000,0.6,0.0,C,0.1,-5.0,1,0.05,120.0,4,0.7\n"
        );
        let path = write_csv(&dir, "tracks.csv", &body);

        let table = load_tracks(&path).unwrap();
        assert!(table.records[0].popularity.is_nan());
        assert_eq!(table.records[0].mode, GroupKey::Integer(1));
        assert_eq!(table.records[0].time_signature, GroupKey::Integer(4));
    }

    #[test]
    fn blank_text_cells_are_missing() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\n\
,,,id0,70,0.2,0.5,210000,0.6,0.0,C,0.1,-5.0,,0.05,120.0,,0.7\n\
Pop,A,One,id1,40,0.1,0.7,180000,0.9,0.0,D,0.2,-4.0,Major,0.04,140.0,4/4,0.4\n"
        );
        let path = write_csv(&dir, "tracks.csv", &body);

        let table = load_tracks(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.genres.iter().map(String::as_str).collect::<Vec<_>>(), vec!["Pop"]);

        let summary = crate::data::stats::summarize(&table);
        assert_eq!(
            (summary.artist_count, summary.track_count, summary.genre_count),
            (1, 1, 1)
        );

        for group in GroupColumn::ALL {
            let groups = aggregate(&table, group, MetricColumn::Popularity);
            assert_eq!(groups.len(), 1, "{}", group.name());
            assert_eq!(groups[0].mean, 40.0);
        }
    }

    #[test]
    fn headers_only_gives_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "empty.csv", &format!("{HEADER}\n"));

        let table = load_tracks(&path).unwrap();
        assert!(table.is_empty());
        assert!(table.genres.is_empty());
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = load_tracks(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DataError::DataUnavailable { .. }));
    }

    #[test]
    fn missing_column_is_schema_mismatch() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "bad.csv", "genre,artist_name,track_name\nPop,A,S\n");

        match load_tracks(&path).unwrap_err() {
            DataError::SchemaMismatch { column } => assert_eq!(column, "popularity"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_metric_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let body = format!(
            "{HEADER}\nPop,A,S,id,lots,0.2,0.5,210000,0.6,0.0,C,0.1,-5.0,Major,0.05,120.0,4/4,0.7\n"
        );
        let path = write_csv(&dir, "bad.csv", &body);

        match load_tracks(&path).unwrap_err() {
            DataError::DataUnavailable { reason, .. } => assert!(reason.contains("CSV row 1")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn cache_returns_same_table_without_rereading() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "tracks.csv", &sample_csv());
        let cache = TableCache::new();

        let first = cache.load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        let second = cache.load(&path).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "tracks.csv", &sample_csv());
        let cache = TableCache::new();

        let first = cache.load(&path).unwrap();
        assert!(cache.invalidate(&path));
        let second = cache.load(&path).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), second.len());
    }

    #[test]
    fn failed_load_is_not_cached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("later.csv");
        let cache = TableCache::new();

        assert!(cache.load(&path).is_err());
        assert!(cache.is_empty());

        write_csv(&dir, "later.csv", &sample_csv());
        assert_eq!(cache.load(&path).unwrap().len(), 2);
    }
}
