//! Reads the projects file into a [`Table`] and memoizes the result.
//!
//! [`DataLoader`] is a single-entry cache for a single path. The first
//! successful [`DataLoader::load`] parses the file; later calls hand back the
//! same `Rc<Table>` until [`DataLoader::invalidate`] is called. Failed loads
//! are not cached so the next call retries.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::SystemTime;

use crate::data::{ProjectRecord, Table, REQUIRED_COLUMNS};
use crate::error::DataError;

pub struct DataLoader {
    path: PathBuf,
    cached: Option<Rc<Table>>,
    // Modification time seen at the last load attempt; the inner None means
    // the file was missing.
    stamp: Option<Option<SystemTime>>,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cached: None,
            stamp: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&mut self) -> Result<Rc<Table>, DataError> {
        if let Some(table) = &self.cached {
            tracing::trace!(path = %self.path.display(), "serving cached table");
            return Ok(Rc::clone(table));
        }

        self.stamp = Some(file_stamp(&self.path));

        let file = File::open(&self.path).map_err(|e| DataError::from_io(self.path.clone(), e))?;
        let table = Rc::new(parse_table(BufReader::new(file))?);

        tracing::info!(
            path = %self.path.display(),
            rows = table.len(),
            skipped = table.skipped_rows(),
            "loaded projects file"
        );

        self.cached = Some(Rc::clone(&table));
        Ok(table)
    }

    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            tracing::debug!(path = %self.path.display(), "invalidated cached table");
        }
        self.stamp = None;
    }

    /// Whether the file changed on disk since the last load attempt.
    ///
    /// Always false before the first attempt.
    pub fn is_stale(&self) -> bool {
        match self.stamp {
            Some(seen) => file_stamp(&self.path) != seen,
            None => false,
        }
    }
}

fn file_stamp(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Parse CSV text with a header row into a table.
///
/// Columns are matched by name, in any order; extra columns are ignored.
/// Rows with unparseable coordinates or the wrong field count are skipped.
pub fn parse_table<R: Read>(reader: R) -> Result<Table, DataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|column| !headers.iter().any(|h| h == **column))
        .map(|column| column.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataError::MissingColumns { missing });
    }

    let mut rows = Vec::new();
    let mut skipped = 0;
    for result in csv_reader.deserialize::<ProjectRecord>() {
        match result {
            Ok(record) => rows.push(record),
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                let line = err.position().map(|p| p.line());
                tracing::warn!(?line, "skipping malformed row: {err}");
                skipped += 1;
            }
        }
    }

    Ok(Table::new(rows).with_skipped(skipped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const SAMPLE: &str = "\
Project Name,Category,Screen Size,Image URL,Latitude,Longitude
Times Square Wall,Outdoor,20m x 8m,https://img.example.com/ts.jpg,40.758,-73.985
Lobby Ribbon,Indoor,12m x 1m,https://img.example.com/lobby.jpg,51.5,-0.1
";

    fn write_file(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("projects.csv");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_parses_all_columns() {
        let table = parse_table(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.rows()[0];
        assert_eq!(first.project_name, "Times Square Wall");
        assert_eq!(first.category, "Outdoor");
        assert_eq!(first.screen_size, "20m x 8m");
        assert_eq!(first.image_url, "https://img.example.com/ts.jpg");
        assert_eq!(first.latitude, 40.758);
        assert_eq!(first.longitude, -73.985);
        assert_eq!(table.skipped_rows(), 0);
    }

    #[test]
    fn test_columns_matched_by_name() {
        let csv = "Longitude,Latitude,Notes,Image URL,Screen Size,Category,Project Name\n\
                   -0.1,51.5,ignored,,4x3,Indoor,Lobby\n";
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].project_name, "Lobby");
        assert_eq!(table.rows()[0].latitude, 51.5);
        assert_eq!(table.rows()[0].image_url, "");
    }

    #[test]
    fn test_missing_columns_reported() {
        let csv = "Project Name,Category,Latitude\nA,Indoor,1.0\n";
        match parse_table(csv.as_bytes()) {
            Err(DataError::MissingColumns { missing }) => {
                assert_eq!(missing, vec!["Screen Size", "Image URL", "Longitude"]);
            }
            other => panic!("expected missing columns, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input_is_unavailable() {
        assert!(matches!(
            parse_table("".as_bytes()),
            Err(DataError::MissingColumns { .. })
        ));
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let table = parse_table(SAMPLE.lines().next().unwrap().as_bytes()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_bad_coordinates_skipped() {
        let csv = format!("{SAMPLE}Broken,Indoor,1x1,,north,0\nShort,Indoor\n");
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.skipped_rows(), 2);
    }

    #[test]
    fn test_out_of_range_coordinates_kept() {
        let csv = "Project Name,Category,Screen Size,Image URL,Latitude,Longitude\n\
                   Far,Outdoor,1x1,not a url,123.0,-400.0\n";
        let table = parse_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].latitude, 123.0);
        assert_eq!(table.rows()[0].longitude, -400.0);
        assert_eq!(table.rows()[0].image_url, "not a url");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = DataLoader::new(dir.path().join("projects.csv"));

        let err = loader.load().unwrap_err();
        assert!(matches!(err, DataError::NotFound { .. }));
        assert!(err.to_string().contains("projects.csv not found"));
    }

    #[test]
    fn test_load_is_memoized() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, SAMPLE);
        let mut loader = DataLoader::new(&path);

        let first = loader.load().unwrap();
        fs::remove_file(&path).unwrap();
        let second = loader.load().unwrap();

        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_invalidate_rereads() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, SAMPLE);
        let mut loader = DataLoader::new(&path);

        assert_eq!(loader.load().unwrap().len(), 2);

        let mut file = fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "Arena,Indoor,30m x 2m,,35.0,139.0").unwrap();
        drop(file);

        assert_eq!(loader.load().unwrap().len(), 2);
        loader.invalidate();
        assert_eq!(loader.load().unwrap().len(), 3);
    }

    #[test]
    fn test_failed_load_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        let mut loader = DataLoader::new(&path);

        assert!(loader.load().is_err());
        fs::write(&path, SAMPLE).unwrap();
        assert_eq!(loader.load().unwrap().len(), 2);
    }

    #[test]
    fn test_staleness_tracks_modification_time() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, SAMPLE);
        let mut loader = DataLoader::new(&path);

        assert!(!loader.is_stale());
        loader.load().unwrap();
        assert!(!loader.is_stale());

        let file = fs::OpenOptions::new().write(true).open(&path).unwrap();
        file.set_modified(SystemTime::now() + Duration::from_secs(120))
            .unwrap();
        assert!(loader.is_stale());

        loader.invalidate();
        assert!(!loader.is_stale());
    }

    #[test]
    fn test_file_appearing_marks_stale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("projects.csv");
        let mut loader = DataLoader::new(&path);

        assert!(loader.load().is_err());
        assert!(!loader.is_stale());
        fs::write(&path, SAMPLE).unwrap();
        assert!(loader.is_stale());
    }
}
