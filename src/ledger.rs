//! CSV ledger of daily measurements.
//!
//! The ledger is read and rewritten whole. Rows are kept as text so that a
//! damaged cell in one day does not prevent updating another; typed access
//! goes through [`Ledger::measurements`].

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::error::Error;

/// Column names, in file order.
pub const HEADER: [&str; 4] = ["days_from_init", "pages", "words", "diffs"];

const DIFFS_COLUMN: usize = 3;

/// One day's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub days_from_init: u32,
    pub pages: u64,
    pub words: u64,
    pub diffs: u64,
}

impl Measurement {
    fn to_record(self) -> Vec<String> {
        vec![
            self.days_from_init.to_string(),
            self.pages.to_string(),
            self.words.to_string(),
            self.diffs.to_string(),
        ]
    }

    fn from_record(record: &[String]) -> Option<Self> {
        match record {
            [days, pages, words, diffs, ..] => Some(Self {
                days_from_init: days.trim().parse().ok()?,
                pages: pages.trim().parse().ok()?,
                words: words.trim().parse().ok()?,
                diffs: diffs.trim().parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// How a measurement was merged into the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// No row for that day yet.
    Appended,
    /// Same-day re-run: `previous` diffs were added to the new ones.
    Accumulated { previous: u64, total: u64 },
}

/// In-memory copy of the ledger file.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            header: HEADER.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }
}

/// Create the ledger with only the header if it does not exist yet.
///
/// Returns whether a file was created.
pub fn init(path: &Path) -> Result<bool, Error> {
    if path.exists() {
        return Ok(false);
    }
    Ledger::default().save(path)?;
    info!(path = %path.display(), "Created ledger");
    Ok(true)
}

impl Ledger {
    /// Load the whole ledger. The first record is the header; an empty file
    /// is treated as header-only.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record?;
            records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }

        let mut records = records.into_iter();
        let ledger = match records.next() {
            Some(header) => Self {
                header,
                rows: records.collect(),
            },
            None => Self::default(),
        };

        debug!(path = %path.display(), rows = ledger.rows.len(), "Loaded ledger");
        Ok(ledger)
    }

    /// Write the ledger through a temporary file renamed over `path`.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let dir = parent_dir(path);
        let mut tmp = NamedTempFile::new_in(&dir)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .terminator(csv::Terminator::Any(b'\n'))
                .from_writer(&mut tmp);
            writer.write_record(&self.header)?;
            for row in &self.rows {
                writer.write_record(row)?;
            }
            writer.flush()?;
        }

        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Merge a measurement into the row for its day.
    ///
    /// Pages and words are replaced; diffs are added to whatever the row
    /// already holds. A stored diffs value that is not a number counts as 0.
    pub fn upsert(&mut self, measurement: Measurement) -> Upsert {
        let key = measurement.days_from_init.to_string();

        let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.first().map(|cell| cell.trim()) == Some(key.as_str()))
        else {
            self.rows.push(measurement.to_record());
            return Upsert::Appended;
        };

        let previous = parse_stored_diffs(row.get(DIFFS_COLUMN).map(String::as_str));
        let total = previous.saturating_add(measurement.diffs);
        *row = Measurement {
            diffs: total,
            ..measurement
        }
        .to_record();

        Upsert::Accumulated { previous, total }
    }

    /// Typed data rows. Rows that do not hold four integers are skipped.
    pub fn measurements(&self) -> Vec<Measurement> {
        self.rows
            .iter()
            .filter_map(|row| {
                let parsed = Measurement::from_record(row);
                if parsed.is_none() {
                    warn!(row = %row.join(","), "Skipping malformed ledger row");
                }
                parsed
            })
            .collect()
    }
}

fn parse_stored_diffs(value: Option<&str>) -> u64 {
    match value.map(|v| v.trim().parse::<u64>()) {
        Some(Ok(diffs)) => diffs,
        _ => {
            warn!(value = ?value, "Value was an invalid number, assuming zero");
            0
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Load a ledger that must already exist (`plot`, `show`).
pub fn load_existing(path: &Path) -> Result<Ledger, Error> {
    if !path.exists() {
        return Err(Error::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("ledger not found: {}", path.display()),
        )));
    }
    Ledger::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn read_text(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    fn measurement(days: u32, pages: u64, words: u64, diffs: u64) -> Measurement {
        Measurement {
            days_from_init: days,
            pages,
            words,
            diffs,
        }
    }

    #[test]
    fn test_init_writes_header_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");

        assert!(init(&path).unwrap());
        assert!(!init(&path).unwrap());
        assert_eq!(read_text(&path), "days_from_init,pages,words,diffs\n");
    }

    #[test]
    fn test_first_run_on_header_only_ledger() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        init(&path).unwrap();

        let mut ledger = Ledger::load(&path).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.upsert(measurement(0, 5, 1000, 12)), Upsert::Appended);
        ledger.save(&path).unwrap();

        assert_eq!(
            read_text(&path),
            "days_from_init,pages,words,diffs\n0,5,1000,12\n"
        );
    }

    #[test]
    fn test_same_day_accumulates_diffs() {
        let mut ledger = Ledger::default();
        ledger.upsert(measurement(4, 10, 2000, 3));
        let outcome = ledger.upsert(measurement(4, 11, 2100, 5));

        assert_eq!(outcome, Upsert::Accumulated { previous: 3, total: 8 });
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.measurements(), vec![measurement(4, 11, 2100, 8)]);
    }

    #[test]
    fn test_new_day_appends() {
        let mut ledger = Ledger::default();
        ledger.upsert(measurement(0, 1, 100, 7));
        ledger.upsert(measurement(2, 2, 250, 9));

        let days: Vec<u32> = ledger.measurements().iter().map(|m| m.days_from_init).collect();
        assert_eq!(days, vec![0, 2]);
    }

    #[test]
    fn test_corrupt_diffs_treated_as_zero() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "days_from_init,pages,words,diffs\n3,4,500,oops\n").unwrap();

        let mut ledger = Ledger::load(&path).unwrap();
        let outcome = ledger.upsert(measurement(3, 5, 600, 6));

        assert_eq!(outcome, Upsert::Accumulated { previous: 0, total: 6 });
        ledger.save(&path).unwrap();
        assert_eq!(
            read_text(&path),
            "days_from_init,pages,words,diffs\n3,5,600,6\n"
        );
    }

    #[test]
    fn test_short_row_treated_as_zero_diffs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "days_from_init,pages,words,diffs\n1,2\n").unwrap();

        let mut ledger = Ledger::load(&path).unwrap();
        assert!(ledger.measurements().is_empty());
        let outcome = ledger.upsert(measurement(1, 2, 30, 4));
        assert_eq!(outcome, Upsert::Accumulated { previous: 0, total: 4 });
    }

    #[test]
    fn test_huge_stored_diffs_saturates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(
            &path,
            "days_from_init,pages,words,diffs\n1,2,3,18446744073709551615\n",
        )
        .unwrap();

        let mut ledger = Ledger::load(&path).unwrap();
        let outcome = ledger.upsert(measurement(1, 2, 3, 1));

        assert_eq!(
            outcome,
            Upsert::Accumulated {
                previous: u64::MAX,
                total: u64::MAX
            }
        );
    }

    #[test]
    fn test_padded_day_key_matches_existing_row() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "days_from_init,pages,words,diffs\n 1,2,30,4\n").unwrap();

        let mut ledger = Ledger::load(&path).unwrap();
        let outcome = ledger.upsert(measurement(1, 3, 40, 2));

        assert_eq!(outcome, Upsert::Accumulated { previous: 4, total: 6 });
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.measurements(), vec![measurement(1, 3, 40, 6)]);
    }

    #[test]
    fn test_empty_file_is_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "").unwrap();

        let ledger = Ledger::load(&path).unwrap();
        assert_eq!(ledger, Ledger::default());
    }

    #[test]
    fn test_other_rows_left_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(
            &path,
            "days_from_init,pages,words,diffs\n0,1,10,x\n1,2,20,3\n",
        )
        .unwrap();

        let mut ledger = Ledger::load(&path).unwrap();
        ledger.upsert(measurement(1, 3, 30, 4));
        ledger.save(&path).unwrap();

        assert_eq!(
            read_text(&path),
            "days_from_init,pages,words,diffs\n0,1,10,x\n1,3,30,7\n"
        );
    }

    #[test]
    fn test_load_existing_missing() {
        let dir = TempDir::new().unwrap();
        let err = load_existing(&dir.path().join("table.csv")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
