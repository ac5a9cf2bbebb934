//! Flat-file ledger store
//!
//! The ledger lives in a CSV file with a `name,score` header. Header names
//! are matched case-insensitively and the legacy `닉네임,점수` header is
//! accepted. A file without both columns fails to load rather than reading
//! as empty. Extra columns are ignored, a missing or empty file is an empty
//! ledger and unparsable scores count as zero.

use async_trait::async_trait;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{LedgerStore, StoreError};
use crate::league::ledger::{Ledger, PlayerRecord};

const NAME_HEADERS: [&str; 2] = ["name", "닉네임"];
const SCORE_HEADERS: [&str; 2] = ["score", "점수"];

#[derive(Debug, Serialize)]
struct SavedRow<'a> {
    name: &'a str,
    score: f64,
}

#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_score(raw: &str) -> f64 {
    raw.trim().parse::<f64>().ok().filter(|s| s.is_finite()).unwrap_or(0.0)
}

/// Index of the first header matching one of `aliases`
fn column_index(headers: &csv::StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim_start_matches('\u{feff}').trim();
        aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias))
    })
}

fn read_ledger(path: &Path) -> Result<Ledger, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Ledger::new()),
        Err(e) => return Err(e.into()),
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.trim_start_matches('\u{feff}').trim().is_empty()) {
        return Ok(Ledger::new());
    }

    let missing = |column| StoreError::MissingColumn {
        path: path.display().to_string(),
        column,
    };
    let name_at = column_index(&headers, &NAME_HEADERS).ok_or_else(|| missing("name"))?;
    let score_at = column_index(&headers, &SCORE_HEADERS).ok_or_else(|| missing("score"))?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let name = row.get(name_at).unwrap_or_default();
        let score = parse_score(row.get(score_at).unwrap_or_default());
        records.push(PlayerRecord::new(name, score));
    }
    Ok(Ledger::from_records(records))
}

fn write_rows(path: &Path, ledger: &Ledger) -> Result<(), StoreError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(["name", "score"])?;
    for record in ledger.records() {
        writer.serialize(SavedRow {
            name: &record.name,
            score: record.score,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_ledger(path: &Path, ledger: &Ledger) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result = write_rows(&tmp, ledger)
        .and_then(|()| std::fs::rename(&tmp, path).map_err(StoreError::from));
    if result.is_err() {
        if let Err(e) = std::fs::remove_file(&tmp) {
            if e.kind() != io::ErrorKind::NotFound {
                warn!(path = %tmp.display(), error = %e, "Could not remove temp ledger file");
            }
        }
    }
    result
}

#[async_trait]
impl LedgerStore for CsvFileStore {
    async fn load(&self) -> Result<Ledger, StoreError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_ledger(&path))
            .await
            .map_err(|e| StoreError::Io(io::Error::new(io::ErrorKind::Other, e)))?
    }

    async fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let path = self.path.clone();
        let ledger = ledger.clone();
        let count = ledger.len();
        tokio::task::spawn_blocking(move || write_ledger(&path, &ledger))
            .await
            .map_err(|e| StoreError::Io(io::Error::new(io::ErrorKind::Other, e)))??;
        debug!(path = %self.path.display(), count, "Saved ledger to file");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("csv file {}", self.path.display())
    }
}
