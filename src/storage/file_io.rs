//! JSON snapshot files
//!
//! The ledger and the settings are each a single pretty-printed JSON
//! document. Writes land in a sibling `.tmp` file that is synced and renamed
//! over the target, so a failed write leaves the previous snapshot intact.
//! Every function takes a short label ("ledger", "settings") used in its
//! error messages.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CashflowError, CashflowResult};

fn storage_error(action: &str, what: &str, path: &Path, err: impl fmt::Display) -> CashflowError {
    CashflowError::Storage(format!(
        "Failed to {} {} {}: {}",
        action,
        what,
        path.display(),
        err
    ))
}

fn open_snapshot(what: &str, path: &Path) -> CashflowResult<Option<File>> {
    match File::open(path) {
        Ok(file) => Ok(Some(file)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(storage_error("open", what, path, e)),
    }
}

fn parse_snapshot<T: DeserializeOwned>(what: &str, path: &Path, file: File) -> CashflowResult<T> {
    serde_json::from_reader(BufReader::new(file)).map_err(|e| storage_error("parse", what, path, e))
}

/// Read a snapshot, or `T::default()` when the file does not exist yet
pub fn read_json<T, P>(path: P, what: &str) -> CashflowResult<T>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match open_snapshot(what, path)? {
        Some(file) => parse_snapshot(what, path, file),
        None => Ok(T::default()),
    }
}

/// Read a snapshot that must exist
pub fn read_json_required<T, P>(path: P, what: &str) -> CashflowResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match open_snapshot(what, path)? {
        Some(file) => parse_snapshot(what, path, file),
        None => Err(storage_error("load", what, path, "no such file")),
    }
}

/// Replace a snapshot atomically, creating parent directories as needed
pub fn write_json_atomic<T, P>(path: P, what: &str, data: &T) -> CashflowResult<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| storage_error("create directory for", what, path, e))?;
    }

    let staging = path.with_extension("json.tmp");
    let write_staged = || -> CashflowResult<()> {
        let file = File::create(&staging).map_err(|e| storage_error("stage", what, &staging, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| storage_error("serialize", what, path, e))?;
        writer
            .flush()
            .and_then(|_| writer.get_ref().sync_all())
            .map_err(|e| storage_error("write", what, &staging, e))
    };

    let result = write_staged()
        .and_then(|_| fs::rename(&staging, path).map_err(|e| storage_error("replace", what, path, e)));
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MoneyEvent, Recurrence};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_event() -> MoneyEvent {
        MoneyEvent::new(
            Money::from_cents(120000),
            Recurrence::Quarterly,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
    }

    #[test]
    fn test_missing_snapshot_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        let events: Vec<MoneyEvent> = read_json(&path, "events").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_write_keeps_exact_amounts() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("events.json");

        write_json_atomic(&path, "events", &vec![sample_event()]).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join("events.json.tmp").exists());

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"1200.00\""));

        let loaded: Vec<MoneyEvent> = read_json_required(&path, "events").unwrap();
        assert_eq!(loaded, vec![sample_event()]);
    }

    #[test]
    fn test_required_snapshot_errors_name_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ledger.json");

        let err = read_json_required::<Vec<MoneyEvent>, _>(&path, "ledger").unwrap_err();
        assert!(err.to_string().contains("Failed to load ledger"));

        fs::write(&path, "not json at all").unwrap();
        let err = read_json_required::<Vec<MoneyEvent>, _>(&path, "ledger").unwrap_err();
        assert!(matches!(err, CashflowError::Storage(_)));
        assert!(err.to_string().contains("Failed to parse ledger"));
    }
}
