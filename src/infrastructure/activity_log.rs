use crate::domain::error::{SerialCalcError, SerialCalcResult};
use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// One completed exchange, stamped with local time
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub input: String,
    pub response: String,
}

impl LogEntry {
    pub fn new(input: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            input: input.into(),
            response: response.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Device responses usually carry their own line ending.
        let response = self.response.trim_end_matches(['\r', '\n']);
        write!(
            f,
            "[{}] Input: {} | Response: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.input,
            response
        )
    }
}

/// Append-only record of exchanges.
///
/// A log that failed to open stays disabled for the rest of the run and
/// silently drops entries.
pub struct ActivityLog {
    file: Option<File>,
}

impl ActivityLog {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> SerialCalcResult<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| SerialCalcError::LogOpen {
                path: path.display().to_string(),
                source,
            })?;

        info!("Activity log opened at '{}'", path.display());

        Ok(Self { file: Some(file) })
    }

    /// A log that records nothing
    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.file.is_some()
    }

    /// Write one entry and force it to disk. No-op when disabled.
    pub fn append(&mut self, entry: &LogEntry) -> SerialCalcResult<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        // Single write per entry keeps concurrent appenders from interleaving.
        let line = format!("{}\n", entry);
        file.write_all(line.as_bytes())?;
        file.sync_data()?;

        debug!("Logged exchange for input '{}'", entry.input);
        Ok(())
    }

    /// Release the file handle. Later appends are no-ops.
    pub fn close(&mut self) {
        if self.file.take().is_some() {
            debug!("Activity log closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn fixed_entry(input: &str, response: &str) -> LogEntry {
        LogEntry {
            timestamp: Local.with_ymd_and_hms(2025, 7, 9, 8, 5, 3).unwrap(),
            input: input.to_string(),
            response: response.to_string(),
        }
    }

    #[test]
    fn test_entry_format() {
        let entry = fixed_entry("12 + 5", "17\r\n");
        assert_eq!(
            entry.to_string(),
            "[09.07.2025 08:05:03] Input: 12 + 5 | Response: 17"
        );
    }

    #[test]
    fn test_append_writes_one_line_per_entry() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calculator_log.txt");

        let mut log = ActivityLog::open(&path).unwrap();
        assert!(log.is_enabled());
        log.append(&fixed_entry("1 + 1", "2")).unwrap();
        log.append(&fixed_entry("4 / 0", "ERROR_DIV_0")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Input: 1 + 1 | Response: 2"));
        assert!(lines[1].ends_with("Input: 4 / 0 | Response: ERROR_DIV_0"));
    }

    #[test]
    fn test_reopen_never_truncates() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calculator_log.txt");

        let mut first = ActivityLog::open(&path).unwrap();
        first.append(&fixed_entry("1 + 1", "2")).unwrap();
        first.close();

        let mut second = ActivityLog::open(&path).unwrap();
        let mut third = ActivityLog::open(&path).unwrap();
        second.append(&fixed_entry("2 + 2", "4")).unwrap();
        third.append(&fixed_entry("3 + 3", "6")).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("Input: 1 + 1"));
        assert!(content.contains("Input: 3 + 3"));
    }

    #[test]
    fn test_open_failure_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("log.txt");

        let err = ActivityLog::open(&path).err().unwrap();
        assert!(matches!(err, SerialCalcError::LogOpen { .. }));
        assert!(err.to_string().contains("log.txt"));
    }

    #[test]
    fn test_disabled_log_is_noop() {
        let mut log = ActivityLog::disabled();
        assert!(!log.is_enabled());
        assert!(log.append(&fixed_entry("1 + 1", "2")).is_ok());
    }

    #[test]
    fn test_append_after_close_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("calculator_log.txt");

        let mut log = ActivityLog::open(&path).unwrap();
        log.close();
        log.append(&fixed_entry("1 + 1", "2")).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }
}
