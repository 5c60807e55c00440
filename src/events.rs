//! Append-only event log.
//!
//! Every spoken response and every completion error is recorded as one
//! timestamped plain-text line in `events.log`.  The sink is fire-and-forget
//! by contract: [`EventLog::record`] never fails the caller — write errors
//! are downgraded to a diagnostic warning, because a full SD card must not
//! take the voice loop down with it.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only, timestamped line sink.
pub struct EventLog {
    sink: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl EventLog {
    /// Open (or create) the log file in append mode, creating parent
    /// directories as needed.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            sink: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    /// Append one line.  Errors are logged and swallowed.
    pub fn record(&self, message: &str) {
        if let Err(e) = self.append(message) {
            log::warn!("event log write failed: {e}");
        }
    }

    /// Path of the underlying log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, message: &str) -> io::Result<()> {
        let stamp = chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%z");
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| io::Error::other("event log lock poisoned"))?;
        writeln!(sink, "{stamp} {message}")?;
        // Flush per record — the appliance can lose power at any moment.
        sink.flush()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn records_appear_as_lines_in_order() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("events.log");
        let log = EventLog::open(&path).expect("open");

        log.record("Response: It is five o'clock");
        log.record("Error: something went wrong");

        let content = std::fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Response: It is five o'clock"));
        assert!(lines[1].ends_with("Error: something went wrong"));
    }

    #[test]
    fn reopening_appends_rather_than_truncates() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("events.log");

        EventLog::open(&path).unwrap().record("first");
        EventLog::open(&path).unwrap().record("second");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn missing_parent_directories_are_created() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("deep/nested/events.log");
        let log = EventLog::open(&path).expect("open with parents");
        log.record("hello");
        assert!(path.exists());
    }

    #[test]
    fn lines_carry_a_timestamp_prefix() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("events.log");
        EventLog::open(&path).unwrap().record("stamped");

        let content = std::fs::read_to_string(&path).unwrap();
        let line = content.lines().next().unwrap();
        // "YYYY-MM-DDTHH:MM:SS+ZZZZ stamped"
        let (stamp, rest) = line.split_once(' ').expect("stamp separator");
        assert!(stamp.contains('T'), "no timestamp in {line:?}");
        assert_eq!(rest, "stamped");
    }
}
