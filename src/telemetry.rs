//! Telemetry: one record per completed or aborted search, and a sink to
//! persist it. The CSV schema and field names mirror the performance log
//! that the original crawler wrote on every run.

use crate::page::PageId;
use std::path::Path;
use std::sync::Mutex;

/// How a search concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcomeKind {
    Found,
    NotFound,
    Timeout,
    Error,
}

impl SearchOutcomeKind {
    fn as_str(&self) -> &'static str {
        match self {
            SearchOutcomeKind::Found => "found",
            SearchOutcomeKind::NotFound => "not_found",
            SearchOutcomeKind::Timeout => "timeout",
            SearchOutcomeKind::Error => "error",
        }
    }
}

impl std::fmt::Display for SearchOutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single search's performance summary.
#[derive(Debug, Clone)]
pub struct SearchRecord {
    pub start: PageId,
    pub finish: PageId,
    pub elapsed_seconds: f64,
    pub discovered_count: usize,
    pub depth_reached: u32,
    pub outcome: SearchOutcomeKind,
}

/// Destination for completed-search telemetry.
pub trait MetricsSink: Send + Sync {
    fn record(&self, record: &SearchRecord) -> crate::Result<()>;
}

/// A sink that discards every record; the engine's default so tests and
/// library callers aren't forced to touch the filesystem.
#[derive(Debug, Default)]
pub struct NullMetricsSink;

impl MetricsSink for NullMetricsSink {
    fn record(&self, _record: &SearchRecord) -> crate::Result<()> {
        Ok(())
    }
}

/// Appends each record as a row to a CSV file, writing the header only the
/// first time the file is created.
///
/// Column order: `start_page,finish_page,elapsed_time,discovered_pages_count,depth_reached`.
pub struct CsvMetricsSink {
    path: std::path::PathBuf,
    lock: Mutex<()>,
}

impl CsvMetricsSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvMetricsSink {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }
}

impl MetricsSink for CsvMetricsSink {
    fn record(&self, record: &SearchRecord) -> crate::Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|e| crate::WikiRaceError::Internal(format!("metrics sink lock poisoned: {e}")))?;

        let file_exists = self.path.exists();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if !file_exists {
            writer.write_record([
                "start_page",
                "finish_page",
                "elapsed_time",
                "discovered_pages_count",
                "depth_reached",
            ])?;
        }

        writer.write_record(&[
            record.start.as_str().to_string(),
            record.finish.as_str().to_string(),
            record.elapsed_seconds.to_string(),
            record.discovered_count.to_string(),
            record.depth_reached.to_string(),
        ])?;
        writer.flush()?;
        Ok(())
    }
}
