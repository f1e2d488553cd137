//! Read-only process snapshots for the display boundary.
//!
//! The engine owns its process collection exclusively; drivers and
//! display layers read owned copies so an in-flight step can never tear
//! under them. Snapshots are serde-serializable so a rendering layer can
//! consume them as plain data.

use serde::{Deserialize, Serialize};

use super::process::{ProcessRecord, ProcessState};

/// Owned copy of one process's externally visible state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    /// Process identifier.
    pub pid: u32,
    /// Earliest unit at which the process may run.
    pub arrival_time: i64,
    /// Total work units required.
    pub burst_time: i64,
    /// Scheduling priority (higher = more important).
    pub priority: i32,
    /// Lifecycle state at snapshot time.
    pub state: ProcessState,
    /// Work units received so far.
    pub counter: i64,
    /// Completion percentage in `0.0..=100.0`.
    pub progress_percent: f64,
    /// Unit of the first applied work unit, if any.
    pub start_time: Option<i64>,
    /// Unit of the final applied work unit, if any.
    pub finish_time: Option<i64>,
}

impl From<&ProcessRecord> for ProcessSnapshot {
    fn from(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid(),
            arrival_time: record.arrival_time(),
            burst_time: record.burst_time(),
            priority: record.priority(),
            state: record.state(),
            counter: record.counter(),
            progress_percent: record.progress_percent(),
            start_time: record.start_time(),
            finish_time: record.finish_time(),
        }
    }
}
