//! Process model.
//!
//! A process is a unit of schedulable CPU work: a fixed burst of abstract
//! time units, consumed one unit at a time by the engine, with a lifecycle
//! state machine tracking where the process is between creation and
//! completion.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 3.1

use serde::{Deserialize, Serialize};

/// Lifecycle state of a process.
///
/// `Ready` is the initial state. `Running` and `Waiting` alternate while
/// the process competes for the CPU. `Terminated` is absorbing: no
/// transition leaves it except an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessState {
    /// Created, not yet selected to run.
    Ready,
    /// Selected by the dispatcher for the current time unit.
    Running,
    /// Previously running, currently selected away.
    Waiting,
    /// All burst units consumed.
    Terminated,
}

/// A schedulable process.
///
/// Records are created and exclusively owned by the engine's process
/// collection; consumers read them through snapshot copies. The identity
/// fields (`pid`, `arrival_time`, `burst_time`, `priority`) are fixed at
/// creation; only the work counter, state, and start/finish stamps change
/// during a run.
///
/// Invariant: `0 <= counter <= burst_time`, and the process is finished
/// exactly when the counter has reached the burst time.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pid: u32,
    arrival_time: i64,
    burst_time: i64,
    priority: i32,
    counter: i64,
    state: ProcessState,
    start_time: Option<i64>,
    finish_time: Option<i64>,
}

impl ProcessRecord {
    /// Creates a record in the `Ready` state with an empty work counter.
    ///
    /// Parameters are validated by the engine before construction.
    pub(crate) fn new(pid: u32, arrival_time: i64, burst_time: i64, priority: i32) -> Self {
        Self {
            pid,
            arrival_time,
            burst_time,
            priority,
            counter: 0,
            state: ProcessState::Ready,
            start_time: None,
            finish_time: None,
        }
    }

    /// Process identifier, unique within one engine instance.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Earliest time unit at which the process may run.
    pub fn arrival_time(&self) -> i64 {
        self.arrival_time
    }

    /// Total CPU work units required to complete.
    pub fn burst_time(&self) -> i64 {
        self.burst_time
    }

    /// Scheduling priority (higher = more important).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Work units received so far.
    pub fn counter(&self) -> i64 {
        self.counter
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Unit at which the first work unit was applied, if any.
    pub fn start_time(&self) -> Option<i64> {
        self.start_time
    }

    /// Unit at which the final work unit was applied, if any.
    pub fn finish_time(&self) -> Option<i64> {
        self.finish_time
    }

    /// Work units still required to complete.
    pub fn remaining(&self) -> i64 {
        self.burst_time - self.counter
    }

    /// Whether the work counter has reached the burst time.
    pub fn is_finished(&self) -> bool {
        self.counter == self.burst_time
    }

    /// Whether the process is currently selected to run.
    pub fn is_running(&self) -> bool {
        self.state == ProcessState::Running
    }

    /// Completion percentage in `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        100.0 * self.counter as f64 / self.burst_time as f64
    }

    /// Whether the process has arrived and is not yet finished at `time`.
    pub fn is_eligible(&self, time: i64) -> bool {
        self.arrival_time <= time && !self.is_finished()
    }

    /// Marks the process as selected for the current unit.
    ///
    /// No-op once terminated.
    pub(crate) fn mark_running(&mut self) {
        if self.state != ProcessState::Terminated {
            self.state = ProcessState::Running;
        }
    }

    /// Relabels a running process as selected-away.
    ///
    /// Only the `Running` state transitions; `Ready` and `Terminated` are
    /// untouched.
    pub(crate) fn mark_waiting(&mut self) {
        if self.state == ProcessState::Running {
            self.state = ProcessState::Waiting;
        }
    }

    /// Applies one unit of work at `time`.
    ///
    /// The first unit stamps the start time; the unit that fills the
    /// counter stamps the finish time and terminates the process. No-op
    /// once terminated, so the counter never exceeds the burst time.
    pub(crate) fn apply_work(&mut self, time: i64) {
        if self.state == ProcessState::Terminated {
            return;
        }
        if self.counter == 0 {
            self.start_time = Some(time);
        }
        self.counter += 1;
        if self.counter == self.burst_time {
            self.state = ProcessState::Terminated;
            self.finish_time = Some(time);
        }
    }

    /// Returns the counter to zero and the state to `Ready`, clearing the
    /// start/finish stamps. Identity fields are retained.
    pub(crate) fn reset(&mut self) {
        self.counter = 0;
        self.state = ProcessState::Ready;
        self.start_time = None;
        self.finish_time = None;
    }
}
