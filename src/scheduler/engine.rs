//! Time-stepped scheduling simulation engine.
//!
//! # Algorithm
//!
//! The engine owns the process arena, the simulation clock, and the
//! active dispatch policy. Each time unit it relabels the running process
//! as waiting, asks the policy for the next process, marks the selection
//! running, applies one unit of work, and advances the clock. A `None`
//! selection is a CPU-idle unit: the clock still advances and the running
//! slot empties.
//!
//! The horizon (total makespan) is precomputed from arrivals and bursts
//! alone: a work-conserving single CPU finishes the whole batch at the
//! same unit regardless of dispatch order, so every policy shares one
//! horizon without re-simulating to find it.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2.3

use crate::dispatching::{DispatchPolicy, PolicyKind};
use crate::models::{ProcessRecord, ProcessSnapshot};
use crate::validation::{self, ValidationError, ValidationResult};

/// Single-CPU scheduling simulation engine.
///
/// Drives a process batch one abstract time unit at a time under an
/// interchangeable dispatch policy. The process collection is owned
/// exclusively by the engine; drivers and display layers read owned
/// [`ProcessSnapshot`] copies.
///
/// # Example
///
/// ```
/// use u_cpusim::dispatching::PolicyKind;
/// use u_cpusim::scheduler::SchedulerEngine;
///
/// let mut engine = SchedulerEngine::new(PolicyKind::Fcfs);
/// engine.add_process(0, 3, 1).unwrap();
/// engine.add_process(1, 2, 1).unwrap();
/// assert_eq!(engine.horizon(), 5);
///
/// engine.step(5);
/// assert!(engine.is_finished());
/// assert!(engine.snapshot().iter().all(|p| p.counter == p.burst_time));
/// ```
#[derive(Debug, Clone)]
pub struct SchedulerEngine {
    processes: Vec<ProcessRecord>,
    policy: DispatchPolicy,
    current_time: i64,
    horizon: i64,
    running: Option<usize>,
    next_pid: u32,
}

impl SchedulerEngine {
    /// Creates an empty engine with the given dispatch policy.
    pub fn new(kind: PolicyKind) -> Self {
        Self {
            processes: Vec::new(),
            policy: DispatchPolicy::new(kind),
            current_time: 0,
            horizon: 0,
            running: None,
            next_pid: 1,
        }
    }

    /// Adds a process and recomputes the horizon.
    ///
    /// Arrival must be non-negative and burst at least one unit; rejected
    /// parameters leave the engine unchanged. Returns the assigned pid.
    /// Pids increase monotonically and are never reused within a run.
    pub fn add_process(
        &mut self,
        arrival: i64,
        burst: i64,
        priority: i32,
    ) -> Result<u32, ValidationError> {
        validation::validate_process_parameters(arrival, burst)?;
        let pid = self.next_pid;
        self.next_pid += 1;
        self.processes
            .push(ProcessRecord::new(pid, arrival, burst, priority));
        self.horizon = compute_horizon(&self.processes);
        Ok(pid)
    }

    /// Advances the simulation by up to `amount` units.
    ///
    /// Stops early at the horizon; once finished this is a no-op, so
    /// repeated calls are safe.
    pub fn step(&mut self, amount: i64) {
        self.step_while(amount, || true);
    }

    /// Advances by up to `amount` units while `keep_going` returns true.
    ///
    /// The predicate is consulted between units, never mid-unit, so a
    /// cancelled run always leaves the process set fully applied for the
    /// last completed unit. Returns the number of units applied.
    pub fn step_while<F>(&mut self, amount: i64, mut keep_going: F) -> i64
    where
        F: FnMut() -> bool,
    {
        let mut applied = 0;
        while applied < amount && self.current_time < self.horizon {
            if !keep_going() {
                break;
            }
            self.step_unit();
            applied += 1;
        }
        applied
    }

    /// One unit: relabel, select, run, apply work, advance the clock.
    fn step_unit(&mut self) {
        if let Some(i) = self.running {
            self.processes[i].mark_waiting();
        }
        self.running = self
            .policy
            .select(self.current_time, &self.processes, self.running);
        if let Some(i) = self.running {
            self.processes[i].mark_running();
            self.processes[i].apply_work(self.current_time);
        }
        self.current_time += 1;
    }

    /// Returns the engine to the empty-simulation state.
    ///
    /// Clears the process collection, clock, horizon, and running slot;
    /// policy cursors reset and pid assignment starts over.
    pub fn reset(&mut self) {
        self.processes.clear();
        self.current_time = 0;
        self.horizon = 0;
        self.running = None;
        self.next_pid = 1;
        self.policy.reset_cursors();
    }

    /// Rewinds the simulation without removing processes.
    ///
    /// Every record's counter, state, and start/finish stamps are reset;
    /// the clock returns to zero and policy cursors restart. The horizon
    /// is arrival/burst-derived and unchanged.
    pub fn restart(&mut self) {
        for p in &mut self.processes {
            p.reset();
        }
        self.current_time = 0;
        self.running = None;
        self.policy.reset_cursors();
    }

    /// Switches the dispatch policy, keeping the process batch.
    ///
    /// Installs a fresh policy of `kind` (cursors at the start, default
    /// quantum) and restarts the simulation over the retained processes.
    pub fn select_policy(&mut self, kind: PolicyKind) {
        self.policy = DispatchPolicy::new(kind);
        self.restart();
    }

    /// Sets the Round-Robin quantum.
    ///
    /// Values below one are rejected and the previous quantum is
    /// retained. Accepted values are ignored by non-Round-Robin policies.
    pub fn set_quantum(&mut self, quantum: i64) -> ValidationResult {
        validation::validate_quantum(quantum)?;
        self.policy.set_quantum(quantum);
        Ok(())
    }

    /// Owned snapshots of all processes, in insertion order.
    pub fn snapshot(&self) -> Vec<ProcessSnapshot> {
        self.processes.iter().map(ProcessSnapshot::from).collect()
    }

    /// Owned snapshot of the process in the running slot, if any.
    ///
    /// Empty during CPU-idle units and before the first step.
    pub fn running_snapshot(&self) -> Option<ProcessSnapshot> {
        self.running.map(|i| ProcessSnapshot::from(&self.processes[i]))
    }

    /// The simulation clock.
    pub fn current_time(&self) -> i64 {
        self.current_time
    }

    /// Precomputed total makespan for the current batch.
    pub fn horizon(&self) -> i64 {
        self.horizon
    }

    /// Whether the clock has reached the horizon.
    pub fn is_finished(&self) -> bool {
        self.current_time == self.horizon
    }

    /// Number of processes in the collection.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }

    /// Kind of the active dispatch policy.
    pub fn policy_kind(&self) -> PolicyKind {
        self.policy.kind()
    }

    /// Configured Round-Robin quantum, if the active policy has one.
    pub fn quantum(&self) -> Option<i64> {
        self.policy.quantum()
    }
}

/// Total makespan of the batch on a work-conserving single CPU.
///
/// Walks a working copy sorted by ascending arrival (ties keep insertion
/// order): the accumulator jumps forward over idle gaps before the next
/// arrival, then absorbs that process's burst. The result is independent
/// of the dispatch policy.
fn compute_horizon(processes: &[ProcessRecord]) -> i64 {
    let mut order: Vec<usize> = (0..processes.len()).collect();
    order.sort_by_key(|&i| processes[i].arrival_time());

    let mut acc = 0;
    for &i in &order {
        let p = &processes[i];
        if p.arrival_time() > acc {
            acc = p.arrival_time();
        }
        acc += p.burst_time();
    }
    acc
}
