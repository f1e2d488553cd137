//! The six dispatch policies.
//!
//! A policy answers one question: given the current time, the process
//! collection, and the previously running process, which process runs for
//! the next unit. Policies are modeled as a tagged variant carrying their
//! own cursor and quantum state, dispatched through a single `select`
//! match, so the engine can swap them at runtime without touching the
//! process arena.
//!
//! # Selection contracts
//!
//! - A process is *eligible* at `time` iff it has arrived and is not
//!   finished.
//! - FCFS and Round-Robin rotate a cursor over an arrival-sorted view of
//!   the collection. FCFS does not re-check eligibility at the cursor;
//!   the horizon computation guarantees readiness for arrival-ordered
//!   batches, and the historical rule is reproduced as documented.
//! - SJF picks the minimum remaining work with a strict less-than compare
//!   seeded by the running process, so ties never cause a switch.
//! - Priority picks the maximum priority with a strict greater-than
//!   compare seeded at a floor of 0; a priority must exceed the floor to
//!   displace the default candidate, so processes with priority <= 0 are
//!   never selected.
//! - `None` means no selection; the engine treats that unit as CPU idle.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};

use crate::models::ProcessRecord;

/// Default Round-Robin quantum.
pub const DEFAULT_QUANTUM: i64 = 5;

/// Identifies one of the six dispatch policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First, running process kept until finished.
    SjfNonPreemptive,
    /// Shortest-Job-First, re-evaluated every unit.
    SjfPreemptive,
    /// Highest priority, running process kept until finished.
    PriorityNonPreemptive,
    /// Highest priority, re-evaluated every unit.
    PriorityPreemptive,
    /// Fixed time slices over the arrival order.
    RoundRobin,
}

/// Cyclic cursor over an arrival-sorted view of the process collection.
///
/// The rotation order is owned by the policy (the engine keeps its arena
/// in insertion order) and is rebuilt only when the collection size
/// changes, so the order is fixed at the time the batch is fixed.
/// Arrival ties keep insertion order (stable sort).
#[derive(Debug, Clone, Default)]
struct ArrivalCursor {
    order: Vec<usize>,
    position: usize,
}

impl ArrivalCursor {
    fn refresh(&mut self, processes: &[ProcessRecord]) {
        if self.order.len() != processes.len() {
            let mut order: Vec<usize> = (0..processes.len()).collect();
            order.sort_by_key(|&i| processes[i].arrival_time());
            self.order = order;
            if self.position >= self.order.len() {
                self.position = 0;
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    /// Arena index at the cursor; advances one step, wrapping around.
    fn take(&mut self) -> usize {
        let idx = self.order[self.position];
        self.position = (self.position + 1) % self.order.len();
        idx
    }
}

#[derive(Debug, Clone)]
enum PolicyState {
    Fcfs(ArrivalCursor),
    SjfNonPreemptive,
    SjfPreemptive,
    PriorityNonPreemptive,
    PriorityPreemptive,
    RoundRobin { cursor: ArrivalCursor, quantum: i64 },
}

/// A dispatch policy with its per-run cursor state.
///
/// Construction and `reset_cursors` both satisfy the initialization
/// contract: cursors at the start of the process order, quantum retained
/// as configuration.
#[derive(Debug, Clone)]
pub struct DispatchPolicy {
    state: PolicyState,
}

impl DispatchPolicy {
    /// Creates a policy of the given kind with cursors at the start and
    /// the default quantum.
    pub fn new(kind: PolicyKind) -> Self {
        let state = match kind {
            PolicyKind::Fcfs => PolicyState::Fcfs(ArrivalCursor::default()),
            PolicyKind::SjfNonPreemptive => PolicyState::SjfNonPreemptive,
            PolicyKind::SjfPreemptive => PolicyState::SjfPreemptive,
            PolicyKind::PriorityNonPreemptive => PolicyState::PriorityNonPreemptive,
            PolicyKind::PriorityPreemptive => PolicyState::PriorityPreemptive,
            PolicyKind::RoundRobin => PolicyState::RoundRobin {
                cursor: ArrivalCursor::default(),
                quantum: DEFAULT_QUANTUM,
            },
        };
        Self { state }
    }

    /// The policy's kind tag.
    pub fn kind(&self) -> PolicyKind {
        match self.state {
            PolicyState::Fcfs(_) => PolicyKind::Fcfs,
            PolicyState::SjfNonPreemptive => PolicyKind::SjfNonPreemptive,
            PolicyState::SjfPreemptive => PolicyKind::SjfPreemptive,
            PolicyState::PriorityNonPreemptive => PolicyKind::PriorityNonPreemptive,
            PolicyState::PriorityPreemptive => PolicyKind::PriorityPreemptive,
            PolicyState::RoundRobin { .. } => PolicyKind::RoundRobin,
        }
    }

    /// Display name of the policy.
    pub fn name(&self) -> &'static str {
        match self.kind() {
            PolicyKind::Fcfs => "First-Come-First-Served",
            PolicyKind::SjfNonPreemptive => "Shortest-Job-First (non-preemptive)",
            PolicyKind::SjfPreemptive => "Shortest-Job-First (preemptive)",
            PolicyKind::PriorityNonPreemptive => "Priority Scheduling (non-preemptive)",
            PolicyKind::PriorityPreemptive => "Priority Scheduling (preemptive)",
            PolicyKind::RoundRobin => "Round-Robin",
        }
    }

    /// Configured quantum, for Round-Robin only.
    pub fn quantum(&self) -> Option<i64> {
        match self.state {
            PolicyState::RoundRobin { quantum, .. } => Some(quantum),
            _ => None,
        }
    }

    /// Sets the Round-Robin quantum; ignored for other policies.
    ///
    /// The engine validates the value before calling. Affects future
    /// re-selection boundaries only.
    pub(crate) fn set_quantum(&mut self, value: i64) {
        if let PolicyState::RoundRobin { quantum, .. } = &mut self.state {
            *quantum = value;
        }
    }

    /// Returns cursors to the start of the process order.
    pub(crate) fn reset_cursors(&mut self) {
        match &mut self.state {
            PolicyState::Fcfs(cursor) => *cursor = ArrivalCursor::default(),
            PolicyState::RoundRobin { cursor, .. } => *cursor = ArrivalCursor::default(),
            _ => {}
        }
    }

    /// Chooses the process to run at `time`, or `None` for an idle unit.
    ///
    /// `running` is the arena index of the previously running process,
    /// used for continuity and tie-breaking.
    pub fn select(
        &mut self,
        time: i64,
        processes: &[ProcessRecord],
        running: Option<usize>,
    ) -> Option<usize> {
        match &mut self.state {
            PolicyState::Fcfs(cursor) => select_fcfs(cursor, processes, running),
            PolicyState::SjfNonPreemptive => {
                keep_unfinished(processes, running)
                    .or_else(|| select_min_remaining(time, processes, running))
            }
            PolicyState::SjfPreemptive => select_min_remaining(time, processes, running),
            PolicyState::PriorityNonPreemptive => {
                keep_unfinished(processes, running)
                    .or_else(|| select_max_priority(time, processes, running))
            }
            PolicyState::PriorityPreemptive => select_max_priority(time, processes, running),
            PolicyState::RoundRobin { cursor, quantum } => {
                select_round_robin(cursor, *quantum, time, processes, running)
            }
        }
    }
}

/// Non-preemptive continuity: the running process is kept while unfinished.
fn keep_unfinished(processes: &[ProcessRecord], running: Option<usize>) -> Option<usize> {
    running.filter(|&i| !processes[i].is_finished())
}

/// FCFS: keep the running process until it finishes, then hand the CPU to
/// the process at the cursor, in arrival order. The cursor does not
/// re-check eligibility.
fn select_fcfs(
    cursor: &mut ArrivalCursor,
    processes: &[ProcessRecord],
    running: Option<usize>,
) -> Option<usize> {
    if let Some(i) = keep_unfinished(processes, running) {
        return Some(i);
    }
    cursor.refresh(processes);
    if cursor.is_empty() {
        return None;
    }
    Some(cursor.take())
}

/// Minimum remaining work among eligible processes.
///
/// The strict less-than compare is seeded with the running process's
/// remaining work, so an equal-remaining candidate never displaces it;
/// with no running seed, the earliest-encountered minimum wins.
fn select_min_remaining(
    time: i64,
    processes: &[ProcessRecord],
    running: Option<usize>,
) -> Option<usize> {
    let mut selected = running.filter(|&i| processes[i].is_eligible(time));
    let mut best = selected.map_or(i64::MAX, |i| processes[i].remaining());
    for (idx, p) in processes.iter().enumerate() {
        if p.is_eligible(time) && p.remaining() < best {
            selected = Some(idx);
            best = p.remaining();
        }
    }
    selected
}

/// Maximum priority among eligible processes, seeded at a floor of 0.
///
/// A candidate must strictly exceed the floor to be chosen over the
/// default candidate, so priorities <= 0 are never selected and ties keep
/// the earliest-encountered maximum.
fn select_max_priority(
    time: i64,
    processes: &[ProcessRecord],
    running: Option<usize>,
) -> Option<usize> {
    let mut selected = running.filter(|&i| processes[i].is_eligible(time));
    let mut floor = 0;
    for (idx, p) in processes.iter().enumerate() {
        if p.is_eligible(time) && p.priority() > floor {
            selected = Some(idx);
            floor = p.priority();
        }
    }
    selected
}

/// Round-Robin: keep the running process inside its quantum; at a quantum
/// boundary (or when running is absent/finished) scan forward cyclically,
/// skipping finished processes, at most one full revolution. The scan can
/// return to the same process when it is the only unfinished one.
fn select_round_robin(
    cursor: &mut ArrivalCursor,
    quantum: i64,
    time: i64,
    processes: &[ProcessRecord],
    running: Option<usize>,
) -> Option<usize> {
    if time % quantum != 0 {
        if let Some(i) = keep_unfinished(processes, running) {
            return Some(i);
        }
    }
    cursor.refresh(processes);
    if cursor.is_empty() {
        return None;
    }
    for _ in 0..cursor.len() {
        let idx = cursor.take();
        if !processes[idx].is_finished() {
            return Some(idx);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records with pids 1.. from (arrival, burst, priority) triples.
    fn records(specs: &[(i64, i64, i32)]) -> Vec<ProcessRecord> {
        specs
            .iter()
            .enumerate()
            .map(|(i, &(arrival, burst, priority))| {
                ProcessRecord::new(i as u32 + 1, arrival, burst, priority)
            })
            .collect()
    }

    fn finish(record: &mut ProcessRecord) {
        for t in 0..record.burst_time() {
            record.apply_work(t);
        }
    }

    #[test]
    fn test_fcfs_walks_arrival_order() {
        // Inserted out of arrival order; cursor must follow arrivals
        let mut procs = records(&[(5, 1, 0), (0, 1, 0), (2, 1, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::Fcfs);

        assert_eq!(policy.select(0, &procs, None), Some(1));
        finish(&mut procs[1]);
        assert_eq!(policy.select(1, &procs, Some(1)), Some(2));
        finish(&mut procs[2]);
        assert_eq!(policy.select(2, &procs, Some(2)), Some(0));
    }

    #[test]
    fn test_fcfs_keeps_running_until_finished() {
        let mut procs = records(&[(0, 3, 0), (0, 3, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::Fcfs);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        procs[0].apply_work(0);
        assert_eq!(policy.select(1, &procs, Some(0)), Some(0));
        finish(&mut procs[0]);
        assert_eq!(policy.select(2, &procs, Some(0)), Some(1));
    }

    #[test]
    fn test_fcfs_does_not_recheck_arrival() {
        // Historical rule: the cursor hands out the next process in
        // arrival order even before it arrives.
        let procs = records(&[(10, 4, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::Fcfs);
        assert_eq!(policy.select(0, &procs, None), Some(0));
    }

    #[test]
    fn test_fcfs_empty_collection() {
        let mut policy = DispatchPolicy::new(PolicyKind::Fcfs);
        assert_eq!(policy.select(0, &[], None), None);
    }

    #[test]
    fn test_sjf_picks_min_remaining() {
        let procs = records(&[(0, 8, 0), (0, 3, 0), (0, 5, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::SjfPreemptive);
        assert_eq!(policy.select(0, &procs, None), Some(1));

        // Remaining work, not total burst: a worked-down long process wins
        let mut procs = records(&[(0, 8, 0), (0, 3, 0)]);
        for t in 0..6 {
            procs[0].apply_work(t);
        }
        // remaining 2 vs 3
        assert_eq!(policy.select(6, &procs, None), Some(0));
    }

    #[test]
    fn test_sjf_tie_keeps_earliest_index() {
        let procs = records(&[(0, 4, 0), (0, 4, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::SjfNonPreemptive);
        for _ in 0..3 {
            assert_eq!(policy.select(0, &procs, None), Some(0));
        }
    }

    #[test]
    fn test_sjf_tie_keeps_running_process() {
        // Index 0 ties with the running index 1; no gratuitous switch
        let procs = records(&[(0, 4, 0), (0, 4, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::SjfPreemptive);
        assert_eq!(policy.select(1, &procs, Some(1)), Some(1));
    }

    #[test]
    fn test_sjf_preemptive_arrival_preempts() {
        let mut procs = records(&[(0, 10, 0), (3, 2, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::SjfPreemptive);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        procs[0].apply_work(0);
        procs[0].apply_work(1);
        procs[0].apply_work(2);
        // At t=3 the newcomer has remaining 2 < 7
        assert_eq!(policy.select(3, &procs, Some(0)), Some(1));
    }

    #[test]
    fn test_sjf_nonpreemptive_ignores_shorter_arrival() {
        let mut procs = records(&[(0, 10, 0), (3, 2, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::SjfNonPreemptive);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        procs[0].apply_work(0);
        assert_eq!(policy.select(3, &procs, Some(0)), Some(0));
    }

    #[test]
    fn test_sjf_none_eligible() {
        let procs = records(&[(5, 2, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::SjfPreemptive);
        assert_eq!(policy.select(0, &procs, None), None);
        assert_eq!(policy.select(5, &procs, None), Some(0));
    }

    #[test]
    fn test_priority_picks_max() {
        let procs = records(&[(0, 5, 2), (0, 5, 9), (0, 5, 4)]);
        let mut policy = DispatchPolicy::new(PolicyKind::PriorityPreemptive);
        assert_eq!(policy.select(0, &procs, None), Some(1));
    }

    #[test]
    fn test_priority_floor_excludes_nonpositive() {
        let procs = records(&[(0, 5, 0), (0, 5, -3)]);
        let mut policy = DispatchPolicy::new(PolicyKind::PriorityPreemptive);
        assert_eq!(policy.select(0, &procs, None), None);
    }

    #[test]
    fn test_priority_tie_keeps_earliest_maximum() {
        let procs = records(&[(0, 5, 7), (0, 5, 7)]);
        let mut policy = DispatchPolicy::new(PolicyKind::PriorityPreemptive);
        // Even with index 1 running, the earlier-indexed equal maximum wins
        assert_eq!(policy.select(0, &procs, Some(1)), Some(0));
    }

    #[test]
    fn test_priority_preemptive_displaces_lower() {
        let procs = records(&[(0, 10, 3), (4, 2, 8)]);
        let mut policy = DispatchPolicy::new(PolicyKind::PriorityPreemptive);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        assert_eq!(policy.select(3, &procs, Some(0)), Some(0));
        assert_eq!(policy.select(4, &procs, Some(0)), Some(1));
    }

    #[test]
    fn test_priority_nonpreemptive_keeps_running() {
        let mut procs = records(&[(0, 10, 3), (4, 2, 8)]);
        let mut policy = DispatchPolicy::new(PolicyKind::PriorityNonPreemptive);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        assert_eq!(policy.select(4, &procs, Some(0)), Some(0));
        finish(&mut procs[0]);
        assert_eq!(policy.select(10, &procs, Some(0)), Some(1));
    }

    #[test]
    fn test_round_robin_quantum_boundaries() {
        let procs = records(&[(0, 12, 0), (0, 12, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::RoundRobin);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        assert_eq!(policy.select(1, &procs, Some(0)), Some(0));
        assert_eq!(policy.select(4, &procs, Some(0)), Some(0));
        // Quantum boundary: hand over to the next in order
        assert_eq!(policy.select(5, &procs, Some(0)), Some(1));
        assert_eq!(policy.select(10, &procs, Some(1)), Some(0));
    }

    #[test]
    fn test_round_robin_single_process_returns_to_itself() {
        let procs = records(&[(0, 12, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::RoundRobin);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        assert_eq!(policy.select(5, &procs, Some(0)), Some(0));
        assert_eq!(policy.select(10, &procs, Some(0)), Some(0));
    }

    #[test]
    fn test_round_robin_skips_finished() {
        let mut procs = records(&[(0, 1, 0), (0, 12, 0), (0, 1, 0)]);
        finish(&mut procs[0]);
        finish(&mut procs[2]);
        let mut policy = DispatchPolicy::new(PolicyKind::RoundRobin);

        assert_eq!(policy.select(0, &procs, None), Some(1));
        assert_eq!(policy.select(5, &procs, Some(1)), Some(1));
    }

    #[test]
    fn test_round_robin_all_finished_is_idle() {
        let mut procs = records(&[(0, 1, 0), (0, 1, 0)]);
        finish(&mut procs[0]);
        finish(&mut procs[1]);
        let mut policy = DispatchPolicy::new(PolicyKind::RoundRobin);
        assert_eq!(policy.select(0, &procs, Some(1)), None);
    }

    #[test]
    fn test_round_robin_replacement_mid_quantum_on_finish() {
        let mut procs = records(&[(0, 2, 0), (0, 5, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::RoundRobin);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        finish(&mut procs[0]);
        // t=2 is inside the quantum, but the running process finished
        assert_eq!(policy.select(2, &procs, Some(0)), Some(1));
    }

    #[test]
    fn test_set_quantum_round_robin_only() {
        let mut rr = DispatchPolicy::new(PolicyKind::RoundRobin);
        assert_eq!(rr.quantum(), Some(DEFAULT_QUANTUM));
        rr.set_quantum(3);
        assert_eq!(rr.quantum(), Some(3));

        let mut fcfs = DispatchPolicy::new(PolicyKind::Fcfs);
        fcfs.set_quantum(3);
        assert_eq!(fcfs.quantum(), None);
    }

    #[test]
    fn test_quantum_affects_future_boundaries() {
        let procs = records(&[(0, 20, 0), (0, 20, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::RoundRobin);
        policy.set_quantum(2);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        assert_eq!(policy.select(1, &procs, Some(0)), Some(0));
        assert_eq!(policy.select(2, &procs, Some(0)), Some(1));
        assert_eq!(policy.select(3, &procs, Some(1)), Some(1));
        assert_eq!(policy.select(4, &procs, Some(1)), Some(0));
    }

    #[test]
    fn test_kind_and_name_round_trip() {
        for kind in [
            PolicyKind::Fcfs,
            PolicyKind::SjfNonPreemptive,
            PolicyKind::SjfPreemptive,
            PolicyKind::PriorityNonPreemptive,
            PolicyKind::PriorityPreemptive,
            PolicyKind::RoundRobin,
        ] {
            let policy = DispatchPolicy::new(kind);
            assert_eq!(policy.kind(), kind);
            assert!(!policy.name().is_empty());
        }
    }

    #[test]
    fn test_reset_cursors_restarts_rotation() {
        let procs = records(&[(0, 10, 0), (0, 10, 0)]);
        let mut policy = DispatchPolicy::new(PolicyKind::RoundRobin);

        assert_eq!(policy.select(0, &procs, None), Some(0));
        assert_eq!(policy.select(5, &procs, Some(0)), Some(1));
        policy.reset_cursors();
        assert_eq!(policy.select(0, &procs, None), Some(0));
    }
}
