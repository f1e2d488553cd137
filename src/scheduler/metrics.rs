//! Simulation quality metrics (KPIs).
//!
//! Computes standard single-CPU scheduling indicators from process
//! snapshots after (or during) a run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Makespan | Latest completion unit across finished processes |
//! | Avg Turnaround | Mean of (completion - arrival) |
//! | Avg / Max Waiting | Turnaround minus burst |
//! | CPU Utilization | Applied work units / horizon |
//! | Completion Rate | Fraction of processes finished |
//!
//! Finish stamps index the unit in which the final work unit was applied;
//! completion occurs at the end of that unit, so completion = finish + 1.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::ProcessSnapshot;

/// Aggregate scheduling indicators for one simulation run.
///
/// Turnaround and waiting cover finished processes only; utilization
/// counts every applied work unit, including those of processes still in
/// flight.
#[derive(Debug, Clone)]
pub struct SimulationKpi {
    /// Latest completion unit across finished processes.
    pub makespan: i64,
    /// Mean time from arrival to completion (finished processes).
    pub avg_turnaround: f64,
    /// Mean time spent not running between arrival and completion.
    pub avg_waiting: f64,
    /// Largest single waiting time.
    pub max_waiting: i64,
    /// Fraction of the horizon spent doing work (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Number of finished processes.
    pub completed: usize,
    /// Fraction of processes finished (1.0 for an empty batch).
    pub completion_rate: f64,
}

impl SimulationKpi {
    /// Computes KPIs from snapshots and the batch horizon.
    pub fn calculate(snapshots: &[ProcessSnapshot], horizon: i64) -> Self {
        let mut makespan: i64 = 0;
        let mut total_turnaround: i64 = 0;
        let mut total_waiting: i64 = 0;
        let mut max_waiting: i64 = 0;
        let mut busy_units: i64 = 0;
        let mut completed: usize = 0;

        for snap in snapshots {
            busy_units += snap.counter;

            if let Some(finish) = snap.finish_time {
                completed += 1;
                let completion = finish + 1;
                let turnaround = completion - snap.arrival_time;
                let waiting = turnaround - snap.burst_time;

                makespan = makespan.max(completion);
                total_turnaround += turnaround;
                total_waiting += waiting;
                max_waiting = max_waiting.max(waiting);
            }
        }

        let avg_turnaround = if completed == 0 {
            0.0
        } else {
            total_turnaround as f64 / completed as f64
        };
        let avg_waiting = if completed == 0 {
            0.0
        } else {
            total_waiting as f64 / completed as f64
        };
        let cpu_utilization = if horizon == 0 {
            0.0
        } else {
            busy_units as f64 / horizon as f64
        };
        let completion_rate = if snapshots.is_empty() {
            1.0
        } else {
            completed as f64 / snapshots.len() as f64
        };

        Self {
            makespan,
            avg_turnaround,
            avg_waiting,
            max_waiting,
            cpu_utilization,
            completed,
            completion_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::PolicyKind;
    use crate::scheduler::SchedulerEngine;

    #[test]
    fn test_kpi_fcfs_back_to_back() {
        let mut engine = SchedulerEngine::new(PolicyKind::Fcfs);
        engine.add_process(0, 3, 1).unwrap();
        engine.add_process(0, 2, 1).unwrap();
        engine.step(5);

        let kpi = SimulationKpi::calculate(&engine.snapshot(), engine.horizon());
        // Completions at 3 and 5: turnarounds 3 and 5, waits 0 and 3
        assert_eq!(kpi.makespan, 5);
        assert!((kpi.avg_turnaround - 4.0).abs() < 1e-10);
        assert!((kpi.avg_waiting - 1.5).abs() < 1e-10);
        assert_eq!(kpi.max_waiting, 3);
        assert!((kpi.cpu_utilization - 1.0).abs() < 1e-10);
        assert_eq!(kpi.completed, 2);
        assert!((kpi.completion_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_counts_idle_against_utilization() {
        let mut engine = SchedulerEngine::new(PolicyKind::SjfPreemptive);
        engine.add_process(5, 3, 1).unwrap();
        engine.step(8);

        let kpi = SimulationKpi::calculate(&engine.snapshot(), engine.horizon());
        // Busy 3 of 8 units; arrival 5, completion 8: no waiting
        assert!((kpi.cpu_utilization - 0.375).abs() < 1e-10);
        assert!((kpi.avg_turnaround - 3.0).abs() < 1e-10);
        assert!((kpi.avg_waiting - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_mid_run_excludes_unfinished() {
        let mut engine = SchedulerEngine::new(PolicyKind::Fcfs);
        engine.add_process(0, 4, 1).unwrap();
        engine.add_process(0, 4, 1).unwrap();
        engine.step(6);

        let kpi = SimulationKpi::calculate(&engine.snapshot(), engine.horizon());
        assert_eq!(kpi.completed, 1);
        assert!((kpi.completion_rate - 0.5).abs() < 1e-10);
        assert_eq!(kpi.makespan, 4);
        // Unfinished work still counts toward utilization: 6 of 8
        assert!((kpi.cpu_utilization - 0.75).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_empty() {
        let kpi = SimulationKpi::calculate(&[], 0);
        assert_eq!(kpi.makespan, 0);
        assert_eq!(kpi.completed, 0);
        assert!((kpi.completion_rate - 1.0).abs() < 1e-10);
        assert!((kpi.cpu_utilization - 0.0).abs() < 1e-10);
        assert!((kpi.avg_turnaround - 0.0).abs() < 1e-10);
    }
}
