//! Workload generation for demos and simulation tests.
//!
//! Provides parameterized random process batches and the classic fixed
//! demo batch. Generated parameters always satisfy the engine's
//! validation rules, and priorities stay positive so every policy can
//! select every process.

use rand::Rng;

/// Creation parameters for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessParams {
    /// Earliest unit at which the process may run.
    pub arrival: i64,
    /// Total work units required.
    pub burst: i64,
    /// Scheduling priority (higher = more important).
    pub priority: i32,
}

/// The five-process demo batch used for classroom walkthroughs.
pub fn demo_batch() -> Vec<ProcessParams> {
    [(0, 15, 2), (2, 1, 2), (0, 25, 5), (0, 12, 7), (4, 3, 6)]
        .iter()
        .map(|&(arrival, burst, priority)| ProcessParams {
            arrival,
            burst,
            priority,
        })
        .collect()
}

/// Parameters for random batch generation.
///
/// Ranges are inclusive on both ends.
///
/// # Example
///
/// ```
/// use u_cpusim::workload::WorkloadSpec;
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
///
/// let spec = WorkloadSpec::default().with_count(3);
/// let batch = spec.generate(&mut SmallRng::seed_from_u64(1));
/// assert_eq!(batch.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadSpec {
    /// Number of processes to generate.
    pub count: usize,
    /// Arrivals are drawn from `0..=max_arrival`.
    pub max_arrival: i64,
    /// Bursts are drawn from `burst_range.0..=burst_range.1`.
    pub burst_range: (i64, i64),
    /// Priorities are drawn from `priority_range.0..=priority_range.1`.
    pub priority_range: (i32, i32),
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            burst_range: (1, 20),
            priority_range: (1, 10),
        }
    }
}

impl WorkloadSpec {
    /// Sets the number of processes.
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Sets the latest possible arrival.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the inclusive burst range.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.burst_range = (min, max);
        self
    }

    /// Sets the inclusive priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.priority_range = (min, max);
        self
    }

    /// Draws a batch of process parameters.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<ProcessParams> {
        (0..self.count)
            .map(|_| ProcessParams {
                arrival: rng.random_range(0..=self.max_arrival),
                burst: rng.random_range(self.burst_range.0..=self.burst_range.1),
                priority: rng.random_range(self.priority_range.0..=self.priority_range.1),
            })
            .collect()
    }
}
