//! Dispatch policies for the simulation engine.
//!
//! Provides the six interchangeable policies — FCFS, Shortest-Job-First
//! and Priority Scheduling in non-preemptive and preemptive variants, and
//! Round-Robin — behind a single selection entry point.
//!
//! # Usage
//!
//! ```
//! use u_cpusim::dispatching::{DispatchPolicy, PolicyKind};
//!
//! let policy = DispatchPolicy::new(PolicyKind::RoundRobin);
//! assert_eq!(policy.quantum(), Some(5));
//! ```

mod policy;

pub use policy::{DispatchPolicy, PolicyKind, DEFAULT_QUANTUM};
