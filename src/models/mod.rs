//! Simulation domain models.
//!
//! Provides the process record with its lifecycle state machine, and the
//! owned snapshot copies handed across the display boundary.

mod process;
mod snapshot;

pub use process::{ProcessRecord, ProcessState};
pub use snapshot::ProcessSnapshot;
