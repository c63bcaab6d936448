//! Launch host for scoutspawn.
//!
//! Takes a [`LaunchDescription`](scoutspawn_core::launch::LaunchDescription),
//! resolves it against caller arguments and the ament index, and runs the
//! resulting processes.

pub mod executable;
pub mod host;
pub mod process;

pub use host::{LaunchReport, LaunchRunner, NodeOutcome, PlannedNode};
pub use process::ExecutionResult;
