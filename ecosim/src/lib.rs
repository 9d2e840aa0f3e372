//! Grain, deer and wolves living through the months of a few years, one thread per agent.
//!
//! Every agent owns one part of the shared [`state::World`] and runs the lockstep phase
//! protocol: all agents compute their next value from the same committed month, then all
//! commit, then the watcher reports the month and advances the step clock.

pub mod agents;
pub mod cli;
pub mod def;
pub mod error;
pub mod report;
pub mod sim;
pub mod state;
pub mod utils;
pub mod weather;

pub use error::SimError;
pub use sim::{run_simulation, SimOutcome};
