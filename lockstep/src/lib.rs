//! # Lockstep
//!
//! A small toolkit for running a fixed group of long-lived threads in lockstep.
//!
//! The core is [`SpinBarrier`], a reusable N-party rendezvous point built from one exclusive
//! lock and two shared counters. Every participant calls `arrive_and_wait` once per cycle; the
//! call returns to all of them only after all N have arrived, and the barrier is immediately
//! ready for the next cycle without an explicit reset. [`ParkingBarrier`] offers the same
//! release ordering on top of a condition variable, for hosts where the participants outnumber
//! the cores. Both implement [`Rendezvous`].
//!
//! On top of the barrier, the [`phase`] module sequences every simulated step into three
//! globally ordered phases:
//!
//! 1. `Compute`: every agent reads the shared state and prepares a private next value.
//! 2. `Commit`: every agent publishes its next value into the one scalar it owns.
//! 3. `Report`: observers read the fully committed state, and the clock owner advances the
//!    shared [`StepClock`].
//!
//! Each phase ends with one `arrive_and_wait`, so no compute-phase read can ever observe a
//! half-committed step. All agents re-check the clock at the top of their loop, after the
//! report barrier, so they all leave on the same step and nobody is stranded on a barrier with
//! fewer than N arrivals.
//!
//! A [`Team`] spawns one named thread per [`Agent`], refuses to start when the number of
//! agents does not match the barrier's party count, and returns per-agent [`AgentStats`]. When
//! an agent panics the team abandons the barrier, which releases the siblings, and joins them.
//!
//! The barrier has no runtime error path. A participant that never arrives blocks the others
//! forever unless someone calls `abandon`; making exactly N calls per cycle is the caller's
//! responsibility.

pub mod barrier;
pub mod def;
pub mod error;
pub mod phase;

pub use barrier::{BarrierKind, ParkingBarrier, Rendezvous, SpinBarrier};
pub use error::LockstepError;
pub use phase::step_clock::StepClock;
pub use phase::team::{run_phases, AgentStats, Team};
pub use phase::{Agent, Phase};
