//! Three-phase step protocol on top of a [`Rendezvous`].
//!
//! Every step is `compute` → barrier → `commit` → barrier → `report` → barrier. Shared state
//! is only written in `commit`, so reads made in `compute` always see the fully committed
//! previous step, and reads made in `report` always see the fully committed current step.
//!
//! [`Rendezvous`]: crate::Rendezvous

pub mod step_clock;
pub mod team;

/// The three phases of one step, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Compute,
    Commit,
    Report,
}

/// One long-running participant of the phase protocol.
///
/// The harness calls the three methods in order, once per step, with a rendezvous of all
/// agents after each one. Implementations must not touch the shared state outside the phase
/// the method is named after, and contain no synchronization of their own.
pub trait Agent: Send {
    /// Value carried from `compute` to `commit` of the same step.
    type Next: Send;

    fn name(&self) -> &str;

    /// Read the shared state and prepare the next value. Must not write shared state.
    fn compute(&mut self) -> Self::Next;

    /// Publish `next` into the shared scalar this agent owns.
    fn commit(&mut self, next: Self::Next);

    /// Observe the committed state. Most agents have nothing to do here.
    fn report(&mut self) {}
}
