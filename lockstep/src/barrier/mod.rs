pub mod parking_barrier;
pub mod spin_barrier;

use std::sync::Arc;

use auto_impl::auto_impl;

pub use parking_barrier::ParkingBarrier;
pub use spin_barrier::SpinBarrier;

/// A reusable rendezvous point for a fixed number of participants.
///
/// Every one of the `parties()` participants must call `arrive_and_wait` exactly once per
/// cycle. The call blocks until all of them have arrived for the current cycle and then
/// returns to all of them. The next cycle starts with the next call; no reset is needed.
///
/// Calling with fewer live participants than `parties()` blocks forever. Implementations do
/// not detect this. The only way out is [`abandon`](Rendezvous::abandon), which the team
/// harness calls when one of its agents panics.
#[auto_impl(&, Arc)]
pub trait Rendezvous: Send + Sync {
    /// Number of participants fixed at construction.
    fn parties(&self) -> usize;

    /// Block until all parties of the current cycle have arrived.
    fn arrive_and_wait(&self);

    /// Number of completed cycles so far.
    fn generation(&self) -> u64;

    /// Permanently release every current and future waiter without completing the cycle.
    fn abandon(&self);

    fn is_abandoned(&self) -> bool;
}

/// Which barrier implementation to build.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum BarrierKind {
    /// [`SpinBarrier`]: one lock, two counters, busy waiting with backoff.
    #[default]
    Spin,
    /// [`ParkingBarrier`]: mutex plus condition variable, waiters sleep.
    Parking,
}

impl BarrierKind {
    /// Builds a shared barrier of this kind for `parties` participants.
    ///
    /// # Panics
    /// If `parties` is zero
    pub fn build(self, parties: usize) -> Arc<dyn Rendezvous> {
        match self {
            BarrierKind::Spin => Arc::new(SpinBarrier::new(parties)),
            BarrierKind::Parking => Arc::new(ParkingBarrier::new(parties)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_barrier_kind_parse() {
        assert_eq!(BarrierKind::from_str("spin").unwrap(), BarrierKind::Spin);
        assert_eq!(
            BarrierKind::from_str("parking").unwrap(),
            BarrierKind::Parking
        );
        assert!(BarrierKind::from_str("futex").is_err());
        assert_eq!(BarrierKind::Parking.to_string(), "parking");
    }

    #[test]
    fn test_build() {
        for kind in [BarrierKind::Spin, BarrierKind::Parking] {
            let bar = kind.build(1);
            assert_eq!(bar.parties(), 1);
            bar.arrive_and_wait();
            bar.arrive_and_wait();
            assert_eq!(bar.generation(), 2);
            assert!(!bar.is_abandoned());
        }
    }

    #[test]
    fn test_abandon_releases_waiters() {
        for kind in [BarrierKind::Spin, BarrierKind::Parking] {
            let bar = kind.build(3);
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let bar = bar.clone();
                    std::thread::spawn(move || bar.arrive_and_wait())
                })
                .collect();
            std::thread::sleep(std::time::Duration::from_millis(20));
            bar.abandon();
            for h in handles {
                h.join().unwrap();
            }
            assert!(bar.is_abandoned(), "kind={}", kind);
            assert_eq!(bar.generation(), 0, "kind={}", kind);
            // later arrivals return at once
            bar.arrive_and_wait();
            assert_eq!(bar.generation(), 0);
        }
    }
}
