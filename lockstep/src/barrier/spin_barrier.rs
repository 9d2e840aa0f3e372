//! Reusable N-party barrier built from one exclusive lock and two counters.
//!
//! The last participant to arrive in a cycle is elected under the lock. It resets `departed`,
//! then resets `arrived` to zero, which is the release signal the other participants spin on.
//! Each released participant bumps `departed` on its way out. The elected participant keeps
//! the lock until all `parties - 1` others have departed, so nobody can start counting the
//! next cycle into `arrived` while a slow participant is still waiting to see it reach zero.
//!
//! Waiters never take the lock to observe release; they only read `arrived`. Holding the lock
//! through the departure wait therefore only delays next-cycle arrivals.
//!
//! Once `abandoned` is set every spin loop exits and later calls return immediately. The
//! counters are left as they were; an abandoned barrier is not reusable.

use crossbeam::utils::Backoff;
use log::trace;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize};

use super::Rendezvous;
use crate::def::SC;
use crate::error::LockstepError;

#[derive(Debug)]
pub struct SpinBarrier {
    parties: usize,
    // serializes the increment of `arrived`, the reset and the release decision
    guard: Mutex<()>,
    arrived: AtomicUsize,
    departed: AtomicUsize,
    generation: AtomicU64,
    abandoned: AtomicBool,
}

impl SpinBarrier {
    /// Creates a barrier for `parties` participants.
    ///
    /// # Panics
    /// If `parties` is zero
    pub fn new(parties: usize) -> Self {
        match Self::try_new(parties) {
            Ok(bar) => bar,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a barrier for `parties` participants, or `ZeroParties` if `parties` is zero.
    pub fn try_new(parties: usize) -> Result<Self, LockstepError> {
        if parties == 0 {
            return Err(LockstepError::ZeroParties);
        }
        Ok(Self {
            parties,
            guard: Mutex::new(()),
            arrived: AtomicUsize::new(0),
            departed: AtomicUsize::new(0),
            generation: AtomicU64::new(0),
            abandoned: AtomicBool::new(false),
        })
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    /// Blocks until all parties have arrived for the current cycle.
    ///
    /// Exactly `parties` calls must be made per cycle. A participant may call again as soon as
    /// this returns.
    pub fn arrive_and_wait(&self) {
        if self.is_abandoned() {
            return;
        }
        let guard = self.guard.lock();
        let arrived = self.arrived.fetch_add(1, SC) + 1;
        debug_assert!(
            arrived <= self.parties,
            "arrived={} parties={}",
            arrived,
            self.parties
        );
        if arrived == self.parties {
            // `departed` must be zero before anyone can see the release
            self.departed.store(0, SC);
            self.arrived.store(0, SC);
            let generation = self.generation.fetch_add(1, SC) + 1;
            let others = self.parties - 1;
            let backoff = Backoff::new();
            while self.departed.load(SC) != others {
                if self.is_abandoned() {
                    break;
                }
                backoff.snooze();
            }
            drop(guard);
            trace!("barrier released generation={}", generation);
            return;
        }
        drop(guard);

        let backoff = Backoff::new();
        while self.arrived.load(SC) != 0 {
            if self.is_abandoned() {
                return;
            }
            backoff.snooze();
        }
        self.departed.fetch_add(1, SC);
    }

    pub fn abandon(&self) {
        if !self.abandoned.swap(true, SC) {
            trace!("barrier abandoned at generation={}", self.generation());
        }
    }

    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(SC)
    }

    /// Participants counted into the current cycle so far.
    pub fn arrived(&self) -> usize {
        self.arrived.load(SC)
    }

    /// Participants that have left the last released cycle, not counting the elected one.
    pub fn departed(&self) -> usize {
        self.departed.load(SC)
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(SC)
    }
}

impl Rendezvous for SpinBarrier {
    fn parties(&self) -> usize {
        SpinBarrier::parties(self)
    }

    fn arrive_and_wait(&self) {
        SpinBarrier::arrive_and_wait(self)
    }

    fn generation(&self) -> u64 {
        SpinBarrier::generation(self)
    }

    fn abandon(&self) {
        SpinBarrier::abandon(self)
    }

    fn is_abandoned(&self) -> bool {
        SpinBarrier::is_abandoned(self)
    }
}
