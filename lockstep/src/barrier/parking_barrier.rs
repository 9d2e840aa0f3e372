//! Condition-variable barrier with the same release ordering as [`SpinBarrier`].
//!
//! Waiters sleep on a `Condvar` keyed by the cycle's generation number instead of spinning on
//! `arrived`. The last arriver resets the count, bumps the generation and wakes everyone. A
//! participant that returns early and arrives for the next cycle cannot confuse a sleeper of
//! the previous cycle, because the sleeper waits for the generation to change rather than for
//! the count to reach a particular value. Sleepers also wake when the barrier is abandoned.
//!
//! [`SpinBarrier`]: super::SpinBarrier

use parking_lot::{Condvar, Mutex};

use super::Rendezvous;
use crate::error::LockstepError;

#[derive(Debug, Default)]
struct Cycle {
    arrived: usize,
    generation: u64,
    abandoned: bool,
}

#[derive(Debug)]
pub struct ParkingBarrier {
    parties: usize,
    cycle: Mutex<Cycle>,
    released: Condvar,
}

impl ParkingBarrier {
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

    pub fn try_new(parties: usize) -> Result<Self, LockstepError> {
        if parties == 0 {
            return Err(LockstepError::ZeroParties);
        }
        Ok(Self {
            parties,
            cycle: Mutex::new(Cycle::default()),
            released: Condvar::new(),
        })
    }

    pub fn parties(&self) -> usize {
        self.parties
    }

    pub fn arrive_and_wait(&self) {
        let mut cycle = self.cycle.lock();
        if cycle.abandoned {
            return;
        }
        let generation = cycle.generation;
        cycle.arrived += 1;
        debug_assert!(cycle.arrived <= self.parties);
        if cycle.arrived == self.parties {
            cycle.arrived = 0;
            cycle.generation += 1;
            self.released.notify_all();
            return;
        }
        while cycle.generation == generation && !cycle.abandoned {
            self.released.wait(&mut cycle);
        }
    }

    pub fn abandon(&self) {
        self.cycle.lock().abandoned = true;
        self.released.notify_all();
    }

    pub fn is_abandoned(&self) -> bool {
        self.cycle.lock().abandoned
    }

    pub fn arrived(&self) -> usize {
        self.cycle.lock().arrived
    }

    pub fn generation(&self) -> u64 {
        self.cycle.lock().generation
    }
}

impl Rendezvous for ParkingBarrier {
    fn parties(&self) -> usize {
        ParkingBarrier::parties(self)
    }

    fn arrive_and_wait(&self) {
        ParkingBarrier::arrive_and_wait(self)
    }

    fn generation(&self) -> u64 {
        ParkingBarrier::generation(self)
    }

    fn abandon(&self) {
        ParkingBarrier::abandon(self)
    }

    fn is_abandoned(&self) -> bool {
        ParkingBarrier::is_abandoned(self)
    }
}
