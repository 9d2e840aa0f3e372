use std::sync::atomic::AtomicU64;

use crate::def::SC;

/// Shared step counter with an exit bound.
///
/// Exactly one agent advances it, during its report phase. All agents read it at the top of
/// their loop, after the report barrier, so they all see the same value and leave together.
#[derive(Debug)]
pub struct StepClock {
    step: AtomicU64,
    bound: u64,
}

impl StepClock {
    pub fn new(bound: u64) -> Self {
        Self {
            step: AtomicU64::new(0),
            bound,
        }
    }

    pub fn step(&self) -> u64 {
        self.step.load(SC)
    }

    pub fn bound(&self) -> u64 {
        self.bound
    }

    pub fn is_done(&self) -> bool {
        self.step.load(SC) >= self.bound
    }

    // returns the step just entered
    pub fn advance(&self) -> u64 {
        self.step.fetch_add(1, SC) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clock() {
        let clock = StepClock::new(2);
        assert!(!clock.is_done());
        assert_eq!(clock.advance(), 1);
        assert!(!clock.is_done());
        assert_eq!(clock.advance(), 2);
        assert!(clock.is_done());
        assert_eq!(clock.step(), 2);
        assert_eq!(clock.bound(), 2);
    }

    #[test]
    fn test_zero_bound_is_done() {
        assert!(StepClock::new(0).is_done());
    }
}
