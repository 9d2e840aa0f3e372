use std::sync::Arc;

use lockstep::Agent;

use super::step_toward;
use crate::state::World;

/// Deer herd; grows by one while the grain is taller than the herd, shrinks by one otherwise.
pub struct Deer {
    world: Arc<World>,
}

impl Deer {
    pub fn new(world: Arc<World>) -> Self {
        Self { world }
    }
}

pub fn next_deer(deer: i32, height: f32) -> i32 {
    // carrying capacity
    step_toward(deer, height.floor() as i32)
}

impl Agent for Deer {
    type Next = i32;

    fn name(&self) -> &str {
        "deer"
    }

    fn compute(&mut self) -> i32 {
        next_deer(self.world.deer(), self.world.height())
    }

    fn commit(&mut self, next: i32) {
        self.world.set_deer(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_deer() {
        assert_eq!(next_deer(2, 5.0), 3);
        assert_eq!(next_deer(4, 3.9), 3);
        assert_eq!(next_deer(3, 3.2), 3);
        assert_eq!(next_deer(0, 0.0), 0);
    }
}
