use std::sync::Arc;

use lockstep::Agent;

use super::step_toward;
use crate::state::World;

pub struct Wolf {
    world: Arc<World>,
}

impl Wolf {
    pub fn new(world: Arc<World>) -> Self {
        Self { world }
    }
}

// the pack settles at one wolf per two deer
pub fn next_wolves(wolves: i32, deer: i32) -> i32 {
    step_toward(wolves, deer / 2)
}

impl Agent for Wolf {
    type Next = i32;

    fn name(&self) -> &str {
        "wolf"
    }

    fn compute(&mut self) -> i32 {
        next_wolves(self.world.wolves(), self.world.deer())
    }

    fn commit(&mut self, next: i32) {
        self.world.set_wolves(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_wolves() {
        assert_eq!(next_wolves(1, 6), 2);
        assert_eq!(next_wolves(3, 5), 2);
        assert_eq!(next_wolves(2, 4), 2);
        assert_eq!(next_wolves(0, 1), 0);
    }
}
