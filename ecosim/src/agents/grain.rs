use std::sync::Arc;

use lockstep::Agent;

use crate::def::{GRAIN_GROWS_PER_MONTH, MIDPRECIP, MIDTEMP, ONE_DEER_EATS_PER_MONTH};
use crate::state::{Climate, World};

pub struct Grain {
    world: Arc<World>,
}

impl Grain {
    pub fn new(world: Arc<World>) -> Self {
        Self { world }
    }
}

fn bell(x: f32, mid: f32) -> f32 {
    let d = (x - mid) / 10.0;
    (-(d * d)).exp()
}

/// Grain height after one month of growth and grazing.
pub fn next_height(height: f32, climate: Climate, deer: i32) -> f32 {
    let temp_factor = bell(climate.temp, MIDTEMP);
    let precip_factor = bell(climate.precip, MIDPRECIP);
    let grown = height + temp_factor * precip_factor * GRAIN_GROWS_PER_MONTH;
    (grown - deer as f32 * ONE_DEER_EATS_PER_MONTH).max(0.0)
}

impl Agent for Grain {
    type Next = f32;

    fn name(&self) -> &str {
        "grain"
    }

    fn compute(&mut self) -> f32 {
        let w = &self.world;
        next_height(w.height(), w.climate(), w.deer())
    }

    fn commit(&mut self, next: f32) {
        self.world.set_height(next);
    }
}
