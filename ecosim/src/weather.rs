use std::f32::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::def::{
    AMP_PRECIP_PER_MONTH, AMP_TEMP, AVG_PRECIP_PER_MONTH, AVG_TEMP, RANDOM_PRECIP, RANDOM_TEMP,
};
use crate::state::{Calendar, Climate};

/// Seasonal weather with uniform noise, one sample per month.
pub struct Weather {
    rng: StdRng,
}

impl Weather {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn sample(&mut self, calendar: Calendar) -> Climate {
        let (temp, precip) = seasonal(calendar.month);
        let temp = temp + self.rng.gen_range(-RANDOM_TEMP..=RANDOM_TEMP);
        let precip = precip + self.rng.gen_range(-RANDOM_PRECIP..=RANDOM_PRECIP);
        Climate {
            temp,
            precip: precip.max(0.0),
        }
    }
}

// noiseless temperature and precipitation of a month, 0 is January
pub fn seasonal(month: u32) -> (f32, f32) {
    let ang = (30.0 * month as f32 + 15.0) * (PI / 180.0);
    let temp = AVG_TEMP - AMP_TEMP * ang.cos();
    let precip = AVG_PRECIP_PER_MONTH + AMP_PRECIP_PER_MONTH * ang.sin();
    (temp, precip)
}
