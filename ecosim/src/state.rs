//! Shared state of the ecosystem.
//!
//! Every scalar has exactly one writer agent, which only stores during its commit phase. The
//! phase barriers order all commits before the next round of reads, so plain atomics are
//! enough; nothing here takes a lock.

use std::sync::atomic::{AtomicI32, AtomicU32};

use lockstep::def::SC;
use serde::Serialize;

use crate::def::{SimConfig, MONTHS_PER_YEAR};

#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(v: f32) -> Self {
        Self(AtomicU32::new(v.to_bits()))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(SC))
    }

    pub fn store(&self, v: f32) {
        self.0.store(v.to_bits(), SC)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub year: i32,
    // 0 is January
    pub month: u32,
}

impl Calendar {
    pub fn next(self) -> Self {
        let month = self.month + 1;
        if month == MONTHS_PER_YEAR {
            Self {
                year: self.year + 1,
                month: 0,
            }
        } else {
            Self {
                year: self.year,
                month,
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Climate {
    pub temp: f32,
    pub precip: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub calendar: Calendar,
    pub climate: Climate,
    pub height: f32,
    pub deer: i32,
    pub wolves: i32,
}

/// The "now" state every agent reads during compute.
#[derive(Debug)]
pub struct World {
    // watcher
    year: AtomicI32,
    month: AtomicU32,
    temp: AtomicF32,
    precip: AtomicF32,
    // grain
    height: AtomicF32,
    // deer
    deer: AtomicI32,
    // wolf
    wolves: AtomicI32,
}

impl World {
    pub fn new(config: &SimConfig, climate: Climate) -> Self {
        Self {
            year: AtomicI32::new(config.start_year),
            month: AtomicU32::new(0),
            temp: AtomicF32::new(climate.temp),
            precip: AtomicF32::new(climate.precip),
            height: AtomicF32::new(config.height),
            deer: AtomicI32::new(config.deer),
            wolves: AtomicI32::new(config.wolves),
        }
    }

    pub fn calendar(&self) -> Calendar {
        Calendar {
            year: self.year.load(SC),
            month: self.month.load(SC),
        }
    }

    pub fn set_calendar(&self, c: Calendar) {
        self.year.store(c.year, SC);
        self.month.store(c.month, SC);
    }

    pub fn climate(&self) -> Climate {
        Climate {
            temp: self.temp.load(),
            precip: self.precip.load(),
        }
    }

    pub fn set_climate(&self, c: Climate) {
        self.temp.store(c.temp);
        self.precip.store(c.precip);
    }

    pub fn height(&self) -> f32 {
        self.height.load()
    }

    pub fn set_height(&self, h: f32) {
        self.height.store(h)
    }

    pub fn deer(&self) -> i32 {
        self.deer.load(SC)
    }

    pub fn set_deer(&self, n: i32) {
        self.deer.store(n, SC)
    }

    pub fn wolves(&self) -> i32 {
        self.wolves.load(SC)
    }

    pub fn set_wolves(&self, n: i32) {
        self.wolves.store(n, SC)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            calendar: self.calendar(),
            climate: self.climate(),
            height: self.height(),
            deer: self.deer(),
            wolves: self.wolves(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_f32() {
        let a = AtomicF32::new(1.5);
        assert_eq!(a.load(), 1.5);
        a.store(-0.25);
        assert_eq!(a.load(), -0.25);
    }

    #[test]
    fn test_calendar_rolls_over() {
        let c = Calendar {
            year: 2025,
            month: 10,
        };
        let c = c.next();
        assert_eq!(c, Calendar { year: 2025, month: 11 });
        assert_eq!(c.next(), Calendar { year: 2026, month: 0 });
    }

    #[test]
    fn test_world_from_config() {
        let config = SimConfig::default();
        let world = World::new(
            &config,
            Climate {
                temp: 41.0,
                precip: 3.0,
            },
        );
        let s = world.snapshot();
        assert_eq!(s.calendar, Calendar { year: 2025, month: 0 });
        assert_eq!(s.climate.temp, 41.0);
        assert_eq!(s.height, 5.0);
        assert_eq!(s.deer, 2);
        assert_eq!(s.wolves, 1);
    }
}
