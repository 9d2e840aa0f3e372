//! The four agents of the ecosystem. Grain, deer and wolf each own one population scalar of the
//! [`World`](crate::state::World); the watcher owns the calendar and the weather, reports every
//! month and is the team's clock owner.

pub mod deer;
pub mod grain;
pub mod watcher;
pub mod wolf;

pub use deer::Deer;
pub use grain::Grain;
pub use watcher::Watcher;
pub use wolf::Wolf;

// one step from `now` toward `capacity`, never below zero
pub(crate) fn step_toward(now: i32, capacity: i32) -> i32 {
    let next = match now.cmp(&capacity) {
        std::cmp::Ordering::Less => now + 1,
        std::cmp::Ordering::Greater => now - 1,
        std::cmp::Ordering::Equal => now,
    };
    next.max(0)
}
