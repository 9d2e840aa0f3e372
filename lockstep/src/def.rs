use std::sync::atomic::Ordering;

pub const SC: Ordering = Ordering::SeqCst;

// each step of the phase protocol is made of this many rendezvous
pub const RENDEZVOUS_PER_STEP: u64 = 3;

pub const THREAD_NAME_PREFIX: &str = "lockstep-";
