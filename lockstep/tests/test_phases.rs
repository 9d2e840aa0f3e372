use lockstep::def::RENDEZVOUS_PER_STEP;
use lockstep::{Agent, BarrierKind, Rendezvous, SpinBarrier, StepClock, Team};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

const SC: Ordering = Ordering::SeqCst;

#[derive(Default, Debug, Clone, PartialEq, Eq)]
struct Calls {
    compute: u64,
    commit: u64,
    report: u64,
    // clock value seen at every compute
    seen_steps: Vec<u64>,
}

struct Probe {
    name: String,
    clock: Arc<StepClock>,
    calls: Arc<Mutex<Calls>>,
}

impl Probe {
    fn new(name: &str, clock: &Arc<StepClock>) -> (Self, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let probe = Self {
            name: name.to_string(),
            clock: clock.clone(),
            calls: calls.clone(),
        };
        (probe, calls)
    }
}

impl Agent for Probe {
    type Next = ();

    fn name(&self) -> &str {
        &self.name
    }

    fn compute(&mut self) {
        let mut calls = self.calls.lock();
        calls.compute += 1;
        calls.seen_steps.push(self.clock.step());
    }

    fn commit(&mut self, _: ()) {
        self.calls.lock().commit += 1;
    }

    fn report(&mut self) {
        self.calls.lock().report += 1;
    }
}

#[test]
fn test_bounded_run_exits_together() {
    let bound = 5;
    let bar = Arc::new(SpinBarrier::new(4));
    let clock = Arc::new(StepClock::new(bound));
    let mut team = Team::new(bar.clone(), clock.clone());
    let mut all_calls = Vec::new();
    for i in 0..4 {
        let (probe, calls) = Probe::new(&format!("probe{}", i), &clock);
        if i == 0 {
            team.add_clock_owner(probe);
        } else {
            team.add(probe);
        }
        all_calls.push(calls);
    }
    let stats = team.run().unwrap();

    assert_eq!(stats.len(), 4);
    assert!(stats.iter().all(|s| s.steps == bound));
    assert_eq!(stats.iter().filter(|s| s.owns_clock).count(), 1);
    for calls in all_calls {
        let calls = calls.lock();
        assert_eq!(calls.compute, bound);
        assert_eq!(calls.commit, bound);
        assert_eq!(calls.report, bound);
        assert_eq!(calls.seen_steps, (0..bound).collect::<Vec<_>>());
    }
    assert_eq!(bar.generation(), RENDEZVOUS_PER_STEP * bound);
    assert_eq!(clock.step(), bound);
    assert!(clock.is_done());
}

#[test]
fn test_zero_bound_runs_nothing() {
    let bar = BarrierKind::Parking.build(2);
    let clock = Arc::new(StepClock::new(0));
    let mut team = Team::new(bar.clone(), clock.clone());
    let (a, calls_a) = Probe::new("a", &clock);
    let (b, _) = Probe::new("b", &clock);
    team.add_clock_owner(a).add(b);
    let stats = team.run().unwrap();
    assert!(stats.iter().all(|s| s.steps == 0));
    assert_eq!(calls_a.lock().compute, 0);
    assert_eq!(bar.generation(), 0);
}

// A producer/consumer pair where the consumer's next value depends on what the producer
// committed in the previous step.
struct Producer {
    out: Arc<AtomicI64>,
}

struct Follower {
    input: Arc<AtomicI64>,
    out: Arc<AtomicI64>,
}

impl Agent for Producer {
    type Next = i64;

    fn name(&self) -> &str {
        "producer"
    }

    fn compute(&mut self) -> i64 {
        self.out.load(SC) + 1
    }

    fn commit(&mut self, next: i64) {
        self.out.store(next, SC);
    }
}

impl Agent for Follower {
    type Next = i64;

    fn name(&self) -> &str {
        "follower"
    }

    fn compute(&mut self) -> i64 {
        self.input.load(SC)
    }

    fn commit(&mut self, next: i64) {
        self.out.store(next, SC);
    }

    fn report(&mut self) {
        // the follower always trails the producer by exactly one step
        assert_eq!(self.out.load(SC) + 1, self.input.load(SC));
    }
}

#[test]
fn test_compute_reads_previous_commit() {
    for kind in [BarrierKind::Spin, BarrierKind::Parking] {
        let produced = Arc::new(AtomicI64::new(0));
        let followed = Arc::new(AtomicI64::new(-1));
        let clock = Arc::new(StepClock::new(500));
        let mut team = Team::new(kind.build(2), clock);
        team.add_clock_owner(Producer {
            out: produced.clone(),
        })
        .add(Follower {
            input: produced.clone(),
            out: followed.clone(),
        });
        team.run().unwrap();
        assert_eq!(produced.load(SC), 500);
        assert_eq!(followed.load(SC), 499);
    }
}
