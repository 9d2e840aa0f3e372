use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{bounded, unbounded, Receiver};
use log::{debug, info, warn};

use super::step_clock::StepClock;
use super::{Agent, Phase};
use crate::barrier::Rendezvous;
use crate::def::{RENDEZVOUS_PER_STEP, THREAD_NAME_PREFIX};
use crate::error::LockstepError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentStats {
    pub name: String,
    // completed compute/commit/report triples
    pub steps: u64,
    pub owns_clock: bool,
}

/// Drives one agent through the phase protocol until `clock` reaches its bound.
///
/// The clock is checked at the top of every iteration, after the previous report barrier has
/// released, so every agent sharing `barrier` and `clock` takes the same decision. When
/// `owns_clock` is set, the clock is advanced right after this agent's `report`, before the
/// report barrier. Exactly one agent per team must own the clock.
///
/// Returns early, without running the next phase, once the barrier has been abandoned.
pub fn run_phases<A, B>(
    agent: &mut A,
    barrier: &B,
    clock: &StepClock,
    owns_clock: bool,
) -> AgentStats
where
    A: Agent + ?Sized,
    B: Rendezvous + ?Sized,
{
    let mut steps = 0u64;
    while !clock.is_done() {
        let next = agent.compute();
        barrier.arrive_and_wait();
        if barrier.is_abandoned() {
            break;
        }

        agent.commit(next);
        barrier.arrive_and_wait();
        if barrier.is_abandoned() {
            break;
        }

        agent.report();
        if owns_clock {
            let step = clock.advance();
            metrics::counter!("lockstep.steps").increment(1);
            debug!("{} {} step={}", agent.name(), Phase::Report, step);
        }
        barrier.arrive_and_wait();
        if barrier.is_abandoned() {
            break;
        }
        steps += 1;
    }
    AgentStats {
        name: agent.name().to_string(),
        steps,
        owns_clock,
    }
}

type Runner = Box<dyn FnOnce(&dyn Rendezvous, &StepClock) -> AgentStats + Send>;

struct Member {
    name: String,
    owns_clock: bool,
    runner: Runner,
}

/// A fixed group of agents, one thread each, sharing one barrier and one step clock.
pub struct Team {
    barrier: Arc<dyn Rendezvous>,
    clock: Arc<StepClock>,
    members: Vec<Member>,
}

impl Team {
    pub fn new(barrier: Arc<dyn Rendezvous>, clock: Arc<StepClock>) -> Self {
        Self {
            barrier,
            clock,
            members: Vec::with_capacity(4),
        }
    }

    pub fn add<A: Agent + 'static>(&mut self, agent: A) -> &mut Self {
        self.push(agent, false)
    }

    /// Adds the agent that advances the step clock during its report phase.
    pub fn add_clock_owner<A: Agent + 'static>(&mut self, agent: A) -> &mut Self {
        self.push(agent, true)
    }

    fn push<A: Agent + 'static>(&mut self, mut agent: A, owns_clock: bool) -> &mut Self {
        let name = agent.name().to_string();
        let runner: Runner =
            Box::new(move |bar, clock| run_phases(&mut agent, bar, clock, owns_clock));
        self.members.push(Member {
            name,
            owns_clock,
            runner,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Runs every agent on its own thread until the clock reaches its bound.
    ///
    /// Returns the per-agent stats in the order the agents were added. Fails before spawning
    /// anything if the agent count differs from the barrier's party count or if there is not
    /// exactly one clock owner. If an agent panics, the barrier is abandoned so its siblings
    /// leave their loops; every thread is joined before `AgentPanicked` is returned.
    pub fn run(self) -> Result<Vec<AgentStats>, LockstepError> {
        let parties = self.barrier.parties();
        let agents = self.members.len();
        if agents != parties {
            warn!("team size {} does not match barrier parties {}", agents, parties);
            return Err(LockstepError::PartyMismatch { parties, agents });
        }
        let owners = self.members.iter().filter(|m| m.owns_clock).count();
        if owners != 1 {
            return Err(LockstepError::ClockOwners(owners));
        }

        info!(
            "team starting: {} agents, {} steps, {} rendezvous",
            agents,
            self.clock.bound(),
            self.clock.bound() * RENDEZVOUS_PER_STEP
        );
        // nobody touches the barrier until every thread exists
        let (go_sender, go_receiver) = bounded::<()>(agents);
        let (done_sender, done_receiver) = unbounded();
        let mut handles = Vec::with_capacity(agents);
        for (idx, member) in self.members.into_iter().enumerate() {
            let Member { name, runner, .. } = member;
            let barrier = self.barrier.clone();
            let clock = self.clock.clone();
            let go = go_receiver.clone();
            let done = done_sender.clone();
            let spawned = thread::Builder::new()
                .name(format!("{}{}", THREAD_NAME_PREFIX, name))
                .spawn(move || {
                    if go.recv().is_err() {
                        return;
                    }
                    let res = catch_unwind(AssertUnwindSafe(|| runner(&*barrier, &*clock)));
                    if res.is_err() {
                        barrier.abandon();
                    }
                    let _ = done.send((idx, res.ok()));
                });
            match spawned {
                Ok(h) => handles.push((name, h)),
                Err(source) => {
                    // the threads already spawned see the closed gate and return
                    drop(go_sender);
                    for (_, h) in handles {
                        let _ = h.join();
                    }
                    return Err(LockstepError::Spawn { name, source });
                }
            }
        }
        drop(done_sender);
        for _ in 0..agents {
            let _ = go_sender.send(());
        }

        let names: Vec<String> = handles.iter().map(|(n, _)| n.clone()).collect();
        let mut results: Vec<Option<AgentStats>> = vec![None; agents];
        let panicked = collect_results(&done_receiver, &names, &mut results);
        for (_, h) in handles {
            let _ = h.join();
        }
        if let Some(name) = panicked {
            warn!("agent {} panicked, team stopped at step {}", name, self.clock.step());
            return Err(LockstepError::AgentPanicked(name));
        }
        let stats: Vec<AgentStats> = results.into_iter().flatten().collect();
        for s in stats.iter() {
            debug!("agent {} finished after {} steps", s.name, s.steps);
        }
        info!("team finished at step {}", self.clock.step());
        Ok(stats)
    }
}

// waits for every agent and returns the name of the first one that panicked
fn collect_results(
    done_receiver: &Receiver<(usize, Option<AgentStats>)>,
    names: &[String],
    results: &mut [Option<AgentStats>],
) -> Option<String> {
    let mut panicked = None;
    for (idx, res) in done_receiver.iter().take(names.len()) {
        match res {
            Some(stats) => results[idx] = Some(stats),
            None => {
                panicked.get_or_insert_with(|| names[idx].clone());
            }
        }
    }
    panicked
}
