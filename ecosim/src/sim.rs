use std::sync::Arc;

use chrono::{DateTime, Utc};
use lockstep::{AgentStats, StepClock, Team};
use log::{debug, info};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::agents::{Deer, Grain, Watcher, Wolf};
use crate::def::{SimConfig, AGENT_COUNT};
use crate::error::SimError;
use crate::report::{ReportSink, Reporter};
use crate::state::{Calendar, Snapshot, World};
use crate::utils::MetricsRecorder;
use crate::weather::Weather;

#[derive(Debug, Clone)]
pub struct SimOutcome {
    /// Seed actually used for the weather
    pub seed: u64,
    pub months: u64,
    pub rows: u64,
    /// World after the last committed month
    pub last: Snapshot,
    pub agents: Vec<AgentStats>,
    pub started: DateTime<Utc>,
    pub finished: DateTime<Utc>,
}

pub fn resolve_seed(seed: u64) -> u64 {
    if seed != 0 {
        return seed;
    }
    Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
}

/// Runs the four agents in lockstep from January of the start year until the calendar reaches
/// January of the end year, sending one row per month to `reporter`.
pub fn run_simulation<R: Reporter + 'static>(
    config: &SimConfig,
    reporter: R,
) -> Result<SimOutcome, SimError> {
    config.validate()?;
    let started = Utc::now();
    let seed = resolve_seed(config.seed);
    let mut weather = Weather::new(seed);
    let first = weather.sample(Calendar {
        year: config.start_year,
        month: 0,
    });
    let world = Arc::new(World::new(config, first));
    let sink = Arc::new(Mutex::new(ReportSink::new(reporter)));
    let clock = Arc::new(StepClock::new(config.months()));

    info!(
        "simulating {}..{} with {} barrier, seed {}",
        config.start_year, config.end_year, config.barrier, seed
    );
    let mut team = Team::new(config.barrier.build(AGENT_COUNT), clock);
    team.add(Grain::new(world.clone()))
        .add(Deer::new(world.clone()))
        .add(Wolf::new(world.clone()))
        .add_clock_owner(Watcher::new(world.clone(), weather, sink.clone()));
    let agents = team.run()?;

    let mut sink = sink.lock();
    if let Some(e) = sink.take_error() {
        return Err(e.into());
    }
    sink.flush()?;
    let last = world.snapshot();
    debug!("final state {:?}", last);
    Ok(SimOutcome {
        seed,
        months: config.months(),
        rows: sink.rows(),
        last,
        agents,
        started,
        finished: Utc::now(),
    })
}

/// JSON run summary: config, timestamps, per-agent steps, final state and metrics.
pub fn summary_json(
    config: &SimConfig,
    outcome: &SimOutcome,
    recorder: Option<&MetricsRecorder>,
) -> Value {
    let duration_secs =
        (outcome.finished - outcome.started).num_milliseconds() as f64 / 1000.0;
    let agents: Vec<Value> = outcome
        .agents
        .iter()
        .map(|a| json!({"name": a.name, "steps": a.steps, "owns_clock": a.owns_clock}))
        .collect();
    json!({
        "config": config,
        "seed": outcome.seed,
        "command": std::env::args().collect::<Vec<_>>().join(" "),
        "timestamps": {
            "start": outcome.started.to_rfc3339(),
            "end": outcome.finished.to_rfc3339(),
            "duration_seconds": duration_secs
        },
        "months": outcome.months,
        "rows": outcome.rows,
        "agents": agents,
        "final": outcome.last,
        "metrics": recorder.map(|r| r.snapshot_metrics()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;

    #[test]
    fn test_resolve_seed() {
        assert_eq!(resolve_seed(17), 17);
        assert_ne!(resolve_seed(0), 0);
    }

    #[test]
    fn test_one_year() {
        let config = SimConfig {
            end_year: 2026,
            seed: 5,
            ..SimConfig::default()
        };
        let memory = MemoryReporter::new();
        let outcome = run_simulation(&config, memory.clone()).unwrap();
        assert_eq!(outcome.months, 12);
        assert_eq!(outcome.rows, 12);
        assert_eq!(memory.len(), 12);
        assert_eq!(outcome.last.calendar, Calendar { year: 2026, month: 0 });
        assert_eq!(outcome.agents.len(), AGENT_COUNT);
        assert!(outcome.agents.iter().all(|a| a.steps == 12));
        let last_row = memory.rows()[11];
        assert_eq!(last_row.deer, outcome.last.deer);
        assert_eq!(last_row.height, outcome.last.height);
    }

    #[test]
    fn test_summary_json() {
        let config = SimConfig {
            end_year: 2026,
            seed: 5,
            ..SimConfig::default()
        };
        let outcome = run_simulation(&config, MemoryReporter::new()).unwrap();
        let v = summary_json(&config, &outcome, None);
        assert_eq!(v["seed"], 5);
        assert_eq!(v["rows"], 12);
        assert_eq!(v["config"]["barrier"], "spin");
        assert_eq!(v["agents"].as_array().unwrap().len(), 4);
        assert_eq!(v["agents"][3]["name"], "watcher");
        assert_eq!(v["agents"][3]["owns_clock"], true);
        assert!(v["metrics"].is_null());
    }
}
