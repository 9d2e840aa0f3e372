use std::sync::Arc;

use lockstep::Agent;
use log::trace;

use crate::report::{MonthRow, Reporter, SharedSink};
use crate::state::{Calendar, Climate, World};
use crate::weather::Weather;

/// Owns the calendar and the weather and reports every finished month.
///
/// The next month and its weather are prepared in compute and published in commit, like any
/// other agent. The month being replaced is kept aside so report can print it together with
/// the populations the other agents committed for it.
pub struct Watcher<R: Reporter> {
    world: Arc<World>,
    weather: Weather,
    sink: SharedSink<R>,
    finished: Option<(Calendar, Climate)>,
}

impl<R: Reporter> Watcher<R> {
    pub fn new(world: Arc<World>, weather: Weather, sink: SharedSink<R>) -> Self {
        Self {
            world,
            weather,
            sink,
            finished: None,
        }
    }
}

impl<R: Reporter> Agent for Watcher<R> {
    type Next = (Calendar, Climate);

    fn name(&self) -> &str {
        "watcher"
    }

    fn compute(&mut self) -> (Calendar, Climate) {
        let next = self.world.calendar().next();
        (next, self.weather.sample(next))
    }

    fn commit(&mut self, (calendar, climate): (Calendar, Climate)) {
        self.finished = Some((self.world.calendar(), self.world.climate()));
        self.world.set_calendar(calendar);
        self.world.set_climate(climate);
    }

    fn report(&mut self) {
        let Some((calendar, climate)) = self.finished.take() else {
            return;
        };
        let w = &self.world;
        let row = MonthRow::new(calendar, climate, w.height(), w.deer(), w.wolves());
        trace!("{}-{:02} {}", row.year, row.month + 1, row.to_csv());
        self.sink.lock().emit(&row);

        metrics::counter!("ecosim.months").increment(1);
        metrics::gauge!("ecosim.height").set(row.height as f64);
        metrics::gauge!("ecosim.deer").set(row.deer as f64);
        metrics::gauge!("ecosim.wolves").set(row.wolves as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::def::SimConfig;
    use crate::report::{MemoryReporter, ReportSink};
    use parking_lot::Mutex;

    #[test]
    fn test_watcher_reports_outgoing_month() {
        let config = SimConfig::default();
        let mut weather = Weather::new(3);
        let first = weather.sample(Calendar {
            year: 2025,
            month: 0,
        });
        let world = Arc::new(World::new(&config, first));
        let memory = MemoryReporter::new();
        let sink = Arc::new(Mutex::new(ReportSink::new(memory.clone())));
        let mut watcher = Watcher::new(world.clone(), weather, sink.clone());

        // report before any commit has nothing to say
        watcher.report();
        assert!(memory.is_empty());

        for _ in 0..13 {
            let next = watcher.compute();
            watcher.commit(next);
            world.set_deer(world.deer() + 1);
            watcher.report();
        }
        let rows = memory.rows();
        assert_eq!(rows.len(), 13);
        assert_eq!((rows[0].year, rows[0].month), (2025, 0));
        assert_eq!(rows[0].temp, first.temp);
        assert_eq!(rows[0].deer, 3);
        assert_eq!((rows[12].year, rows[12].month), (2026, 0));
        assert_eq!(world.calendar(), Calendar { year: 2026, month: 1 });
        assert_eq!(sink.lock().rows(), 13);
    }
}
