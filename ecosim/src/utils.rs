use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use metrics_util::debugging::{DebugValue, DebuggingRecorder, Snapshotter};
use serde::Serialize;

use crate::error::SimError;

pub fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MetricDump {
    pub name: String,
    pub unit: Option<String>,
    pub description: Option<String>,
    /// Counters and gauges only; histograms are not recorded by this crate.
    pub value: Option<f64>,
}

/// Process-wide `DebuggingRecorder` plus a snapshot reader.
pub struct MetricsRecorder {
    snapshotter: Snapshotter,
}

impl MetricsRecorder {
    /// Installs the global recorder. Fails if any recorder is already installed.
    pub fn install() -> Result<Self, SimError> {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        recorder
            .install()
            .map_err(|e| SimError::Metrics(e.to_string()))?;
        Ok(Self { snapshotter })
    }

    pub fn snapshot_metrics(&self) -> HashMap<String, MetricDump> {
        self.snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .map(|(ckey, unit, description, value)| {
                let name = ckey.key().name().to_owned();
                let dump = MetricDump {
                    name: name.clone(),
                    unit: unit.map(|u| u.as_str().to_owned()),
                    description: description.map(|d| d.to_string()),
                    value: numeric(&value),
                };
                (name, dump)
            })
            .collect()
    }

    /// Take a fresh snapshot and return a map from metric name to its numeric value.
    pub fn snapshot_values(&self) -> HashMap<String, f64> {
        self.snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(ckey, _unit, _descr, value)| {
                numeric(&value).map(|v| (ckey.key().name().to_owned(), v))
            })
            .collect()
    }

    /// Current value of `name`, from a fresh snapshot.
    pub fn get_value(&self, name: &str) -> Option<f64> {
        self.snapshot_values().remove(name)
    }
}

fn numeric(value: &DebugValue) -> Option<f64> {
    match value {
        DebugValue::Counter(v) => Some(*v as f64),
        DebugValue::Gauge(v) => Some(v.into_inner()),
        DebugValue::Histogram(_) => None,
    }
}

/// Writes `value` as pretty JSON, creating the parent directory if needed.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), SimError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    let json_string =
        serde_json::to_string_pretty(value).map_err(|e| SimError::Report(e.into()))?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_json_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("summary.json");
        write_json(&path, &json!({"months": 72})).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["months"], 72);
    }

    #[test]
    fn test_numeric() {
        assert_eq!(numeric(&DebugValue::Counter(7)), Some(7.0));
        assert_eq!(numeric(&DebugValue::Histogram(vec![])), None);
    }
}
