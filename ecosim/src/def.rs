use lockstep::BarrierKind;
use serde::{Serialize, Serializer};

use crate::error::SimError;

// grain, deer, wolf and the watcher
pub const AGENT_COUNT: usize = 4;

pub const MONTHS_PER_YEAR: u32 = 12;

pub const GRAIN_GROWS_PER_MONTH: f32 = 12.0;
pub const ONE_DEER_EATS_PER_MONTH: f32 = 1.0;

pub const AVG_PRECIP_PER_MONTH: f32 = 7.0; // average
pub const AMP_PRECIP_PER_MONTH: f32 = 6.0; // plus or minus
pub const RANDOM_PRECIP: f32 = 2.0; // plus or minus noise

pub const AVG_TEMP: f32 = 60.0; // average
pub const AMP_TEMP: f32 = 20.0; // plus or minus
pub const RANDOM_TEMP: f32 = 10.0; // plus or minus noise

pub const MIDTEMP: f32 = 40.0;
pub const MIDPRECIP: f32 = 10.0;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    pub start_year: i32,
    // the run stops when the calendar reaches January of this year
    pub end_year: i32,
    pub deer: i32,
    pub height: f32,
    pub wolves: i32,
    pub seed: u64,
    pub format: OutputFormat,
    pub header: bool,
    #[serde(serialize_with = "serialize_display")]
    pub barrier: BarrierKind,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_year: 2025,
            end_year: 2031,
            deer: 2,
            height: 5.0,
            wolves: 1,
            seed: 0,
            format: OutputFormat::Csv,
            header: false,
            barrier: BarrierKind::Spin,
        }
    }
}

impl SimConfig {
    /// Number of simulated months, one phase step each.
    pub fn months(&self) -> u64 {
        let years = (self.end_year as i64 - self.start_year as i64).max(0) as u64;
        years * MONTHS_PER_YEAR as u64
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.end_year <= self.start_year {
            return Err(SimError::InvalidYears {
                start: self.start_year,
                end: self.end_year,
            });
        }
        let initial = [
            ("deer", self.deer as f64),
            ("height", self.height as f64),
            ("wolves", self.wolves as f64),
        ];
        if let Some((name, value)) = initial.into_iter().find(|(_, v)| *v < 0.0) {
            return Err(SimError::NegativeInitial { name, value });
        }
        Ok(())
    }
}

fn serialize_display<T: std::fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
