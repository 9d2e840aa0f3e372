use std::str::FromStr;

use clap::Parser;
use lockstep::BarrierKind;
use serde::Serialize;

use crate::def::{OutputFormat, SimConfig};
use crate::error::SimError;

#[derive(Parser, Debug, Serialize, Clone)]
#[command(about = "Grain, deer and wolves in lockstep, one thread per agent")]
pub struct SimCli {
    /// First simulated year; the run starts in its January
    #[arg(long, default_value_t = 2025)]
    pub start_year: i32,

    /// The run stops when the calendar reaches January of this year
    #[arg(long, default_value_t = 2031)]
    pub end_year: i32,

    #[arg(long, default_value_t = 2)]
    pub deer: i32,

    /// Initial grain height in inches
    #[arg(long, default_value_t = 5.0)]
    pub height: f32,

    #[arg(long, default_value_t = 1)]
    pub wolves: i32,

    /// Weather seed, 0 picks one from the clock
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Row format. Valid choices are "csv" and "text".
    #[arg(long, default_value = "csv")]
    pub format: String,

    /// Print a header line before the first CSV row
    #[arg(long)]
    pub header: bool,

    /// Barrier implementation. Valid choices are "spin" and "parking".
    #[arg(long, default_value = "spin")]
    pub barrier: String,

    /// Write a JSON run summary to this path
    #[arg(long, default_value = "")]
    pub summary: String,

    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl SimCli {
    pub fn to_config(&self) -> Result<SimConfig, SimError> {
        let format = OutputFormat::from_str(&self.format)
            .map_err(|_| SimError::UnknownFormat(self.format.clone()))?;
        let barrier = BarrierKind::from_str(&self.barrier)
            .map_err(|_| SimError::UnknownBarrier(self.barrier.clone()))?;
        let config = SimConfig {
            start_year: self.start_year,
            end_year: self.end_year,
            deer: self.deer,
            height: self.height,
            wolves: self.wolves,
            seed: self.seed,
            format,
            header: self.header,
            barrier,
        };
        config.validate()?;
        Ok(config)
    }
}
