use lockstep::LockstepError;

#[derive(thiserror::Error, Debug)]
pub enum SimError {
    #[error("Config: end year {end} must be after start year {start}")]
    InvalidYears { start: i32, end: i32 },

    #[error("Config: initial {name} must not be negative, got {value}")]
    NegativeInitial { name: &'static str, value: f64 },

    #[error("Config: unknown output format {0:?}, expected csv or text")]
    UnknownFormat(String),

    #[error("Config: unknown barrier {0:?}, expected spin or parking")]
    UnknownBarrier(String),

    #[error("Team: {0}")]
    Team(#[from] LockstepError),

    #[error("Report: {0}")]
    Report(#[from] std::io::Error),

    #[error("Metrics: {0}")]
    Metrics(String),
}
