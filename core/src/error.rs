use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed date '{value}'")]
    DateParse { value: String },

    #[error("Unknown {field} filter value '{value}'")]
    InvalidFilter { field: &'static str, value: String },

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: chrono::NaiveDate, end: chrono::NaiveDate },

    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DashResult<T> = Result<T, DashError>;
