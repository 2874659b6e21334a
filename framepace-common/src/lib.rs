use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;
pub mod metric;

pub use config::{AnalysisConfig, DEFAULT_TIERS};
pub use metric::{check_parameter, Metric, DEFAULT_PARAMETERS, MAX_PARAMETER};

/// Error types for frame-pacing analysis
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum PacingError {
    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    #[error("Invalid percentile parameter: {0}")]
    InvalidPercentile(f64),

    #[error("Need at least {required} samples, got {actual}")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("No runs to rank")]
    NoRuns,

    #[error("Run {0} appears more than once")]
    DuplicateRun(String),

    #[error("Run {run} does not share metric {metric} with the other runs")]
    InconsistentMetricSet { run: String, metric: String },

    #[error("Run {run}: {source}")]
    RunFailed {
        run: String,
        source: Box<PacingError>,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for frame-pacing analysis
pub type Result<T> = std::result::Result<T, PacingError>;
