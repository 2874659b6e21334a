use serde::{Deserialize, Serialize};

use crate::metric::{check_parameter, MAX_PARAMETER};
use crate::{Metric, PacingError, Result};

/// Number of highlight tiers (first and second place).
pub const DEFAULT_TIERS: usize = 2;

/// Which metrics to compute and how to rank them.
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub metrics: Vec<Metric>,
    pub tiers: usize,
    /// Heading of the run identifier column.
    pub id_label: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            metrics: Metric::default_set(),
            tiers: DEFAULT_TIERS,
            id_label: "CPU".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Check every field once so the statistics code can trust the values it is handed.
    pub fn validate(&self) -> Result<()> {
        if self.metrics.is_empty() {
            return Err(PacingError::InvalidConfig("no metrics requested".to_string()));
        }
        if self.tiers == 0 {
            return Err(PacingError::InvalidConfig("tiers must be at least 1".to_string()));
        }
        for (i, metric) in self.metrics.iter().enumerate() {
            if let Some(p) = metric.parameter() {
                check_parameter(p).map_err(|_| invalid_parameter(metric))?;
                if p > MAX_PARAMETER {
                    return Err(invalid_parameter(metric));
                }
            }
            if self.metrics[..i].contains(metric) {
                return Err(PacingError::InvalidConfig(format!(
                    "metric {} requested more than once",
                    metric.as_name()
                )));
            }
        }
        Ok(())
    }
}

fn invalid_parameter(metric: &Metric) -> PacingError {
    PacingError::InvalidConfig(format!(
        "{} is outside (0, {MAX_PARAMETER}]",
        metric.as_name()
    ))
}
