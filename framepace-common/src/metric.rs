use serde::{Deserialize, Serialize};

use crate::{PacingError, Result};

/// Percentile and lows parameters computed when no config overrides them.
pub const DEFAULT_PARAMETERS: [f64; 4] = [1.0, 0.1, 0.01, 0.005];

/// Upper bound accepted for a percentile or lows parameter at the config boundary.
pub const MAX_PARAMETER: f64 = 100.0;

/// A single statistic derived from a run's frame intervals.
///
/// Every metric is a frame rate in frames per second. `Percentile` and `Lows`
/// carry their parameter `p`, a percentage in `(0, 100]`.
///
/// | Metric          | Text form       | Label         |
/// |-----------------|-----------------|---------------|
/// | `Maximum`       | `max`           | `Max`         |
/// | `Average`       | `avg`           | `Avg`         |
/// | `Minimum`       | `min`           | `Min`         |
/// | `Stdev`         | `stdev`         | `STDEV`       |
/// | `Percentile(1)` | `percentile:1`  | `1 %ile`      |
/// | `Lows(0.1)`     | `lows:0.1`      | `0.1% Low`    |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Maximum,
    Average,
    Minimum,
    Stdev,
    Percentile(f64),
    Lows(f64),
}

impl Metric {
    /// Max, Avg, Min, STDEV, then percentile and lows at every default parameter.
    pub fn default_set() -> Vec<Metric> {
        let mut metrics = vec![Metric::Maximum, Metric::Average, Metric::Minimum, Metric::Stdev];
        metrics.extend(DEFAULT_PARAMETERS.iter().map(|&p| Metric::Percentile(p)));
        metrics.extend(DEFAULT_PARAMETERS.iter().map(|&p| Metric::Lows(p)));
        metrics
    }

    /// Parse the text form, e.g. `max`, `stdev`, `percentile:0.1`, `lows:1`.
    pub fn from_name(name: &str) -> Option<Metric> {
        match name.trim().to_ascii_lowercase().as_str() {
            "max" | "maximum" => Some(Metric::Maximum),
            "avg" | "average" => Some(Metric::Average),
            "min" | "minimum" => Some(Metric::Minimum),
            "stdev" => Some(Metric::Stdev),
            other => {
                let (kind, param) = other.split_once(':')?;
                let p: f64 = param.trim().parse().ok()?;
                match kind.trim() {
                    "percentile" => Some(Metric::Percentile(p)),
                    "lows" => Some(Metric::Lows(p)),
                    _ => None,
                }
            }
        }
    }

    pub fn as_name(&self) -> String {
        match self {
            Metric::Maximum => "max".to_string(),
            Metric::Average => "avg".to_string(),
            Metric::Minimum => "min".to_string(),
            Metric::Stdev => "stdev".to_string(),
            Metric::Percentile(p) => format!("percentile:{p}"),
            Metric::Lows(p) => format!("lows:{p}"),
        }
    }

    /// Column heading used in summary tables.
    pub fn label(&self) -> String {
        match self {
            Metric::Maximum => "Max".to_string(),
            Metric::Average => "Avg".to_string(),
            Metric::Minimum => "Min".to_string(),
            Metric::Stdev => "STDEV".to_string(),
            Metric::Percentile(p) => format!("{p} %ile"),
            Metric::Lows(p) => format!("{p}% Low"),
        }
    }

    pub fn parameter(&self) -> Option<f64> {
        match self {
            Metric::Percentile(p) | Metric::Lows(p) => Some(*p),
            _ => None,
        }
    }

    /// `true` for metrics where a smaller value ranks higher.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, Metric::Stdev)
    }
}

/// Reject a percentile or lows parameter that is not finite or not positive.
///
/// Values above 100 pass; callers clamp them, see `percentile` and `lows`.
pub fn check_parameter(p: f64) -> Result<f64> {
    if p.is_finite() && p > 0.0 {
        Ok(p)
    } else {
        Err(PacingError::InvalidPercentile(p))
    }
}
