use framepace_common::{PacingError, Result};

/// Frame intervals of one run in milliseconds, in capture order.
///
/// Construction guarantees the sequence is non-empty, every interval is
/// finite and strictly positive with a finite rate (`1000 / ms`), and the
/// total captured time is finite.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet(Vec<f64>);

impl SampleSet {
    pub fn new(samples: Vec<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(PacingError::InvalidSample("sample sequence is empty".to_string()));
        }
        if let Some((index, value)) = samples
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, ms)| !is_valid_interval(ms))
        {
            return Err(PacingError::InvalidSample(format!("sample {index} is {value} ms")));
        }
        check_total(samples)
    }

    /// Concatenate the captures of several trials of the same run, in trial order.
    pub fn aggregate(trials: impl IntoIterator<Item = SampleSet>) -> Result<Self> {
        let samples: Vec<f64> = trials.into_iter().flat_map(|t| t.0).collect();
        if samples.is_empty() {
            return Err(PacingError::InvalidSample("no trials to aggregate".to_string()));
        }
        check_total(samples)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn count(&self) -> usize {
        self.0.len()
    }

    /// Total captured time in milliseconds.
    pub fn total_ms(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl TryFrom<Vec<f64>> for SampleSet {
    type Error = PacingError;

    fn try_from(samples: Vec<f64>) -> Result<Self> {
        Self::new(samples)
    }
}

/// Positive, finite, and long enough that its rate `1000 / ms` is finite.
fn is_valid_interval(ms: f64) -> bool {
    ms.is_finite() && ms > 0.0 && (1000.0 / ms).is_finite()
}

fn check_total(samples: Vec<f64>) -> Result<SampleSet> {
    let total: f64 = samples.iter().sum();
    if !total.is_finite() {
        return Err(PacingError::InvalidSample(format!("total captured time is {total} ms")));
    }
    Ok(SampleSet(samples))
}
