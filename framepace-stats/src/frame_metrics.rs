use framepace_common::{check_parameter, Metric, PacingError, Result, MAX_PARAMETER};

use crate::record::{FrameMetricsRecord, MetricValue};
use crate::samples::SampleSet;

const MS_PER_SECOND: f64 = 1000.0;

/// Single-run frame-rate statistics over a frozen set of intervals.
///
/// Rates are derived from intervals (`1000 / ms`), so the slowest frame is the
/// largest interval. Percentile and lows both select from the slowest end; the
/// former counts frames, the latter counts elapsed time.
#[derive(Debug, Clone)]
pub struct FrameMetrics {
    /// Intervals sorted descending, slowest frame first.
    sorted_desc: Vec<f64>,
    /// Instantaneous rate of every frame, in capture order.
    rates: Vec<f64>,
    total_ms: f64,
}

impl FrameMetrics {
    pub fn new(samples: &SampleSet) -> Self {
        let mut sorted_desc = samples.as_slice().to_vec();
        sorted_desc.sort_unstable_by(|a, b| b.total_cmp(a));
        let rates = samples.as_slice().iter().map(|&ms| MS_PER_SECOND / ms).collect();
        Self { sorted_desc, rates, total_ms: samples.total_ms() }
    }

    /// Validate raw intervals and compute over them.
    pub fn from_samples(samples: Vec<f64>) -> Result<Self> {
        Ok(Self::new(&SampleSet::new(samples)?))
    }

    pub fn count(&self) -> usize {
        self.sorted_desc.len()
    }

    /// Frame count over total elapsed time, not the mean of per-frame rates.
    pub fn average(&self) -> f64 {
        MS_PER_SECOND / (self.total_ms / self.count() as f64)
    }

    pub fn maximum(&self) -> f64 {
        MS_PER_SECOND / self.fastest()
    }

    pub fn minimum(&self) -> f64 {
        MS_PER_SECOND / self.slowest()
    }

    /// Rate of the interval at index `ceil(p/100 * n) - 1` of the slowest-first
    /// ordering, clamped into `[0, n - 1]`.
    pub fn percentile(&self, p: f64) -> Result<f64> {
        let p = check_parameter(p)?.min(MAX_PARAMETER);
        let n = self.count();
        let rank = (p / 100.0 * n as f64).ceil() as usize;
        let index = rank.saturating_sub(1).min(n - 1);
        Ok(MS_PER_SECOND / self.sorted_desc[index])
    }

    /// Rate of the frame at which the slowest frames first account for `p`% of
    /// total captured time.
    pub fn lows(&self, p: f64) -> Result<f64> {
        let p = check_parameter(p)?;
        if p >= MAX_PARAMETER {
            return Ok(self.minimum());
        }

        let threshold = p / 100.0 * self.total_ms;
        let mut running_ms = 0.0;
        for &ms in &self.sorted_desc {
            running_ms += ms;
            if running_ms >= threshold {
                return Ok(MS_PER_SECOND / ms);
            }
        }
        // Rounding in the running sum can leave it a hair under the threshold.
        Ok(self.maximum())
    }

    /// Sample standard deviation (divisor `n - 1`) of the per-frame rates
    /// around their arithmetic mean.
    pub fn stdev(&self) -> Result<f64> {
        let n = self.rates.len();
        if n < 2 {
            return Err(PacingError::InsufficientSamples { required: 2, actual: n });
        }
        // Rates are scaled into (0, 1] so squaring cannot overflow.
        let scale = self.maximum();
        let mean = self.rates.iter().map(|r| r / scale).sum::<f64>() / n as f64;
        let squared_deviations: f64 = self.rates.iter().map(|r| (r / scale - mean).powi(2)).sum();
        Ok((squared_deviations / (n - 1) as f64).sqrt() * scale)
    }

    pub fn value(&self, metric: &Metric) -> Result<f64> {
        match *metric {
            Metric::Maximum => Ok(self.maximum()),
            Metric::Average => Ok(self.average()),
            Metric::Minimum => Ok(self.minimum()),
            Metric::Stdev => self.stdev(),
            Metric::Percentile(p) => self.percentile(p),
            Metric::Lows(p) => self.lows(p),
        }
    }

    /// Evaluate `metrics` in order. The first failing metric aborts the record.
    pub fn record(&self, metrics: &[Metric]) -> Result<FrameMetricsRecord> {
        let entries = metrics
            .iter()
            .map(|metric| Ok(MetricValue { metric: *metric, value: self.value(metric)? }))
            .collect::<Result<Vec<_>>>()?;
        Ok(FrameMetricsRecord::new(entries))
    }

    fn slowest(&self) -> f64 {
        self.sorted_desc[0]
    }

    fn fastest(&self) -> f64 {
        self.sorted_desc[self.sorted_desc.len() - 1]
    }
}
