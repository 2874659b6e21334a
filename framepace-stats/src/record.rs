use framepace_common::Metric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricValue {
    pub metric: Metric,
    /// Frames per second.
    pub value: f64,
}

/// Computed metrics for one run, in the order they were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameMetricsRecord {
    entries: Vec<MetricValue>,
}

impl FrameMetricsRecord {
    pub fn new(entries: Vec<MetricValue>) -> Self {
        Self { entries }
    }

    pub fn get(&self, metric: &Metric) -> Option<f64> {
        self.entries.iter().find(|e| &e.metric == metric).map(|e| e.value)
    }

    pub fn contains(&self, metric: &Metric) -> bool {
        self.entries.iter().any(|e| &e.metric == metric)
    }

    pub fn metrics(&self) -> impl Iterator<Item = &Metric> + '_ {
        self.entries.iter().map(|e| &e.metric)
    }

    pub fn entries(&self) -> &[MetricValue] {
        &self.entries
    }
}
