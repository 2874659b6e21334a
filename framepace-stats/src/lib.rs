//! Frame-pacing statistics for a single capture and the cross-run ranking built on them.

pub mod batch;
pub mod frame_metrics;
pub mod ranker;
pub mod record;
pub mod samples;

pub use batch::{compute_records, compute_run, RunSamples};
pub use frame_metrics::FrameMetrics;
pub use ranker::{RankedCell, RankedMetric, RankedRow, RankedTable, RunMetrics, RunRanker};
pub use record::{FrameMetricsRecord, MetricValue};
pub use samples::SampleSet;
