use std::thread;

use framepace_common::{Metric, PacingError, Result};

use crate::frame_metrics::FrameMetrics;
use crate::ranker::RunMetrics;
use crate::samples::SampleSet;

/// A run's identifier and its validated capture.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSamples {
    pub run_id: String,
    pub samples: SampleSet,
}

/// Compute every run's record on its own thread and wait for all of them.
///
/// Output order matches `runs`. If any run fails, the error of the first
/// failing run in input order is returned.
pub fn compute_records(runs: &[RunSamples], metrics: &[Metric]) -> Result<Vec<RunMetrics>> {
    let results: Vec<Result<RunMetrics>> = thread::scope(|scope| {
        let handles: Vec<_> = runs
            .iter()
            .map(|run| scope.spawn(move || compute_run(run, metrics)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });
    results.into_iter().collect()
}

/// Compute one run's record, attaching the run id to any failure.
pub fn compute_run(run: &RunSamples, metrics: &[Metric]) -> Result<RunMetrics> {
    FrameMetrics::new(&run.samples)
        .record(metrics)
        .map(|record| RunMetrics { run_id: run.run_id.clone(), record })
        .map_err(|e| PacingError::RunFailed { run: run.run_id.clone(), source: Box::new(e) })
}
