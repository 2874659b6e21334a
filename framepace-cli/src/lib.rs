use framepace_common::{AnalysisConfig, Result};
use framepace_stats::{compute_records, RankedTable, RunRanker, RunSamples};

pub mod input;
pub mod render;

/// Compute every run's metrics, then rank them against each other.
pub fn analyze(runs: &[RunSamples], config: &AnalysisConfig) -> Result<RankedTable> {
    let records = compute_records(runs, &config.metrics)?;
    RunRanker::from_config(config).rank(&records)
}
