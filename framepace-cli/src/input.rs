use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use framepace_common::{AnalysisConfig, PacingError};
use framepace_stats::{RunSamples, SampleSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Captures for every run, as read from the input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureFile {
    pub runs: Vec<CaptureRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureRun {
    pub id: String,
    /// Frame intervals in milliseconds.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub samples: Vec<f64>,
    /// Repeated trials of the same run, appended after `samples`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trials: Vec<Vec<f64>>,
}

impl CaptureRun {
    /// Validate every trial and concatenate them into one sample set.
    pub fn into_run_samples(self) -> framepace_common::Result<RunSamples> {
        let CaptureRun { id, samples, trials } = self;
        // Empty `samples` only drops out when trials carry the captures.
        let leading = (!samples.is_empty() || trials.is_empty()).then_some(samples);

        let aggregated = leading
            .into_iter()
            .chain(trials)
            .map(SampleSet::new)
            .collect::<framepace_common::Result<Vec<_>>>()
            .and_then(SampleSet::aggregate);

        match aggregated {
            Ok(samples) => Ok(RunSamples { run_id: id, samples }),
            Err(e) => Err(PacingError::RunFailed { run: id, source: Box::new(e) }),
        }
    }
}

impl CaptureFile {
    pub fn into_runs(self) -> framepace_common::Result<Vec<RunSamples>> {
        self.runs.into_iter().map(CaptureRun::into_run_samples).collect()
    }
}

pub fn load_capture(path: &Path) -> Result<CaptureFile> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading capture file {}", path.display()))?;
    let capture: CaptureFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing capture file {}", path.display()))?;
    debug!(runs = capture.runs.len(), path = %path.display(), "capture file loaded");
    Ok(capture)
}

/// Read a JSON config, or fall back to the defaults when no path is given.
/// The result is not validated here.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))
}

/// Order runs by id: numerically when every id is an integer (CPU indices),
/// otherwise lexicographically.
pub fn sort_runs(runs: &mut [RunSamples]) {
    let all_numeric = runs.iter().all(|r| r.run_id.parse::<u64>().is_ok());
    if all_numeric {
        runs.sort_by_key(|r| r.run_id.parse::<u64>().unwrap_or(u64::MAX));
    } else {
        runs.sort_by(|a, b| a.run_id.cmp(&b.run_id));
    }
}
