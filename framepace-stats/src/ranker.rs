use std::collections::HashSet;

use framepace_common::{AnalysisConfig, Metric, PacingError, Result, DEFAULT_TIERS};
use serde::Serialize;

use crate::record::FrameMetricsRecord;

/// One run's computed metrics, tagged with the run identifier (e.g. a CPU index).
#[derive(Debug, Clone, PartialEq)]
pub struct RunMetrics {
    pub run_id: String,
    pub record: FrameMetricsRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCell {
    /// Displayed magnitude; stdev is shown as a positive number.
    pub value: f64,
    /// `value` rendered with two decimals.
    pub text: String,
    /// `Some(0)` for the best value, `Some(1)` for the next distinct value, and
    /// so on up to the ranker's tier count. `None` when unranked.
    pub tier: Option<usize>,
}

impl RankedCell {
    pub fn is_best(&self) -> bool {
        self.tier == Some(0)
    }
}

/// One metric across all runs, in run order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMetric {
    pub metric: Metric,
    pub label: String,
    pub cells: Vec<(String, RankedCell)>,
}

impl RankedMetric {
    /// Runs holding the best value. Ties all appear.
    pub fn best_runs(&self) -> Vec<&str> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.is_best())
            .map(|(run_id, _)| run_id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow {
    pub run_id: String,
    pub cells: Vec<RankedCell>,
}

/// Rows are runs in input order, columns are metrics in the first run's order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTable {
    /// Identifier column label followed by one label per metric.
    pub header: Vec<String>,
    pub rows: Vec<RankedRow>,
    pub columns: Vec<RankedMetric>,
}

impl RankedTable {
    pub fn column(&self, metric: &Metric) -> Option<&RankedMetric> {
        self.columns.iter().find(|c| &c.metric == metric)
    }

    pub fn row(&self, run_id: &str) -> Option<&RankedRow> {
        self.rows.iter().find(|r| r.run_id == run_id)
    }

    /// Row-major text: the header followed by one row per run, each starting
    /// with the run identifier.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut rows = vec![self.header.clone()];
        rows.extend(self.rows.iter().map(|row| {
            std::iter::once(row.run_id.clone())
                .chain(row.cells.iter().map(|c| c.text.clone()))
                .collect()
        }));
        rows
    }
}

/// Compares runs metric by metric and marks the leaders.
///
/// Values are compared as displayed, rounded to two decimals, so two runs that
/// print the same number tie.
#[derive(Debug, Clone)]
pub struct RunRanker {
    tiers: usize,
    id_label: String,
}

impl Default for RunRanker {
    fn default() -> Self {
        Self::new(DEFAULT_TIERS)
    }
}

impl RunRanker {
    pub fn new(tiers: usize) -> Self {
        Self { tiers, id_label: "CPU".to_string() }
    }

    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self { tiers: config.tiers, id_label: config.id_label.clone() }
    }

    pub fn with_id_label(mut self, label: impl Into<String>) -> Self {
        self.id_label = label.into();
        self
    }

    pub fn rank(&self, runs: &[RunMetrics]) -> Result<RankedTable> {
        if self.tiers == 0 {
            return Err(PacingError::InvalidConfig("tiers must be at least 1".to_string()));
        }
        let first = runs.first().ok_or(PacingError::NoRuns)?;
        check_run_ids(runs)?;
        check_metric_sets(runs)?;

        let metrics: Vec<Metric> = first.record.metrics().copied().collect();
        let mut columns = Vec::with_capacity(metrics.len());

        for metric in &metrics {
            let values: Vec<f64> = runs
                .iter()
                .map(|run| {
                    run.record.get(metric).ok_or_else(|| PacingError::InconsistentMetricSet {
                        run: run.run_id.clone(),
                        metric: metric.as_name(),
                    })
                })
                .collect::<Result<_>>()?;

            let keys: Vec<f64> = values.iter().map(|&v| ranking_key(metric, v)).collect();
            let tiers = assign_tiers(&keys, self.tiers);

            let cells = runs
                .iter()
                .zip(values)
                .zip(tiers)
                .map(|((run, value), tier)| {
                    let cell = RankedCell { value: value.abs(), text: format_value(value), tier };
                    (run.run_id.clone(), cell)
                })
                .collect();

            columns.push(RankedMetric { metric: *metric, label: metric.label(), cells });
        }

        let rows = runs
            .iter()
            .enumerate()
            .map(|(i, run)| RankedRow {
                run_id: run.run_id.clone(),
                cells: columns.iter().map(|c| c.cells[i].1.clone()).collect(),
            })
            .collect();

        let mut header = vec![self.id_label.clone()];
        header.extend(metrics.iter().map(Metric::label));

        Ok(RankedTable { header, rows, columns })
    }
}

/// Two-decimal rendering of the magnitude. Uses `{:.2}`, which rounds the exact
/// binary value to nearest; identical inputs always print identically.
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value.abs())
}

/// The value compared across runs: rounded as displayed, and negated for
/// metrics where lower is better so that larger always wins.
pub fn ranking_key(metric: &Metric, value: f64) -> f64 {
    let signed = if metric.lower_is_better() { -value } else { value };
    let rounded = format!("{signed:.2}");
    rounded.parse().unwrap_or(signed)
}

/// Tier of each key: the position of its value among the top distinct values,
/// largest first.
///
/// At most `tiers` distinct values are ranked, never more than `keys.len() - 1`,
/// and the smallest distinct value is left unranked unless every key is equal.
/// A single key is never ranked.
pub fn assign_tiers(keys: &[f64], tiers: usize) -> Vec<Option<usize>> {
    let mut distinct = keys.to_vec();
    distinct.sort_unstable_by(|a, b| b.total_cmp(a));
    distinct.dedup();

    let ranked = tiers
        .min(keys.len().saturating_sub(1))
        .min(distinct.len().saturating_sub(1).max(1));
    let top = &distinct[..ranked.min(distinct.len())];

    keys.iter().map(|k| top.iter().position(|t| t == k)).collect()
}

fn check_run_ids(runs: &[RunMetrics]) -> Result<()> {
    let mut seen = HashSet::new();
    for run in runs {
        if !seen.insert(run.run_id.as_str()) {
            return Err(PacingError::DuplicateRun(run.run_id.clone()));
        }
    }
    Ok(())
}

/// Every run must carry exactly the first run's metrics, each once.
fn check_metric_sets(runs: &[RunMetrics]) -> Result<()> {
    for run in runs {
        let entries = run.record.entries();
        let repeated = entries
            .iter()
            .enumerate()
            .find(|(i, e)| entries[..*i].iter().any(|prev| prev.metric == e.metric));
        if let Some((_, entry)) = repeated {
            return Err(PacingError::InconsistentMetricSet {
                run: run.run_id.clone(),
                metric: entry.metric.as_name(),
            });
        }
    }

    let reference = &runs[0].record;
    for run in &runs[1..] {
        let missing = reference.metrics().find(|m| !run.record.contains(m));
        let extra = run.record.metrics().find(|m| !reference.contains(m));
        if let Some(metric) = missing.or(extra) {
            return Err(PacingError::InconsistentMetricSet {
                run: run.run_id.clone(),
                metric: metric.as_name(),
            });
        }
    }
    Ok(())
}
